// Library exports for the Crypto Devs ICO client
pub mod app;
pub mod cli;
pub mod config;
pub mod contracts;
pub mod data;
pub mod rpc;
pub mod ui;
pub mod utils;
pub mod wallet;

// Re-export commonly used types
pub use app::{Action, App, WriteKind};
pub use cli::Cli;
pub use config::Settings;
pub use contracts::{NftContract, SaleContracts, TokenContract};
pub use data::{Notice, NoticeKind, SaleState};
pub use ui::render_ui;
pub use wallet::{BrokerOptions, WalletBroker, WalletError};
pub use utils::*;
