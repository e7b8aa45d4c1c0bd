// Wallet connection: broker, handles and wallet-level errors

pub mod broker;
pub mod error;
pub mod handle;

pub use broker::{BrokerOptions, WalletBroker};
pub use error::{WalletError, as_wrong_network};
pub use handle::{PendingTransaction, ProviderHandle, SignerHandle, TransactionReceipt};
