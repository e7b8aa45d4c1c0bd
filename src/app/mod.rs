// App module structure

pub mod types;
pub mod core;
pub mod reducer;
pub mod refresh;
pub mod transactions;
pub mod input;

// Re-export the main App struct and key types
pub use core::App;
pub use types::{Action, WriteKind};
