use std::fmt;

use crate::utils::capitalize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WalletError {
    /// The wallet is on a different chain than the contracts.
    WrongNetwork {
        network: String,
        expected: u64,
        actual: u64,
    },
    /// No provider can be offered with the current broker options.
    NoProvider,
    /// The wallet did not expose any account.
    NoAccount,
}

impl WalletError {
    /// Message shown to the user in the blocking notice.
    pub fn user_message(&self) -> String {
        match self {
            WalletError::WrongNetwork { network, .. } => {
                format!("Switch to {} Network", capitalize(network))
            }
            other => other.to_string(),
        }
    }
}

impl fmt::Display for WalletError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WalletError::WrongNetwork {
                network,
                expected,
                actual,
            } => write!(
                f,
                "Wrong network: expected {network} (chain id {expected}), wallet is on chain id {actual}"
            ),
            WalletError::NoProvider => write!(f, "No wallet provider available"),
            WalletError::NoAccount => write!(f, "Wallet did not expose any account"),
        }
    }
}

impl std::error::Error for WalletError {}

/// The wrong-network error inside an `anyhow` chain, if that is what failed.
pub fn as_wrong_network(err: &anyhow::Error) -> Option<&WalletError> {
    err.chain()
        .filter_map(|cause| cause.downcast_ref::<WalletError>())
        .find(|e| matches!(e, WalletError::WrongNetwork { .. }))
}
