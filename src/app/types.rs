//! Type definitions for the application

use alloy_primitives::{Address, B256, U256};
use strum::Display;

/// The three state-changing calls the sale exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum WriteKind {
    Mint,
    Claim,
    Withdraw,
}

impl WriteKind {
    pub fn success_message(self) -> &'static str {
        match self {
            Self::Mint => "You have successfully minted a Token",
            Self::Claim => "You successfully claimed a Token",
            Self::Withdraw => "You successfully withdrew the collected funds",
        }
    }
}

/// Every state transition goes through one of these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Connected { account: Address },
    ConnectionFailed { reason: String },
    WrongNetwork { message: String },

    OwnerLoaded(bool),
    BalanceLoaded(U256),
    SupplyLoaded(U256),
    ClaimableLoaded(U256),

    MintInputPushed(char),
    MintInputPopped,

    TxSubmitted { kind: WriteKind, hash: B256 },
    TxConfirmed { kind: WriteKind, hash: B256 },
    /// `hash` is `None` when the write failed before reaching the chain.
    TxFailed { kind: WriteKind, hash: Option<B256>, reason: String },

    DismissNotice,
}
