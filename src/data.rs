use alloy_primitives::{Address, B256, U256};
use chrono::{DateTime, Utc};

use crate::utils::parse_mint_amount;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Error,
}

/// A blocking message the user has to dismiss.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
    pub raised_at: DateTime<Utc>,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Info,
            message: message.into(),
            raised_at: Utc::now(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
            raised_at: Utc::now(),
        }
    }
}

/// Everything the screen shows. Rebuilt from the chain on every start.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SaleState {
    pub connected: bool,
    pub account: Option<Address>,
    pub is_owner: bool,
    /// True while any submitted transaction is unconfirmed
    pub loading: bool,
    pub pending_txs: Vec<B256>,
    /// `totalSupply()` in base units
    pub tokens_minted: U256,
    /// Caller's `balanceOf()` in base units
    pub token_balance: U256,
    /// NFTs held by the caller whose claim has not been used yet
    pub tokens_to_claim: U256,
    pub mint_input: String,
    pub notice: Option<Notice>,
    pub last_error: Option<String>,
    pub last_refreshed: Option<DateTime<Utc>>,
}

impl SaleState {
    pub fn mint_amount(&self) -> U256 {
        parse_mint_amount(&self.mint_input)
    }
}
