//! Which action the screen offers, derived from state alone

use alloy_primitives::U256;

use crate::config::TOKENS_PER_NFT;
use crate::data::SaleState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionView {
    Connect,
    Loading,
    Withdraw,
    /// `tokens` is already multiplied out from the NFT count
    Claim { tokens: U256 },
    Mint { enabled: bool },
}

pub fn select_view(state: &SaleState) -> ActionView {
    if !state.connected {
        return ActionView::Connect;
    }
    if state.loading {
        return ActionView::Loading;
    }
    if state.is_owner {
        return ActionView::Withdraw;
    }
    if !state.tokens_to_claim.is_zero() {
        return ActionView::Claim {
            tokens: state.tokens_to_claim * U256::from(TOKENS_PER_NFT),
        };
    }
    ActionView::Mint {
        enabled: !state.mint_amount().is_zero(),
    }
}

impl ActionView {
    /// Label of the button Enter presses.
    pub fn button_label(&self) -> &'static str {
        match self {
            Self::Connect => "Connect your wallet",
            Self::Loading => "Loading...",
            Self::Withdraw => "Withdraw Coins",
            Self::Claim { .. } => "Claim Tokens",
            Self::Mint { .. } => "Mint Tokens",
        }
    }

    pub fn is_enabled(&self) -> bool {
        match self {
            Self::Loading => false,
            Self::Mint { enabled } => *enabled,
            _ => true,
        }
    }
}

pub fn claim_prompt(tokens: U256) -> String {
    format!("You have {tokens} Tokens left to claim!!")
}
