//! Pure state transitions

use alloy_primitives::B256;
use chrono::Utc;

use super::types::Action;
use crate::data::{Notice, SaleState};

/// Longest mint amount the input field accepts.
const MAX_MINT_INPUT_DIGITS: usize = 18;

impl SaleState {
    pub fn apply(mut self, action: Action) -> Self {
        match action {
            Action::Connected { account } => {
                self.connected = true;
                self.account = Some(account);
                self.last_error = None;
            }
            Action::ConnectionFailed { reason } => {
                self.last_error = Some(reason);
            }
            Action::WrongNetwork { message } => {
                self.last_error = Some(message.clone());
                self.notice = Some(Notice::error(message));
            }

            Action::OwnerLoaded(is_owner) => {
                self.is_owner = is_owner;
                self.last_refreshed = Some(Utc::now());
            }
            Action::BalanceLoaded(balance) => {
                self.token_balance = balance;
                self.last_refreshed = Some(Utc::now());
            }
            Action::SupplyLoaded(supply) => {
                self.tokens_minted = supply;
                self.last_refreshed = Some(Utc::now());
            }
            Action::ClaimableLoaded(claimable) => {
                self.tokens_to_claim = claimable;
                self.last_refreshed = Some(Utc::now());
            }

            Action::MintInputPushed(ch) => {
                if ch.is_ascii_digit() && self.mint_input.len() < MAX_MINT_INPUT_DIGITS {
                    self.mint_input.push(ch);
                }
            }
            Action::MintInputPopped => {
                self.mint_input.pop();
            }

            Action::TxSubmitted { hash, .. } => {
                self.pending_txs.push(hash);
                self.loading = true;
            }
            Action::TxConfirmed { kind, hash } => {
                self.settle(hash);
                self.notice = Some(Notice::info(kind.success_message()));
            }
            Action::TxFailed { kind, hash, reason } => {
                if let Some(hash) = hash {
                    self.settle(hash);
                }
                self.notice = Some(Notice::error(format!("{kind} failed: {reason}")));
            }

            Action::DismissNotice => {
                self.notice = None;
            }
        }
        self
    }

    fn settle(&mut self, hash: B256) {
        self.pending_txs.retain(|pending| *pending != hash);
        self.loading = !self.pending_txs.is_empty();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::types::WriteKind;
    use crate::data::NoticeKind;
    use alloy_primitives::{Address, U256};

    fn connected() -> SaleState {
        SaleState::default().apply(Action::Connected {
            account: Address::repeat_byte(1),
        })
    }

    #[test]
    fn connecting_clears_the_previous_error() {
        let state = SaleState::default()
            .apply(Action::ConnectionFailed {
                reason: "refused".into(),
            })
            .apply(Action::Connected {
                account: Address::repeat_byte(1),
            });
        assert!(state.connected);
        assert_eq!(state.last_error, None);
    }

    #[test]
    fn wrong_network_keeps_the_session_disconnected() {
        let state = SaleState::default().apply(Action::WrongNetwork {
            message: "Switch to Goerli Network".into(),
        });
        assert!(!state.connected);
        let notice = state.notice.unwrap();
        assert_eq!(notice.kind, NoticeKind::Error);
        assert_eq!(notice.message, "Switch to Goerli Network");
    }

    #[test]
    fn loading_spans_submission_to_confirmation() {
        let hash = B256::repeat_byte(9);
        let state = connected().apply(Action::TxSubmitted {
            kind: WriteKind::Mint,
            hash,
        });
        assert!(state.loading);

        let state = state.apply(Action::TxConfirmed {
            kind: WriteKind::Mint,
            hash,
        });
        assert!(!state.loading);
        assert!(state.pending_txs.is_empty());
        assert_eq!(
            state.notice.unwrap().message,
            "You have successfully minted a Token"
        );
    }

    #[test]
    fn failed_confirmation_clears_loading_and_reports() {
        let hash = B256::repeat_byte(9);
        let state = connected()
            .apply(Action::TxSubmitted {
                kind: WriteKind::Claim,
                hash,
            })
            .apply(Action::TxFailed {
                kind: WriteKind::Claim,
                hash: Some(hash),
                reason: "reverted".into(),
            });
        assert!(!state.loading);
        let notice = state.notice.unwrap();
        assert_eq!(notice.kind, NoticeKind::Error);
        assert_eq!(notice.message, "Claim failed: reverted");
    }

    #[test]
    fn failure_before_submission_leaves_other_writes_loading() {
        let hash = B256::repeat_byte(9);
        let state = connected()
            .apply(Action::TxSubmitted {
                kind: WriteKind::Mint,
                hash,
            })
            .apply(Action::TxFailed {
                kind: WriteKind::Withdraw,
                hash: None,
                reason: "rejected".into(),
            });
        assert!(state.loading);
        assert_eq!(state.pending_txs, vec![hash]);
    }

    #[test]
    fn mint_input_accepts_digits_only() {
        let state = SaleState::default()
            .apply(Action::MintInputPushed('1'))
            .apply(Action::MintInputPushed('x'))
            .apply(Action::MintInputPushed('2'));
        assert_eq!(state.mint_input, "12");
        assert_eq!(state.mint_amount(), U256::from(12u64));

        let state = state.apply(Action::MintInputPopped).apply(Action::MintInputPopped);
        assert_eq!(state.mint_amount(), U256::ZERO);
    }

    #[test]
    fn reads_replace_previous_values() {
        let state = connected()
            .apply(Action::BalanceLoaded(U256::from(5u64)))
            .apply(Action::BalanceLoaded(U256::ZERO))
            .apply(Action::OwnerLoaded(true));
        assert_eq!(state.token_balance, U256::ZERO);
        assert!(state.is_owner);
        assert!(state.last_refreshed.is_some());
    }
}
