//! Mint, claim and withdraw

use std::{
    future::Future,
    sync::{Arc, atomic::Ordering},
};

use alloy_primitives::B256;
use anyhow::Result;
use cli_log::*;
use tokio::sync::mpsc::UnboundedSender;

use super::core::App;
use super::types::{Action, WriteKind};
use crate::utils::{format_units, mint_payment};
use crate::wallet::{PendingTransaction, SignerHandle, TransactionReceipt, WalletBroker, as_wrong_network};

/// Submit one write and follow it to confirmation, reporting every step.
///
/// Emits `TxSubmitted` once the wallet accepted the transaction and then
/// exactly one of `TxConfirmed` / `TxFailed` carrying the same hash, so the
/// loading flag is always cleared. Failures before submission report
/// `TxFailed` without a hash (or `WrongNetwork`) and never touch loading.
pub async fn run_write<F, Fut>(
    kind: WriteKind,
    broker: &WalletBroker,
    actions: &UnboundedSender<Action>,
    submit: F,
) -> Result<TransactionReceipt>
where
    F: FnOnce(SignerHandle) -> Fut,
    Fut: Future<Output = Result<PendingTransaction>>,
{
    let submitted = async {
        let signer = broker.signer().await?;
        submit(signer).await
    }
    .await;

    let pending = match submitted {
        Ok(pending) => pending,
        Err(e) => {
            warn!("{kind} was not submitted: {e:#}");
            let action = match as_wrong_network(&e) {
                Some(wrong_network) => Action::WrongNetwork {
                    message: wrong_network.user_message(),
                },
                None => Action::TxFailed {
                    kind,
                    hash: None,
                    reason: format!("{e:#}"),
                },
            };
            let _ = actions.send(action);
            return Err(e);
        }
    };

    let hash: B256 = pending.hash();
    let _ = actions.send(Action::TxSubmitted { kind, hash });

    match pending.wait().await {
        Ok(receipt) => {
            info!("{kind} confirmed: {hash}");
            let _ = actions.send(Action::TxConfirmed { kind, hash });
            Ok(receipt)
        }
        Err(e) => {
            warn!("{kind} failed after submission: {e:#}");
            let _ = actions.send(Action::TxFailed {
                kind,
                hash: Some(hash),
                reason: format!("{e:#}"),
            });
            Err(e)
        }
    }
}

impl App {
    /// Buy the amount typed in the mint field at the configured unit price.
    pub fn mint(&mut self) {
        let amount = self.state.mint_amount();
        if amount.is_zero() {
            return;
        }
        let value = match mint_payment(self.unit_price, amount) {
            Ok(value) => value,
            Err(e) => {
                warn!("Cannot price mint of {amount} tokens: {e:#}");
                self.dispatch(Action::TxFailed {
                    kind: WriteKind::Mint,
                    hash: None,
                    reason: format!("{e:#}"),
                });
                return;
            }
        };

        info!("Minting {amount} tokens for {} ETH", format_units(value, 18));
        let token = self.contracts.token;
        self.spawn_write(WriteKind::Mint, move |signer| async move {
            token.mint(&signer, amount, value).await
        });
    }

    pub fn claim(&mut self) {
        let token = self.contracts.token;
        self.spawn_write(WriteKind::Claim, move |signer| async move {
            token.claim(&signer).await
        });
    }

    pub fn withdraw(&mut self) {
        let token = self.contracts.token;
        self.spawn_write(WriteKind::Withdraw, move |signer| async move {
            token.withdraw(&signer).await
        });
    }

    fn spawn_write<F, Fut>(&self, kind: WriteKind, submit: F)
    where
        F: FnOnce(SignerHandle) -> Fut + Send + 'static,
        Fut: Future<Output = Result<PendingTransaction>> + Send + 'static,
    {
        if self.state.loading || self.write_in_flight.swap(true, Ordering::SeqCst) {
            warn!("Ignoring {kind}: a transaction is still pending");
            return;
        }
        let broker: Arc<WalletBroker> = Arc::clone(&self.broker);
        let tx = self.actions_tx.clone();
        let in_flight = Arc::clone(&self.write_in_flight);
        tokio::spawn(async move {
            let _ = run_write(kind, &broker, &tx, submit).await;
            in_flight.store(false, Ordering::SeqCst);
        });
    }
}
