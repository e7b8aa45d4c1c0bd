//! Core application logic and initialization

use std::sync::{Arc, atomic::AtomicBool};

use rust_decimal::Decimal;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use cli_log::*;

use super::types::Action;
use crate::config::Settings;
use crate::contracts::SaleContracts;
use crate::data::SaleState;
use crate::utils::capitalize;
use crate::wallet::{WalletBroker, as_wrong_network};

pub struct App {
    pub state: SaleState,
    pub broker: Arc<WalletBroker>,
    pub contracts: SaleContracts,
    pub unit_price: Decimal,
    pub needs_redraw: bool,
    /// Set from spawning a write until it settles, wallet prompt included
    pub(crate) write_in_flight: Arc<AtomicBool>,

    // Results of background tasks, applied on the UI loop
    pub(crate) actions_tx: UnboundedSender<Action>,
    actions_rx: UnboundedReceiver<Action>,
}

impl App {
    pub fn new(settings: &Settings) -> Self {
        let broker = WalletBroker::new(settings.broker.clone())
            .with_poll_interval(settings.receipt_poll_interval);
        Self::with_broker(
            broker,
            SaleContracts::new(settings.nft_address, settings.token_address),
            settings.unit_price,
        )
    }

    pub fn with_broker(broker: WalletBroker, contracts: SaleContracts, unit_price: Decimal) -> Self {
        let (actions_tx, actions_rx) = mpsc::unbounded_channel();
        Self {
            state: SaleState::default(),
            broker: Arc::new(broker),
            contracts,
            unit_price,
            needs_redraw: true,
            write_in_flight: Arc::new(AtomicBool::new(false)),
            actions_tx,
            actions_rx,
        }
    }

    pub fn network_label(&self) -> String {
        capitalize(&self.broker.options().network)
    }

    /// Apply one action and start whatever it implies.
    pub fn dispatch(&mut self, action: Action) {
        let refresh = matches!(action, Action::Connected { .. } | Action::TxConfirmed { .. });
        if let Action::Connected { account } = &action {
            info!("Wallet connected as {account}");
        }

        self.state = std::mem::take(&mut self.state).apply(action);
        self.needs_redraw = true;

        if refresh {
            self.refresh_all();
        }
    }

    /// Apply every action background tasks have reported so far.
    pub fn process_actions(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(action) = self.actions_rx.try_recv() {
            self.dispatch(action);
            applied += 1;
        }
        applied
    }

    /// Wait for the next reported action and apply it.
    pub async fn next_action(&mut self) -> Option<Action> {
        let action = self.actions_rx.recv().await?;
        self.dispatch(action.clone());
        Some(action)
    }

    /// Ask the wallet for an account; on success the session is connected
    /// and the reads start.
    pub fn connect_wallet(&self) {
        let broker = Arc::clone(&self.broker);
        let tx = self.actions_tx.clone();
        tokio::spawn(async move {
            let action = match broker.signer().await {
                Ok(signer) => Action::Connected {
                    account: signer.address(),
                },
                Err(e) => {
                    warn!("Failed to connect wallet: {e:#}");
                    match as_wrong_network(&e) {
                        Some(wrong_network) => Action::WrongNetwork {
                            message: wrong_network.user_message(),
                        },
                        None => Action::ConnectionFailed {
                            reason: format!("{e:#}"),
                        },
                    }
                }
            };
            let _ = tx.send(action);
        });
    }
}
