use std::{collections::HashMap, sync::Arc, time::Duration};

use anyhow::Result;
use cli_log::*;
use serde_json::{Value, json};
use tokio::sync::Mutex;

use super::error::WalletError;
use super::handle::{ProviderHandle, SignerHandle, parse_accounts, parse_quantity};
use crate::config::RECEIPT_POLL_INTERVAL_MS;
use crate::rpc::{JsonRpcClient, WsTransport};

/// Options the broker is created with.
#[derive(Debug, Clone)]
pub struct BrokerOptions {
    pub network: String,
    pub chain_id: u64,
    pub provider_url: String,
    /// Extra providers beyond the wallet's own endpoint. None are supported; kept empty.
    pub provider_options: HashMap<String, Value>,
    pub disable_injected_provider: bool,
}

type Connector = Box<dyn Fn() -> Arc<dyn JsonRpcClient> + Send + Sync>;

enum ProviderSource {
    WebSocket,
    Custom(Connector),
}

/// Hands out provider and signer handles, checking the chain on every acquisition.
pub struct WalletBroker {
    options: BrokerOptions,
    source: ProviderSource,
    cached: Mutex<Option<Arc<dyn JsonRpcClient>>>,
    poll_interval: Duration,
}

impl WalletBroker {
    pub fn new(options: BrokerOptions) -> Self {
        Self {
            options,
            source: ProviderSource::WebSocket,
            cached: Mutex::new(None),
            poll_interval: Duration::from_millis(RECEIPT_POLL_INTERVAL_MS),
        }
    }

    /// Broker over an already-open provider instead of dialling the endpoint.
    pub fn with_client(options: BrokerOptions, client: Arc<dyn JsonRpcClient>) -> Self {
        Self::with_connector(options, move || Arc::clone(&client))
    }

    /// Broker that asks `connect` for a provider each time it (re)connects.
    pub fn with_connector<F>(options: BrokerOptions, connect: F) -> Self
    where
        F: Fn() -> Arc<dyn JsonRpcClient> + Send + Sync + 'static,
    {
        Self {
            options,
            source: ProviderSource::Custom(Box::new(connect)),
            cached: Mutex::new(None),
            poll_interval: Duration::from_millis(RECEIPT_POLL_INTERVAL_MS),
        }
    }

    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    pub fn options(&self) -> &BrokerOptions {
        &self.options
    }

    /// Open (or reuse) the connection to the wallet's provider.
    pub async fn connect(&self) -> Result<Arc<dyn JsonRpcClient>> {
        for name in self.options.provider_options.keys() {
            warn!("Provider option '{name}' is not supported, ignoring it");
        }
        if self.options.disable_injected_provider {
            return Err(WalletError::NoProvider.into());
        }

        let mut cached = self.cached.lock().await;
        if let Some(client) = cached.as_ref() {
            if client.is_alive() {
                return Ok(Arc::clone(client));
            }
            warn!("Wallet provider connection lost, reconnecting");
        }

        let client: Arc<dyn JsonRpcClient> = match &self.source {
            ProviderSource::Custom(connect) => connect(),
            ProviderSource::WebSocket => {
                Arc::new(WsTransport::connect(&self.options.provider_url).await?)
            }
        };
        *cached = Some(Arc::clone(&client));
        Ok(client)
    }

    /// Read-only handle on the expected network.
    pub async fn provider(&self) -> Result<ProviderHandle> {
        let client = self.connect().await?;
        let actual = parse_quantity(&client.request("eth_chainId", json!([])).await?)?;

        if actual != self.options.chain_id {
            warn!(
                "Wallet is on chain {actual}, expected {} ({})",
                self.options.chain_id, self.options.network
            );
            return Err(WalletError::WrongNetwork {
                network: self.options.network.clone(),
                expected: self.options.chain_id,
                actual,
            }
            .into());
        }

        Ok(ProviderHandle::new(client, actual))
    }

    /// Signer-capable handle. May prompt the wallet to expose an account.
    pub async fn signer(&self) -> Result<SignerHandle> {
        let provider = self.provider().await?;
        let accounts = parse_accounts(
            provider
                .client()
                .request("eth_requestAccounts", json!([]))
                .await?,
        )?;
        let address = accounts.first().copied().ok_or(WalletError::NoAccount)?;
        Ok(SignerHandle::new(provider, address, self.poll_interval))
    }
}
