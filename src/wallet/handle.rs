//! Read-only and signer-capable handles over a wallet connection

use std::{sync::Arc, time::Duration};

use alloy_primitives::{Address, B256, U256, hex};
use anyhow::{Context, Result};
use cli_log::*;
use serde::Deserialize;
use serde_json::{Value, json};

use super::error::WalletError;
use crate::rpc::JsonRpcClient;

/// Read-only handle: enough for `eth_call` and for looking up the active account.
#[derive(Clone)]
pub struct ProviderHandle {
    client: Arc<dyn JsonRpcClient>,
    chain_id: u64,
}

impl ProviderHandle {
    pub(crate) fn new(client: Arc<dyn JsonRpcClient>, chain_id: u64) -> Self {
        Self { client, chain_id }
    }

    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    pub fn client(&self) -> &Arc<dyn JsonRpcClient> {
        &self.client
    }

    /// Accounts the wallet already exposes to us (`eth_accounts`, never prompts).
    pub async fn accounts(&self) -> Result<Vec<Address>> {
        let value = self.client.request("eth_accounts", json!([])).await?;
        parse_accounts(value)
    }

    /// The address the wallet is currently acting as.
    pub async fn caller_address(&self) -> Result<Address> {
        self.accounts()
            .await?
            .first()
            .copied()
            .ok_or_else(|| WalletError::NoAccount.into())
    }

    pub async fn call(&self, to: Address, data: &[u8]) -> Result<Vec<u8>> {
        let params = json!([{ "to": to.to_string(), "data": hex::encode_prefixed(data) }, "latest"]);
        let value = self.client.request("eth_call", params).await?;
        let raw = value
            .as_str()
            .ok_or_else(|| anyhow::anyhow!("eth_call returned a non-string result: {value}"))?;
        hex::decode(raw).with_context(|| format!("eth_call returned invalid hex: {raw}"))
    }
}

/// Handle allowed to submit state-changing transactions from `address`.
#[derive(Clone)]
pub struct SignerHandle {
    provider: ProviderHandle,
    address: Address,
    poll_interval: Duration,
}

impl SignerHandle {
    pub(crate) fn new(provider: ProviderHandle, address: Address, poll_interval: Duration) -> Self {
        Self {
            provider,
            address,
            poll_interval,
        }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn provider(&self) -> &ProviderHandle {
        &self.provider
    }

    pub async fn send_transaction(
        &self,
        to: Address,
        data: &[u8],
        value: U256,
    ) -> Result<PendingTransaction> {
        let params = json!([{
            "from": self.address.to_string(),
            "to": to.to_string(),
            "data": hex::encode_prefixed(data),
            "value": format!("0x{value:x}"),
        }]);
        let result = self
            .provider
            .client
            .request("eth_sendTransaction", params)
            .await?;
        let hash = result
            .as_str()
            .ok_or_else(|| anyhow::anyhow!("eth_sendTransaction returned no hash: {result}"))?
            .parse::<B256>()
            .context("eth_sendTransaction returned an invalid hash")?;

        info!("Submitted transaction {hash} to {to} (value {value} wei)");
        Ok(PendingTransaction {
            hash,
            client: Arc::clone(&self.provider.client),
            poll_interval: self.poll_interval,
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionReceipt {
    pub transaction_hash: String,
    #[serde(default)]
    pub block_number: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

impl TransactionReceipt {
    /// Pre-Byzantium receipts have no status; treat those as successful.
    pub fn succeeded(&self) -> bool {
        !matches!(self.status.as_deref(), Some("0x0") | Some("0x00"))
    }
}

/// A submitted transaction awaiting inclusion.
pub struct PendingTransaction {
    hash: B256,
    client: Arc<dyn JsonRpcClient>,
    poll_interval: Duration,
}

impl PendingTransaction {
    pub fn hash(&self) -> B256 {
        self.hash
    }

    /// Poll for the receipt until it shows up. A reverted transaction is an error.
    pub async fn wait(self) -> Result<TransactionReceipt> {
        loop {
            let value = self
                .client
                .request("eth_getTransactionReceipt", json!([self.hash.to_string()]))
                .await?;

            if !value.is_null() {
                let receipt: TransactionReceipt = serde_json::from_value(value)
                    .context("Malformed transaction receipt")?;
                if !receipt.succeeded() {
                    anyhow::bail!("Transaction {} reverted", self.hash);
                }
                info!(
                    "Transaction {} confirmed in block {}",
                    self.hash,
                    receipt.block_number.as_deref().unwrap_or("?")
                );
                return Ok(receipt);
            }

            debug!("Transaction {} not mined yet", self.hash);
            tokio::time::sleep(self.poll_interval).await;
        }
    }
}

pub(crate) fn parse_accounts(value: Value) -> Result<Vec<Address>> {
    let raw: Vec<String> =
        serde_json::from_value(value).context("Wallet returned malformed accounts")?;
    raw.iter()
        .map(|s| {
            s.parse::<Address>()
                .with_context(|| format!("Wallet returned an invalid account: {s}"))
        })
        .collect()
}

pub(crate) fn parse_quantity(value: &Value) -> Result<u64> {
    let raw = value
        .as_str()
        .ok_or_else(|| anyhow::anyhow!("Expected a hex quantity, got {value}"))?;
    u64::from_str_radix(raw.trim_start_matches("0x"), 16)
        .with_context(|| format!("Invalid hex quantity: {raw}"))
}
