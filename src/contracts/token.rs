use alloy_primitives::{Address, U256};
use alloy_sol_types::SolCall;
use anyhow::Result;

use super::interfaces::ICryptoDevToken;
use super::view_call;
use crate::wallet::{PendingTransaction, ProviderHandle, SignerHandle};

/// The fungible token that also runs the sale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenContract {
    pub address: Address,
}

impl TokenContract {
    pub fn new(address: Address) -> Self {
        Self { address }
    }

    pub async fn owner(&self, provider: &ProviderHandle) -> Result<Address> {
        view_call(provider, self.address, ICryptoDevToken::ownerCall {}).await
    }

    pub async fn balance_of(&self, provider: &ProviderHandle, account: Address) -> Result<U256> {
        view_call(provider, self.address, ICryptoDevToken::balanceOfCall { account }).await
    }

    pub async fn total_supply(&self, provider: &ProviderHandle) -> Result<U256> {
        view_call(provider, self.address, ICryptoDevToken::totalSupplyCall {}).await
    }

    pub async fn token_ids_claimed(&self, provider: &ProviderHandle, id: U256) -> Result<bool> {
        view_call(provider, self.address, ICryptoDevToken::tokenIdsClaimedCall { id }).await
    }

    pub async fn claim(&self, signer: &SignerHandle) -> Result<PendingTransaction> {
        let data = ICryptoDevToken::claimCall {}.abi_encode();
        signer.send_transaction(self.address, &data, U256::ZERO).await
    }

    /// `value` must cover the contract's price for `amount` tokens.
    pub async fn mint(&self, signer: &SignerHandle, amount: U256, value: U256) -> Result<PendingTransaction> {
        let data = ICryptoDevToken::mintCall { amount }.abi_encode();
        signer.send_transaction(self.address, &data, value).await
    }

    pub async fn withdraw(&self, signer: &SignerHandle) -> Result<PendingTransaction> {
        let data = ICryptoDevToken::withdrawCall {}.abi_encode();
        signer.send_transaction(self.address, &data, U256::ZERO).await
    }
}
