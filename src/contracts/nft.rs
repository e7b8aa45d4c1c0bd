use alloy_primitives::{Address, U256};
use anyhow::Result;

use super::interfaces::ICryptoDevs;
use super::view_call;
use crate::wallet::ProviderHandle;

/// Enumerable ERC-721 whose holders may claim tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NftContract {
    pub address: Address,
}

impl NftContract {
    pub fn new(address: Address) -> Self {
        Self { address }
    }

    pub async fn balance_of(&self, provider: &ProviderHandle, owner: Address) -> Result<U256> {
        view_call(provider, self.address, ICryptoDevs::balanceOfCall { owner }).await
    }

    pub async fn token_of_owner_by_index(
        &self,
        provider: &ProviderHandle,
        owner: Address,
        index: U256,
    ) -> Result<U256> {
        view_call(
            provider,
            self.address,
            ICryptoDevs::tokenOfOwnerByIndexCall { owner, index },
        )
        .await
    }
}
