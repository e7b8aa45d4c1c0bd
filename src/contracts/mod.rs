pub mod interfaces;
pub mod nft;
pub mod token;

pub use nft::NftContract;
pub use token::TokenContract;

use alloy_primitives::Address;
use alloy_sol_types::SolCall;
use anyhow::{Context, Result};

use crate::wallet::ProviderHandle;

/// The two contracts the sale is made of.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaleContracts {
    pub nft: NftContract,
    pub token: TokenContract,
}

impl SaleContracts {
    pub fn new(nft: Address, token: Address) -> Self {
        Self {
            nft: NftContract::new(nft),
            token: TokenContract::new(token),
        }
    }
}

/// `eth_call` a view function and decode its single return value.
pub(crate) async fn view_call<C>(provider: &ProviderHandle, to: Address, call: C) -> Result<C::Return>
where
    C: SolCall + Send,
{
    let data = provider
        .call(to, &call.abi_encode())
        .await
        .with_context(|| format!("{} failed", C::SIGNATURE))?;
    C::abi_decode_returns(&data).with_context(|| format!("{} returned malformed data", C::SIGNATURE))
}
