//! The four reads behind the screen: owner, balance, supply and claimable NFTs

use std::sync::Arc;

use alloy_primitives::{Address, U256};
use anyhow::Result;
use cli_log::*;
use futures_util::{StreamExt, TryStreamExt, stream};
use tokio::sync::mpsc::UnboundedSender;

use super::core::App;
use super::types::Action;
use crate::config::CLAIM_SCAN_CONCURRENCY;
use crate::contracts::SaleContracts;
use crate::wallet::{ProviderHandle, WalletBroker, as_wrong_network};

/// Whether the connected account owns the sale contract.
pub async fn read_owner(broker: &WalletBroker, contracts: &SaleContracts) -> Result<bool> {
    let provider = broker.provider().await?;
    let owner = contracts.token.owner(&provider).await?;
    let caller = provider.caller_address().await?;
    // Address equality is byte equality, so hex case never matters here.
    Ok(owner == caller)
}

pub async fn read_token_balance(broker: &WalletBroker, contracts: &SaleContracts) -> Result<U256> {
    let provider = broker.provider().await?;
    let caller = provider.caller_address().await?;
    contracts.token.balance_of(&provider, caller).await
}

pub async fn read_total_supply(broker: &WalletBroker, contracts: &SaleContracts) -> Result<U256> {
    let provider = broker.provider().await?;
    contracts.token.total_supply(&provider).await
}

pub async fn read_claimable(broker: &WalletBroker, contracts: &SaleContracts) -> Result<U256> {
    let provider = broker.provider().await?;
    let caller = provider.caller_address().await?;
    count_claimable(&provider, contracts, caller).await
}

/// Number of NFTs held by `holder` whose token claim has not been used.
///
/// One `tokenOfOwnerByIndex` and one `tokenIdsClaimed` call per NFT, with at
/// most [`CLAIM_SCAN_CONCURRENCY`] NFTs in flight. Any failed call fails the
/// whole count.
pub async fn count_claimable(
    provider: &ProviderHandle,
    contracts: &SaleContracts,
    holder: Address,
) -> Result<U256> {
    let held = contracts.nft.balance_of(provider, holder).await?;
    if held.is_zero() {
        return Ok(U256::ZERO);
    }
    let held: u64 = held
        .try_into()
        .map_err(|_| anyhow::anyhow!("NFT balance out of range: {held}"))?;
    debug!("Scanning {held} NFTs of {holder} for unclaimed tokens");

    let unclaimed = stream::iter(0..held)
        .map(|index| async move {
            let token_id = contracts
                .nft
                .token_of_owner_by_index(provider, holder, U256::from(index))
                .await?;
            let claimed = contracts.token.token_ids_claimed(provider, token_id).await?;
            Ok::<bool, anyhow::Error>(!claimed)
        })
        .buffer_unordered(CLAIM_SCAN_CONCURRENCY)
        .try_fold(0u64, |count, unclaimed| async move {
            Ok(count + u64::from(unclaimed))
        })
        .await?;

    Ok(U256::from(unclaimed))
}

/// Turn a read outcome into actions: the value, or its zero default plus a
/// wrong-network notice when that is why it failed.
fn report_read<T>(
    actions: &UnboundedSender<Action>,
    what: &str,
    result: Result<T>,
    fallback: T,
    into_action: fn(T) -> Action,
) {
    let value = match result {
        Ok(value) => value,
        Err(e) => {
            warn!("Failed to read {what}: {e:#}");
            if let Some(wrong_network) = as_wrong_network(&e) {
                let _ = actions.send(Action::WrongNetwork {
                    message: wrong_network.user_message(),
                });
            }
            fallback
        }
    };
    let _ = actions.send(into_action(value));
}

impl App {
    /// Re-run all four reads; each one reports independently.
    pub fn refresh_all(&self) {
        info!("Refreshing sale state");

        let (broker, contracts, tx) = self.task_context();
        tokio::spawn(async move {
            let result = read_owner(&broker, &contracts).await;
            report_read(&tx, "owner", result, false, Action::OwnerLoaded);
        });

        let (broker, contracts, tx) = self.task_context();
        tokio::spawn(async move {
            let result = read_token_balance(&broker, &contracts).await;
            report_read(&tx, "token balance", result, U256::ZERO, Action::BalanceLoaded);
        });

        let (broker, contracts, tx) = self.task_context();
        tokio::spawn(async move {
            let result = read_total_supply(&broker, &contracts).await;
            report_read(&tx, "total supply", result, U256::ZERO, Action::SupplyLoaded);
        });

        let (broker, contracts, tx) = self.task_context();
        tokio::spawn(async move {
            let result = read_claimable(&broker, &contracts).await;
            report_read(&tx, "claimable tokens", result, U256::ZERO, Action::ClaimableLoaded);
        });
    }

    fn task_context(&self) -> (Arc<WalletBroker>, SaleContracts, UnboundedSender<Action>) {
        (Arc::clone(&self.broker), self.contracts, self.actions_tx.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contracts::interfaces::ICryptoDevToken;
    use alloy_sol_types::SolCall;
    use crate::rpc::mock::MockChain;
    use crate::wallet::BrokerOptions;

    fn setup(chain: Arc<MockChain>) -> (WalletBroker, SaleContracts) {
        let contracts = SaleContracts::new(chain.nft_address(), chain.token_address());
        let options = BrokerOptions {
            network: "goerli".into(),
            chain_id: 5,
            provider_url: String::new(),
            provider_options: Default::default(),
            disable_injected_provider: false,
        };
        (WalletBroker::with_client(options, chain), contracts)
    }

    #[tokio::test]
    async fn no_nfts_means_nothing_to_claim() {
        let chain = Arc::new(MockChain::new(5));
        let (broker, contracts) = setup(chain);
        assert_eq!(read_claimable(&broker, &contracts).await.unwrap(), U256::ZERO);
    }

    #[tokio::test]
    async fn every_unclaimed_nft_counts() {
        let chain = Arc::new(MockChain::new(5));
        chain.give_nfts(chain.caller(), &[3, 17, 42, 99]);
        let (broker, contracts) = setup(chain);
        assert_eq!(read_claimable(&broker, &contracts).await.unwrap(), U256::from(4u64));
    }

    #[tokio::test]
    async fn claimed_nfts_are_skipped() {
        let chain = Arc::new(MockChain::new(5));
        chain.give_nfts(chain.caller(), &[1, 2, 3]);
        chain.mark_claimed(2);
        let (broker, contracts) = setup(chain);
        assert_eq!(read_claimable(&broker, &contracts).await.unwrap(), U256::from(2u64));
    }

    #[tokio::test]
    async fn scan_covers_more_nfts_than_the_fan_out() {
        let chain = Arc::new(MockChain::new(5));
        let ids: Vec<u64> = (0..(CLAIM_SCAN_CONCURRENCY as u64 * 3 + 1)).collect();
        chain.give_nfts(chain.caller(), &ids);
        chain.mark_claimed(0);
        let (broker, contracts) = setup(chain);
        assert_eq!(
            read_claimable(&broker, &contracts).await.unwrap(),
            U256::from(ids.len() as u64 - 1)
        );
    }

    #[tokio::test]
    async fn one_failed_claim_check_fails_the_scan() {
        let chain = Arc::new(MockChain::new(5));
        chain.give_nfts(chain.caller(), &[1, 2]);
        chain.fail(ICryptoDevToken::tokenIdsClaimedCall::SIGNATURE);
        let (broker, contracts) = setup(chain);
        assert!(read_claimable(&broker, &contracts).await.is_err());
    }

    #[tokio::test]
    async fn owner_check_follows_the_connected_account() {
        let chain = Arc::new(MockChain::new(5));
        let (broker, contracts) = setup(chain.clone());
        assert!(!read_owner(&broker, &contracts).await.unwrap());

        let caller = chain.caller();
        let owned = Arc::new(MockChain::new(5).with_owner(caller));
        let (broker, contracts) = setup(owned);
        assert!(read_owner(&broker, &contracts).await.unwrap());
    }

    #[test]
    fn failed_reads_report_zero() {
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
        report_read(
            &tx,
            "total supply",
            Err(anyhow::anyhow!("boom")),
            U256::ZERO,
            Action::SupplyLoaded,
        );
        assert_eq!(rx.try_recv().unwrap(), Action::SupplyLoaded(U256::ZERO));
        assert!(rx.try_recv().is_err());
    }
}
