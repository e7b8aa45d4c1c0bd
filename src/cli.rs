use clap::Parser;
use rust_decimal::Decimal;

use crate::config::{
    DEFAULT_NETWORK, DEFAULT_NFT_ADDRESS_ENV, DEFAULT_PROVIDER_URL, DEFAULT_TOKEN_ADDRESS_ENV,
    TOKEN_UNIT_PRICE_ETH,
};

#[derive(Parser, Debug)]
#[command(name = "cryptodevs-ico")]
#[command(about = "Claim and mint Crypto Dev Tokens from your terminal")]
pub struct Cli {
    /// WebSocket JSON-RPC endpoint exposed by the wallet
    #[arg(long, default_value = DEFAULT_PROVIDER_URL)]
    pub provider_url: String,

    /// Network the contracts are deployed on (e.g. "goerli")
    #[arg(short, long, default_value = DEFAULT_NETWORK)]
    pub network: String,

    /// Expected chain id, overrides the one derived from --network
    #[arg(long)]
    pub chain_id: Option<u64>,

    /// Environment variable holding the NFT contract address
    #[arg(long, default_value = DEFAULT_NFT_ADDRESS_ENV)]
    pub nft_address_env: String,

    /// Environment variable holding the token contract address
    #[arg(long, default_value = DEFAULT_TOKEN_ADDRESS_ENV)]
    pub token_address_env: String,

    /// Price of one token in ether
    #[arg(long, default_value = TOKEN_UNIT_PRICE_ETH)]
    pub unit_price: Decimal,

    /// Refuse to use the wallet's own provider endpoint
    #[arg(long)]
    pub disable_injected_provider: bool,

    /// Wait for an explicit connect instead of connecting at startup
    #[arg(long)]
    pub no_auto_connect: bool,
}
