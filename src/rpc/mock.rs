//! In-memory wallet + chain running the NFT and token contracts, for tests

use std::{
    collections::{HashMap, HashSet},
    sync::{
        Mutex,
        atomic::{AtomicBool, Ordering},
    },
};

use alloy_primitives::{Address, B256, U256, hex, keccak256};
use alloy_sol_types::{SolInterface, SolValue};
use anyhow::Result;
use async_trait::async_trait;
use serde_json::{Value, json};

use super::client::{JsonRpcClient, RpcError, USER_REJECTED_CODE};
use crate::config::{MAX_TOKEN_SUPPLY, TOKENS_PER_NFT};
use crate::contracts::interfaces::{
    ICryptoDevToken::ICryptoDevTokenCalls, ICryptoDevs::ICryptoDevsCalls,
};
use crate::utils::tokens_to_base_units;

/// 0.001 ether.
pub const MOCK_UNIT_PRICE_WEI: u64 = 1_000_000_000_000_000;

#[derive(Debug, Clone)]
pub struct SentTransaction {
    pub from: Address,
    pub to: Address,
    pub data: Vec<u8>,
    pub value: U256,
}

#[derive(Default)]
struct ChainState {
    nfts: HashMap<Address, Vec<U256>>,
    claimed: HashSet<U256>,
    balances: HashMap<Address, U256>,
    total_supply: U256,
    collected: U256,
    sent: Vec<SentTransaction>,
    receipts: HashMap<B256, Value>,
    failing: HashSet<String>,
    hold_receipts: bool,
    revert_on_mine: bool,
    reject_prompts: bool,
    nonce: u64,
}

pub struct MockChain {
    chain_id: u64,
    caller: Address,
    owner: Address,
    nft: Address,
    token: Address,
    alive: AtomicBool,
    state: Mutex<ChainState>,
}

impl MockChain {
    pub fn new(chain_id: u64) -> Self {
        Self {
            chain_id,
            caller: Address::repeat_byte(0xca),
            owner: Address::repeat_byte(0x0e),
            nft: Address::repeat_byte(0x4f),
            token: Address::repeat_byte(0x70),
            alive: AtomicBool::new(true),
            state: Mutex::new(ChainState::default()),
        }
    }

    pub fn with_owner(mut self, owner: Address) -> Self {
        self.owner = owner;
        self
    }

    pub fn caller(&self) -> Address {
        self.caller
    }

    pub fn nft_address(&self) -> Address {
        self.nft
    }

    pub fn token_address(&self) -> Address {
        self.token
    }

    pub fn give_nfts(&self, holder: Address, ids: &[u64]) {
        let mut state = self.state.lock().unwrap();
        state
            .nfts
            .entry(holder)
            .or_default()
            .extend(ids.iter().map(|id| U256::from(*id)));
    }

    pub fn mark_claimed(&self, id: u64) {
        self.state.lock().unwrap().claimed.insert(U256::from(id));
    }

    /// Pretend the connection to the wallet went away (or came back).
    pub fn set_alive(&self, alive: bool) {
        self.alive.store(alive, Ordering::SeqCst);
    }

    /// Make every request whose method (or `eth_call` signature) matches `name` fail.
    pub fn fail(&self, name: &str) {
        self.state.lock().unwrap().failing.insert(name.to_string());
    }

    pub fn hold_receipts(&self, hold: bool) {
        self.state.lock().unwrap().hold_receipts = hold;
    }

    pub fn revert_on_mine(&self, revert: bool) {
        self.state.lock().unwrap().revert_on_mine = revert;
    }

    pub fn reject_prompts(&self, reject: bool) {
        self.state.lock().unwrap().reject_prompts = reject;
    }

    pub fn sent(&self) -> Vec<SentTransaction> {
        self.state.lock().unwrap().sent.clone()
    }

    pub fn balance_of(&self, account: Address) -> U256 {
        self.state
            .lock()
            .unwrap()
            .balances
            .get(&account)
            .copied()
            .unwrap_or_default()
    }

    pub fn total_supply(&self) -> U256 {
        self.state.lock().unwrap().total_supply
    }

    pub fn collected(&self) -> U256 {
        self.state.lock().unwrap().collected
    }

    fn revert(reason: &str) -> anyhow::Error {
        RpcError::new(-32000, format!("execution reverted: {reason}")).into()
    }

    fn field<'a>(params: &'a Value, key: &str) -> Result<&'a str> {
        params[0][key]
            .as_str()
            .ok_or_else(|| anyhow::anyhow!("missing field {key}"))
    }

    fn eth_call(&self, params: &Value) -> Result<Value> {
        let to: Address = Self::field(params, "to")?.parse()?;
        let data = hex::decode(Self::field(params, "data")?)?;
        let state = self.state.lock().unwrap();

        if let Some(name) = state
            .failing
            .iter()
            .find(|name| data.len() >= 4 && keccak256(name.as_bytes())[..4] == data[..4])
        {
            return Err(RpcError::new(-32603, format!("{name} unavailable")).into());
        }

        let output = if to == self.nft {
            match ICryptoDevsCalls::abi_decode(&data)? {
                ICryptoDevsCalls::balanceOf(call) => {
                    let held = state.nfts.get(&call.owner).map_or(0, Vec::len);
                    U256::from(held).abi_encode()
                }
                ICryptoDevsCalls::tokenOfOwnerByIndex(call) => {
                    let index: usize = call
                        .index
                        .try_into()
                        .map_err(|_| anyhow::anyhow!("index out of range"))?;
                    state
                        .nfts
                        .get(&call.owner)
                        .and_then(|ids| ids.get(index))
                        .copied()
                        .ok_or_else(|| Self::revert("owner index out of bounds"))?
                        .abi_encode()
                }
            }
        } else if to == self.token {
            match ICryptoDevTokenCalls::abi_decode(&data)? {
                ICryptoDevTokenCalls::owner(_) => self.owner.abi_encode(),
                ICryptoDevTokenCalls::balanceOf(call) => state
                    .balances
                    .get(&call.account)
                    .copied()
                    .unwrap_or_default()
                    .abi_encode(),
                ICryptoDevTokenCalls::totalSupply(_) => state.total_supply.abi_encode(),
                ICryptoDevTokenCalls::tokenIdsClaimed(call) => {
                    state.claimed.contains(&call.id).abi_encode()
                }
                _ => return Err(Self::revert("not a view function")),
            }
        } else {
            return Err(Self::revert("no contract at this address"));
        };

        Ok(json!(hex::encode_prefixed(output)))
    }

    fn send_transaction(&self, params: &Value) -> Result<Value> {
        let from: Address = Self::field(params, "from")?.parse()?;
        let to: Address = Self::field(params, "to")?.parse()?;
        let data = hex::decode(Self::field(params, "data")?)?;
        let value = U256::from_str_radix(Self::field(params, "value")?.trim_start_matches("0x"), 16)
            .map_err(|e| anyhow::anyhow!("bad value: {e}"))?;

        let mut guard = self.state.lock().unwrap();
        let state = &mut *guard;
        if state.reject_prompts {
            return Err(RpcError::new(USER_REJECTED_CODE, "User denied transaction signature").into());
        }
        state.sent.push(SentTransaction {
            from,
            to,
            data: data.clone(),
            value,
        });

        if to != self.token {
            return Err(Self::revert("not a sale contract"));
        }
        let call = ICryptoDevTokenCalls::abi_decode(&data)?;

        if !state.revert_on_mine {
            match call {
                ICryptoDevTokenCalls::mint(call) => {
                    if value < U256::from(MOCK_UNIT_PRICE_WEI) * call.amount {
                        return Err(Self::revert("Ether sent is incorrect"));
                    }
                    let minted = call.amount * tokens_to_base_units(1);
                    if state.total_supply + minted > tokens_to_base_units(MAX_TOKEN_SUPPLY) {
                        return Err(Self::revert("Exceeds the max total supply available."));
                    }
                    *state.balances.entry(from).or_default() += minted;
                    state.total_supply += minted;
                    state.collected += value;
                }
                ICryptoDevTokenCalls::claim(_) => {
                    let held = state.nfts.get(&from).cloned().unwrap_or_default();
                    if held.is_empty() {
                        return Err(Self::revert("You dont own any Crypto Dev NFT's"));
                    }
                    let unclaimed: Vec<U256> =
                        held.into_iter().filter(|id| !state.claimed.contains(id)).collect();
                    if unclaimed.is_empty() {
                        return Err(Self::revert("You have already claimed all the tokens"));
                    }
                    let minted = tokens_to_base_units(TOKENS_PER_NFT * unclaimed.len() as u64);
                    state.claimed.extend(unclaimed);
                    *state.balances.entry(from).or_default() += minted;
                    state.total_supply += minted;
                }
                ICryptoDevTokenCalls::withdraw(_) => {
                    if from != self.owner {
                        return Err(Self::revert("Ownable: caller is not the owner"));
                    }
                    state.collected = U256::ZERO;
                }
                _ => return Err(Self::revert("not a transaction")),
            }
        }

        state.nonce += 1;
        let hash = keccak256(state.nonce.to_be_bytes());
        let block = format!("0x{:x}", state.nonce);
        let status = if state.revert_on_mine { "0x0" } else { "0x1" };
        state.receipts.insert(
            hash,
            json!({
                "transactionHash": hash.to_string(),
                "blockNumber": block,
                "status": status,
            }),
        );
        Ok(json!(hash.to_string()))
    }

    fn receipt(&self, params: &Value) -> Result<Value> {
        let hash: B256 = params[0]
            .as_str()
            .ok_or_else(|| anyhow::anyhow!("missing hash"))?
            .parse()?;
        let state = self.state.lock().unwrap();
        if state.hold_receipts {
            return Ok(Value::Null);
        }
        Ok(state.receipts.get(&hash).cloned().unwrap_or(Value::Null))
    }
}

#[async_trait]
impl JsonRpcClient for MockChain {
    async fn request(&self, method: &str, params: Value) -> Result<Value> {
        {
            let state = self.state.lock().unwrap();
            if state.failing.contains(method) {
                return Err(RpcError::new(-32603, format!("{method} unavailable")).into());
            }
            if method == "eth_requestAccounts" && state.reject_prompts {
                return Err(RpcError::new(USER_REJECTED_CODE, "User rejected the request").into());
            }
        }

        match method {
            "eth_chainId" => Ok(json!(format!("0x{:x}", self.chain_id))),
            "eth_accounts" | "eth_requestAccounts" => Ok(json!([self.caller.to_string()])),
            "eth_call" => self.eth_call(&params),
            "eth_sendTransaction" => self.send_transaction(&params),
            "eth_getTransactionReceipt" => self.receipt(&params),
            other => Err(RpcError::new(-32601, format!("method {other} not found")).into()),
        }
    }

    fn is_alive(&self) -> bool {
        self.alive.load(Ordering::SeqCst)
    }
}
