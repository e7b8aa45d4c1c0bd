use alloy_primitives::U256;
use anyhow::Result;
use rust_decimal::prelude::*;

use crate::config::TOKEN_DECIMALS;

const WEI_PER_ETHER: u64 = 1_000_000_000_000_000_000;

/// Fixed-point amount as a decimal string, trailing zeros trimmed ("20.0", "0.5").
pub fn format_units(value: U256, decimals: u8) -> String {
    let divisor = U256::from(10u64).pow(U256::from(decimals));
    let whole = value / divisor;
    let frac = value % divisor;

    let frac_digits = format!("{:0>width$}", frac.to_string(), width = decimals as usize);
    let frac_digits = frac_digits.trim_end_matches('0');

    if frac_digits.is_empty() {
        format!("{whole}.0")
    } else {
        format!("{whole}.{frac_digits}")
    }
}

#[inline]
pub fn format_tokens(value: U256) -> String {
    format_units(value, TOKEN_DECIMALS)
}

/// Whole tokens expressed in base units.
pub fn tokens_to_base_units(tokens: u64) -> U256 {
    U256::from(tokens) * U256::from(10u64).pow(U256::from(TOKEN_DECIMALS))
}

pub fn ether_to_wei(ether: Decimal) -> Result<U256> {
    if ether.is_sign_negative() {
        anyhow::bail!("Negative ether amount: {ether}");
    }
    let wei = ether
        .checked_mul(Decimal::from(WEI_PER_ETHER))
        .ok_or_else(|| anyhow::anyhow!("Ether amount too large: {ether}"))?;
    if !wei.fract().is_zero() {
        anyhow::bail!("Ether amount has more than 18 decimals: {ether}");
    }
    let wei = wei
        .to_u128()
        .ok_or_else(|| anyhow::anyhow!("Ether amount out of range: {ether}"))?;
    Ok(U256::from(wei))
}

/// Payment attached to `mint(amount)`: `unit_price * amount`, in wei.
pub fn mint_payment(unit_price: Decimal, amount: U256) -> Result<U256> {
    let amount: u64 = amount
        .try_into()
        .map_err(|_| anyhow::anyhow!("Mint amount too large: {amount}"))?;
    let ether = unit_price
        .checked_mul(Decimal::from(amount))
        .ok_or_else(|| anyhow::anyhow!("Payment overflow for {amount} tokens"))?;
    ether_to_wei(ether)
}

/// Anything that is not a plain base-10 integer counts as zero.
pub fn parse_mint_amount(input: &str) -> U256 {
    U256::from_str_radix(input.trim(), 10).unwrap_or(U256::ZERO)
}

pub fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
