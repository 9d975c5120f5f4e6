//! Conversion between native token units and the canonical 18-decimal form.
//!
//! Every amount entering the ledger is normalized once, so stored values are
//! always exact multiples of the token's smallest unit. Conversions back down
//! truncate and never round up.

use anchor_lang::prelude::*;

use crate::constants::CANONICAL_DECIMALS;
use crate::error::StakingError;

/// Canonical units per native unit for a token with `decimals` places.
pub fn unit_scale(decimals: u8) -> Result<u128> {
    require!(decimals <= CANONICAL_DECIMALS, StakingError::InvalidDecimals);
    10u128
        .checked_pow(u32::from(CANONICAL_DECIMALS - decimals))
        .ok_or(StakingError::MathOverflow.into())
}

/// Scale a native amount up to canonical precision.
pub fn to_canonical(amount: u64, decimals: u8) -> Result<u128> {
    u128::from(amount)
        .checked_mul(unit_scale(decimals)?)
        .ok_or(StakingError::MathOverflow.into())
}

/// Drop any canonical remainder finer than the token's smallest unit.
pub fn from_canonical(canonical: u128, decimals: u8) -> Result<u128> {
    let scale = unit_scale(decimals)?;
    Ok(canonical / scale * scale)
}

/// Native units of a canonical amount without narrowing, for lifetime
/// totals that can outgrow a single token balance.
pub fn to_native_wide(canonical: u128, decimals: u8) -> Result<u128> {
    Ok(canonical / unit_scale(decimals)?)
}

/// Scale a canonical amount down to native units, truncating.
pub fn to_native(canonical: u128, decimals: u8) -> Result<u64> {
    u64::try_from(to_native_wide(canonical, decimals)?)
        .map_err(|_| StakingError::ConversionOverflow.into())
}
