use anchor_lang::prelude::*;
use primitive_types::U256;

use crate::error::StakingError;

/// Compute `a * b / c` with a 256-bit intermediate, truncating.
pub fn mul_div(a: u128, b: u128, c: u128) -> Result<u128> {
    if c == 0 {
        return Err(StakingError::DivisionByZero.into());
    }
    let product = U256::from(a)
        .checked_mul(U256::from(b))
        .ok_or(StakingError::MathOverflow)?;
    let quotient = product / U256::from(c);
    if quotient > U256::from(u128::MAX) {
        return Err(StakingError::MathOverflow.into());
    }
    Ok(quotient.low_u128())
}

/// Convert a day count into seconds.
pub fn days_to_seconds(days: u64) -> Result<i64> {
    i64::try_from(days)
        .map_err(|_| StakingError::ConversionOverflow)?
        .checked_mul(crate::constants::SECONDS_PER_DAY)
        .ok_or(StakingError::MathOverflow.into())
}
