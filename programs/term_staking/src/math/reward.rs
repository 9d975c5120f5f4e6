//! Reward and penalty accrual.
//!
//! All amounts are canonical (18-decimal) values and all percentages are
//! 18-decimal fixed-point where `HUNDRED_PERCENT` is 100%. Timestamps are unix
//! seconds; an `unstake_ts` of zero means the stake was never unstaked.

use anchor_lang::prelude::*;

use crate::constants::{DAYS_PER_YEAR, HUNDRED_PERCENT};
use crate::error::StakingError;
use crate::math::decimals::from_canonical;
use crate::math::fixed_point::{days_to_seconds, mul_div};

/// Timestamp at which a stake's fixed duration elapses.
pub fn maturity_timestamp(stake_ts: i64, duration_days: u64) -> Result<i64> {
    stake_ts
        .checked_add(days_to_seconds(duration_days)?)
        .ok_or(StakingError::MathOverflow.into())
}

/// Full reward owed at maturity:
/// `amount * apr * duration_days / (365 * 100%)`, truncated to the reward token.
pub fn reward_at_maturity(
    amount: u128,
    apr: u128,
    duration_days: u64,
    reward_decimals: u8,
) -> Result<u128> {
    let rate = apr
        .checked_mul(u128::from(duration_days))
        .ok_or(StakingError::MathOverflow)?;
    let denominator = DAYS_PER_YEAR
        .checked_mul(HUNDRED_PERCENT)
        .ok_or(StakingError::MathOverflow)?;
    from_canonical(mul_div(amount, rate, denominator)?, reward_decimals)
}

/// A stake is matured once maturity is reached, measured at the unstake time
/// if one exists, otherwise at `now`.
pub fn is_matured(maturity_ts: i64, now: i64, unstake_ts: i64) -> bool {
    let effective = if unstake_ts > 0 { unstake_ts } else { now };
    maturity_ts > 0 && effective >= maturity_ts
}

/// Reward accrued linearly up to the effective time.
///
/// The effective time is the unstake time capped at maturity, or maturity
/// itself once matured, or `now`. This is the one formula used both for
/// "claimable now" and for freezing the reward at unstake.
pub fn reward_at_effective_time(
    reward_at_maturity: u128,
    stake_ts: i64,
    maturity_ts: i64,
    now: i64,
    unstake_ts: i64,
    reward_decimals: u8,
) -> Result<u128> {
    let effective = if unstake_ts > 0 {
        unstake_ts.min(maturity_ts)
    } else if is_matured(maturity_ts, now, unstake_ts) {
        maturity_ts
    } else {
        now
    };
    let full = maturity_ts
        .checked_sub(stake_ts)
        .filter(|full| *full > 0)
        .ok_or(StakingError::DivisionByZero)?;
    if effective <= stake_ts {
        return Ok(0);
    }
    let elapsed = effective - stake_ts;
    let accrued = mul_div(reward_at_maturity, elapsed as u128, full as u128)?;
    from_canonical(accrued, reward_decimals)
}

/// Reward the staker can claim right now.
///
/// Nothing accrues before maturity while the stake is still locked; an early
/// unstake freezes the pro-rata share, and maturity releases the full amount.
pub fn claimable_reward(
    reward_at_maturity: u128,
    claimed: u128,
    stake_ts: i64,
    maturity_ts: i64,
    now: i64,
    unstake_ts: i64,
    reward_decimals: u8,
) -> Result<u128> {
    let effective_reward = if is_matured(maturity_ts, now, unstake_ts) {
        reward_at_maturity
    } else if unstake_ts > 0 {
        reward_at_effective_time(
            reward_at_maturity,
            stake_ts,
            maturity_ts,
            now,
            unstake_ts,
            reward_decimals,
        )?
    } else {
        0
    };
    Ok(effective_reward.saturating_sub(claimed))
}

/// Early-exit penalty percentage, interpolated linearly from `max_pct` at the
/// stake time down to `min_pct` at maturity. Zero once matured.
///
/// Computed as `(max * full - (max - min) * elapsed) / full` so there is a
/// single truncating division: exactly `max` at `elapsed == 0` and exactly
/// `min` at `elapsed == full`.
pub fn penalty_percent(
    max_pct: u128,
    min_pct: u128,
    stake_ts: i64,
    maturity_ts: i64,
    now: i64,
    unstake_ts: i64,
) -> Result<u128> {
    require!(min_pct <= max_pct, StakingError::InvalidPenalty);
    if is_matured(maturity_ts, now, unstake_ts) {
        return Ok(0);
    }
    let full = maturity_ts
        .checked_sub(stake_ts)
        .filter(|full| *full > 0)
        .ok_or(StakingError::DivisionByZero)? as u128;
    let effective = if unstake_ts > 0 { unstake_ts } else { now };
    let elapsed = (effective.saturating_sub(stake_ts).max(0) as u128).min(full);

    let spread = max_pct - min_pct;
    let numerator = max_pct
        .checked_mul(full)
        .ok_or(StakingError::MathOverflow)?
        .checked_sub(spread.checked_mul(elapsed).ok_or(StakingError::MathOverflow)?)
        .ok_or(StakingError::MathUnderflow)?;
    Ok(numerator / full)
}

/// Penalty taken from the principal, truncated to the stake token.
pub fn penalty_amount(stake_amount: u128, penalty_pct: u128, stake_decimals: u8) -> Result<u128> {
    from_canonical(
        mul_div(stake_amount, penalty_pct, HUNDRED_PERCENT)?,
        stake_decimals,
    )
}

/// When unstaked principal becomes withdrawable. A matured unstake has no
/// cooldown.
pub fn cooldown_expiry(maturity_ts: i64, unstake_ts: i64, cooldown_days: u64) -> Result<i64> {
    if is_matured(maturity_ts, unstake_ts, unstake_ts) {
        return Ok(unstake_ts);
    }
    unstake_ts
        .checked_add(days_to_seconds(cooldown_days)?)
        .ok_or(StakingError::MathOverflow.into())
}

/// Maximum principal that `reward_amount` can service at `apr` for the full
/// duration: `365 * 100% * reward_amount / (duration_days * apr)`.
///
/// `None` means unbounded, which is the case for a zero-APR pool.
pub fn pool_size_cap(reward_amount: u128, apr: u128, duration_days: u64) -> Result<Option<u128>> {
    if apr == 0 {
        return Ok(None);
    }
    let rate = apr
        .checked_mul(u128::from(duration_days))
        .ok_or(StakingError::MathOverflow)?;
    let numerator = DAYS_PER_YEAR
        .checked_mul(HUNDRED_PERCENT)
        .ok_or(StakingError::MathOverflow)?;
    mul_div(reward_amount, numerator, rate).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use anchor_lang::error::Error;
    use crate::constants::{ONE_PERCENT, SECONDS_PER_DAY};

    const TOKEN: u128 = 1_000_000_000_000_000_000;
    const DAY: i64 = SECONDS_PER_DAY;

    #[test]
    fn test_maturity_timestamp() {
        assert_eq!(maturity_timestamp(1_000, 180).unwrap(), 1_000 + 180 * DAY);
    }

    #[test]
    fn test_reward_at_maturity_half_year_at_fifty_percent() {
        let reward = reward_at_maturity(1_000 * TOKEN, 50 * ONE_PERCENT, 365, 18).unwrap();
        assert_eq!(reward, 500 * TOKEN);
    }

    #[test]
    fn test_reward_at_maturity_truncates_to_reward_decimals() {
        // 1000 * 0.5 * 180 / 365 = 246.575342465753424657...
        let reward = reward_at_maturity(1_000 * TOKEN, 50 * ONE_PERCENT, 180, 6).unwrap();
        assert_eq!(reward, 246_575_342_000_000_000_000);
    }

    #[test]
    fn test_zero_apr_yields_zero_reward() {
        assert_eq!(reward_at_maturity(1_000 * TOKEN, 0, 180, 18).unwrap(), 0);
    }

    #[test]
    fn test_is_matured() {
        assert!(!is_matured(0, 100, 0));
        assert!(!is_matured(100, 99, 0));
        assert!(is_matured(100, 100, 0));
        // unstake time wins over now
        assert!(!is_matured(100, 500, 50));
        assert!(is_matured(100, 50, 150));
    }

    #[test]
    fn test_reward_at_effective_time_is_linear() {
        let maturity = 180 * DAY;
        let half = reward_at_effective_time(1_000 * TOKEN, 0, maturity, 90 * DAY, 0, 18).unwrap();
        assert_eq!(half, 500 * TOKEN);

        // unstake time is capped at maturity
        let capped =
            reward_at_effective_time(1_000 * TOKEN, 0, maturity, 400 * DAY, 300 * DAY, 18).unwrap();
        assert_eq!(capped, 1_000 * TOKEN);

        let before_start = reward_at_effective_time(1_000 * TOKEN, 100, maturity, 50, 0, 18).unwrap();
        assert_eq!(before_start, 0);
    }

    #[test]
    fn test_claimable_is_zero_before_maturity_while_locked() {
        let claimable = claimable_reward(1_000 * TOKEN, 0, 0, 180 * DAY, 179 * DAY, 0, 18).unwrap();
        assert_eq!(claimable, 0);
    }

    #[test]
    fn test_claimable_after_early_unstake_is_frozen() {
        let at_unstake = claimable_reward(1_000 * TOKEN, 0, 0, 180 * DAY, 90 * DAY, 90 * DAY, 18).unwrap();
        let later = claimable_reward(1_000 * TOKEN, 0, 0, 180 * DAY, 500 * DAY, 90 * DAY, 18).unwrap();
        assert_eq!(at_unstake, 500 * TOKEN);
        assert_eq!(later, at_unstake);
    }

    #[test]
    fn test_claimable_subtracts_claimed() {
        let claimable =
            claimable_reward(1_000 * TOKEN, 1_000 * TOKEN, 0, 180 * DAY, 200 * DAY, 0, 18).unwrap();
        assert_eq!(claimable, 0);
    }

    #[test]
    fn test_penalty_percent_boundaries() {
        let max = 20 * ONE_PERCENT;
        let min = 5 * ONE_PERCENT;
        let maturity = 180 * DAY;
        assert_eq!(penalty_percent(max, min, 0, maturity, 0, 0).unwrap(), max);
        assert_eq!(
            penalty_percent(max, min, 0, maturity, 90 * DAY, 0).unwrap(),
            (max + min) / 2
        );
        // matured: no penalty even though min is non-zero
        assert_eq!(penalty_percent(max, min, 0, maturity, maturity, 0).unwrap(), 0);
        // just before maturity approaches min from above
        let almost = penalty_percent(max, min, 0, maturity, maturity - 1, 0).unwrap();
        assert!(almost >= min && almost < min + ONE_PERCENT / 1_000);
    }

    #[test]
    fn test_penalty_percent_uses_unstake_time() {
        let max = 20 * ONE_PERCENT;
        let min = 0;
        let pct = penalty_percent(max, min, 0, 100 * DAY, 500 * DAY, 50 * DAY).unwrap();
        assert_eq!(pct, 10 * ONE_PERCENT);
    }

    #[test]
    fn test_penalty_percent_rejects_inverted_bounds() {
        assert_eq!(
            penalty_percent(ONE_PERCENT, 2 * ONE_PERCENT, 0, DAY, 0, 0).unwrap_err(),
            Error::from(StakingError::InvalidPenalty)
        );
    }

    #[test]
    fn test_penalty_amount() {
        let amount = penalty_amount(1_000 * TOKEN, 12 * ONE_PERCENT + ONE_PERCENT / 2, 18).unwrap();
        assert_eq!(amount, 125 * TOKEN);
        // a 0-decimal token drops the fraction
        let whole = penalty_amount(999 * TOKEN, 10 * ONE_PERCENT, 0).unwrap();
        assert_eq!(whole, 99 * TOKEN);
    }

    #[test]
    fn test_cooldown_expiry() {
        assert_eq!(cooldown_expiry(180 * DAY, 90 * DAY, 7).unwrap(), 97 * DAY);
        assert_eq!(cooldown_expiry(180 * DAY, 200 * DAY, 7).unwrap(), 200 * DAY);
    }

    #[test]
    fn test_pool_size_cap_inverts_reward() {
        let cap = pool_size_cap(500 * TOKEN, 50 * ONE_PERCENT, 365).unwrap();
        assert_eq!(cap, Some(1_000 * TOKEN));
        assert_eq!(pool_size_cap(500 * TOKEN, 0, 365).unwrap(), None);
    }
}
