use anchor_lang::prelude::*;
use anchor_lang::prelude::borsh;

use crate::error::StakingError;
use crate::math::{
    claimable_reward, cooldown_expiry, is_matured, maturity_timestamp, penalty_amount,
    penalty_percent, reward_at_effective_time, reward_at_maturity, to_native,
};
use crate::state::{LedgerDelta, PoolConfig, PoolLedger};

/// Where a stake sits in its lifecycle. Suspension is tracked separately by
/// the `active` flag.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum StakeStatus {
    Uninitialized,
    Active,
    Unstaked,
    Withdrawn,
    Revoked,
}

/// Tokens a transition pays out of a pool vault, canonical.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Payout {
    Stake(u128),
    Reward(u128),
}

/// Side effects of one lifecycle transition: the ledger delta to fold in and
/// the payout to request once state is updated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Transition {
    pub delta: LedgerDelta,
    pub payout: Option<Payout>,
}

/// Identity of a stake record.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StakeKey {
    pub pool: Pubkey,
    pub staker: Pubkey,
    pub stake_id: u64,
}

/// Economics of unstaking at a given time, canonical.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct UnstakeQuote {
    pub matured: bool,
    pub unstake_amount: u128,
    pub penalty_percent: u128,
    pub penalty_amount: u128,
    pub reward_at_unstake: u128,
    pub cooldown_expiry_ts: i64,
}

/// Read-only view of a stake record, in native token units.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct StakeInfo {
    pub stake_id: u64,
    pub staker: Pubkey,
    pub status: StakeStatus,
    pub suspended: bool,
    pub stake_amount: u64,
    pub stake_ts: i64,
    pub maturity_ts: i64,
    pub estimated_reward_at_maturity: u64,
    pub estimated_reward_at_unstake: u64,
    pub reward_claimed: u64,
    pub unstake_amount: u64,
    pub unstake_penalty_amount: u64,
    pub unstake_ts: i64,
    pub unstake_cooldown_expiry_ts: i64,
    pub withdrawal_ts: i64,
    pub revoked_stake_amount: u64,
    pub revoked_reward_amount: u64,
    pub revoke_ts: i64,
}

/// What unstaking now would yield, in native token units.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct UnstakingInfo {
    pub matured: bool,
    pub unstake_amount: u64,
    /// 18-decimal percent.
    pub penalty_percent: u128,
    pub penalty_amount: u64,
    pub reward_at_unstake: u64,
    pub cooldown_expiry_ts: i64,
}

/// One stake of one staker in one pool. Never closed; it stays as a
/// historical record after withdrawal or revocation.
#[account]
#[derive(Default, Debug)]
pub struct StakeRecord {
    pub pool: Pubkey,
    pub staker: Pubkey,
    pub stake_id: u64,

    pub initialized: bool,
    /// False while suspended.
    pub active: bool,
    pub revoked: bool,

    pub stake_amount: u128,
    pub stake_ts: i64,
    pub maturity_ts: i64,
    pub estimated_reward_at_maturity: u128,
    pub estimated_reward_at_unstake: u128,
    pub reward_claimed: u128,

    pub unstake_amount: u128,
    pub unstake_penalty_amount: u128,
    pub unstake_ts: i64,
    pub unstake_cooldown_expiry_ts: i64,
    pub withdrawal_ts: i64,

    pub revoked_reward_amount: u128,
    pub revoked_stake_amount: u128,
    pub revoke_ts: i64,

    pub bump: u8,
}

impl StakeRecord {
    pub const LEN: usize = 8 + 32 + 32 + 8 + 3 + 16 * 8 + 8 * 6 + 1;

    pub fn status(&self) -> StakeStatus {
        if !self.initialized {
            StakeStatus::Uninitialized
        } else if self.revoked {
            StakeStatus::Revoked
        } else if self.withdrawal_ts > 0 {
            StakeStatus::Withdrawn
        } else if self.unstake_ts > 0 {
            StakeStatus::Unstaked
        } else {
            StakeStatus::Active
        }
    }

    pub fn is_unstaked(&self) -> bool {
        self.unstake_ts > 0
    }

    fn require_initialized(&self) -> Result<()> {
        require!(self.initialized, StakingError::StakeUninitialized);
        Ok(())
    }

    fn require_live(&self) -> Result<()> {
        self.require_initialized()?;
        require!(!self.revoked, StakingError::StakeRevoked);
        Ok(())
    }

    /// Admit a new stake of `amount` (canonical) and fix its maturity reward.
    pub fn open(
        &mut self,
        config: &PoolConfig,
        ledger: &PoolLedger,
        key: StakeKey,
        amount: u128,
        now: i64,
    ) -> Result<Transition> {
        require!(!self.initialized, StakingError::StakeAlreadyExists);
        require!(amount > 0, StakingError::ZeroAmount);

        let reward = reward_at_maturity(
            amount,
            config.apr,
            config.stake_duration_days,
            config.reward_decimals,
        )?;
        ledger.check_admission(config, amount, reward)?;

        self.pool = key.pool;
        self.staker = key.staker;
        self.stake_id = key.stake_id;
        self.initialized = true;
        self.active = true;
        self.stake_amount = amount;
        self.stake_ts = now;
        self.maturity_ts = maturity_timestamp(now, config.stake_duration_days)?;
        self.estimated_reward_at_maturity = reward;

        Ok(Transition {
            delta: LedgerDelta::Stake {
                amount,
                reward_at_maturity: reward,
            },
            payout: None,
        })
    }

    /// Reward claimable right now. A revoked stake has nothing to claim.
    pub fn claimable(&self, config: &PoolConfig, now: i64) -> Result<u128> {
        if !self.initialized || self.revoked {
            return Ok(0);
        }
        claimable_reward(
            self.estimated_reward_at_maturity,
            self.reward_claimed,
            self.stake_ts,
            self.maturity_ts,
            now,
            self.unstake_ts,
            config.reward_decimals,
        )
    }

    pub fn claim(&mut self, config: &PoolConfig, now: i64) -> Result<Transition> {
        self.require_live()?;
        require!(self.active, StakingError::StakeSuspended);

        let amount = self.claimable(config, now)?;
        require!(amount > 0, StakingError::NothingToClaim);

        self.reward_claimed = self
            .reward_claimed
            .checked_add(amount)
            .ok_or(StakingError::MathOverflow)?;

        Ok(Transition {
            delta: LedgerDelta::Claim { amount },
            payout: Some(Payout::Reward(amount)),
        })
    }

    /// What unstaking at `now` would yield, without changing anything.
    pub fn unstake_quote(&self, config: &PoolConfig, now: i64) -> Result<UnstakeQuote> {
        self.require_live()?;
        require!(!self.is_unstaked(), StakingError::AlreadyUnstaked);

        let matured = is_matured(self.maturity_ts, now, now);
        let reward_at_unstake = reward_at_effective_time(
            self.estimated_reward_at_maturity,
            self.stake_ts,
            self.maturity_ts,
            now,
            now,
            config.reward_decimals,
        )?;
        let percent = penalty_percent(
            config.penalty_max,
            config.penalty_min,
            self.stake_ts,
            self.maturity_ts,
            now,
            now,
        )?;
        let penalty = penalty_amount(self.stake_amount, percent, config.stake_decimals)?;

        Ok(UnstakeQuote {
            matured,
            unstake_amount: self
                .stake_amount
                .checked_sub(penalty)
                .ok_or(StakingError::MathUnderflow)?,
            penalty_percent: percent,
            penalty_amount: penalty,
            reward_at_unstake,
            cooldown_expiry_ts: cooldown_expiry(self.maturity_ts, now, config.cooldown_days)?,
        })
    }

    /// Freeze the exit economics. No tokens move.
    pub fn unstake(&mut self, config: &PoolConfig, now: i64) -> Result<Transition> {
        self.require_live()?;
        require!(self.active, StakingError::StakeSuspended);
        let quote = self.unstake_quote(config, now)?;

        self.unstake_amount = quote.unstake_amount;
        self.unstake_penalty_amount = quote.penalty_amount;
        self.estimated_reward_at_unstake = quote.reward_at_unstake;
        self.unstake_ts = now;
        self.unstake_cooldown_expiry_ts = quote.cooldown_expiry_ts;

        let forfeited_reward = if quote.matured {
            0
        } else {
            self.estimated_reward_at_maturity
                .checked_sub(quote.reward_at_unstake)
                .ok_or(StakingError::MathUnderflow)?
        };

        Ok(Transition {
            delta: LedgerDelta::Unstake {
                unstake_amount: quote.unstake_amount,
                penalty_amount: quote.penalty_amount,
                forfeited_reward,
                matured: quote.matured,
            },
            payout: None,
        })
    }

    /// Pay out unstaked principal once the cooldown is over. Reaching the
    /// original maturity waives any remaining cooldown.
    pub fn withdraw(&mut self, now: i64) -> Result<Transition> {
        self.require_live()?;
        require!(self.is_unstaked(), StakingError::NotUnstaked);
        require!(self.withdrawal_ts == 0, StakingError::AlreadyWithdrawn);
        require!(
            now >= self.unstake_cooldown_expiry_ts || now >= self.maturity_ts,
            StakingError::CooldownNotExpired
        );

        self.withdrawal_ts = now;

        Ok(Transition {
            delta: LedgerDelta::Withdraw {
                amount: self.unstake_amount,
            },
            payout: Some(Payout::Stake(self.unstake_amount)),
        })
    }

    /// Terminate the stake. Principal still held becomes pool-owned and the
    /// unclaimed reward returns to the pool. No tokens move.
    pub fn revoke(&mut self, now: i64) -> Result<Transition> {
        self.require_live()?;
        require!(self.withdrawal_ts == 0, StakingError::AlreadyWithdrawn);

        let stake_amount = if self.is_unstaked() {
            self.unstake_amount
        } else {
            self.stake_amount
        };
        let reward_amount = if self.reward_claimed > 0 {
            0
        } else if self.is_unstaked() {
            self.estimated_reward_at_unstake
        } else {
            self.estimated_reward_at_maturity
        };

        self.revoked = true;
        self.revoked_stake_amount = stake_amount;
        self.revoked_reward_amount = reward_amount;
        self.revoke_ts = now;

        Ok(Transition {
            delta: LedgerDelta::Revoke {
                stake_amount,
                reward_amount,
            },
            payout: None,
        })
    }

    /// Freeze claims and unstakes. The clock keeps running toward maturity.
    pub fn suspend(&mut self) -> Result<()> {
        self.require_live()?;
        require!(self.withdrawal_ts == 0, StakingError::AlreadyWithdrawn);
        require!(self.active, StakingError::StakeSuspended);
        self.active = false;
        Ok(())
    }

    pub fn resume(&mut self) -> Result<()> {
        self.require_live()?;
        require!(self.withdrawal_ts == 0, StakingError::AlreadyWithdrawn);
        require!(!self.active, StakingError::StakeNotSuspended);
        self.active = true;
        Ok(())
    }

    pub fn info(&self, config: &PoolConfig) -> Result<StakeInfo> {
        self.require_initialized()?;
        let stake = |value: u128| to_native(value, config.stake_decimals);
        let reward = |value: u128| to_native(value, config.reward_decimals);

        Ok(StakeInfo {
            stake_id: self.stake_id,
            staker: self.staker,
            status: self.status(),
            suspended: !self.active,
            stake_amount: stake(self.stake_amount)?,
            stake_ts: self.stake_ts,
            maturity_ts: self.maturity_ts,
            estimated_reward_at_maturity: reward(self.estimated_reward_at_maturity)?,
            estimated_reward_at_unstake: reward(self.estimated_reward_at_unstake)?,
            reward_claimed: reward(self.reward_claimed)?,
            unstake_amount: stake(self.unstake_amount)?,
            unstake_penalty_amount: stake(self.unstake_penalty_amount)?,
            unstake_ts: self.unstake_ts,
            unstake_cooldown_expiry_ts: self.unstake_cooldown_expiry_ts,
            withdrawal_ts: self.withdrawal_ts,
            revoked_stake_amount: stake(self.revoked_stake_amount)?,
            revoked_reward_amount: reward(self.revoked_reward_amount)?,
            revoke_ts: self.revoke_ts,
        })
    }

    pub fn unstaking_info(&self, config: &PoolConfig, now: i64) -> Result<UnstakingInfo> {
        let quote = self.unstake_quote(config, now)?;
        Ok(UnstakingInfo {
            matured: quote.matured,
            unstake_amount: to_native(quote.unstake_amount, config.stake_decimals)?,
            penalty_percent: quote.penalty_percent,
            penalty_amount: to_native(quote.penalty_amount, config.stake_decimals)?,
            reward_at_unstake: to_native(quote.reward_at_unstake, config.reward_decimals)?,
            cooldown_expiry_ts: quote.cooldown_expiry_ts,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anchor_lang::error::Error;
    use crate::constants::{ONE_PERCENT, SECONDS_PER_DAY};

    const TOKEN: u128 = 1_000_000_000_000_000_000;
    const DAY: i64 = SECONDS_PER_DAY;
    const T0: i64 = 1_700_000_000;

    fn config() -> PoolConfig {
        PoolConfig {
            stake_decimals: 18,
            reward_decimals: 18,
            stake_duration_days: 100,
            apr: 365 * ONE_PERCENT,
            cooldown_days: 7,
            penalty_min: 10 * ONE_PERCENT,
            penalty_max: 30 * ONE_PERCENT,
            ..PoolConfig::default()
        }
    }

    fn funded_ledger() -> PoolLedger {
        let mut ledger = PoolLedger::default();
        ledger
            .apply(LedgerDelta::FundReward {
                amount: 1_000_000 * TOKEN,
            })
            .unwrap();
        ledger
    }

    fn key() -> StakeKey {
        StakeKey {
            pool: Pubkey::new_unique(),
            staker: Pubkey::new_unique(),
            stake_id: 1,
        }
    }

    fn opened(amount: u128) -> StakeRecord {
        let mut record = StakeRecord::default();
        record
            .open(&config(), &funded_ledger(), key(), amount, T0)
            .unwrap();
        record
    }

    #[test]
    fn test_open_fixes_reward_and_maturity() {
        let mut record = StakeRecord::default();
        let transition = record
            .open(&config(), &funded_ledger(), key(), 100 * TOKEN, T0)
            .unwrap();

        // 100 tokens at 365% for 100 days
        assert_eq!(record.estimated_reward_at_maturity, 100 * TOKEN);
        assert_eq!(record.maturity_ts, T0 + 100 * DAY);
        assert_eq!(record.status(), StakeStatus::Active);
        assert_eq!(
            transition.delta,
            LedgerDelta::Stake {
                amount: 100 * TOKEN,
                reward_at_maturity: 100 * TOKEN,
            }
        );
        assert_eq!(transition.payout, None);
    }

    #[test]
    fn test_open_rejects_duplicate() {
        let mut record = opened(TOKEN);
        assert_eq!(
            record
                .open(&config(), &funded_ledger(), key(), TOKEN, T0)
                .unwrap_err(),
            Error::from(StakingError::StakeAlreadyExists)
        );
    }

    #[test]
    fn test_open_rejects_when_pool_cannot_pay() {
        let mut record = StakeRecord::default();
        let err = record
            .open(&config(), &PoolLedger::default(), key(), TOKEN, T0)
            .unwrap_err();
        assert_eq!(err, Error::from(StakingError::PoolCapacityExceeded));
        assert!(!record.initialized);
    }

    #[test]
    fn test_claim_before_maturity_is_a_noop_error() {
        let mut record = opened(100 * TOKEN);
        assert_eq!(
            record.claim(&config(), T0 + 50 * DAY).unwrap_err(),
            Error::from(StakingError::NothingToClaim)
        );
        assert_eq!(record.reward_claimed, 0);
    }

    #[test]
    fn test_claim_after_maturity_pays_once() {
        let mut record = opened(100 * TOKEN);
        let transition = record.claim(&config(), T0 + 120 * DAY).unwrap();
        assert_eq!(transition.payout, Some(Payout::Reward(100 * TOKEN)));
        assert_eq!(
            record.claim(&config(), T0 + 130 * DAY).unwrap_err(),
            Error::from(StakingError::NothingToClaim)
        );
    }

    #[test]
    fn test_unstake_early_freezes_economics() {
        let mut record = opened(100 * TOKEN);
        let transition = record.unstake(&config(), T0 + 25 * DAY).unwrap();

        // a quarter of the way: 30% - 20% * 1/4 = 25%
        assert_eq!(record.unstake_penalty_amount, 25 * TOKEN);
        assert_eq!(record.unstake_amount, 75 * TOKEN);
        assert_eq!(record.estimated_reward_at_unstake, 25 * TOKEN);
        assert_eq!(record.unstake_cooldown_expiry_ts, T0 + 32 * DAY);
        assert_eq!(record.status(), StakeStatus::Unstaked);
        assert_eq!(
            transition.delta,
            LedgerDelta::Unstake {
                unstake_amount: 75 * TOKEN,
                penalty_amount: 25 * TOKEN,
                forfeited_reward: 75 * TOKEN,
                matured: false,
            }
        );

        assert_eq!(
            record.unstake(&config(), T0 + 26 * DAY).unwrap_err(),
            Error::from(StakingError::AlreadyUnstaked)
        );
    }

    #[test]
    fn test_unstake_after_maturity_has_no_penalty_or_cooldown() {
        let mut record = opened(100 * TOKEN);
        let now = T0 + 150 * DAY;
        record.unstake(&config(), now).unwrap();
        assert_eq!(record.unstake_penalty_amount, 0);
        assert_eq!(record.unstake_amount, 100 * TOKEN);
        assert_eq!(record.estimated_reward_at_unstake, 100 * TOKEN);
        assert_eq!(record.unstake_cooldown_expiry_ts, now);
        assert!(record.withdraw(now).is_ok());
    }

    #[test]
    fn test_withdraw_respects_cooldown() {
        let mut record = opened(100 * TOKEN);
        assert_eq!(
            record.withdraw(T0 + DAY).unwrap_err(),
            Error::from(StakingError::NotUnstaked)
        );

        record.unstake(&config(), T0 + 10 * DAY).unwrap();
        assert_eq!(
            record.withdraw(T0 + 16 * DAY).unwrap_err(),
            Error::from(StakingError::CooldownNotExpired)
        );

        let transition = record.withdraw(T0 + 17 * DAY).unwrap();
        assert_eq!(transition.payout, Some(Payout::Stake(record.unstake_amount)));
        assert_eq!(record.status(), StakeStatus::Withdrawn);
        assert_eq!(
            record.withdraw(T0 + 18 * DAY).unwrap_err(),
            Error::from(StakingError::AlreadyWithdrawn)
        );
    }

    #[test]
    fn test_maturity_waives_remaining_cooldown() {
        let config = PoolConfig {
            cooldown_days: 30,
            ..config()
        };
        let mut record = StakeRecord::default();
        record
            .open(&config, &funded_ledger(), key(), 100 * TOKEN, T0)
            .unwrap();
        record.unstake(&config, T0 + 90 * DAY).unwrap();
        assert!(record.withdraw(T0 + 100 * DAY).is_ok());
    }

    #[test]
    fn test_revoke_active_stake_takes_full_principal_and_reward() {
        let mut record = opened(100 * TOKEN);
        let transition = record.revoke(T0 + DAY).unwrap();
        assert_eq!(
            transition.delta,
            LedgerDelta::Revoke {
                stake_amount: 100 * TOKEN,
                reward_amount: 100 * TOKEN,
            }
        );
        assert_eq!(record.status(), StakeStatus::Revoked);
        assert_eq!(record.claimable(&config(), T0 + 200 * DAY).unwrap(), 0);
        assert_eq!(
            record.claim(&config(), T0 + 200 * DAY).unwrap_err(),
            Error::from(StakingError::StakeRevoked)
        );
        assert_eq!(
            record.revoke(T0 + 2 * DAY).unwrap_err(),
            Error::from(StakingError::StakeRevoked)
        );
    }

    #[test]
    fn test_revoke_after_claim_returns_no_reward() {
        let mut record = opened(100 * TOKEN);
        record.claim(&config(), T0 + 100 * DAY).unwrap();
        let transition = record.revoke(T0 + 101 * DAY).unwrap();
        assert_eq!(
            transition.delta,
            LedgerDelta::Revoke {
                stake_amount: 100 * TOKEN,
                reward_amount: 0,
            }
        );
    }

    #[test]
    fn test_suspend_blocks_claim_and_unstake_but_not_time() {
        let mut record = opened(100 * TOKEN);
        record.suspend().unwrap();
        assert_eq!(record.suspend().unwrap_err(), Error::from(StakingError::StakeSuspended));
        assert_eq!(
            record.unstake(&config(), T0 + DAY).unwrap_err(),
            Error::from(StakingError::StakeSuspended)
        );
        assert_eq!(
            record.claim(&config(), T0 + 100 * DAY).unwrap_err(),
            Error::from(StakingError::StakeSuspended)
        );
        // maturity kept ticking while suspended
        assert_eq!(record.claimable(&config(), T0 + 100 * DAY).unwrap(), 100 * TOKEN);

        record.resume().unwrap();
        assert_eq!(record.resume().unwrap_err(), Error::from(StakingError::StakeNotSuspended));
        assert!(record.claim(&config(), T0 + 100 * DAY).is_ok());
    }

    #[test]
    fn test_uninitialized_record_rejects_everything() {
        let mut record = StakeRecord::default();
        assert_eq!(record.status(), StakeStatus::Uninitialized);
        let uninitialized = Error::from(StakingError::StakeUninitialized);
        assert_eq!(record.claim(&config(), T0).unwrap_err(), uninitialized);
        assert_eq!(record.unstake(&config(), T0).unwrap_err(), uninitialized);
        assert_eq!(record.withdraw(T0).unwrap_err(), uninitialized);
        assert_eq!(record.revoke(T0).unwrap_err(), uninitialized);
        assert_eq!(record.info(&config()).unwrap_err(), uninitialized);
    }

    #[test]
    fn test_unstaking_info_matches_unstake() {
        let config = PoolConfig {
            stake_decimals: 6,
            reward_decimals: 9,
            ..config()
        };
        let mut record = StakeRecord::default();
        record
            .open(&config, &funded_ledger(), key(), 100 * TOKEN, T0)
            .unwrap();

        let now = T0 + 40 * DAY;
        let preview = record.unstaking_info(&config, now).unwrap();
        assert!(!preview.matured);
        assert_eq!(preview.unstake_amount + preview.penalty_amount, 100_000_000);

        record.unstake(&config, now).unwrap();
        let info = record.info(&config).unwrap();
        assert_eq!(preview.unstake_amount, info.unstake_amount);
        assert_eq!(preview.penalty_amount, info.unstake_penalty_amount);
        assert_eq!(preview.reward_at_unstake, info.estimated_reward_at_unstake);
        assert_eq!(preview.cooldown_expiry_ts, info.unstake_cooldown_expiry_ts);
        assert_eq!(
            record.unstaking_info(&config, now).unwrap_err(),
            Error::from(StakingError::AlreadyUnstaked)
        );
    }

    #[test]
    fn test_info_rejects_amounts_beyond_native_range() {
        // 100 tokens at 18 decimals is more than a u64 balance can hold
        let record = opened(100 * TOKEN);
        assert_eq!(
            record.info(&config()).unwrap_err(),
            Error::from(StakingError::ConversionOverflow)
        );
        assert_eq!(
            record.unstaking_info(&config(), T0 + DAY).unwrap_err(),
            Error::from(StakingError::ConversionOverflow)
        );
    }
}
