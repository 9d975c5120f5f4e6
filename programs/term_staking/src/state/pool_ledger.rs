use anchor_lang::prelude::*;
use anchor_lang::prelude::borsh;

use crate::error::StakingError;
use crate::math::{from_canonical, pool_size_cap, to_native_wide};
use crate::state::PoolConfig;

/// The balance a sweep drains.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum SweepKind {
    /// Principal of revoked stakes, now owned by the pool.
    RevokedStake,
    /// Penalties taken from early unstakes.
    UnstakePenalty,
    /// Funded reward that no stake has a claim on.
    UnallocatedReward,
}

/// The counter changes caused by one transition. Every mutation of a
/// [`PoolLedger`] goes through [`PoolLedger::apply`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LedgerDelta {
    Stake {
        amount: u128,
        reward_at_maturity: u128,
    },
    Unstake {
        unstake_amount: u128,
        penalty_amount: u128,
        /// Reward at maturity minus reward at unstake; zero when matured.
        forfeited_reward: u128,
        matured: bool,
    },
    Claim {
        amount: u128,
    },
    Revoke {
        stake_amount: u128,
        reward_amount: u128,
    },
    Withdraw {
        amount: u128,
    },
    FundReward {
        amount: u128,
    },
    Sweep {
        kind: SweepKind,
        amount: u128,
    },
}

/// Per-pool aggregate counters, all canonical.
///
/// Pool reward and remaining reward are derived on read and never stored.
///
/// Counters only grow. For a token with `d` decimals a counter reaches
/// `u128::MAX` after roughly `1.8 * 10^(d + 1)` cycles of the token's whole
/// `u64` supply (18 cycles at zero decimals); past that every transition
/// touching it fails with `MathOverflow` instead of wrapping.
#[account]
#[derive(Default, Debug)]
pub struct PoolLedger {
    pub pool: Pubkey,

    pub total_staked: u128,
    /// Sum of reward at maturity over every stake ever admitted.
    pub total_reward_admitted: u128,
    pub total_unstaked_before_maturity: u128,
    pub total_unstaked_after_maturity: u128,
    pub total_withdrawn: u128,

    pub total_reward_funded: u128,
    pub total_reward_claimed: u128,
    pub total_reward_removed: u128,
    pub total_reward_revoked: u128,
    pub total_reward_forfeited: u128,

    pub total_revoked_stake: u128,
    pub total_revoked_stake_swept: u128,
    pub total_unstake_penalty: u128,
    pub total_unstake_penalty_swept: u128,

    pub stake_count: u64,
    pub bump: u8,
}

/// Read-only snapshot of a pool's ledger, in native token units.
///
/// Totals are lifetime sums, so they are `u128` even though each token
/// balance fits in `u64`.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct PoolStats {
    pub stake_count: u64,
    pub total_staked: u128,
    pub total_unstaked_before_maturity: u128,
    pub total_unstaked_after_maturity: u128,
    pub total_withdrawn: u128,
    /// Reward at maturity summed over every stake ever admitted. Forfeited
    /// and revoked shares are not subtracted; they flow back through
    /// `pool_reward_amount` instead.
    pub total_reward_admitted: u128,
    pub total_reward_funded: u128,
    pub total_reward_claimed: u128,
    pub total_reward_removed: u128,
    pub total_reward_revoked: u128,
    pub total_reward_forfeited: u128,
    pub total_revoked_stake: u128,
    pub total_revoked_stake_swept: u128,
    pub total_unstake_penalty: u128,
    pub total_unstake_penalty_swept: u128,
    pub pool_reward_amount: u128,
    pub pool_remaining_reward: u128,
    /// Principal the whole pool reward can service; `None` when unbounded.
    pub pool_size: Option<u128>,
    /// Further principal the pool can admit; `None` when unbounded.
    pub remaining_capacity: Option<u128>,
}

fn add(counter: &mut u128, amount: u128) -> Result<()> {
    *counter = counter.checked_add(amount).ok_or(StakingError::MathOverflow)?;
    Ok(())
}

impl PoolLedger {
    pub const LEN: usize = 8 + 32 + 16 * 14 + 8 + 1;

    /// `funded + revoked + forfeited - removed`.
    pub fn pool_reward_amount(&self) -> Result<u128> {
        self.total_reward_funded
            .checked_add(self.total_reward_revoked)
            .ok_or(StakingError::MathOverflow)?
            .checked_add(self.total_reward_forfeited)
            .ok_or(StakingError::MathOverflow)?
            .checked_sub(self.total_reward_removed)
            .ok_or(StakingError::MathUnderflow.into())
    }

    /// Pool reward not committed to any stake.
    pub fn pool_remaining_reward(&self) -> Result<u128> {
        self.pool_reward_amount()?
            .checked_sub(self.total_reward_admitted)
            .ok_or(StakingError::MathUnderflow.into())
    }

    /// Principal the pool's whole reward can service at the configured rate.
    pub fn pool_size(&self, config: &PoolConfig) -> Result<Option<u128>> {
        pool_size_cap(self.pool_reward_amount()?, config.apr, config.stake_duration_days)
    }

    /// Further principal the pool can admit, truncated to the stake token.
    pub fn remaining_capacity(&self, config: &PoolConfig) -> Result<Option<u128>> {
        match pool_size_cap(
            self.pool_remaining_reward()?,
            config.apr,
            config.stake_duration_days,
        )? {
            Some(cap) => Ok(Some(from_canonical(cap, config.stake_decimals)?)),
            None => Ok(None),
        }
    }

    pub fn unswept_revoked_stake(&self) -> Result<u128> {
        self.total_revoked_stake
            .checked_sub(self.total_revoked_stake_swept)
            .ok_or(StakingError::MathUnderflow.into())
    }

    pub fn unswept_unstake_penalty(&self) -> Result<u128> {
        self.total_unstake_penalty
            .checked_sub(self.total_unstake_penalty_swept)
            .ok_or(StakingError::MathUnderflow.into())
    }

    /// Amount a sweep of `kind` would pay out right now.
    pub fn sweepable(&self, kind: SweepKind) -> Result<u128> {
        match kind {
            SweepKind::RevokedStake => self.unswept_revoked_stake(),
            SweepKind::UnstakePenalty => self.unswept_unstake_penalty(),
            SweepKind::UnallocatedReward => self.pool_remaining_reward(),
        }
    }

    /// Admission control: reject a stake whose principal exceeds what the
    /// remaining reward can service, or whose reward would overdraw it.
    pub fn check_admission(&self, config: &PoolConfig, amount: u128, reward_at_maturity: u128) -> Result<()> {
        require!(amount > 0, StakingError::ZeroAmount);
        if let Some(capacity) = self.remaining_capacity(config)? {
            require!(amount <= capacity, StakingError::PoolCapacityExceeded);
        }
        require!(
            reward_at_maturity <= self.pool_remaining_reward()?,
            StakingError::PoolCapacityExceeded
        );
        Ok(())
    }

    /// Fold one transition into the counters.
    ///
    /// Sweeps must drain exactly the current unswept remainder, and a zero
    /// remainder is rejected with the sweep's no-op error.
    pub fn apply(&mut self, delta: LedgerDelta) -> Result<()> {
        match delta {
            LedgerDelta::Stake {
                amount,
                reward_at_maturity,
            } => {
                add(&mut self.total_staked, amount)?;
                add(&mut self.total_reward_admitted, reward_at_maturity)?;
                self.stake_count = self
                    .stake_count
                    .checked_add(1)
                    .ok_or(StakingError::MathOverflow)?;
            }
            LedgerDelta::Unstake {
                unstake_amount,
                penalty_amount,
                forfeited_reward,
                matured,
            } => {
                if matured {
                    add(&mut self.total_unstaked_after_maturity, unstake_amount)?;
                } else {
                    add(&mut self.total_unstaked_before_maturity, unstake_amount)?;
                    add(&mut self.total_reward_forfeited, forfeited_reward)?;
                    add(&mut self.total_unstake_penalty, penalty_amount)?;
                }
            }
            LedgerDelta::Claim { amount } => add(&mut self.total_reward_claimed, amount)?,
            LedgerDelta::Revoke {
                stake_amount,
                reward_amount,
            } => {
                add(&mut self.total_revoked_stake, stake_amount)?;
                add(&mut self.total_reward_revoked, reward_amount)?;
            }
            LedgerDelta::Withdraw { amount } => add(&mut self.total_withdrawn, amount)?,
            LedgerDelta::FundReward { amount } => {
                require!(amount > 0, StakingError::ZeroAmount);
                add(&mut self.total_reward_funded, amount)?;
            }
            LedgerDelta::Sweep { kind, amount } => {
                let available = self.sweepable(kind)?;
                if available == 0 {
                    return Err(match kind {
                        SweepKind::RevokedStake => StakingError::NoRevokedStakeToSweep,
                        SweepKind::UnstakePenalty => StakingError::NoUnstakePenaltyToSweep,
                        SweepKind::UnallocatedReward => StakingError::NoUnallocatedRewardToSweep,
                    }
                    .into());
                }
                require!(amount == available, StakingError::SweepAmountMismatch);
                match kind {
                    SweepKind::RevokedStake => add(&mut self.total_revoked_stake_swept, amount)?,
                    SweepKind::UnstakePenalty => add(&mut self.total_unstake_penalty_swept, amount)?,
                    SweepKind::UnallocatedReward => add(&mut self.total_reward_removed, amount)?,
                }
            }
        }
        Ok(())
    }

    /// Snapshot in native units; stake counters use the stake token's
    /// decimals and reward counters the reward token's.
    pub fn stats(&self, config: &PoolConfig) -> Result<PoolStats> {
        let stake = |value: u128| to_native_wide(value, config.stake_decimals);
        let reward = |value: u128| to_native_wide(value, config.reward_decimals);

        Ok(PoolStats {
            stake_count: self.stake_count,
            total_staked: stake(self.total_staked)?,
            total_unstaked_before_maturity: stake(self.total_unstaked_before_maturity)?,
            total_unstaked_after_maturity: stake(self.total_unstaked_after_maturity)?,
            total_withdrawn: stake(self.total_withdrawn)?,
            total_reward_admitted: reward(self.total_reward_admitted)?,
            total_reward_funded: reward(self.total_reward_funded)?,
            total_reward_claimed: reward(self.total_reward_claimed)?,
            total_reward_removed: reward(self.total_reward_removed)?,
            total_reward_revoked: reward(self.total_reward_revoked)?,
            total_reward_forfeited: reward(self.total_reward_forfeited)?,
            total_revoked_stake: stake(self.total_revoked_stake)?,
            total_revoked_stake_swept: stake(self.total_revoked_stake_swept)?,
            total_unstake_penalty: stake(self.total_unstake_penalty)?,
            total_unstake_penalty_swept: stake(self.total_unstake_penalty_swept)?,
            pool_reward_amount: reward(self.pool_reward_amount()?)?,
            pool_remaining_reward: reward(self.pool_remaining_reward()?)?,
            pool_size: self.pool_size(config)?.map(stake).transpose()?,
            remaining_capacity: self.remaining_capacity(config)?.map(stake).transpose()?,
        })
    }
}
