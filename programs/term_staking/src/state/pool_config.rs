use anchor_lang::prelude::*;
use anchor_lang::prelude::borsh;

use crate::constants::{CANONICAL_DECIMALS, HUNDRED_PERCENT};
use crate::error::StakingError;

/// Whether a pool accepts new stakes and allows staker exits.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PoolStatus {
    #[default]
    Open,
    /// No new stakes; existing stakes run to completion.
    Closed,
    /// No new stakes, claims, unstakes or withdrawals.
    Suspended,
}

/// The four parameters an authorized pool manager may change after creation.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PoolParams {
    pub cooldown_days: u64,
    pub penalty_min: u128,
    pub penalty_max: u128,
    pub maturity_extension_days: u64,
}

#[account]
#[derive(Default, Debug)]
pub struct PoolConfig {
    pub pool_id: u64,

    pub stake_mint: Pubkey,
    pub stake_decimals: u8,
    pub stake_vault: Pubkey,

    pub reward_mint: Pubkey,
    pub reward_decimals: u8,
    pub reward_vault: Pubkey,

    pub stake_duration_days: u64,
    /// Annualized reward rate, 18-decimal percent.
    pub apr: u128,

    pub cooldown_days: u64,
    pub penalty_min: u128,
    pub penalty_max: u128,
    /// Consumed by the revenue-share program, not by the ledger.
    pub maturity_extension_days: u64,

    pub status: PoolStatus,
    pub created_at: i64,

    pub stake_vault_bump: u8,
    pub reward_vault_bump: u8,
    pub bump: u8,
}

impl PoolConfig {
    pub const LEN: usize = 8
        + 8
        + (32 + 1 + 32) * 2
        + 8
        + 16
        + 8
        + 16 * 2
        + 8
        + 1
        + 8
        + 3;

    /// Validate the frozen parameters chosen at pool creation.
    pub fn validate_terms(stake_decimals: u8, reward_decimals: u8, stake_duration_days: u64) -> Result<()> {
        require!(stake_decimals <= CANONICAL_DECIMALS, StakingError::InvalidDecimals);
        require!(reward_decimals <= CANONICAL_DECIMALS, StakingError::InvalidDecimals);
        require!(stake_duration_days > 0, StakingError::InvalidDuration);
        Ok(())
    }

    /// Replace the mutable parameters after checking `min <= max <= 100%`.
    pub fn set_params(&mut self, params: &PoolParams) -> Result<()> {
        require!(
            params.penalty_min <= params.penalty_max && params.penalty_max <= HUNDRED_PERCENT,
            StakingError::InvalidPenalty
        );
        self.cooldown_days = params.cooldown_days;
        self.penalty_min = params.penalty_min;
        self.penalty_max = params.penalty_max;
        self.maturity_extension_days = params.maturity_extension_days;
        Ok(())
    }

    pub fn params(&self) -> PoolParams {
        PoolParams {
            cooldown_days: self.cooldown_days,
            penalty_min: self.penalty_min,
            penalty_max: self.penalty_max,
            maturity_extension_days: self.maturity_extension_days,
        }
    }

    pub fn require_open(&self) -> Result<()> {
        require!(self.status == PoolStatus::Open, StakingError::PoolNotOpen);
        Ok(())
    }

    pub fn require_not_suspended(&self) -> Result<()> {
        require!(self.status != PoolStatus::Suspended, StakingError::PoolSuspended);
        Ok(())
    }
}
