//! Unstake instruction handler.
//!
//! Ends a stake's term early (or on time) and starts its cooldown. Principal
//! stays in the vault until `withdraw`.

use anchor_lang::prelude::*;

use crate::constants::*;
use crate::error::StakingError;
use crate::events::Unstaked;
use crate::math::to_native;
use crate::state::{PoolConfig, PoolLedger, StakeRecord};

/// Accounts required for unstaking.
#[derive(Accounts)]
pub struct Unstake<'info> {
    /// The staker.
    pub staker: Signer<'info>,

    /// The pool.
    #[account(
        seeds = [POOL_CONFIG_SEED, pool_config.pool_id.to_le_bytes().as_ref()],
        bump = pool_config.bump
    )]
    pub pool_config: Account<'info, PoolConfig>,

    /// The pool's ledger.
    #[account(
        mut,
        seeds = [POOL_LEDGER_SEED, pool_config.key().as_ref()],
        bump = pool_ledger.bump
    )]
    pub pool_ledger: Account<'info, PoolLedger>,

    /// The stake being ended.
    #[account(
        mut,
        seeds = [
            STAKE_RECORD_SEED,
            pool_config.key().as_ref(),
            staker.key().as_ref(),
            stake_record.stake_id.to_le_bytes().as_ref()
        ],
        bump = stake_record.bump,
        constraint = stake_record.staker == staker.key() @ StakingError::InvalidStakeOwner,
        constraint = stake_record.pool == pool_config.key() @ StakingError::StakeMismatch
    )]
    pub stake_record: Account<'info, StakeRecord>,
}

/// Unstake a stake.
///
/// Before maturity a time-decaying penalty is taken from principal and the
/// unearned part of the reward goes back to the pool. No tokens move here.
///
/// # Arguments
/// * `ctx` - Unstake accounts context
///
/// # Returns
/// Result indicating success or error
pub fn handler(ctx: Context<Unstake>) -> Result<()> {
    let pool_config = &ctx.accounts.pool_config;
    pool_config.require_not_suspended()?;

    let clock = Clock::get()?;
    let stake_record = &mut ctx.accounts.stake_record;
    let transition = stake_record.unstake(pool_config, clock.unix_timestamp)?;
    ctx.accounts.pool_ledger.apply(transition.delta)?;

    let unstake_amount = to_native(stake_record.unstake_amount, pool_config.stake_decimals)?;
    let penalty_amount = to_native(stake_record.unstake_penalty_amount, pool_config.stake_decimals)?;
    let reward_at_unstake = to_native(stake_record.estimated_reward_at_unstake, pool_config.reward_decimals)?;

    msg!("Unstaked stake {}: {} returned, {} penalty", stake_record.stake_id, unstake_amount, penalty_amount);
    msg!("Reward at unstake: {}", reward_at_unstake);
    msg!("Cooldown expires at {}", stake_record.unstake_cooldown_expiry_ts);

    emit!(Unstaked {
        pool: stake_record.pool,
        staker: stake_record.staker,
        stake_id: stake_record.stake_id,
        unstake_amount,
        penalty_amount,
        reward_at_unstake,
        cooldown_expiry_ts: stake_record.unstake_cooldown_expiry_ts,
        timestamp: clock.unix_timestamp,
    });

    Ok(())
}
