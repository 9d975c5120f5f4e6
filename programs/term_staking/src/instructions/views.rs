//! Read-only instruction handlers.
//!
//! Each returns its answer as Anchor return data, in native token units.
//! Accounts are taken unchecked so that an unknown pool or stake maps to the
//! program's own uninitialized errors rather than a deserialization failure.

use anchor_lang::prelude::*;

use crate::constants::*;
use crate::error::StakingError;
use crate::math::to_native;
use crate::state::{PoolConfig, PoolLedger, PoolStats, StakeInfo, StakeRecord, UnstakingInfo};

/// Accounts required for reading pool stats.
#[derive(Accounts)]
pub struct GetPoolStats<'info> {
    /// CHECK: loaded by `load_pool`, which verifies owner and layout.
    pub pool_config: UncheckedAccount<'info>,

    /// CHECK: address fixed by seeds; loaded by `load_pool`.
    #[account(
        seeds = [POOL_LEDGER_SEED, pool_config.key().as_ref()],
        bump
    )]
    pub pool_ledger: UncheckedAccount<'info>,
}

/// Accounts required for reading one stake.
#[derive(Accounts)]
#[instruction(staker: Pubkey, stake_id: u64)]
pub struct GetStake<'info> {
    /// CHECK: loaded by `load_pool_config`, which verifies owner and layout.
    pub pool_config: UncheckedAccount<'info>,

    /// CHECK: address fixed by seeds; may not exist yet.
    #[account(
        seeds = [
            STAKE_RECORD_SEED,
            pool_config.key().as_ref(),
            staker.as_ref(),
            stake_id.to_le_bytes().as_ref()
        ],
        bump
    )]
    pub stake_record: UncheckedAccount<'info>,
}

fn is_program_account(info: &AccountInfo) -> bool {
    !info.data_is_empty() && *info.owner == crate::ID
}

fn deserialize<T: AccountDeserialize>(info: &AccountInfo) -> Result<T> {
    let data = info.try_borrow_data()?;
    T::try_deserialize(&mut &data[..])
}

fn load_pool_config(info: &AccountInfo) -> Result<PoolConfig> {
    require!(is_program_account(info), StakingError::PoolUninitialized);
    deserialize(info)
}

fn load_pool(config_info: &AccountInfo, ledger_info: &AccountInfo) -> Result<(PoolConfig, PoolLedger)> {
    let config = load_pool_config(config_info)?;
    require!(is_program_account(ledger_info), StakingError::PoolUninitialized);
    Ok((config, deserialize(ledger_info)?))
}

/// A missing record reads as an uninitialized one.
fn load_stake_record(info: &AccountInfo, pool: &Pubkey) -> Result<StakeRecord> {
    if !is_program_account(info) {
        return Ok(StakeRecord::default());
    }
    let record: StakeRecord = deserialize(info)?;
    require_keys_eq!(record.pool, *pool, StakingError::StakeMismatch);
    Ok(record)
}

/// Pool ledger snapshot.
pub fn get_pool_stats_handler(ctx: Context<GetPoolStats>) -> Result<PoolStats> {
    let (config, ledger) = load_pool(
        &ctx.accounts.pool_config,
        &ctx.accounts.pool_ledger,
    )?;
    ledger.stats(&config)
}

/// Full record of one stake. Fails for an unknown stake.
pub fn get_stake_info_handler(ctx: Context<GetStake>, _staker: Pubkey, _stake_id: u64) -> Result<StakeInfo> {
    let config = load_pool_config(&ctx.accounts.pool_config)?;
    let record = load_stake_record(
        &ctx.accounts.stake_record,
        &ctx.accounts.pool_config.key(),
    )?;
    record.info(&config)
}

/// What unstaking this stake right now would yield.
///
/// Fails for an unknown, revoked or already unstaked stake.
pub fn get_unstaking_info_handler(ctx: Context<GetStake>, _staker: Pubkey, _stake_id: u64) -> Result<UnstakingInfo> {
    let config = load_pool_config(&ctx.accounts.pool_config)?;
    let record = load_stake_record(
        &ctx.accounts.stake_record,
        &ctx.accounts.pool_config.key(),
    )?;
    let clock = Clock::get()?;
    record.unstaking_info(&config, clock.unix_timestamp)
}

/// Reward claimable right now, in reward token units. Zero for an unknown
/// or revoked stake.
pub fn get_claimable_reward_handler(ctx: Context<GetStake>, _staker: Pubkey, _stake_id: u64) -> Result<u64> {
    let config = load_pool_config(&ctx.accounts.pool_config)?;
    let record = load_stake_record(
        &ctx.accounts.stake_record,
        &ctx.accounts.pool_config.key(),
    )?;
    let clock = Clock::get()?;
    to_native(record.claimable(&config, clock.unix_timestamp)?, config.reward_decimals)
}
