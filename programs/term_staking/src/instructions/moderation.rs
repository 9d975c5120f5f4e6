/// Stake moderation instruction handlers.
///
/// StakeModerator-only operations on individual stakes: revoke, suspend and
/// resume. None of these move tokens.
///
/// ## Security Guarantees
/// - Every handler requires a StakeModerator role grant for the signer
/// - The stake record is bound to the pool by seeds and a pool constraint

use anchor_lang::prelude::*;

use crate::constants::*;
use crate::error::StakingError;
use crate::events::{StakeRevoked, StakeSuspensionChanged};
use crate::math::to_native;
use crate::state::{PoolConfig, PoolLedger, RoleGrant, StakeRecord, StakingRole};

/// Accounts required for revoking a stake.
#[derive(Accounts)]
pub struct RevokeStake<'info> {
    /// The stake moderator.
    pub moderator: Signer<'info>,

    /// Proof that `moderator` holds the StakeModerator role.
    #[account(
        constraint = role_grant.authorize(StakingRole::StakeModerator, &moderator.key()).is_ok()
            @ StakingError::Unauthorized
    )]
    pub role_grant: Account<'info, RoleGrant>,

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

    /// The stake being revoked.
    #[account(
        mut,
        seeds = [
            STAKE_RECORD_SEED,
            pool_config.key().as_ref(),
            stake_record.staker.as_ref(),
            stake_record.stake_id.to_le_bytes().as_ref()
        ],
        bump = stake_record.bump,
        constraint = stake_record.pool == pool_config.key() @ StakingError::StakeMismatch
    )]
    pub stake_record: Account<'info, StakeRecord>,
}

/// Accounts required for suspending or resuming a stake.
#[derive(Accounts)]
pub struct ModerateStake<'info> {
    /// The stake moderator.
    pub moderator: Signer<'info>,

    /// Proof that `moderator` holds the StakeModerator role.
    #[account(
        constraint = role_grant.authorize(StakingRole::StakeModerator, &moderator.key()).is_ok()
            @ StakingError::Unauthorized
    )]
    pub role_grant: Account<'info, RoleGrant>,

    /// The pool.
    #[account(
        seeds = [POOL_CONFIG_SEED, pool_config.pool_id.to_le_bytes().as_ref()],
        bump = pool_config.bump
    )]
    pub pool_config: Account<'info, PoolConfig>,

    /// The stake being suspended or resumed.
    #[account(
        mut,
        seeds = [
            STAKE_RECORD_SEED,
            pool_config.key().as_ref(),
            stake_record.staker.as_ref(),
            stake_record.stake_id.to_le_bytes().as_ref()
        ],
        bump = stake_record.bump,
        constraint = stake_record.pool == pool_config.key() @ StakingError::StakeMismatch
    )]
    pub stake_record: Account<'info, StakeRecord>,
}

/// Revoke a stake.
///
/// Principal still in the vault becomes sweepable by the treasurer and any
/// unclaimed reward returns to the pool. Revocation is terminal.
///
/// # Arguments
/// * `ctx` - RevokeStake accounts context
///
/// # Returns
/// Result indicating success or error
pub fn revoke_stake_handler(ctx: Context<RevokeStake>) -> Result<()> {
    let pool_config = &ctx.accounts.pool_config;
    let clock = Clock::get()?;

    let stake_record = &mut ctx.accounts.stake_record;
    let transition = stake_record.revoke(clock.unix_timestamp)?;
    ctx.accounts.pool_ledger.apply(transition.delta)?;

    let revoked_stake_amount = to_native(stake_record.revoked_stake_amount, pool_config.stake_decimals)?;
    let revoked_reward_amount = to_native(stake_record.revoked_reward_amount, pool_config.reward_decimals)?;

    msg!("Stake {} of {} revoked", stake_record.stake_id, stake_record.staker);
    msg!("Revoked principal: {}, returned reward: {}", revoked_stake_amount, revoked_reward_amount);
    msg!("Moderator: {}", ctx.accounts.moderator.key());

    emit!(StakeRevoked {
        pool: stake_record.pool,
        staker: stake_record.staker,
        stake_id: stake_record.stake_id,
        revoked_stake_amount,
        revoked_reward_amount,
        timestamp: clock.unix_timestamp,
    });

    Ok(())
}

/// Suspend a stake. Claims and unstakes are blocked until resumed; time
/// keeps accruing toward maturity.
///
/// # Arguments
/// * `ctx` - ModerateStake accounts context
///
/// # Returns
/// Result indicating success or error
pub fn suspend_stake_handler(ctx: Context<ModerateStake>) -> Result<()> {
    ctx.accounts.stake_record.suspend()?;
    emit_suspension_change(&ctx, true)
}

/// Lift a stake's suspension.
///
/// # Arguments
/// * `ctx` - ModerateStake accounts context
///
/// # Returns
/// Result indicating success or error
pub fn resume_stake_handler(ctx: Context<ModerateStake>) -> Result<()> {
    ctx.accounts.stake_record.resume()?;
    emit_suspension_change(&ctx, false)
}

fn emit_suspension_change(ctx: &Context<ModerateStake>, suspended: bool) -> Result<()> {
    let stake_record = &ctx.accounts.stake_record;
    let clock = Clock::get()?;

    msg!(
        "Stake {} of {} {}",
        stake_record.stake_id,
        stake_record.staker,
        if suspended { "SUSPENDED" } else { "RESUMED" }
    );
    msg!("Moderator: {}", ctx.accounts.moderator.key());

    emit!(StakeSuspensionChanged {
        pool: stake_record.pool,
        staker: stake_record.staker,
        stake_id: stake_record.stake_id,
        suspended,
        timestamp: clock.unix_timestamp,
    });

    Ok(())
}
