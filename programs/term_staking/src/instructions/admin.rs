/// Pool admin instruction handlers.
///
/// Handles PoolManager-only operations on an existing pool.
///
/// ## Security Guarantees
/// - All admin functions require a PoolManager role grant for the signer
/// - PDA validation ensures correct pool
/// - Only the four mutable parameters and the status can change

use anchor_lang::prelude::*;

use crate::constants::*;
use crate::error::StakingError;
use crate::events::{PoolParamsUpdated, PoolStatusChanged};
use crate::state::{PoolConfig, PoolParams, PoolStatus, RoleGrant, StakingRole};

/// Accounts required for pool admin operations.
///
/// ## Security Notes
/// - Authority must be signer
/// - Authority must hold the PoolManager role
/// - Pool PDA validated via seeds
#[derive(Accounts)]
pub struct PoolAdmin<'info> {
    /// The pool manager.
    pub authority: Signer<'info>,

    /// Proof that `authority` holds the PoolManager role.
    #[account(
        constraint = role_grant.authorize(StakingRole::PoolManager, &authority.key()).is_ok()
            @ StakingError::Unauthorized
    )]
    pub role_grant: Account<'info, RoleGrant>,

    /// The pool to modify.
    #[account(
        mut,
        seeds = [POOL_CONFIG_SEED, pool_config.pool_id.to_le_bytes().as_ref()],
        bump = pool_config.bump
    )]
    pub pool_config: Account<'info, PoolConfig>,
}

/// Replace a pool's cooldown, penalty bounds and maturity extension.
///
/// # Security
/// - Penalties must satisfy `min <= max <= 100%`
/// - Stakes already unstaked keep the economics frozen at their unstake
///
/// # Arguments
/// * `ctx` - PoolAdmin accounts context
/// * `params` - New mutable parameters
///
/// # Returns
/// Result indicating success or error
pub fn update_pool_params_handler(ctx: Context<PoolAdmin>, params: PoolParams) -> Result<()> {
    let pool_config = &mut ctx.accounts.pool_config;
    let clock = Clock::get()?;

    let old = pool_config.params();
    pool_config.set_params(&params)?;

    msg!(
        "Pool {} params - Old: cooldown={}d, penalty={}..{}, extension={}d",
        pool_config.pool_id,
        old.cooldown_days,
        old.penalty_min,
        old.penalty_max,
        old.maturity_extension_days
    );
    msg!(
        "New params - cooldown={}d, penalty={}..{}, extension={}d",
        params.cooldown_days,
        params.penalty_min,
        params.penalty_max,
        params.maturity_extension_days
    );
    msg!("Admin: {}", ctx.accounts.authority.key());

    emit!(PoolParamsUpdated {
        pool: pool_config.key(),
        params,
        timestamp: clock.unix_timestamp,
    });

    Ok(())
}

/// Set a pool's status.
///
/// # Security
/// - `Closed` blocks new stakes only
/// - `Suspended` also blocks claim, unstake and withdraw
///
/// # Arguments
/// * `ctx` - PoolAdmin accounts context
/// * `status` - New pool status
///
/// # Returns
/// Result indicating success or error
pub fn set_pool_status_handler(ctx: Context<PoolAdmin>, status: PoolStatus) -> Result<()> {
    let pool_config = &mut ctx.accounts.pool_config;
    let clock = Clock::get()?;

    let previous = pool_config.status;
    pool_config.status = status;

    msg!("Pool {} status {:?} (was {:?})", pool_config.pool_id, status, previous);
    msg!("Admin: {}", ctx.accounts.authority.key());

    emit!(PoolStatusChanged {
        pool: pool_config.key(),
        status,
        timestamp: clock.unix_timestamp,
    });

    Ok(())
}
