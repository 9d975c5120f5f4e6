/// Create pool instruction handler.
///
/// Creates and configures a new staking pool, its ledger and both vaults.
///
/// ## Security Guarantees
/// - Only a holder of the PoolManager role can create pools
/// - Vaults are PDAs owned by the pool config PDA
/// - Mints, decimals, duration and APR are locked to pool state permanently

use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::constants::*;
use crate::error::StakingError;
use crate::events::PoolCreated;
use crate::state::{PoolConfig, PoolLedger, PoolParams, PoolStatus, RoleGrant, StakingRole};

/// Accounts required for pool creation.
///
/// ## Security Notes
/// - `stake_vault` and `reward_vault` are PDAs with `pool_config` as authority
/// - Seeds ensure these accounts cannot be swapped or replaced
#[derive(Accounts)]
#[instruction(pool_id: u64)]
pub struct CreatePool<'info> {
    /// The pool manager creating the pool.
    #[account(mut)]
    pub authority: Signer<'info>,

    /// Proof that `authority` holds the PoolManager role.
    #[account(
        constraint = role_grant.authorize(StakingRole::PoolManager, &authority.key()).is_ok()
            @ StakingError::Unauthorized
    )]
    pub role_grant: Account<'info, RoleGrant>,

    /// The pool config account to be created.
    /// SECURITY: PDA derived from POOL_CONFIG_SEED + pool_id ensures uniqueness.
    #[account(
        init,
        payer = authority,
        space = PoolConfig::LEN,
        seeds = [POOL_CONFIG_SEED, pool_id.to_le_bytes().as_ref()],
        bump
    )]
    pub pool_config: Account<'info, PoolConfig>,

    /// The pool's aggregate ledger.
    #[account(
        init,
        payer = authority,
        space = PoolLedger::LEN,
        seeds = [POOL_LEDGER_SEED, pool_config.key().as_ref()],
        bump
    )]
    pub pool_ledger: Account<'info, PoolLedger>,

    /// Mint of the token being staked.
    pub stake_mint: Account<'info, Mint>,

    /// Mint of the token paid as reward.
    pub reward_mint: Account<'info, Mint>,

    /// The vault that will hold staked principal.
    #[account(
        init,
        payer = authority,
        seeds = [STAKE_VAULT_SEED, pool_config.key().as_ref()],
        bump,
        token::mint = stake_mint,
        token::authority = pool_config
    )]
    pub stake_vault: Account<'info, TokenAccount>,

    /// The vault that will hold funded reward.
    #[account(
        init,
        payer = authority,
        seeds = [REWARD_VAULT_SEED, pool_config.key().as_ref()],
        bump,
        token::mint = reward_mint,
        token::authority = pool_config
    )]
    pub reward_vault: Account<'info, TokenAccount>,

    /// System program for account creation.
    pub system_program: Program<'info, System>,

    /// Token program for token account operations.
    pub token_program: Program<'info, Token>,

    /// Rent sysvar for rent-exempt calculations.
    pub rent: Sysvar<'info, Rent>,
}

/// Create a new staking pool.
///
/// # Arguments
/// * `ctx` - CreatePool accounts context
/// * `pool_id` - Caller-chosen pool identifier
/// * `stake_duration_days` - Fixed lock duration, must be non-zero
/// * `apr` - Annualized reward rate (18-decimal percent); zero makes the pool unbounded
/// * `params` - Initial cooldown, penalty bounds and maturity extension
///
/// # Returns
/// Result indicating success or error
pub fn handler(
    ctx: Context<CreatePool>,
    pool_id: u64,
    stake_duration_days: u64,
    apr: u128,
    params: PoolParams,
) -> Result<()> {
    // === INPUT VALIDATION ===

    PoolConfig::validate_terms(
        ctx.accounts.stake_mint.decimals,
        ctx.accounts.reward_mint.decimals,
        stake_duration_days,
    )?;

    let pool_key = ctx.accounts.pool_config.key();
    let pool_config = &mut ctx.accounts.pool_config;
    let clock = Clock::get()?;

    // === STATE INITIALIZATION ===

    pool_config.set_params(&params)?;
    pool_config.pool_id = pool_id;
    pool_config.stake_mint = ctx.accounts.stake_mint.key();
    pool_config.stake_decimals = ctx.accounts.stake_mint.decimals;
    pool_config.stake_vault = ctx.accounts.stake_vault.key();
    pool_config.reward_mint = ctx.accounts.reward_mint.key();
    pool_config.reward_decimals = ctx.accounts.reward_mint.decimals;
    pool_config.reward_vault = ctx.accounts.reward_vault.key();
    pool_config.stake_duration_days = stake_duration_days;
    pool_config.apr = apr;
    pool_config.status = PoolStatus::Open;
    pool_config.created_at = clock.unix_timestamp;
    pool_config.bump = ctx.bumps.pool_config;
    pool_config.stake_vault_bump = ctx.bumps.stake_vault;
    pool_config.reward_vault_bump = ctx.bumps.reward_vault;

    let pool_ledger = &mut ctx.accounts.pool_ledger;
    pool_ledger.pool = pool_key;
    pool_ledger.bump = ctx.bumps.pool_ledger;

    msg!("Staking pool {} created", pool_id);
    msg!("Stake mint: {} ({} decimals)", pool_config.stake_mint, pool_config.stake_decimals);
    msg!("Reward mint: {} ({} decimals)", pool_config.reward_mint, pool_config.reward_decimals);
    msg!("Duration: {} days, APR: {}", stake_duration_days, apr);

    emit!(PoolCreated {
        pool: pool_key,
        pool_id,
        stake_mint: pool_config.stake_mint,
        reward_mint: pool_config.reward_mint,
        stake_duration_days,
        apr,
        timestamp: clock.unix_timestamp,
    });

    Ok(())
}
