//! Stake instruction handler.
//!
//! Admits a new fixed-term stake into a pool.

use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::constants::*;
use crate::error::StakingError;
use crate::events::Staked;
use crate::math::{to_canonical, to_native};
use crate::state::{PoolConfig, PoolLedger, StakeKey, StakeRecord};
use crate::token_transfer::transfer_in;

/// Accounts required for staking.
#[derive(Accounts)]
#[instruction(stake_id: u64)]
pub struct Stake<'info> {
    /// The staker.
    #[account(mut)]
    pub staker: Signer<'info>,

    /// The pool being staked into.
    #[account(
        seeds = [POOL_CONFIG_SEED, pool_config.pool_id.to_le_bytes().as_ref()],
        bump = pool_config.bump,
        has_one = stake_mint @ StakingError::MintMismatch,
        has_one = stake_vault @ StakingError::VaultMismatch
    )]
    pub pool_config: Account<'info, PoolConfig>,

    /// The pool's ledger.
    #[account(
        mut,
        seeds = [POOL_LEDGER_SEED, pool_config.key().as_ref()],
        bump = pool_ledger.bump
    )]
    pub pool_ledger: Account<'info, PoolLedger>,

    /// Record for this stake (created on first use; must not be initialized yet).
    #[account(
        init_if_needed,
        payer = staker,
        space = StakeRecord::LEN,
        seeds = [
            STAKE_RECORD_SEED,
            pool_config.key().as_ref(),
            staker.key().as_ref(),
            stake_id.to_le_bytes().as_ref()
        ],
        bump
    )]
    pub stake_record: Account<'info, StakeRecord>,

    /// The staking token mint.
    pub stake_mint: Account<'info, Mint>,

    /// Staker's token account for the staking token.
    #[account(
        mut,
        constraint = staker_token_account.mint == stake_mint.key() @ StakingError::MintMismatch,
        constraint = staker_token_account.owner == staker.key()
    )]
    pub staker_token_account: Account<'info, TokenAccount>,

    /// Pool's stake vault.
    #[account(mut)]
    pub stake_vault: Account<'info, TokenAccount>,

    /// System program.
    pub system_program: Program<'info, System>,

    /// Token program.
    pub token_program: Program<'info, Token>,

    /// Rent sysvar.
    pub rent: Sysvar<'info, Rent>,
}

/// Stake `amount` native units under `stake_id`.
///
/// # Arguments
/// * `ctx` - Stake accounts context
/// * `stake_id` - Caller-chosen identifier, unique per staker per pool
/// * `amount` - Amount of stake tokens, in native units
///
/// # Returns
/// Result indicating success or error
pub fn handler(ctx: Context<Stake>, stake_id: u64, amount: u64) -> Result<()> {
    let pool_config = &ctx.accounts.pool_config;

    // Validate pool accepts stakes
    pool_config.require_open()?;

    // Validate amount
    require!(amount > 0, StakingError::ZeroAmount);
    let canonical = to_canonical(amount, pool_config.stake_decimals)?;

    let clock = Clock::get()?;
    let key = StakeKey {
        pool: pool_config.key(),
        staker: ctx.accounts.staker.key(),
        stake_id,
    };

    // Admission control and record creation
    let stake_record = &mut ctx.accounts.stake_record;
    let transition = stake_record.open(
        pool_config,
        &ctx.accounts.pool_ledger,
        key,
        canonical,
        clock.unix_timestamp,
    )?;
    stake_record.bump = ctx.bumps.stake_record;

    ctx.accounts.pool_ledger.apply(transition.delta)?;

    // Transfer tokens from staker to vault
    transfer_in(
        &ctx.accounts.token_program.to_account_info(),
        &ctx.accounts.staker_token_account.to_account_info(),
        &ctx.accounts.stake_vault.to_account_info(),
        &ctx.accounts.staker.to_account_info(),
        amount,
    )?;

    let stake_record = &ctx.accounts.stake_record;
    let reward = to_native(
        stake_record.estimated_reward_at_maturity,
        ctx.accounts.pool_config.reward_decimals,
    )?;

    msg!("Staked {} tokens under stake id {}", amount, stake_id);
    msg!("Reward at maturity: {}, maturity: {}", reward, stake_record.maturity_ts);
    msg!("Total staked in pool: {}", ctx.accounts.pool_ledger.total_staked);

    emit!(Staked {
        pool: key.pool,
        staker: key.staker,
        stake_id,
        amount,
        reward_at_maturity: reward,
        maturity_ts: stake_record.maturity_ts,
        timestamp: clock.unix_timestamp,
    });

    Ok(())
}
