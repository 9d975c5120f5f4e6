//! Withdraw instruction handler.

use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::constants::*;
use crate::error::StakingError;
use crate::events::Withdrawn;
use crate::state::{Payout, PoolConfig, PoolLedger, StakeRecord};
use crate::token_transfer::transfer_out;

/// Accounts required for withdrawing unstaked principal.
#[derive(Accounts)]
pub struct Withdraw<'info> {
    /// The staker.
    #[account(mut)]
    pub staker: Signer<'info>,

    /// The pool.
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

    /// The unstaked stake.
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

    /// The staking token mint.
    pub stake_mint: Account<'info, Mint>,

    /// Staker's token account for the returned principal.
    #[account(
        mut,
        constraint = staker_token_account.mint == stake_mint.key() @ StakingError::MintMismatch,
        constraint = staker_token_account.owner == staker.key()
    )]
    pub staker_token_account: Account<'info, TokenAccount>,

    /// Pool's stake vault.
    #[account(mut)]
    pub stake_vault: Account<'info, TokenAccount>,

    /// Token program.
    pub token_program: Program<'info, Token>,
}

/// Withdraw principal of an unstaked stake once its cooldown has passed.
///
/// # Arguments
/// * `ctx` - Withdraw accounts context
///
/// # Returns
/// Result indicating success or error
pub fn handler(ctx: Context<Withdraw>) -> Result<()> {
    ctx.accounts.pool_config.require_not_suspended()?;

    let clock = Clock::get()?;
    let transition = ctx.accounts.stake_record.withdraw(clock.unix_timestamp)?;
    ctx.accounts.pool_ledger.apply(transition.delta)?;

    let Some(Payout::Stake(amount)) = transition.payout else {
        return err!(StakingError::NotUnstaked);
    };

    // Transfer principal from vault to staker
    let paid = transfer_out(
        &ctx.accounts.token_program.to_account_info(),
        &ctx.accounts.stake_vault.to_account_info(),
        &ctx.accounts.staker_token_account.to_account_info(),
        &ctx.accounts.pool_config,
        amount,
        ctx.accounts.pool_config.stake_decimals,
    )?;

    let stake_record = &ctx.accounts.stake_record;
    msg!("Withdrew {} tokens from stake {}", paid, stake_record.stake_id);
    msg!("Total withdrawn from pool: {}", ctx.accounts.pool_ledger.total_withdrawn);

    emit!(Withdrawn {
        pool: stake_record.pool,
        staker: stake_record.staker,
        stake_id: stake_record.stake_id,
        amount: paid,
        timestamp: clock.unix_timestamp,
    });

    Ok(())
}
