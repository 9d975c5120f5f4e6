//! Claim rewards instruction handler.
//!
//! Pays out reward accrued on a stake without ending it.

use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::constants::*;
use crate::error::StakingError;
use crate::events::RewardClaimed;
use crate::state::{Payout, PoolConfig, PoolLedger, StakeRecord};
use crate::token_transfer::transfer_out;

/// Accounts required for claiming rewards.
#[derive(Accounts)]
pub struct ClaimRewards<'info> {
    /// The staker claiming rewards.
    #[account(mut)]
    pub staker: Signer<'info>,

    /// The pool.
    #[account(
        seeds = [POOL_CONFIG_SEED, pool_config.pool_id.to_le_bytes().as_ref()],
        bump = pool_config.bump,
        has_one = reward_mint @ StakingError::MintMismatch,
        has_one = reward_vault @ StakingError::VaultMismatch
    )]
    pub pool_config: Account<'info, PoolConfig>,

    /// The pool's ledger.
    #[account(
        mut,
        seeds = [POOL_LEDGER_SEED, pool_config.key().as_ref()],
        bump = pool_ledger.bump
    )]
    pub pool_ledger: Account<'info, PoolLedger>,

    /// The stake being claimed against.
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

    /// The reward token mint.
    pub reward_mint: Account<'info, Mint>,

    /// Staker's token account for receiving rewards.
    #[account(
        mut,
        constraint = staker_token_account.mint == reward_mint.key() @ StakingError::MintMismatch,
        constraint = staker_token_account.owner == staker.key()
    )]
    pub staker_token_account: Account<'info, TokenAccount>,

    /// Pool's reward vault.
    #[account(mut)]
    pub reward_vault: Account<'info, TokenAccount>,

    /// Token program.
    pub token_program: Program<'info, Token>,
}

/// Claim reward accrued so far.
///
/// Before maturity nothing is claimable; after maturity (or after an
/// unstake) the fixed reward is paid once.
///
/// # Arguments
/// * `ctx` - ClaimRewards accounts context
///
/// # Returns
/// Result indicating success or error
pub fn handler(ctx: Context<ClaimRewards>) -> Result<()> {
    ctx.accounts.pool_config.require_not_suspended()?;

    let clock = Clock::get()?;
    let transition = ctx
        .accounts
        .stake_record
        .claim(&ctx.accounts.pool_config, clock.unix_timestamp)?;
    ctx.accounts.pool_ledger.apply(transition.delta)?;

    let Some(Payout::Reward(amount)) = transition.payout else {
        return err!(StakingError::NothingToClaim);
    };

    // Transfer reward from vault to staker
    let paid = transfer_out(
        &ctx.accounts.token_program.to_account_info(),
        &ctx.accounts.reward_vault.to_account_info(),
        &ctx.accounts.staker_token_account.to_account_info(),
        &ctx.accounts.pool_config,
        amount,
        ctx.accounts.pool_config.reward_decimals,
    )?;

    let stake_record = &ctx.accounts.stake_record;
    msg!("Claimed {} reward tokens on stake {}", paid, stake_record.stake_id);
    msg!("Total reward claimed from pool: {}", ctx.accounts.pool_ledger.total_reward_claimed);

    emit!(RewardClaimed {
        pool: stake_record.pool,
        staker: stake_record.staker,
        stake_id: stake_record.stake_id,
        amount: paid,
        timestamp: clock.unix_timestamp,
    });

    Ok(())
}
