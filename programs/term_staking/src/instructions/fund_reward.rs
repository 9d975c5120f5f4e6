/// Fund reward instruction handler.
///
/// Deposits reward tokens into a pool's reward vault, raising the reward the
/// pool can commit to new stakes.
///
/// ## Security Guarantees
/// - Only a holder of the RewardManager role can fund
/// - Reward vault validation ensures the correct PDA
/// - Mint validation prevents wrong token deposits

use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::constants::*;
use crate::error::StakingError;
use crate::events::RewardFunded;
use crate::math::to_canonical;
use crate::state::{LedgerDelta, PoolConfig, PoolLedger, RoleGrant, StakingRole};
use crate::token_transfer::transfer_in;

/// Accounts required for funding a pool's reward.
///
/// ## Security Notes
/// - Reward vault must match the pool's stored vault
/// - Funder token account must be for the reward mint
#[derive(Accounts)]
pub struct FundReward<'info> {
    /// The reward manager funding the pool.
    #[account(mut)]
    pub funder: Signer<'info>,

    /// Proof that `funder` holds the RewardManager role.
    #[account(
        constraint = role_grant.authorize(StakingRole::RewardManager, &funder.key()).is_ok()
            @ StakingError::Unauthorized
    )]
    pub role_grant: Account<'info, RoleGrant>,

    /// The pool being funded.
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

    /// The reward token mint.
    pub reward_mint: Account<'info, Mint>,

    /// Funder's token account.
    #[account(
        mut,
        constraint = funder_token_account.mint == reward_mint.key() @ StakingError::MintMismatch,
        constraint = funder_token_account.owner == funder.key()
    )]
    pub funder_token_account: Account<'info, TokenAccount>,

    /// Pool's reward vault.
    #[account(
        mut,
        constraint = reward_vault.owner == pool_config.key() @ StakingError::VaultMismatch
    )]
    pub reward_vault: Account<'info, TokenAccount>,

    /// Token program.
    pub token_program: Program<'info, Token>,
}

/// Fund a pool's reward.
///
/// # Arguments
/// * `ctx` - FundReward accounts context
/// * `amount` - Amount of reward tokens, in native units
///
/// # Returns
/// Result indicating success or error
pub fn handler(ctx: Context<FundReward>, amount: u64) -> Result<()> {
    // === INPUT VALIDATION ===

    require!(amount > 0, StakingError::ZeroAmount);
    // Zero-APR pools never commit reward
    require!(ctx.accounts.pool_config.apr > 0, StakingError::ZeroAprPool);

    // === STATE UPDATE ===

    let canonical = to_canonical(amount, ctx.accounts.pool_config.reward_decimals)?;
    ctx.accounts
        .pool_ledger
        .apply(LedgerDelta::FundReward { amount: canonical })?;

    // === TOKEN TRANSFER ===

    transfer_in(
        &ctx.accounts.token_program.to_account_info(),
        &ctx.accounts.funder_token_account.to_account_info(),
        &ctx.accounts.reward_vault.to_account_info(),
        &ctx.accounts.funder.to_account_info(),
        amount,
    )?;

    let clock = Clock::get()?;
    let pool_ledger = &ctx.accounts.pool_ledger;

    msg!("Pool {} funded with {} reward tokens", ctx.accounts.pool_config.pool_id, amount);
    msg!("Total reward funded: {}", pool_ledger.total_reward_funded);
    msg!("Funder: {}", ctx.accounts.funder.key());

    emit!(RewardFunded {
        pool: ctx.accounts.pool_config.key(),
        funder: ctx.accounts.funder.key(),
        amount,
        timestamp: clock.unix_timestamp,
    });

    Ok(())
}
