/// Sweep instruction handlers.
///
/// Drains one pool-owned balance to a recipient chosen by the caller:
/// revoked principal, unstake penalties or unallocated reward.
///
/// ## Security Guarantees
/// - Principal sweeps need the Treasurer role, reward sweeps the RewardManager role
/// - The source vault must be the pool's vault for that balance
/// - A sweep always drains the full unswept remainder

use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};

use crate::constants::*;
use crate::error::StakingError;
use crate::events::PoolSwept;
use crate::state::{LedgerDelta, PoolConfig, PoolLedger, RoleGrant, StakingRole, SweepKind};
use crate::token_transfer::transfer_out;

/// Accounts for sweeping revoked principal or unstake penalties out of the
/// stake vault.
#[derive(Accounts)]
pub struct SweepStake<'info> {
    /// The treasurer sweeping.
    pub authority: Signer<'info>,

    /// Proof that `authority` holds the Treasurer role.
    #[account(
        constraint = role_grant.authorize(StakingRole::Treasurer, &authority.key()).is_ok()
            @ StakingError::Unauthorized
    )]
    pub role_grant: Account<'info, RoleGrant>,

    /// The pool.
    #[account(
        seeds = [POOL_CONFIG_SEED, pool_config.pool_id.to_le_bytes().as_ref()],
        bump = pool_config.bump,
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

    /// Pool's stake vault.
    #[account(mut)]
    pub stake_vault: Account<'info, TokenAccount>,

    /// Recipient token account.
    #[account(
        mut,
        constraint = recipient_token_account.mint == stake_vault.mint @ StakingError::MintMismatch
    )]
    pub recipient_token_account: Account<'info, TokenAccount>,

    /// Token program.
    pub token_program: Program<'info, Token>,
}

/// Accounts for sweeping unallocated reward out of the reward vault.
#[derive(Accounts)]
pub struct SweepReward<'info> {
    /// The reward manager sweeping.
    pub authority: Signer<'info>,

    /// Proof that `authority` holds the RewardManager role.
    #[account(
        constraint = role_grant.authorize(StakingRole::RewardManager, &authority.key()).is_ok()
            @ StakingError::Unauthorized
    )]
    pub role_grant: Account<'info, RoleGrant>,

    /// The pool.
    #[account(
        seeds = [POOL_CONFIG_SEED, pool_config.pool_id.to_le_bytes().as_ref()],
        bump = pool_config.bump,
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

    /// Pool's reward vault.
    #[account(mut)]
    pub reward_vault: Account<'info, TokenAccount>,

    /// Recipient token account.
    #[account(
        mut,
        constraint = recipient_token_account.mint == reward_vault.mint @ StakingError::MintMismatch
    )]
    pub recipient_token_account: Account<'info, TokenAccount>,

    /// Token program.
    pub token_program: Program<'info, Token>,
}

/// Sweep the whole unswept principal balance of `kind` to the recipient.
///
/// # Arguments
/// * `ctx` - Stake sweep accounts context
/// * `kind` - `RevokedStake` or `UnstakePenalty`
///
/// # Returns
/// Result indicating success or error
pub fn sweep_stake_handler(ctx: Context<SweepStake>, kind: SweepKind) -> Result<()> {
    let accounts = ctx.accounts;
    drain(
        kind,
        &accounts.authority,
        &accounts.pool_config,
        &mut accounts.pool_ledger,
        &accounts.stake_vault,
        &accounts.recipient_token_account,
        &accounts.token_program,
        accounts.pool_config.stake_decimals,
    )
}

/// Sweep all reward no stake has a claim on to the recipient.
pub fn sweep_reward_handler(ctx: Context<SweepReward>) -> Result<()> {
    let accounts = ctx.accounts;
    drain(
        SweepKind::UnallocatedReward,
        &accounts.authority,
        &accounts.pool_config,
        &mut accounts.pool_ledger,
        &accounts.reward_vault,
        &accounts.recipient_token_account,
        &accounts.token_program,
        accounts.pool_config.reward_decimals,
    )
}

#[allow(clippy::too_many_arguments)]
fn drain<'info>(
    kind: SweepKind,
    authority: &Signer<'info>,
    pool_config: &Account<'info, PoolConfig>,
    pool_ledger: &mut Account<'info, PoolLedger>,
    vault: &Account<'info, TokenAccount>,
    recipient: &Account<'info, TokenAccount>,
    token_program: &Program<'info, Token>,
    decimals: u8,
) -> Result<()> {
    // === STATE UPDATE ===

    let amount = pool_ledger.sweepable(kind)?;
    pool_ledger.apply(LedgerDelta::Sweep { kind, amount })?;

    // === TOKEN TRANSFER ===

    let paid = transfer_out(
        &token_program.to_account_info(),
        &vault.to_account_info(),
        &recipient.to_account_info(),
        pool_config,
        amount,
        decimals,
    )?;

    let clock = Clock::get()?;
    msg!("Swept {} tokens ({:?}) from pool {}", paid, kind, pool_config.pool_id);
    msg!("Recipient: {}", recipient.key());
    msg!("Authority: {}", authority.key());

    emit!(PoolSwept {
        pool: pool_config.key(),
        kind,
        recipient: recipient.key(),
        amount: paid,
        timestamp: clock.unix_timestamp,
    });

    Ok(())
}
