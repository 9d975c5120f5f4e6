/// Access control instruction handlers.
///
/// The access admin grants and revokes the roles every other admin
/// instruction checks.
///
/// ## Security Guarantees
/// - `AccessControl` is a singleton PDA initialized once
/// - Only the stored admin can grant, revoke or hand over admin
/// - One `RoleGrant` PDA per (role, member); revoking closes it

use anchor_lang::prelude::*;

use crate::constants::*;
use crate::error::StakingError;
use crate::events::{RoleGranted, RoleRevoked};
use crate::state::{AccessControl, RoleGrant, StakingRole};

/// Accounts required for initializing access control.
#[derive(Accounts)]
pub struct InitializeAccessControl<'info> {
    /// The initial access admin.
    #[account(mut)]
    pub admin: Signer<'info>,

    /// The access control singleton.
    #[account(
        init,
        payer = admin,
        space = AccessControl::LEN,
        seeds = [ACCESS_CONTROL_SEED],
        bump
    )]
    pub access_control: Account<'info, AccessControl>,

    /// System program for account creation.
    pub system_program: Program<'info, System>,
}

/// Accounts required for granting a role.
#[derive(Accounts)]
#[instruction(role: StakingRole, member: Pubkey)]
pub struct GrantRole<'info> {
    /// The access admin.
    #[account(mut)]
    pub admin: Signer<'info>,

    /// The access control singleton.
    #[account(
        seeds = [ACCESS_CONTROL_SEED],
        bump = access_control.bump,
        has_one = admin @ StakingError::Unauthorized
    )]
    pub access_control: Account<'info, AccessControl>,

    /// The grant to create.
    #[account(
        init,
        payer = admin,
        space = RoleGrant::LEN,
        seeds = [ROLE_SEED, &[role.seed()], member.as_ref()],
        bump
    )]
    pub role_grant: Account<'info, RoleGrant>,

    /// System program for account creation.
    pub system_program: Program<'info, System>,
}

/// Accounts required for revoking a role.
#[derive(Accounts)]
pub struct RevokeRole<'info> {
    /// The access admin, refunded the grant's rent.
    #[account(mut)]
    pub admin: Signer<'info>,

    /// The access control singleton.
    #[account(
        seeds = [ACCESS_CONTROL_SEED],
        bump = access_control.bump,
        has_one = admin @ StakingError::Unauthorized
    )]
    pub access_control: Account<'info, AccessControl>,

    /// The grant to close.
    #[account(
        mut,
        close = admin,
        seeds = [ROLE_SEED, &[role_grant.role.seed()], role_grant.member.as_ref()],
        bump = role_grant.bump
    )]
    pub role_grant: Account<'info, RoleGrant>,
}

/// Accounts required for handing over the access admin.
#[derive(Accounts)]
pub struct TransferAccessAdmin<'info> {
    /// The current access admin.
    pub admin: Signer<'info>,

    /// The access control singleton.
    #[account(
        mut,
        seeds = [ACCESS_CONTROL_SEED],
        bump = access_control.bump,
        has_one = admin @ StakingError::Unauthorized
    )]
    pub access_control: Account<'info, AccessControl>,
}

/// Create the access control singleton with the signer as admin.
///
/// # Arguments
/// * `ctx` - InitializeAccessControl accounts context
///
/// # Returns
/// Result indicating success or error
pub fn initialize_access_control_handler(ctx: Context<InitializeAccessControl>) -> Result<()> {
    let access_control = &mut ctx.accounts.access_control;
    access_control.admin = ctx.accounts.admin.key();
    access_control.bump = ctx.bumps.access_control;

    msg!("Access control initialized");
    msg!("Admin: {}", access_control.admin);

    Ok(())
}

/// Grant `role` to `member`.
///
/// # Arguments
/// * `ctx` - GrantRole accounts context
/// * `role` - Role to grant
/// * `member` - Pubkey receiving the role
///
/// # Returns
/// Result indicating success or error
pub fn grant_role_handler(ctx: Context<GrantRole>, role: StakingRole, member: Pubkey) -> Result<()> {
    let clock = Clock::get()?;

    let role_grant = &mut ctx.accounts.role_grant;
    role_grant.role = role;
    role_grant.member = member;
    role_grant.granted_at = clock.unix_timestamp;
    role_grant.bump = ctx.bumps.role_grant;

    msg!("Role {:?} granted to {}", role, member);
    msg!("Admin: {}", ctx.accounts.admin.key());

    emit!(RoleGranted {
        role,
        member,
        admin: ctx.accounts.admin.key(),
        timestamp: clock.unix_timestamp,
    });

    Ok(())
}

/// Revoke a role by closing its grant.
///
/// # Arguments
/// * `ctx` - RevokeRole accounts context
///
/// # Returns
/// Result indicating success or error
pub fn revoke_role_handler(ctx: Context<RevokeRole>) -> Result<()> {
    let clock = Clock::get()?;
    let role_grant = &ctx.accounts.role_grant;

    msg!("Role {:?} revoked from {}", role_grant.role, role_grant.member);
    msg!("Admin: {}", ctx.accounts.admin.key());

    emit!(RoleRevoked {
        role: role_grant.role,
        member: role_grant.member,
        admin: ctx.accounts.admin.key(),
        timestamp: clock.unix_timestamp,
    });

    Ok(())
}

/// Hand the access admin over to `new_admin`.
///
/// # Security
/// - Only the current admin can call this
/// - New admin must be a non-default pubkey
///
/// # Arguments
/// * `ctx` - TransferAccessAdmin accounts context
/// * `new_admin` - New admin pubkey
///
/// # Returns
/// Result indicating success or error
pub fn transfer_access_admin_handler(ctx: Context<TransferAccessAdmin>, new_admin: Pubkey) -> Result<()> {
    require!(new_admin != Pubkey::default(), StakingError::InvalidAdmin);

    let access_control = &mut ctx.accounts.access_control;
    let old_admin = access_control.admin;
    access_control.admin = new_admin;

    msg!("Access admin transferred: {} -> {}", old_admin, new_admin);

    Ok(())
}
