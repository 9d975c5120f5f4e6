//! Token movement in and out of pool vaults.
//!
//! Handlers call these exactly once per paying transition, after the stake
//! record and ledger have been updated. A failed transfer fails the whole
//! instruction, so state and balances never diverge.

use anchor_lang::prelude::*;
use anchor_spl::token::{self, Transfer};

use crate::constants::POOL_CONFIG_SEED;
use crate::math::to_native;
use crate::state::PoolConfig;

/// Move `amount` native units from a user-owned account into a pool vault.
pub fn transfer_in<'info>(
    token_program: &AccountInfo<'info>,
    from: &AccountInfo<'info>,
    vault: &AccountInfo<'info>,
    authority: &AccountInfo<'info>,
    amount: u64,
) -> Result<()> {
    let cpi_accounts = Transfer {
        from: from.clone(),
        to: vault.clone(),
        authority: authority.clone(),
    };
    let cpi_ctx = CpiContext::new(token_program.clone(), cpi_accounts);
    token::transfer(cpi_ctx, amount)
}

/// Pay a canonical `amount` out of a pool vault, signing as the pool PDA.
///
/// Returns the native amount actually sent.
pub fn transfer_out<'info>(
    token_program: &AccountInfo<'info>,
    vault: &AccountInfo<'info>,
    to: &AccountInfo<'info>,
    pool: &Account<'info, PoolConfig>,
    amount: u128,
    decimals: u8,
) -> Result<u64> {
    let native = to_native(amount, decimals)?;

    let pool_id = pool.pool_id.to_le_bytes();
    let seeds = &[POOL_CONFIG_SEED, pool_id.as_ref(), &[pool.bump]];
    let signer_seeds = &[&seeds[..]];

    let cpi_accounts = Transfer {
        from: vault.clone(),
        to: to.clone(),
        authority: pool.to_account_info(),
    };
    let cpi_ctx = CpiContext::new_with_signer(token_program.clone(), cpi_accounts, signer_seeds);
    token::transfer(cpi_ctx, native)?;

    Ok(native)
}
