//! # Term Staking Program
//!
//! A fixed-term staking ledger. Each pool locks one stake token for a fixed
//! number of days and pays a fixed reward, at a fixed APR, in a reward token.
//!
//! - Reward is committed at stake time and paid from funds deposited up front,
//!   so the pool never promises more than it holds
//! - Early unstake forfeits unearned reward, takes a linearly decaying
//!   penalty from principal and starts a cooldown before withdrawal
//! - Moderators can revoke or suspend individual stakes
//! - Penalties, revoked principal and unallocated reward are swept by role
//!
//! ## Units
//! Amounts cross the instruction boundary in each token's native decimals.
//! Internally every amount is a `u128` with 18 decimals and percentages are
//! 18-decimal fixed-point (`100%` = `100 * 10^18`).

use anchor_lang::prelude::*;

declare_id!("8jDYCaWerbMsV3f4Pt5bPpjRYA2mV4dpNmBtuCsFtxkK");

pub mod constants;
pub mod error;
pub mod events;
pub mod instructions;
pub mod math;
pub mod state;
pub mod token_transfer;

use instructions::*;
use state::{PoolParams, PoolStats, PoolStatus, StakeInfo, StakingRole, SweepKind, UnstakingInfo};

#[program]
pub mod term_staking {
    use super::*;

    /// Creates the access control singleton with the signer as access admin.
    ///
    /// # Errors
    /// Returns an error if access control already exists.
    pub fn initialize_access_control(ctx: Context<InitializeAccessControl>) -> Result<()> {
        instructions::roles::initialize_access_control_handler(ctx)
    }

    /// Grants `role` to `member`.
    ///
    /// # Errors
    /// Returns an error if the caller is not the access admin or the grant
    /// already exists.
    pub fn grant_role(ctx: Context<GrantRole>, role: StakingRole, member: Pubkey) -> Result<()> {
        instructions::roles::grant_role_handler(ctx, role, member)
    }

    /// Revokes a role by closing its grant account.
    pub fn revoke_role(ctx: Context<RevokeRole>) -> Result<()> {
        instructions::roles::revoke_role_handler(ctx)
    }

    /// Hands the access admin over to `new_admin`.
    ///
    /// # Errors
    /// Returns an error if:
    /// - Caller is not the current access admin
    /// - New admin is the default pubkey
    pub fn transfer_access_admin(ctx: Context<TransferAccessAdmin>, new_admin: Pubkey) -> Result<()> {
        instructions::roles::transfer_access_admin_handler(ctx, new_admin)
    }

    /// Creates a staking pool with its ledger and vaults.
    ///
    /// # Arguments
    /// * `ctx` - The context containing all accounts needed for pool creation
    /// * `pool_id` - Pool identifier, part of the pool PDA seeds
    /// * `stake_duration_days` - Fixed lock duration
    /// * `apr` - Annual reward rate, 18-decimal percent
    /// * `params` - Initial mutable parameters
    ///
    /// # Errors
    /// Returns an error if:
    /// - Caller lacks the PoolManager role
    /// - Either mint has more than 18 decimals
    /// - Duration is zero
    /// - Penalty bounds are invalid
    pub fn create_pool(
        ctx: Context<CreatePool>,
        pool_id: u64,
        stake_duration_days: u64,
        apr: u128,
        params: PoolParams,
    ) -> Result<()> {
        instructions::initialize::handler(ctx, pool_id, stake_duration_days, apr, params)
    }

    /// Replaces a pool's cooldown, penalty bounds and maturity extension.
    ///
    /// # Errors
    /// Returns an error if caller lacks the PoolManager role or the penalty
    /// bounds are invalid.
    pub fn update_pool_params(ctx: Context<PoolAdmin>, params: PoolParams) -> Result<()> {
        instructions::admin::update_pool_params_handler(ctx, params)
    }

    /// Opens, closes or suspends a pool.
    ///
    /// # Errors
    /// Returns an error if caller lacks the PoolManager role.
    pub fn set_pool_status(ctx: Context<PoolAdmin>, status: PoolStatus) -> Result<()> {
        instructions::admin::set_pool_status_handler(ctx, status)
    }

    /// Deposits reward tokens into a pool.
    ///
    /// # Errors
    /// Returns an error if:
    /// - Caller lacks the RewardManager role
    /// - Amount is zero
    /// - Pool APR is zero
    pub fn fund_reward(ctx: Context<FundReward>, amount: u64) -> Result<()> {
        instructions::fund_reward::handler(ctx, amount)
    }

    /// Stakes `amount` stake tokens under `stake_id`.
    ///
    /// # Arguments
    /// * `ctx` - The context containing all accounts needed for staking
    /// * `stake_id` - Identifier unique per staker per pool
    /// * `amount` - Amount of stake tokens
    ///
    /// # Errors
    /// Returns an error if:
    /// - Pool is not open
    /// - Amount is zero
    /// - Stake id is already used
    /// - Pool reward cannot cover the stake
    pub fn stake(ctx: Context<Stake>, stake_id: u64, amount: u64) -> Result<()> {
        instructions::stake::handler(ctx, stake_id, amount)
    }

    /// Claims reward accrued on a stake.
    ///
    /// # Errors
    /// Returns an error if:
    /// - Pool or stake is suspended
    /// - Stake is revoked
    /// - Nothing is claimable
    pub fn claim_rewards(ctx: Context<ClaimRewards>) -> Result<()> {
        instructions::claim_rewards::handler(ctx)
    }

    /// Ends a stake and starts its cooldown. Tokens stay in the vault.
    ///
    /// # Errors
    /// Returns an error if:
    /// - Pool or stake is suspended
    /// - Stake is revoked or already unstaked
    pub fn unstake(ctx: Context<Unstake>) -> Result<()> {
        instructions::unstake::handler(ctx)
    }

    /// Withdraws principal of an unstaked stake.
    ///
    /// # Errors
    /// Returns an error if:
    /// - Pool is suspended
    /// - Stake is not unstaked, revoked or already withdrawn
    /// - Cooldown has not expired and maturity has not been reached
    pub fn withdraw(ctx: Context<Withdraw>) -> Result<()> {
        instructions::withdraw::handler(ctx)
    }

    /// Revokes a stake. Terminal.
    ///
    /// # Errors
    /// Returns an error if caller lacks the StakeModerator role, or the stake
    /// is already revoked or withdrawn.
    pub fn revoke_stake(ctx: Context<RevokeStake>) -> Result<()> {
        instructions::moderation::revoke_stake_handler(ctx)
    }

    /// Suspends a stake.
    pub fn suspend_stake(ctx: Context<ModerateStake>) -> Result<()> {
        instructions::moderation::suspend_stake_handler(ctx)
    }

    /// Lifts a stake's suspension.
    pub fn resume_stake(ctx: Context<ModerateStake>) -> Result<()> {
        instructions::moderation::resume_stake_handler(ctx)
    }

    /// Sweeps all unswept principal of revoked stakes. Treasurer only.
    pub fn sweep_revoked_stake(ctx: Context<SweepStake>) -> Result<()> {
        instructions::sweep::sweep_stake_handler(ctx, SweepKind::RevokedStake)
    }

    /// Sweeps all unswept early-unstake penalties. Treasurer only.
    pub fn sweep_unstake_penalty(ctx: Context<SweepStake>) -> Result<()> {
        instructions::sweep::sweep_stake_handler(ctx, SweepKind::UnstakePenalty)
    }

    /// Sweeps reward not committed to any stake. RewardManager only.
    pub fn sweep_unallocated_reward(ctx: Context<SweepReward>) -> Result<()> {
        instructions::sweep::sweep_reward_handler(ctx)
    }

    /// Returns the pool's ledger snapshot.
    pub fn get_pool_stats(ctx: Context<GetPoolStats>) -> Result<PoolStats> {
        instructions::views::get_pool_stats_handler(ctx)
    }

    /// Returns the full record of one stake.
    pub fn get_stake_info(ctx: Context<GetStake>, staker: Pubkey, stake_id: u64) -> Result<StakeInfo> {
        instructions::views::get_stake_info_handler(ctx, staker, stake_id)
    }

    /// Returns what unstaking the stake now would yield.
    pub fn get_unstaking_info(ctx: Context<GetStake>, staker: Pubkey, stake_id: u64) -> Result<UnstakingInfo> {
        instructions::views::get_unstaking_info_handler(ctx, staker, stake_id)
    }

    /// Returns the reward claimable on the stake now.
    pub fn get_claimable_reward(ctx: Context<GetStake>, staker: Pubkey, stake_id: u64) -> Result<u64> {
        instructions::views::get_claimable_reward_handler(ctx, staker, stake_id)
    }
}
