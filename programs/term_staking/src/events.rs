use anchor_lang::prelude::*;

use crate::state::{PoolParams, PoolStatus, StakingRole, SweepKind};

// Access events
#[event]
pub struct RoleGranted {
    pub role: StakingRole,
    pub member: Pubkey,
    pub admin: Pubkey,
    pub timestamp: i64,
}

#[event]
pub struct RoleRevoked {
    pub role: StakingRole,
    pub member: Pubkey,
    pub admin: Pubkey,
    pub timestamp: i64,
}

// Pool events
#[event]
pub struct PoolCreated {
    pub pool: Pubkey,
    pub pool_id: u64,
    pub stake_mint: Pubkey,
    pub reward_mint: Pubkey,
    pub stake_duration_days: u64,
    pub apr: u128,
    pub timestamp: i64,
}

#[event]
pub struct PoolParamsUpdated {
    pub pool: Pubkey,
    pub params: PoolParams,
    pub timestamp: i64,
}

#[event]
pub struct PoolStatusChanged {
    pub pool: Pubkey,
    pub status: PoolStatus,
    pub timestamp: i64,
}

#[event]
pub struct RewardFunded {
    pub pool: Pubkey,
    pub funder: Pubkey,
    pub amount: u64,
    pub timestamp: i64,
}

#[event]
pub struct PoolSwept {
    pub pool: Pubkey,
    pub kind: SweepKind,
    pub recipient: Pubkey,
    pub amount: u64,
    pub timestamp: i64,
}

// Stake events
#[event]
pub struct Staked {
    pub pool: Pubkey,
    pub staker: Pubkey,
    pub stake_id: u64,
    pub amount: u64,
    pub reward_at_maturity: u64,
    pub maturity_ts: i64,
    pub timestamp: i64,
}

#[event]
pub struct RewardClaimed {
    pub pool: Pubkey,
    pub staker: Pubkey,
    pub stake_id: u64,
    pub amount: u64,
    pub timestamp: i64,
}

#[event]
pub struct Unstaked {
    pub pool: Pubkey,
    pub staker: Pubkey,
    pub stake_id: u64,
    pub unstake_amount: u64,
    pub penalty_amount: u64,
    pub reward_at_unstake: u64,
    pub cooldown_expiry_ts: i64,
    pub timestamp: i64,
}

#[event]
pub struct Withdrawn {
    pub pool: Pubkey,
    pub staker: Pubkey,
    pub stake_id: u64,
    pub amount: u64,
    pub timestamp: i64,
}

#[event]
pub struct StakeRevoked {
    pub pool: Pubkey,
    pub staker: Pubkey,
    pub stake_id: u64,
    pub revoked_stake_amount: u64,
    pub revoked_reward_amount: u64,
    pub timestamp: i64,
}

#[event]
pub struct StakeSuspensionChanged {
    pub pool: Pubkey,
    pub staker: Pubkey,
    pub stake_id: u64,
    pub suspended: bool,
    pub timestamp: i64,
}
