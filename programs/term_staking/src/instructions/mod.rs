//! Instruction handlers for the Term Staking program.
//!
//! This module contains all instruction implementations.

pub mod admin;
pub mod claim_rewards;
pub mod fund_reward;
pub mod initialize;
pub mod moderation;
pub mod roles;
pub mod stake;
pub mod sweep;
pub mod unstake;
pub mod views;
pub mod withdraw;

pub use admin::*;
pub use claim_rewards::*;
pub use fund_reward::*;
pub use initialize::*;
pub use moderation::*;
pub use roles::*;
pub use stake::*;
pub use sweep::*;
pub use unstake::*;
pub use views::*;
pub use withdraw::*;
