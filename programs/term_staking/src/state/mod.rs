//! State structures for the Term Staking program.
//!
//! This module defines all account structures used to store program state,
//! together with the pure lifecycle and ledger logic that mutates them.

pub mod access_control;
pub mod pool_config;
pub mod pool_ledger;
pub mod stake_record;

pub use access_control::*;
pub use pool_config::*;
pub use pool_ledger::*;
pub use stake_record::*;
