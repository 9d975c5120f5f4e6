//! Program constants for the Term Staking program.
//!
//! This module defines all constant values used throughout the staking program,
//! including PDA seeds, time periods and fixed-point precision values.

/// Seed for deriving the access control singleton PDA
pub const ACCESS_CONTROL_SEED: &[u8] = b"access_control";

/// Seed for deriving role grant PDAs
pub const ROLE_SEED: &[u8] = b"role";

/// Seed for deriving pool config PDAs
pub const POOL_CONFIG_SEED: &[u8] = b"pool_config";

/// Seed for deriving pool ledger PDAs
pub const POOL_LEDGER_SEED: &[u8] = b"pool_ledger";

/// Seed for deriving stake record PDAs
pub const STAKE_RECORD_SEED: &[u8] = b"stake_record";

/// Seed for deriving the vault holding staked principal
pub const STAKE_VAULT_SEED: &[u8] = b"stake_vault";

/// Seed for deriving the vault holding funded rewards
pub const REWARD_VAULT_SEED: &[u8] = b"reward_vault";

/// Number of seconds in a day
pub const SECONDS_PER_DAY: i64 = 86_400;

/// Days in a reward year
pub const DAYS_PER_YEAR: u128 = 365;

/// Decimal places of the canonical fixed-point representation
pub const CANONICAL_DECIMALS: u8 = 18;

/// One percent in 18-decimal fixed-point (1% = 10^18)
pub const ONE_PERCENT: u128 = 1_000_000_000_000_000_000;

/// 100% in 18-decimal fixed-point
pub const HUNDRED_PERCENT: u128 = 100 * ONE_PERCENT;
