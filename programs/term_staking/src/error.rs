//! Error types for the Term Staking program.
//!
//! Errors are grouped by category rather than by call site, so a caller can
//! tell a rejected admission from a wrong lifecycle state or a no-op.
//!
//! ## Categories
//! - Admission: rejected before any state change
//! - State: wrong lifecycle state, state left untouched
//! - No-op: nothing to do, rejected instead of a zero-value transfer
//! - Authorization: rejected before domain state is read
//! - Configuration: invalid pool parameters
//! - Math: overflow, underflow, division by zero

use anchor_lang::prelude::*;

/// Custom error codes for the Term Staking program.
///
/// Error codes start at 6000 (Anchor's custom error offset).
#[error_code]
pub enum StakingError {
    // ========== Admission Errors ==========

    /// [6000] Cannot stake, fund or transfer a zero amount.
    #[msg("Amount must be greater than zero")]
    ZeroAmount,

    /// [6001] A stake with this identifier already exists for the staker in this pool.
    #[msg("Stake already exists for this staker and stake id")]
    StakeAlreadyExists,

    /// [6002] Admitting this stake would leave the pool unable to pay its committed rewards.
    #[msg("Stake exceeds the pool's remaining reward capacity")]
    PoolCapacityExceeded,

    /// [6003] The pool is not accepting new stakes.
    #[msg("Pool is not open for staking")]
    PoolNotOpen,

    // ========== State Errors ==========

    /// [6004] The pool config/ledger has not been created.
    #[msg("Pool is not initialized")]
    PoolUninitialized,

    /// [6005] The stake record has not been created.
    #[msg("Stake is not initialized")]
    StakeUninitialized,

    /// [6006] The stake has been revoked by an administrator.
    #[msg("Stake has been revoked")]
    StakeRevoked,

    /// [6007] The stake is suspended.
    #[msg("Stake is suspended")]
    StakeSuspended,

    /// [6008] The stake was already unstaked.
    #[msg("Stake is already unstaked")]
    AlreadyUnstaked,

    /// [6009] Withdraw requires a prior unstake.
    #[msg("Stake has not been unstaked")]
    NotUnstaked,

    /// [6010] The unstaked principal was already withdrawn.
    #[msg("Stake is already withdrawn")]
    AlreadyWithdrawn,

    /// [6011] The early-exit cooldown has not elapsed yet.
    #[msg("Unstake cooldown has not expired")]
    CooldownNotExpired,

    /// [6012] Resume requested on a stake that is not suspended.
    #[msg("Stake is not suspended")]
    StakeNotSuspended,

    /// [6013] The pool is suspended.
    #[msg("Pool is suspended")]
    PoolSuspended,

    /// [6014] The stake record does not belong to this pool or staker.
    #[msg("Stake record does not match pool or staker")]
    StakeMismatch,

    /// [6015] A sweep must drain exactly the current unswept remainder.
    #[msg("Sweep amount does not match the unswept remainder")]
    SweepAmountMismatch,

    // ========== No-op Errors ==========

    /// [6016] Nothing is claimable right now.
    #[msg("No reward available to claim")]
    NothingToClaim,

    /// [6017] The unswept revoked stake is zero.
    #[msg("No revoked stake to sweep")]
    NoRevokedStakeToSweep,

    /// [6018] The unswept unstake penalty is zero.
    #[msg("No unstake penalty to sweep")]
    NoUnstakePenaltyToSweep,

    /// [6019] The pool has no reward left that is not committed to stakes.
    #[msg("No unallocated reward to sweep")]
    NoUnallocatedRewardToSweep,

    /// [6020] A zero-APR pool has nothing to fund.
    #[msg("Pool has zero APR; reward funding is not accepted")]
    ZeroAprPool,

    // ========== Authorization Errors ==========

    /// [6021] Caller does not hold the role the operation requires.
    #[msg("Unauthorized: caller does not hold the required role")]
    Unauthorized,

    /// [6022] Signer does not own the stake.
    #[msg("Unauthorized: signer does not own this stake")]
    InvalidStakeOwner,

    /// [6023] Access admin cannot be the default pubkey.
    #[msg("Invalid access admin")]
    InvalidAdmin,

    // ========== Configuration Errors ==========

    /// [6024] Token decimals exceed the canonical 18.
    #[msg("Token decimals must not exceed 18")]
    InvalidDecimals,

    /// [6025] Stake duration must be at least one day.
    #[msg("Stake duration must be greater than zero")]
    InvalidDuration,

    /// [6026] Penalty percentages must satisfy min <= max <= 100%.
    #[msg("Penalty percentages must satisfy min <= max <= 100%")]
    InvalidPenalty,

    /// [6027] Token mint does not match the pool.
    #[msg("Token mint mismatch - wrong token for this pool")]
    MintMismatch,

    /// [6028] Vault does not match the pool.
    #[msg("Vault address mismatch")]
    VaultMismatch,

    // ========== Math/Overflow Errors ==========

    /// [6029] Arithmetic overflow occurred during calculation.
    #[msg("Arithmetic overflow occurred during calculation")]
    MathOverflow,

    /// [6030] Arithmetic underflow occurred during calculation.
    #[msg("Arithmetic underflow occurred during calculation")]
    MathUnderflow,

    /// [6031] Division by zero attempted.
    #[msg("Division by zero attempted")]
    DivisionByZero,

    /// [6032] Integer conversion failed (value out of range).
    #[msg("Integer conversion failed - value out of range")]
    ConversionOverflow,
}
