//! Pure arithmetic for the staking engine.
//!
//! Nothing in here touches accounts or the clock; callers pass `now` in.

pub mod decimals;
pub mod fixed_point;
pub mod reward;

pub use decimals::*;
pub use fixed_point::*;
pub use reward::*;
