use anchor_lang::prelude::*;
use anchor_lang::prelude::borsh;

use crate::error::StakingError;

/// Roles the program checks before admin-only operations.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum StakingRole {
    /// Create pools, change their mutable parameters and status.
    PoolManager,
    /// Revoke, suspend and resume stakes.
    StakeModerator,
    /// Fund reward and sweep unallocated reward.
    RewardManager,
    /// Sweep revoked stake and unstake penalties.
    Treasurer,
}

impl StakingRole {
    pub fn seed(self) -> u8 {
        self as u8
    }
}

/// Program-wide access admin. The only account allowed to grant roles.
#[account]
#[derive(Default, Debug)]
pub struct AccessControl {
    pub admin: Pubkey,
    pub bump: u8,
    pub _reserved: [u8; 32],
}

impl AccessControl {
    pub const LEN: usize = 8 + 32 + 1 + 32;
}

/// Membership of one pubkey in one role. Existence of the PDA is the grant.
#[account]
#[derive(Debug)]
pub struct RoleGrant {
    pub role: StakingRole,
    pub member: Pubkey,
    pub granted_at: i64,
    pub bump: u8,
}

impl RoleGrant {
    pub const LEN: usize = 8 + 1 + 32 + 8 + 1;

    /// Answer "is `caller` authorized for `role`".
    pub fn authorize(&self, role: StakingRole, caller: &Pubkey) -> Result<()> {
        require!(
            self.role == role && self.member == *caller,
            StakingError::Unauthorized
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anchor_lang::error::Error;

    #[test]
    fn test_authorize_matches_role_and_member() {
        let member = Pubkey::new_unique();
        let grant = RoleGrant {
            role: StakingRole::Treasurer,
            member,
            granted_at: 0,
            bump: 255,
        };
        assert!(grant.authorize(StakingRole::Treasurer, &member).is_ok());
        assert_eq!(
            grant.authorize(StakingRole::RewardManager, &member).unwrap_err(),
            Error::from(StakingError::Unauthorized)
        );
        assert_eq!(
            grant
                .authorize(StakingRole::Treasurer, &Pubkey::new_unique())
                .unwrap_err(),
            Error::from(StakingError::Unauthorized)
        );
    }

    #[test]
    fn test_sweep_roles_do_not_overlap() {
        let member = Pubkey::new_unique();
        let grant = |role| RoleGrant {
            role,
            member,
            granted_at: 0,
            bump: 255,
        };
        // principal sweeps need Treasurer, reward sweeps RewardManager
        assert!(grant(StakingRole::RewardManager)
            .authorize(StakingRole::Treasurer, &member)
            .is_err());
        assert!(grant(StakingRole::PoolManager)
            .authorize(StakingRole::RewardManager, &member)
            .is_err());
        assert!(grant(StakingRole::RewardManager)
            .authorize(StakingRole::RewardManager, &member)
            .is_ok());
    }

    #[test]
    fn test_role_seeds_are_distinct() {
        let seeds = [
            StakingRole::PoolManager.seed(),
            StakingRole::StakeModerator.seed(),
            StakingRole::RewardManager.seed(),
            StakingRole::Treasurer.seed(),
        ];
        assert_eq!(seeds, [0, 1, 2, 3]);
    }
}
