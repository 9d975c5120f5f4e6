//! In-memory pool driving the staking engine without a validator.
//!
//! Vault balances are tracked alongside the ledger so tests can check that
//! every payout the engine requests is actually covered.

#![allow(dead_code)]

use anchor_lang::prelude::*;
use term_staking::constants::{ONE_PERCENT, SECONDS_PER_DAY};
use term_staking::math::to_canonical;
use term_staking::state::{
    LedgerDelta, Payout, PoolConfig, PoolLedger, StakeKey, StakeRecord, SweepKind, Transition,
};

pub const DAY: i64 = SECONDS_PER_DAY;
pub const T0: i64 = 1_700_000_000;

pub fn percent(value: u128) -> u128 {
    value * ONE_PERCENT
}

pub fn config(stake_decimals: u8, reward_decimals: u8, duration_days: u64, apr: u128) -> PoolConfig {
    PoolConfig {
        stake_decimals,
        reward_decimals,
        stake_duration_days: duration_days,
        apr,
        cooldown_days: 7,
        penalty_min: percent(10),
        penalty_max: percent(30),
        ..PoolConfig::default()
    }
}

pub struct TestPool {
    pub pool: Pubkey,
    pub staker: Pubkey,
    pub config: PoolConfig,
    pub ledger: PoolLedger,
    pub records: Vec<StakeRecord>,
    pub stake_vault: u128,
    pub reward_vault: u128,
    pub now: i64,
}

impl TestPool {
    pub fn new(config: PoolConfig) -> Self {
        Self {
            pool: Pubkey::new_unique(),
            staker: Pubkey::new_unique(),
            config,
            ledger: PoolLedger::default(),
            records: Vec::new(),
            stake_vault: 0,
            reward_vault: 0,
            now: T0,
        }
    }

    pub fn advance_days(&mut self, days: i64) {
        self.now += days * DAY;
    }

    /// Fund `amount` native reward units.
    pub fn fund(&mut self, amount: u64) -> Result<()> {
        let canonical = to_canonical(amount, self.config.reward_decimals)?;
        self.ledger.apply(LedgerDelta::FundReward { amount: canonical })?;
        self.reward_vault += canonical;
        Ok(())
    }

    /// Stake `amount` native stake units; returns the stake index.
    pub fn stake(&mut self, amount: u64) -> Result<usize> {
        let canonical = to_canonical(amount, self.config.stake_decimals)?;
        let key = StakeKey {
            pool: self.pool,
            staker: self.staker,
            stake_id: self.records.len() as u64,
        };
        let mut record = StakeRecord::default();
        let transition = record.open(&self.config, &self.ledger, key, canonical, self.now)?;
        self.ledger.apply(transition.delta)?;
        self.stake_vault += canonical;
        self.records.push(record);
        Ok(self.records.len() - 1)
    }

    pub fn claim(&mut self, index: usize) -> Result<u128> {
        let transition = self.records[index].claim(&self.config, self.now)?;
        self.settle(transition)
    }

    pub fn unstake(&mut self, index: usize) -> Result<()> {
        let transition = self.records[index].unstake(&self.config, self.now)?;
        self.settle(transition).map(|_| ())
    }

    pub fn withdraw(&mut self, index: usize) -> Result<u128> {
        let transition = self.records[index].withdraw(self.now)?;
        self.settle(transition)
    }

    pub fn revoke(&mut self, index: usize) -> Result<()> {
        let transition = self.records[index].revoke(self.now)?;
        self.settle(transition).map(|_| ())
    }

    pub fn sweep(&mut self, kind: SweepKind) -> Result<u128> {
        let amount = self.ledger.sweepable(kind)?;
        self.ledger.apply(LedgerDelta::Sweep { kind, amount })?;
        let vault = match kind {
            SweepKind::RevokedStake | SweepKind::UnstakePenalty => &mut self.stake_vault,
            SweepKind::UnallocatedReward => &mut self.reward_vault,
        };
        *vault = vault.checked_sub(amount).expect("sweep overdrew vault");
        Ok(amount)
    }

    fn settle(&mut self, transition: Transition) -> Result<u128> {
        self.ledger.apply(transition.delta)?;
        Ok(match transition.payout {
            Some(Payout::Stake(amount)) => {
                self.stake_vault = self.stake_vault.checked_sub(amount).expect("stake vault overdrawn");
                amount
            }
            Some(Payout::Reward(amount)) => {
                self.reward_vault = self.reward_vault.checked_sub(amount).expect("reward vault overdrawn");
                amount
            }
            None => 0,
        })
    }

    /// Tokens in never fall short of everything paid or still owed out.
    pub fn assert_conserved(&self) {
        let ledger = &self.ledger;
        let inflow = ledger.total_staked + ledger.total_reward_funded;
        let outflow = ledger.total_withdrawn
            + ledger.total_reward_claimed
            + ledger.unswept_revoked_stake().unwrap()
            + ledger.unswept_unstake_penalty().unwrap()
            + ledger.pool_remaining_reward().unwrap();
        assert!(inflow >= outflow, "inflow {} < outflow {}", inflow, outflow);

        let stake_in_vault = ledger.total_staked
            - ledger.total_withdrawn
            - ledger.total_revoked_stake_swept
            - ledger.total_unstake_penalty_swept;
        assert_eq!(stake_in_vault, self.stake_vault);
        assert_eq!(
            ledger.total_reward_funded - ledger.total_reward_claimed - ledger.total_reward_removed,
            self.reward_vault
        );
    }
}
