use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::HashMap;

use crate::error::{LedgerError, LedgerResult, MineRejection};

/// A named participant entitled to mine. Its address is also an account.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Miner {
    pub address: String,
    pub name: String,
    pub is_active: bool,
    pub blocks_mined_count: u64,
    pub total_rewards: Decimal,
}

impl Miner {
    pub fn new(address: String, name: String) -> Self {
        Self {
            address,
            name,
            is_active: true,
            blocks_mined_count: 0,
            total_rewards: Decimal::ZERO,
        }
    }
}

/// Registered miners keyed by address, listed in registration order.
#[derive(Debug, Default)]
pub struct MinerRegistry {
    miners: HashMap<String, Miner>,
    order: Vec<String>,
}

impl MinerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, miner: Miner) {
        self.order.push(miner.address.clone());
        self.miners.insert(miner.address.clone(), miner);
    }

    pub fn get(&self, address: &str) -> Option<&Miner> {
        self.miners.get(address)
    }

    /// The miner at `address`, provided it exists and is active.
    pub fn active(&self, address: &str) -> LedgerResult<&Miner> {
        let miner = self.get(address).ok_or(MineRejection::UnknownMiner)?;
        if !miner.is_active {
            return Err(MineRejection::InactiveMiner.into());
        }
        Ok(miner)
    }

    /// Check that `reward` can be added to the miner's lifetime total.
    pub fn ensure_reward_fits(&self, address: &str, reward: Decimal) -> LedgerResult<()> {
        let miner = self.get(address).ok_or(MineRejection::UnknownMiner)?;
        miner
            .total_rewards
            .checked_add(reward)
            .map(|_| ())
            .ok_or(LedgerError::AmountOverflow)
    }

    /// Bump lifetime counters after a sealed block.
    pub fn record_block(&mut self, address: &str, reward: Decimal) -> LedgerResult<()> {
        let miner = self
            .miners
            .get_mut(address)
            .ok_or(MineRejection::UnknownMiner)?;
        miner.total_rewards = miner
            .total_rewards
            .checked_add(reward)
            .ok_or(LedgerError::AmountOverflow)?;
        miner.blocks_mined_count += 1;
        Ok(())
    }

    pub fn miners(&self) -> Vec<Miner> {
        self.order
            .iter()
            .filter_map(|a| self.miners.get(a))
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.miners.len()
    }
}

#[cfg(test)]
mod tests {
    use super::{Miner, MinerRegistry};
    use crate::error::{LedgerError, MineRejection};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    #[test]
    fn active_lookup() {
        let mut reg = MinerRegistry::new();
        reg.insert(Miner::new("m1".into(), "Alpha".into()));
        let mut idle = Miner::new("m2".into(), "Beta".into());
        idle.is_active = false;
        reg.insert(idle);

        assert_eq!(reg.active("m1").unwrap().name, "Alpha");
        assert_eq!(
            reg.active("m2").unwrap_err(),
            LedgerError::Rejected(MineRejection::InactiveMiner)
        );
        assert_eq!(
            reg.active("zz").unwrap_err(),
            LedgerError::Rejected(MineRejection::UnknownMiner)
        );
    }

    #[test]
    fn record_block_accumulates() {
        let mut reg = MinerRegistry::new();
        reg.insert(Miner::new("m1".into(), "Alpha".into()));
        reg.record_block("m1", dec!(10.1)).unwrap();
        reg.record_block("m1", dec!(10.2)).unwrap();
        let m = reg.get("m1").unwrap();
        assert_eq!(m.blocks_mined_count, 2);
        assert_eq!(m.total_rewards, dec!(20.3));
        assert_eq!(reg.miners().len(), 1);
    }

    #[test]
    fn record_block_rejects_overflow_untouched() {
        let mut reg = MinerRegistry::new();
        let mut rich = Miner::new("m1".into(), "Alpha".into());
        rich.total_rewards = Decimal::MAX;
        reg.insert(rich);

        assert_eq!(
            reg.ensure_reward_fits("m1", dec!(1)),
            Err(LedgerError::AmountOverflow)
        );
        assert_eq!(
            reg.record_block("m1", dec!(1)),
            Err(LedgerError::AmountOverflow)
        );
        assert_eq!(reg.get("m1").unwrap().blocks_mined_count, 0);
        assert_eq!(
            reg.record_block("zz", dec!(1)),
            Err(LedgerError::Rejected(MineRejection::UnknownMiner))
        );
    }
}
