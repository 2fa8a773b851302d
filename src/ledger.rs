//! The ledger engine: one object owning accounts, miners, the pending pool and the chain.

use log::{debug, info, warn};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard};

use crate::blockchain::{Block, Blockchain};
use crate::config::SystemConfig;
use crate::error::{LedgerError, LedgerResult, MineRejection};
use crate::mining::{self, Miner, MinerRegistry};
use crate::transaction::{Transaction, TransactionPool};
use crate::wallet::{Account, AccountRegistry};

struct LedgerState {
    chain: Blockchain,
    pool: TransactionPool,
    accounts: AccountRegistry,
    miners: MinerRegistry,
}

impl LedgerState {
    fn ensure_payout_fits(&self, miner: &str, payout: Decimal) -> LedgerResult<()> {
        self.accounts.ensure_can_credit(miner, payout)?;
        self.miners.ensure_reward_fits(miner, payout)
    }

    /// Credit the reward account and bump the miner's counters, or change nothing.
    fn pay_miner(&mut self, miner: &str, payout: Decimal) -> LedgerResult<()> {
        self.ensure_payout_fits(miner, payout)?;
        self.accounts.credit(miner, payout)?;
        self.miners.record_block(miner, payout)
    }
}

/// Summary counters for the explorer view.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerInfo {
    pub block_height: usize,
    pub pending_transaction_count: usize,
    pub total_users: usize,
    pub total_miners: usize,
    pub config: SystemConfig,
}

/// Thread-safe ledger. Every mutation of accounts or the pool goes through
/// one state lock; `mine` additionally holds a mining lock for its whole run
/// so the proof-of-work search can happen with the state lock released.
pub struct Ledger {
    config: SystemConfig,
    state: Mutex<LedgerState>,
    mining: Mutex<()>,
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new(SystemConfig::default())
    }
}

impl Ledger {
    pub fn new(config: SystemConfig) -> Self {
        let config = config.bounded();
        let chain = Blockchain::new(config.difficulty);
        info!(
            "LEDGER - genesis block {} (difficulty {})",
            chain.last_block().hash,
            chain.difficulty()
        );
        Self {
            config,
            state: Mutex::new(LedgerState {
                chain,
                pool: TransactionPool::new(),
                accounts: AccountRegistry::new(),
                miners: MinerRegistry::new(),
            }),
            mining: Mutex::new(()),
        }
    }

    fn state(&self) -> MutexGuard<'_, LedgerState> {
        self.state.lock().expect("mutex poisoned")
    }

    pub fn config(&self) -> &SystemConfig {
        &self.config
    }

    /* -------------------- Accounts -------------------- */

    pub fn create_account(&self, name: Option<&str>) -> Account {
        let account = self.state().accounts.create_account(name);
        info!("ACCOUNT - created {} ({})", account.name, account.address);
        account
    }

    /// Administrative credit. Returns the new balance.
    pub fn allocate(&self, address: &str, amount: Decimal) -> LedgerResult<Decimal> {
        self.state().accounts.allocate(address, amount)
    }

    pub fn balance(&self, address: &str) -> LedgerResult<Decimal> {
        self.state().accounts.balance(address)
    }

    pub fn account(&self, address: &str) -> LedgerResult<Account> {
        self.state().accounts.get(address).cloned()
    }

    pub fn accounts(&self) -> Vec<Account> {
        self.state().accounts.accounts()
    }

    /* -------------------- Transactions -------------------- */

    /// Queue a transfer. The balance check here is only a pre-check; the
    /// transfer is validated again when a block is assembled.
    pub fn submit_transaction(
        &self,
        from: &str,
        to: &str,
        amount: Decimal,
    ) -> LedgerResult<String> {
        if amount <= Decimal::ZERO {
            return Err(LedgerError::InvalidAmount);
        }
        let fee = self.config.min_fee;

        let mut st = self.state();
        if let Err(e) = st.accounts.ensure_can_pay(from, to, amount, fee) {
            warn!("TX - rejected {from} -> {to} ({amount}): {e}");
            return Err(e);
        }

        let tx = Transaction::new(from.to_string(), to.to_string(), amount, fee);
        let id = tx.id.clone();
        st.pool.push(tx);
        debug!("TX - {} accepted into pool (size {})", id, st.pool.len());
        Ok(id)
    }

    /// Pending pool snapshot, oldest first.
    pub fn pending_transactions(&self) -> Vec<Transaction> {
        self.state().pool.pending().to_vec()
    }

    /// Confirmed transactions touching `address`, newest first.
    pub fn transaction_history(&self, address: &str) -> Vec<Transaction> {
        self.state().chain.transaction_history(address)
    }

    /* -------------------- Miners -------------------- */

    /// Register a miner together with its zero-balance reward account.
    pub fn register_miner(&self, name: &str) -> String {
        let name = name.trim();
        let mut st = self.state();
        let account = st.accounts.create_account(Some(&format!("Miner_{name}")));
        st.miners
            .insert(Miner::new(account.address.clone(), name.to_string()));
        info!("MINER - registered {} ({})", name, account.address);
        account.address
    }

    pub fn miner(&self, address: &str) -> Option<Miner> {
        self.state().miners.get(address).cloned()
    }

    pub fn miners(&self) -> Vec<Miner> {
        self.state().miners.miners()
    }

    /// Assemble, seal and append a block for `miner_address`:
    /// - Settle up to `max_transactions_per_block` oldest pending txs
    /// - Search for a nonce with the state lock released
    /// - Append, pay `block_reward + fees` to the miner, clean the pool
    ///
    /// A payout that would overflow is rejected before any balance moves.
    pub fn mine(&self, miner_address: &str) -> LedgerResult<Block> {
        let _mining = self.mining.lock().expect("mutex poisoned");

        let (mut block, payout, skipped_ids, miner_name) = {
            let mut st = self.state();
            let miner_name = st
                .miners
                .active(miner_address)
                .inspect_err(|e| warn!("MINER - {miner_address}: {e}"))?
                .name
                .clone();

            if st.pool.is_empty() {
                warn!("MINER - {miner_name}: pool is empty");
                return Err(MineRejection::EmptyPool.into());
            }
            let candidates = st.pool.peek_batch(self.config.max_transactions_per_block);

            if let Err(e) = mining::max_payout(self.config.block_reward, &candidates)
                .and_then(|ceiling| st.ensure_payout_fits(miner_address, ceiling))
            {
                warn!("MINER - {miner_name}: block payout does not fit: {e}");
                return Err(e);
            }

            let settlement = mining::settle_batch(&mut st.accounts, candidates);
            if settlement.settled.is_empty() {
                warn!(
                    "MINER - {miner_name}: none of {} candidates could be settled",
                    settlement.skipped.len()
                );
                return Err(MineRejection::NothingSettleable.into());
            }

            let payout = match settlement.total_fees().and_then(|fees| {
                self.config
                    .block_reward
                    .checked_add(fees)
                    .ok_or(LedgerError::AmountOverflow)
            }) {
                Ok(payout) => payout,
                Err(e) => {
                    mining::unsettle(&mut st.accounts, &settlement.settled);
                    return Err(e);
                }
            };
            let skipped_ids: Vec<String> = settlement
                .skipped
                .iter()
                .map(|(t, _)| t.id.clone())
                .collect();
            let block = Block::new(
                st.chain.len() as u64,
                st.chain.last_block().hash.clone(),
                settlement.settled,
                miner_address.to_string(),
                self.config.block_reward,
            );
            (block, payout, skipped_ids, miner_name)
        }; // release state lock before PoW

        info!("MINER - {miner_name} searching for block #{}...", block.index);
        let elapsed = mining::seal(&mut block, self.config.difficulty);

        let mut st = self.state();
        // The miner's account may have been topped up during the search.
        if let Err(e) = st.pay_miner(miner_address, payout) {
            warn!("MINER - {miner_name}: block #{} abandoned: {e}", block.index);
            mining::unsettle(&mut st.accounts, &block.transactions);
            return Err(e);
        }
        st.chain.append(block.clone());

        let mut included: HashSet<String> =
            block.transactions.iter().map(|t| t.id.clone()).collect();
        // Unsettleable candidates leave the pool with the block that skipped
        // them; they do not wait for a later top-up of the sender.
        included.extend(skipped_ids);
        let removed = st.pool.remove(&included);

        info!(
            "MINER - sealed block #{} (hash={}, nonce={}, txs={}, reward={}) in {} ms",
            block.index,
            block.hash,
            block.nonce,
            block.transactions.len(),
            payout,
            elapsed.as_millis()
        );
        debug!("Pool cleaned: removed {}, {} left", removed, st.pool.len());
        Ok(block)
    }

    /* -------------------- Chain -------------------- */

    pub fn chain(&self) -> Vec<Block> {
        self.state().chain.blocks().to_vec()
    }

    pub fn block(&self, index: u64) -> LedgerResult<Block> {
        self.state().chain.get(index).cloned()
    }

    pub fn validate_chain(&self) -> bool {
        self.state().chain.is_valid_chain()
    }

    pub fn info(&self) -> LedgerInfo {
        let st = self.state();
        LedgerInfo {
            block_height: st.chain.len(),
            pending_transaction_count: st.pool.len(),
            total_users: st.accounts.len(),
            total_miners: st.miners.len(),
            config: self.config.clone(),
        }
    }

    /// Demo data: two funded users and two miners.
    pub fn seed_demo(&self) -> LedgerResult<()> {
        let alice = self.create_account(Some("Alice"));
        let bob = self.create_account(Some("Bob"));
        self.allocate(&alice.address, Decimal::from(100))?;
        self.allocate(&bob.address, Decimal::from(50))?;
        self.register_miner("Miner_Alpha");
        self.register_miner("Miner_Beta");
        info!("SEED - demo users Alice (100) and Bob (50), miners Miner_Alpha and Miner_Beta");
        Ok(())
    }
}
