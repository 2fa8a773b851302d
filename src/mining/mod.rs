//! Block assembly: settle candidate transactions, then search for a nonce.

pub mod miner;

pub use miner::{Miner, MinerRegistry};

use log::{debug, warn};
use rust_decimal::Decimal;
use std::time::{Duration, Instant};

use crate::blockchain::Block;
use crate::error::{LedgerError, LedgerResult};
use crate::transaction::{Transaction, TxStatus};
use crate::wallet::AccountRegistry;

/// Outcome of trying to settle a batch of pending transactions.
#[derive(Debug, Default)]
pub struct Settlement {
    /// Confirmed transactions, in pool order.
    pub settled: Vec<Transaction>,
    /// Transactions that could not be applied, with the reason.
    pub skipped: Vec<(Transaction, LedgerError)>,
}

impl Settlement {
    pub fn total_fees(&self) -> LedgerResult<Decimal> {
        checked_total(Decimal::ZERO, &self.settled)
    }
}

/// The most a block built from `candidates` can pay: the reward plus every fee.
pub fn max_payout(reward: Decimal, candidates: &[Transaction]) -> LedgerResult<Decimal> {
    checked_total(reward, candidates)
}

fn checked_total(base: Decimal, txs: &[Transaction]) -> LedgerResult<Decimal> {
    txs.iter().try_fold(base, |acc, t| {
        acc.checked_add(t.fee).ok_or(LedgerError::AmountOverflow)
    })
}

/// Apply each candidate transfer in order. Failures are collected, not raised:
/// balances may have moved since a transaction was submitted.
pub fn settle_batch(accounts: &mut AccountRegistry, candidates: Vec<Transaction>) -> Settlement {
    let mut out = Settlement::default();
    for mut tx in candidates {
        match accounts.apply_transfer(&tx.from, &tx.to, tx.amount, tx.fee) {
            Ok(()) => {
                tx.status = TxStatus::Confirmed;
                out.settled.push(tx);
            }
            Err(e) => {
                debug!("MINER - skipping tx {}: {}", tx.id, e);
                out.skipped.push((tx, e));
            }
        }
    }
    out
}

/// Give back settled transfers, newest first, when their block is abandoned.
pub fn unsettle(accounts: &mut AccountRegistry, settled: &[Transaction]) {
    for tx in settled.iter().rev() {
        if let Err(e) = accounts.revert_transfer(&tx.from, &tx.to, tx.amount, tx.fee) {
            warn!("MINER - could not revert tx {}: {}", tx.id, e);
        }
    }
}

/// Run the proof-of-work search on `block` and report how long it took.
pub fn seal(block: &mut Block, difficulty: u32) -> Duration {
    let started = Instant::now();
    block.mine(difficulty);
    started.elapsed()
}
