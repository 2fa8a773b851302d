use std::collections::HashSet;

use super::model::Transaction;

/// FIFO pool of submitted transactions that are not yet in a block.
#[derive(Debug, Default)]
pub struct TransactionPool {
    pending: Vec<Transaction>,
}

impl TransactionPool {
    pub fn new() -> Self {
        Self {
            pending: Vec::new(),
        }
    }

    /// Append a transaction behind everything already queued.
    pub fn push(&mut self, tx: Transaction) {
        self.pending.push(tx);
    }

    /// Up to `limit` oldest transactions, cloned. The pool is untouched.
    pub fn peek_batch(&self, limit: usize) -> Vec<Transaction> {
        self.pending.iter().take(limit).cloned().collect()
    }

    /// Drop every transaction whose id is in `ids`. Returns how many were removed.
    pub fn remove(&mut self, ids: &HashSet<String>) -> usize {
        let before = self.pending.len();
        self.pending.retain(|t| !ids.contains(&t.id));
        before - self.pending.len()
    }

    /// Full snapshot, oldest first.
    pub fn pending(&self) -> &[Transaction] {
        &self.pending
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
