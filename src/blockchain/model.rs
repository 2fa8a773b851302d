use super::Block;
use crate::error::{LedgerError, LedgerResult};
use crate::transaction::Transaction;

/// Append-only in-memory chain. The miner is its only writer.
#[derive(Debug)]
pub struct Blockchain {
    pub chain: Vec<Block>,
    difficulty: u32,
}

impl Blockchain {
    /// Initialize a new blockchain with a genesis block.
    pub fn new(difficulty: u32) -> Self {
        let mut bc = Self {
            chain: Vec::new(),
            difficulty,
        };
        bc.chain.push(Block::genesis());
        bc
    }

    /// Return the last block in the chain.
    pub fn last_block(&self) -> &Block {
        self.chain
            .last()
            .expect("Blockchain should always have at least the genesis block")
    }

    /// Append an already mined block. Proof-of-work is not re-checked here.
    pub fn append(&mut self, block: Block) -> &Block {
        self.chain.push(block);
        self.last_block()
    }

    pub fn get(&self, index: u64) -> LedgerResult<&Block> {
        usize::try_from(index)
            .ok()
            .and_then(|i| self.chain.get(i))
            .ok_or(LedgerError::BlockNotFound(index))
    }

    pub fn blocks(&self) -> &[Block] {
        &self.chain
    }

    /// Every confirmed transaction sent or received by `address`, newest first.
    /// Equal timestamps keep the later-mined transaction first.
    pub fn transaction_history(&self, address: &str) -> Vec<Transaction> {
        let mut history: Vec<Transaction> = self
            .chain
            .iter()
            .flat_map(|b| b.transactions.iter())
            .filter(|t| t.involves(address))
            .cloned()
            .collect();
        history.reverse();
        history.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        history
    }

    /// Validate the entire chain: linkage, hashes and PoW.
    pub fn is_valid_chain(&self) -> bool {
        if self.chain.is_empty() {
            return false;
        }

        // Validate genesis block immutability
        let genesis = &self.chain[0];
        if genesis.index != 0
            || genesis.previous_hash != "0"
            || !genesis.transactions.is_empty()
            || genesis.hash != genesis.compute_hash()
        {
            return false;
        }

        // Validate the rest of the chain
        for i in 1..self.chain.len() {
            let current = &self.chain[i];
            let prev = &self.chain[i - 1];

            // Check index and linkage
            if current.index != i as u64 || current.previous_hash != prev.hash {
                return false;
            }

            // Check hash integrity + difficulty
            if !current.is_valid(self.difficulty) {
                return false;
            }
        }

        true
    }

    pub fn len(&self) -> usize {
        self.chain.len()
    }

    pub fn difficulty(&self) -> u32 {
        self.difficulty
    }
}
