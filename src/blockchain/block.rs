use chrono::Utc;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::transaction::Transaction;

/// A single block in the blockchain holding a list of confirmed transactions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    pub index: u64,
    pub timestamp: i64, // Unix timestamp in milliseconds (UTC)
    pub transactions: Vec<Transaction>,
    pub previous_hash: String,
    pub hash: String, // Cached hash of the block
    pub nonce: u64,   // Proof-of-Work nonce
    pub miner: Option<String>,
    pub reward: Decimal,
}

impl Block {
    /// Create the genesis block (first block in the chain).
    /// Its hash is computed once, never searched for.
    pub fn genesis() -> Self {
        let mut block = Self {
            index: 0,
            timestamp: Utc::now().timestamp_millis(),
            transactions: Vec::new(),
            previous_hash: String::from("0"),
            hash: String::new(),
            nonce: 0,
            miner: None,
            reward: Decimal::ZERO,
        };
        block.hash = block.compute_hash();
        block
    }

    /// Create a new block (not mined yet). Call `mine()` to perform PoW.
    pub fn new(
        index: u64,
        previous_hash: String,
        transactions: Vec<Transaction>,
        miner: String,
        reward: Decimal,
    ) -> Self {
        let mut block = Self {
            index,
            timestamp: Utc::now().timestamp_millis(),
            transactions,
            previous_hash,
            hash: String::new(),
            nonce: 0,
            miner: Some(miner),
            reward,
        };
        block.hash = block.compute_hash();
        block
    }

    /// Compute the SHA-256 hash of this block using its fields
    /// (excluding `hash` and `reward`). Transactions are serialized
    /// deterministically as JSON and included in the preimage.
    pub fn compute_hash(&self) -> String {
        let txs_json = serde_json::to_string(&self.transactions).expect("serialize txs");
        let preimage = format!(
            "{}:{}:{}:{}:{}:{}",
            self.index,
            self.previous_hash,
            self.timestamp,
            txs_json,
            self.nonce,
            self.miner.as_deref().unwrap_or_default()
        );
        let mut hasher = Sha256::new();
        hasher.update(preimage.as_bytes());
        let digest = hasher.finalize();
        hex::encode(digest)
    }

    /// Perform Proof-of-Work by finding a nonce that yields a hash
    /// starting with `difficulty` leading zeros (in hex).
    ///
    /// Blocks the calling thread; there is no upper bound on iterations.
    pub fn mine(&mut self, difficulty: u32) {
        let target_prefix = "0".repeat(difficulty as usize);
        loop {
            self.hash = self.compute_hash();
            if self.hash.starts_with(&target_prefix) {
                break;
            }
            self.nonce = self.nonce.wrapping_add(1);
        }
    }

    /// Validate that the block's cached `hash` matches its content and
    /// satisfies the PoW difficulty. (Does NOT validate chain linkage.)
    pub fn is_valid(&self, difficulty: u32) -> bool {
        let expected = self.compute_hash();
        if self.hash != expected {
            return false;
        }
        meets_difficulty(&self.hash, difficulty)
    }
}

/// True when the first `difficulty` characters of `hash` are all `'0'`.
pub fn meets_difficulty(hash: &str, difficulty: u32) -> bool {
    hash.len() >= difficulty as usize
        && hash.chars().take(difficulty as usize).all(|c| c == '0')
}
