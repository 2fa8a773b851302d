use log::warn;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;
use std::env;
use std::str::FromStr;

/// Default Proof-of-Work difficulty (number of leading zeros).
pub const DEFAULT_DIFFICULTY: u32 = 4;

/// Fixed credit for every mined block (dev value).
pub const DEFAULT_BLOCK_REWARD: Decimal = dec!(10);

/// Fee charged on every transaction.
pub const DEFAULT_MIN_FEE: Decimal = dec!(0.1);

/// Pool-to-block batch size cap.
pub const DEFAULT_MAX_TXS_PER_BLOCK: usize = 10;

/// Difficulty bounds (keep low in dev to avoid long waits)
pub const DIFF_MIN: u32 = 1;
pub const DIFF_MAX: u32 = 6;

/// Ceiling for the block reward and the fee.
pub const MAX_CONFIG_AMOUNT: Decimal = dec!(1000000000);

/// Ledger tuning parameters. Fixed once the engine is built.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemConfig {
    pub block_reward: Decimal,
    pub min_fee: Decimal,
    pub difficulty: u32,
    pub max_transactions_per_block: usize,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            block_reward: DEFAULT_BLOCK_REWARD,
            min_fee: DEFAULT_MIN_FEE,
            difficulty: DEFAULT_DIFFICULTY,
            max_transactions_per_block: DEFAULT_MAX_TXS_PER_BLOCK,
        }
    }
}

impl SystemConfig {
    /// Read `BLOCK_REWARD`, `MIN_FEE`, `DIFFICULTY` and `MAX_TXS_PER_BLOCK`,
    /// keeping the default for anything unset or unparseable.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let difficulty: u32 = env_or("DIFFICULTY", defaults.difficulty);
        let max_txs: usize = env_or("MAX_TXS_PER_BLOCK", defaults.max_transactions_per_block);
        Self {
            block_reward: non_negative("BLOCK_REWARD", defaults.block_reward),
            min_fee: non_negative("MIN_FEE", defaults.min_fee),
            difficulty,
            max_transactions_per_block: max_txs,
        }
        .bounded()
    }

    /// Clamp every field into its supported range: amounts to
    /// `0..=MAX_CONFIG_AMOUNT`, difficulty to `DIFF_MIN..=DIFF_MAX`, and at
    /// least one transaction per block.
    pub fn bounded(self) -> Self {
        let bounded = Self {
            block_reward: self.block_reward.clamp(Decimal::ZERO, MAX_CONFIG_AMOUNT),
            min_fee: self.min_fee.clamp(Decimal::ZERO, MAX_CONFIG_AMOUNT),
            difficulty: self.difficulty.clamp(DIFF_MIN, DIFF_MAX),
            max_transactions_per_block: self.max_transactions_per_block.max(1),
        };
        if bounded != self {
            warn!("CONFIG - out-of-range values adjusted: {self:?} -> {bounded:?}");
        }
        bounded
    }
}

/// Address the HTTP server binds to, from `HOST` / `PORT`.
pub fn bind_address() -> (String, u16) {
    let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port = env_or("PORT", 3001u16);
    (host, port)
}

/// Whether to create the demo users and miners at startup (`SEED_DEMO`, default on).
pub fn seed_demo() -> bool {
    env_or("SEED_DEMO", true)
}

fn env_or<T: FromStr + Copy>(key: &str, default: T) -> T {
    match env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("CONFIG - ignoring invalid {key}={raw:?}");
            default
        }),
        Err(_) => default,
    }
}

fn non_negative(key: &str, default: Decimal) -> Decimal {
    let value = env_or(key, default);
    if value.is_sign_negative() {
        warn!("CONFIG - {key} must not be negative, using {default}");
        return default;
    }
    value
}
