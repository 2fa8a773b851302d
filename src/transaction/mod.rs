pub mod model;
pub mod pool;

pub use model::{Transaction, TxStatus};
pub use pool::TransactionPool;
