pub mod block;
pub mod model;

pub use block::{Block, meets_difficulty};
pub use model::Blockchain;
