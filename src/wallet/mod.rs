pub mod registry;

pub use registry::{Account, AccountRegistry};

use rand::RngCore;
use rand::rngs::OsRng;
use sha2::{Digest, Sha256};

/// Random bytes behind every secret key.
pub const SECRET_KEY_BYTES: usize = 32;

/// Length of an address in hex characters.
pub const ADDRESS_HEX_LEN: usize = 40;

/// Generate a new secret key and return (secret_hex, address_hex).
/// There is no curve math here: the address is just a truncated digest
/// of the secret, so nothing can be signed or verified with it.
pub fn generate_keypair_hex() -> (String, String) {
    let mut secret = [0u8; SECRET_KEY_BYTES];
    OsRng.fill_bytes(&mut secret);
    let secret_hex = hex::encode(secret);
    let address = address_from_secret_hex(&secret_hex);
    (secret_hex, address)
}

/// Derive the address for a hex secret key: first 40 hex chars of SHA-256(secret_hex).
pub fn address_from_secret_hex(secret_hex: &str) -> String {
    let digest = Sha256::digest(secret_hex.as_bytes());
    let mut address = hex::encode(digest);
    address.truncate(ADDRESS_HEX_LEN);
    address
}
