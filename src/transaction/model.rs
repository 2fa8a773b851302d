use chrono::Utc;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifecycle of a transfer. `Failed` is part of the wire format but the
/// miner never assigns it: unsettleable transfers are skipped instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TxStatus {
    Pending,
    Confirmed,
    Failed,
}

/// A requested transfer of value between two accounts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub from: String,
    pub to: String,
    pub amount: Decimal,
    pub fee: Decimal,
    pub timestamp: i64, // Unix timestamp in milliseconds (UTC)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
    pub status: TxStatus,
}

impl Transaction {
    /// Build a new pending transaction with a fresh random id.
    pub fn new(from: String, to: String, amount: Decimal, fee: Decimal) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            from,
            to,
            amount,
            fee,
            timestamp: Utc::now().timestamp_millis(),
            signature: None,
            status: TxStatus::Pending,
        }
    }

    pub fn involves(&self, address: &str) -> bool {
        self.from == address || self.to == address
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn new_transaction_is_pending_and_unsigned() {
        let tx = Transaction::new("a".into(), "b".into(), dec!(10), dec!(0.1));
        assert_eq!(tx.status, TxStatus::Pending);
        assert!(tx.signature.is_none());
        assert!(tx.involves("a"));
        assert!(tx.involves("b"));
        assert!(!tx.involves("c"));
    }

    #[test]
    fn ids_are_unique() {
        let a = Transaction::new("a".into(), "b".into(), dec!(1), dec!(0.1));
        let b = Transaction::new("a".into(), "b".into(), dec!(1), dec!(0.1));
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn serializes_with_camel_case_and_lowercase_status() {
        let tx = Transaction::new("a".into(), "b".into(), dec!(1), dec!(0.1));
        let json = serde_json::to_value(&tx).unwrap();
        assert_eq!(json["status"], "pending");
        assert!(json.get("signature").is_none());
        assert!(json.get("timestamp").is_some());
    }
}
