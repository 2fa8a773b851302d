use crate::config::SystemConfig;
use crate::ledger::Ledger;
use crate::transaction::Transaction;
use crate::wallet::Account;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Shared application state wrapping the in-memory ledger.
#[derive(Default)]
pub struct AppState {
    pub ledger: Ledger,
}

impl AppState {
    pub fn new(config: SystemConfig) -> Self {
        Self {
            ledger: Ledger::new(config),
        }
    }
}

/* ---------- Envelope ---------- */

/// Every response body: `{ success, data?, message?, error? }`.
#[derive(Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
            error: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl ApiResponse<()> {
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: None,
            message: Some(message.into()),
            error: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            message: None,
            error: Some(error.into()),
        }
    }
}

/* ---------- User API Models ---------- */

#[derive(Deserialize, Default)]
pub struct CreateUserRequest {
    pub name: Option<String>,
}

#[derive(Serialize)]
pub struct UserDetailResponse {
    pub user: Account,
    pub transactions: Vec<Transaction>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocateRequest {
    pub user_address: String,
    pub amount: Decimal,
}

/* ---------- TX API Models ---------- */

#[derive(Deserialize)]
pub struct NewTxRequest {
    pub from: String,
    pub to: String,
    pub amount: Decimal,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTxResponse {
    pub transaction_id: String,
}

/* ---------- Mining API Models ---------- */

#[derive(Deserialize)]
pub struct RegisterMinerRequest {
    #[serde(default)]
    pub name: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterMinerResponse {
    pub miner_address: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MineRequest {
    pub miner_address: String,
}

/* ---------- Chain API Models ---------- */

#[derive(Serialize)]
pub struct ValidateResponse {
    pub valid: bool,
    pub length: usize,
    pub difficulty: u32,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub timestamp: String,
}
