use actix_web::{HttpResponse, Responder, get, post, web};
use log::{info, warn};
use std::time::Instant;

use super::error::bad_request;
use super::models::{ApiResponse, AppState, NewTxRequest, NewTxResponse};
use crate::error::LedgerError;

/// Submit a new transfer into the pending pool (balance pre-check only).
#[post("/transactions")]
pub async fn post_transaction(
    state: web::Data<AppState>,
    body: web::Json<NewTxRequest>,
) -> Result<HttpResponse, LedgerError> {
    let t0 = Instant::now();
    let (from, to) = (body.from.trim(), body.to.trim());
    if from.is_empty() || to.is_empty() {
        warn!("POST /transactions - rejected: missing from/to");
        return Ok(bad_request("from and to are required"));
    }

    let transaction_id = state.ledger.submit_transaction(from, to, body.amount)?;

    info!(
        "POST /transactions - id={} OK ({} ms)",
        transaction_id,
        t0.elapsed().as_millis()
    );
    Ok(HttpResponse::Ok().json(
        ApiResponse::ok(NewTxResponse { transaction_id })
            .with_message("transaction added to the pool"),
    ))
}

/// List the pending pool, oldest first.
#[get("/transactions/pending")]
pub async fn get_pending(state: web::Data<AppState>) -> impl Responder {
    let pending = state.ledger.pending_transactions();
    let message = format!("{} pending transactions", pending.len());
    HttpResponse::Ok().json(ApiResponse::ok(pending).with_message(message))
}
