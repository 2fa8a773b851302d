use actix_web::{HttpResponse, get, web};
use rust_decimal::Decimal;
use serde::Serialize;

use super::models::{ApiResponse, AppState};
use crate::error::LedgerError;

#[derive(Serialize)]
struct BalanceResponse {
    address: String,
    balance: Decimal,
}

#[get("/balance/{address}")]
pub async fn get_balance(
    state: web::Data<AppState>,
    path: web::Path<(String,)>,
) -> Result<HttpResponse, LedgerError> {
    let address = path.into_inner().0;
    let balance = state.ledger.balance(&address)?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(BalanceResponse { address, balance })))
}
