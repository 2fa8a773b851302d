use actix_web::{HttpResponse, Responder, get, web};

use super::models::{ApiResponse, AppState, ValidateResponse};
use crate::error::LedgerError;

/// Height, pool size, population and the active config.
#[get("/blockchain/info")]
pub async fn get_info(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(ApiResponse::ok(state.ledger.info()))
}

/// Get the full blockchain.
#[get("/blockchain/blocks")]
pub async fn get_chain(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(ApiResponse::ok(state.ledger.chain()))
}

/// Get one block by index. Anything that is not a valid index is a 404.
#[get("/blockchain/blocks/{index}")]
pub async fn get_block(
    state: web::Data<AppState>,
    path: web::Path<(String,)>,
) -> Result<HttpResponse, LedgerError> {
    let raw = path.into_inner().0;
    let index: u64 = match raw.parse() {
        Ok(i) => i,
        Err(_) => {
            return Ok(HttpResponse::NotFound()
                .json(ApiResponse::failure(format!("block not found: {raw}"))));
        }
    };
    let block = state.ledger.block(index)?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(block)))
}

/// Validate the whole chain.
#[get("/blockchain/validate")]
pub async fn validate_chain(state: web::Data<AppState>) -> impl Responder {
    let resp = ValidateResponse {
        valid: state.ledger.validate_chain(),
        length: state.ledger.chain().len(),
        difficulty: state.ledger.config().difficulty,
    };
    HttpResponse::Ok().json(ApiResponse::ok(resp))
}
