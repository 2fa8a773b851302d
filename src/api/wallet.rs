use actix_web::{HttpResponse, Responder, get, post, web};
use log::debug;

use super::error::bad_request;
use super::models::{
    AllocateRequest, ApiResponse, AppState, CreateUserRequest, UserDetailResponse,
};
use crate::error::LedgerError;

/// Create a wallet. The body is optional: `{}` or no body at all gives a
/// generated name; a body that is not a valid request is a 400.
#[post("/users")]
pub async fn create_user(state: web::Data<AppState>, body: web::Bytes) -> HttpResponse {
    let req = if body.iter().all(u8::is_ascii_whitespace) {
        CreateUserRequest::default()
    } else {
        match serde_json::from_slice::<CreateUserRequest>(&body) {
            Ok(req) => req,
            Err(e) => {
                debug!("POST /users - bad body: {e}");
                return bad_request("invalid user request body");
            }
        }
    };
    let user = state.ledger.create_account(req.name.as_deref());
    HttpResponse::Ok().json(ApiResponse::ok(user).with_message("user created"))
}

#[get("/users")]
pub async fn list_users(state: web::Data<AppState>) -> impl Responder {
    let users = state.ledger.accounts();
    let message = format!("{} users found", users.len());
    HttpResponse::Ok().json(ApiResponse::ok(users).with_message(message))
}

/// One account plus its confirmed transaction history (newest first).
#[get("/users/{address}")]
pub async fn get_user(
    state: web::Data<AppState>,
    path: web::Path<(String,)>,
) -> Result<HttpResponse, LedgerError> {
    let address = path.into_inner().0;
    let user = state.ledger.account(&address)?;
    let transactions = state.ledger.transaction_history(&address);
    Ok(HttpResponse::Ok().json(ApiResponse::ok(UserDetailResponse { user, transactions })))
}

/// Administrative mint (dev): credit tokens to an existing account.
#[post("/tokens/allocate")]
pub async fn allocate_tokens(
    state: web::Data<AppState>,
    body: web::Json<AllocateRequest>,
) -> Result<HttpResponse, LedgerError> {
    let address = body.user_address.trim();
    if address.is_empty() {
        return Ok(bad_request("userAddress required"));
    }
    let balance = state.ledger.allocate(address, body.amount)?;
    debug!("POST /tokens/allocate - {} now holds {}", address, balance);
    Ok(HttpResponse::Ok().json(ApiResponse::message(format!(
        "allocated {} tokens",
        body.amount
    ))))
}
