use actix_web::{HttpResponse, Responder, get, post, web};

use super::error::bad_request;
use super::models::{
    ApiResponse, AppState, MineRequest, RegisterMinerRequest, RegisterMinerResponse,
};

#[post("/miners")]
pub async fn register_miner(
    state: web::Data<AppState>,
    body: web::Json<RegisterMinerRequest>,
) -> impl Responder {
    let name = body.name.trim();
    if name.is_empty() {
        return bad_request("miner name required");
    }
    let miner_address = state.ledger.register_miner(name);
    HttpResponse::Ok().json(
        ApiResponse::ok(RegisterMinerResponse { miner_address }).with_message("miner registered"),
    )
}

#[get("/miners")]
pub async fn list_miners(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(ApiResponse::ok(state.ledger.miners()))
}

#[get("/miners/{address}")]
pub async fn get_miner(state: web::Data<AppState>, path: web::Path<(String,)>) -> impl Responder {
    let address = path.into_inner().0;
    match state.ledger.miner(&address) {
        Some(miner) => HttpResponse::Ok().json(ApiResponse::ok(miner)),
        None => HttpResponse::NotFound().json(ApiResponse::failure(format!(
            "miner not found: {address}"
        ))),
    }
}

/// Mine a new block from the pending pool.
/// The proof-of-work search is CPU-bound, so it runs on actix's blocking pool.
#[post("/mining/mine")]
pub async fn mine_block(
    state: web::Data<AppState>,
    req: web::Json<MineRequest>,
) -> actix_web::Result<HttpResponse> {
    let miner_address = req.miner_address.trim().to_string();
    if miner_address.is_empty() {
        return Ok(bad_request("minerAddress required"));
    }

    let block = web::block(move || state.ledger.mine(&miner_address)).await??;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(block).with_message("block mined and appended")))
}
