mod api;
mod blockchain;
mod config;
mod error;
mod ledger;
mod mining;
mod transaction;
mod wallet;

use actix_web::{App, HttpServer, web};
use dotenvy::dotenv;
use log::{info, warn};

use api::AppState;
use config::SystemConfig;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let _ = dotenv();
    env_logger::init();

    let (host, port) = config::bind_address();
    let system = SystemConfig::from_env();
    info!(
        "config: reward={} min_fee={} difficulty={} max_txs_per_block={}",
        system.block_reward, system.min_fee, system.difficulty, system.max_transactions_per_block
    );

    let state = web::Data::new(AppState::new(system));
    if config::seed_demo() {
        if let Err(e) = state.ledger.seed_demo() {
            warn!("demo data not created: {e}");
        }
    }

    println!("⛓️ Starting ledger API at http://{host}:{port}/api");

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .configure(api::init_routes)
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
