mod balance;
mod chain;
mod error;
mod health;
mod mining;
pub mod models;
mod tx;
mod wallet;

use actix_web::web::{self, ServiceConfig};

pub use models::AppState;

pub fn init_routes(cfg: &mut ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .service(health::health_check)
            .service(wallet::create_user)
            .service(wallet::list_users)
            .service(wallet::get_user)
            .service(wallet::allocate_tokens)
            .service(balance::get_balance)
            .service(tx::post_transaction)
            .service(tx::get_pending)
            .service(mining::register_miner)
            .service(mining::list_miners)
            .service(mining::get_miner)
            .service(mining::mine_block)
            .service(chain::get_info)
            .service(chain::get_chain)
            .service(chain::get_block)
            .service(chain::validate_chain),
    );
}

#[cfg(test)]
mod tests {
    use super::{AppState, init_routes};
    use crate::config::SystemConfig;
    use actix_web::http::StatusCode;
    use actix_web::{App, test, web};
    use serde_json::{Value, json};

    fn state() -> web::Data<AppState> {
        web::Data::new(AppState::new(SystemConfig {
            difficulty: 1,
            ..SystemConfig::default()
        }))
    }

    macro_rules! app {
        ($state:expr) => {
            test::init_service(App::new().app_data($state.clone()).configure(init_routes)).await
        };
    }

    #[actix_web::test]
    async fn health_is_ok() {
        let st = state();
        let app = app!(st);
        let req = test::TestRequest::get().uri("/api/health").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["success"], true);
        assert!(body["data"]["timestamp"].is_string());
    }

    #[actix_web::test]
    async fn create_user_with_and_without_name() {
        let st = state();
        let app = app!(st);

        let req = test::TestRequest::post()
            .uri("/api/users")
            .set_json(json!({ "name": "Alice" }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["name"], "Alice");
        assert_eq!(body["data"]["address"].as_str().unwrap().len(), 40);
        assert!(body["data"]["privateKey"].is_string());

        let req = test::TestRequest::post().uri("/api/users").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert!(body["data"]["name"].as_str().unwrap().starts_with("User_"));

        let req = test::TestRequest::get().uri("/api/users").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"].as_array().unwrap().len(), 2);
    }

    #[actix_web::test]
    async fn malformed_user_body_is_bad_request() {
        let st = state();
        let app = app!(st);

        let req = test::TestRequest::post()
            .uri("/api/users")
            .set_json(json!({ "name": 5 }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let req = test::TestRequest::post()
            .uri("/api/users")
            .insert_header(("content-type", "application/json"))
            .set_payload("{not json")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert!(st.ledger.accounts().is_empty());

        let req = test::TestRequest::post()
            .uri("/api/users")
            .set_json(json!({}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(st.ledger.accounts().len(), 1);
    }

    #[actix_web::test]
    async fn full_flow_over_http() {
        let st = state();
        let app = app!(st);

        let alice = st.ledger.create_account(Some("Alice")).address;
        let bob = st.ledger.create_account(Some("Bob")).address;

        let req = test::TestRequest::post()
            .uri("/api/tokens/allocate")
            .set_json(json!({ "userAddress": alice, "amount": 100 }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let req = test::TestRequest::post()
            .uri("/api/transactions")
            .set_json(json!({ "from": alice, "to": bob, "amount": 10 }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        let tx_id = body["data"]["transactionId"].as_str().unwrap().to_string();

        let req = test::TestRequest::get()
            .uri("/api/transactions/pending")
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"][0]["id"], tx_id.as_str());
        assert_eq!(body["data"][0]["status"], "pending");

        let req = test::TestRequest::post()
            .uri("/api/miners")
            .set_json(json!({ "name": "Alpha" }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        let miner = body["data"]["minerAddress"].as_str().unwrap().to_string();

        let req = test::TestRequest::post()
            .uri("/api/mining/mine")
            .set_json(json!({ "minerAddress": miner }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["index"], 1);
        assert_eq!(body["data"]["transactions"][0]["id"], tx_id.as_str());
        assert_eq!(body["data"]["transactions"][0]["status"], "confirmed");
        assert!(body["data"]["hash"].as_str().unwrap().starts_with('0'));

        let req = test::TestRequest::get()
            .uri("/api/blockchain/blocks/1")
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["miner"], miner.as_str());

        let req = test::TestRequest::get()
            .uri(&format!("/api/users/{alice}"))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["transactions"][0]["id"], tx_id.as_str());

        let req = test::TestRequest::get()
            .uri(&format!("/api/balance/{bob}"))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["balance"], "10");

        let req = test::TestRequest::get()
            .uri(&format!("/api/miners/{miner}"))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["blocksMinedCount"], 1);
        assert_eq!(body["data"]["totalRewards"], "10.1");

        let req = test::TestRequest::get()
            .uri("/api/blockchain/validate")
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["valid"], true);
        assert_eq!(body["data"]["length"], 2);

        let req = test::TestRequest::get().uri("/api/blockchain/info").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["blockHeight"], 2);
        assert_eq!(body["data"]["pendingTransactionCount"], 0);
        assert_eq!(body["data"]["totalMiners"], 1);
        assert_eq!(body["data"]["config"]["maxTransactionsPerBlock"], 10);
    }

    #[actix_web::test]
    async fn mining_an_empty_pool_is_rejected() {
        let st = state();
        let app = app!(st);
        let miner = st.ledger.register_miner("Alpha");

        let req = test::TestRequest::post()
            .uri("/api/mining/mine")
            .set_json(json!({ "minerAddress": miner }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["success"], false);
        assert!(body["error"].as_str().unwrap().contains("empty"));
        assert_eq!(st.ledger.chain().len(), 1);
    }

    #[actix_web::test]
    async fn rejected_transaction_is_bad_request() {
        let st = state();
        let app = app!(st);
        let a = st.ledger.create_account(None).address;
        let b = st.ledger.create_account(None).address;

        let req = test::TestRequest::post()
            .uri("/api/transactions")
            .set_json(json!({ "from": a, "to": b, "amount": 5 }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert!(st.ledger.pending_transactions().is_empty());
    }

    #[actix_web::test]
    async fn not_found_paths() {
        let st = state();
        let app = app!(st);

        for uri in [
            "/api/blockchain/blocks/99",
            "/api/blockchain/blocks/abc",
            "/api/users/nobody",
            "/api/balance/nobody",
            "/api/miners/nobody",
        ] {
            let req = test::TestRequest::get().uri(uri).to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::NOT_FOUND, "{uri}");
        }

        let req = test::TestRequest::post()
            .uri("/api/tokens/allocate")
            .set_json(json!({ "userAddress": "nobody", "amount": 1 }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn chain_reads_are_idempotent() {
        let st = state();
        let app = app!(st);
        let get = || test::TestRequest::get().uri("/api/blockchain/blocks").to_request();
        let first: Value = test::call_and_read_body_json(&app, get()).await;
        let second: Value = test::call_and_read_body_json(&app, get()).await;
        assert_eq!(first, second);
        assert_eq!(first["data"][0]["previousHash"], "0");
    }
}
