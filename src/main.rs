//! Portfolio Config API - binary entry point.
//! Delegates to the library for all app logic.

#[tokio::main]
async fn main() {
    portfolio_config_api::run().await;
}
