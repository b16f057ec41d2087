//! High-score service entry point
//!
//! The game itself ships as a library driven by a platform shell; this
//! binary runs the operational scaffolding around it: the health check
//! and the in-memory high-score API.

use anyhow::Context;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let addr = std::env::var("CAR_RUSH_BIND").unwrap_or_else(|_| "127.0.0.1:8080".to_string());
    car_rush::server::run(&addr)
        .await
        .with_context(|| format!("high-score service failed on {addr}"))
}
