use std::sync::Arc;

use resto_hex::application::order_service::OrderService;
use resto_hex::config::Config;
use resto_hex::inbound::http::{HttpServer, HttpServerConfig, Sessions};
use resto_hex::ports::directory::UserProfile;
use resto_repo::build_repo;
use resto_repo::catalog::OpenCatalog;
use resto_repo::users::InMemoryUsers;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env for SERVER_PORT / ORDER_STATUSES / admin seed when present.
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(std::env::var("RUST_LOG").unwrap_or_else(|_| "debug".to_string()))
        .init();

    let config = Config::from_env()?;

    let users = Arc::new(InMemoryUsers::with_profiles([UserProfile {
        username: config.admin_username.clone(),
        password: config.admin_password.clone(),
        full_name: "Administrator".into(),
        email: String::new(),
        address: String::new(),
        phone: String::new(),
        is_admin: true,
    }]));

    let repo = build_repo().await?;
    let service = OrderService::new(
        repo,
        users.clone(),
        Arc::new(OpenCatalog),
        config.statuses.clone(),
    )
    .with_order_deletion(config.allow_order_delete);
    let sessions = Sessions::new(users);

    let server_cfg = HttpServerConfig {
        port: config.server_port.clone(),
    };

    let http = HttpServer::new(service, sessions, server_cfg).await?;
    http.run().await
}
