///  To run :
///  cargo r --example client_example
use std::sync::Arc;

use resto_client::{CreateOrderRequest, RestoClient, SignupRequest, UpdateOrderRequest};
use resto_hex::application::order_service::OrderService;
use resto_hex::inbound::http::{HttpServer, HttpServerConfig, Sessions};
use resto_hex::ports::directory::UserProfile;
use resto_repo::catalog::OpenCatalog;
use resto_repo::users::InMemoryUsers;
use resto_types::domain::order::OrderItem;
use resto_types::domain::status::StatusSet;

fn find_free_port() -> u16 {
    std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port()
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Start server on an ephemeral port with in-memory adapters and a seeded
    // admin account.
    let port = find_free_port();
    let addr = format!("http://127.0.0.1:{port}/");

    let users = Arc::new(InMemoryUsers::with_profiles([UserProfile {
        username: "admin".into(),
        password: "admin".into(),
        full_name: "Administrator".into(),
        email: String::new(),
        address: String::new(),
        phone: String::new(),
        is_admin: true,
    }]));
    let repo = resto_repo::build_repo().await?;
    let service = OrderService::new(
        repo,
        users.clone(),
        Arc::new(OpenCatalog),
        StatusSet::default(),
    );
    let sessions = Sessions::new(users);
    let server = HttpServer::new(
        service,
        sessions,
        HttpServerConfig {
            port: port.to_string(),
        },
    )
    .await?;

    let handle = tokio::spawn(async move {
        server.run().await.expect("server run");
    });
    tokio::time::sleep(std::time::Duration::from_millis(50)).await;

    // A fresh diner signs up, logs in, and orders without giving an address.
    let mut diner = RestoClient::new(&addr)?;
    diner
        .signup(SignupRequest {
            username: "alice".into(),
            password: "wonder".into(),
            full_name: "Alice".into(),
            email: "alice@example.com".into(),
            address: "10 Rose St".into(),
            phone: "555-0100".into(),
        })
        .await?;
    diner.login("alice", "wonder").await?;

    let created = diner
        .create_order(CreateOrderRequest {
            payment_method: "cash".into(),
            items: vec![OrderItem {
                product: "empanada".into(),
                qty: 12,
            }],
            delivery_address: None,
        })
        .await?;
    println!("Created order id={} status={}", created.id, created.status);

    let fetched = diner.get_order(created.id).await?;
    println!("Delivery address defaults to: {}", fetched.delivery_address);

    let edited = diner
        .update_order(
            created.id,
            UpdateOrderRequest {
                payment_method: Some("card".into()),
                ..Default::default()
            },
        )
        .await?;
    println!("Edited while pending: pays by {}", edited.payment_method);

    // Only the admin can move the order along.
    let mut staff = RestoClient::new(&addr)?;
    staff.login("admin", "admin").await?;
    let delivered = staff.update_status(created.id, "Delivered").await?;
    println!("Admin transitioned to {}", delivered.status);

    // The editable window is closed now; this is expected to fail.
    let late = diner
        .update_order(
            created.id,
            UpdateOrderRequest {
                payment_method: Some("cash".into()),
                ..Default::default()
            },
        )
        .await;
    println!("Late edit rejected: {}", late.is_err());

    handle.abort();
    Ok(())
}
