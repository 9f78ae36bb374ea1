use std::env;
use std::sync::Arc;

use resto_hex::application::order_service::OrderService;
use resto_hex::config::Config;
use resto_repo::catalog::OpenCatalog;
use resto_repo::users::InMemoryUsers;
use resto_types::domain::principal::Principal;

// Builds the whole stack from env config, the way main does.
#[tokio::test]
async fn builds_service_from_env() {
    env::set_var("ORDER_STATUSES", "Pending,Ready,PickedUp");
    env::set_var("ALLOW_ORDER_DELETE", "true");
    env::set_var("ADMIN_USERNAME", "boss");

    let config = Config::from_env().expect("config");
    assert!(config.statuses.contains("Ready"));
    assert!(!config.statuses.contains("Delivered"));
    assert!(config.allow_order_delete);
    assert_eq!(config.admin_username, "boss");

    let repo = resto_repo::build_repo().await.expect("build repo");
    let service = OrderService::new(
        repo,
        Arc::new(InMemoryUsers::new()),
        Arc::new(OpenCatalog),
        config.statuses.clone(),
    )
    .with_order_deletion(config.allow_order_delete);

    // basic sanity: list should succeed and be empty
    let list = service.list_orders(&Principal::admin("boss")).await.expect("list");
    assert!(list.is_empty());
}
