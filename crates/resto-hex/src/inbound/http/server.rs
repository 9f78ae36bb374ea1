use axum::{
    extract::{Path, State},
    http::HeaderMap,
    routing::{delete, get, patch, post, put},
    serve, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use super::auth::Sessions;
use crate::application::order_service::{CreateOrder, OrderService, UpdateOrder};
use crate::errors::AppError;
use resto_types::domain::order::{Order, OrderId, OrderItem};
use resto_types::ports::directory::UserProfile;
use resto_types::ports::order_repository::OrderRepository;

#[derive(Clone)]
pub struct HttpServerConfig {
    pub port: String,
}

pub struct AppState<R: OrderRepository> {
    pub service: OrderService<R>,
    pub sessions: Sessions,
}

#[derive(Clone)]
pub struct HttpServer<R: OrderRepository> {
    state: Arc<AppState<R>>,
    config: HttpServerConfig,
}

#[derive(Serialize, Deserialize)]
pub struct SignupRequest {
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub phone: String,
}

#[derive(Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
}

#[derive(Serialize, Deserialize)]
pub struct CreateOrderRequest {
    pub payment_method: String,
    pub items: Vec<OrderItem>,
    #[serde(default)]
    pub delivery_address: Option<String>,
}

#[derive(Serialize, Deserialize)]
pub struct UpdateOrderRequest {
    #[serde(default)]
    pub payment_method: Option<String>,
    #[serde(default)]
    pub items: Option<Vec<OrderItem>>,
    #[serde(default)]
    pub delivery_address: Option<String>,
}

#[derive(Serialize, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: String,
}

#[derive(Serialize, Deserialize)]
pub struct CreateOrderResponse {
    pub id: OrderId,
    pub status: String,
}

impl From<Order> for CreateOrderResponse {
    fn from(o: Order) -> Self {
        Self {
            id: o.id,
            status: o.status,
        }
    }
}

impl<R> HttpServer<R>
where
    R: OrderRepository + Send + Sync + 'static,
{
    pub async fn new(
        service: OrderService<R>,
        sessions: Sessions,
        config: HttpServerConfig,
    ) -> anyhow::Result<Self> {
        Ok(Self {
            state: Arc::new(AppState { service, sessions }),
            config,
        })
    }

    pub async fn run(self) -> anyhow::Result<()> {
        let trace_layer = TraceLayer::new_for_http()
            .make_span_with(|request: &axum::extract::Request<_>| {
                let uri = request.uri().to_string();
                let request_id = Uuid::new_v4();
                tracing::info_span!(
                    "http_request",
                    %request_id,
                    method = %request.method(),
                    uri
                )
            })
            .on_request(
                |request: &axum::extract::Request<_>, span: &tracing::Span| {
                    tracing::info!(
                        parent: span,
                        method = %request.method(),
                        uri = %request.uri(),
                        "request"
                    );
                },
            )
            .on_response(
                |response: &axum::response::Response, latency: Duration, span: &tracing::Span| {
                    tracing::info!(
                        parent: span,
                        status = %response.status(),
                        latency_ms = %latency.as_millis(),
                        "response"
                    );
                },
            );

        let state = self.state.clone();
        let app = Router::new()
            .route("/health", get(health))
            .route("/signup", post(signup::<R>))
            .route("/login", post(login::<R>))
            .route("/logout", post(logout::<R>))
            .route("/orders", post(create_order::<R>))
            .route("/orders", get(list_orders::<R>))
            .route("/orders/{id}", get(get_order::<R>))
            .route("/orders/{id}", put(update_order::<R>))
            .route("/orders/{id}/status", patch(update_status::<R>))
            .route("/orders/{id}", delete(delete_order::<R>))
            .layer(trace_layer)
            .with_state(state);

        let addr: SocketAddr = format!("0.0.0.0:{}", self.config.port).parse()?;
        tracing::info!("starting server on {}", addr);
        let listener = tokio::net::TcpListener::bind(addr).await?;
        serve(listener, app.into_make_service()).await?;
        Ok(())
    }
}

async fn health() -> (axum::http::StatusCode, Json<serde_json::Value>) {
    (
        axum::http::StatusCode::OK,
        Json(serde_json::json!({ "status": "ok" })),
    )
}

async fn signup<R>(
    State(state): State<Arc<AppState<R>>>,
    Json(payload): Json<SignupRequest>,
) -> Result<(axum::http::StatusCode, Json<serde_json::Value>), AppError>
where
    R: OrderRepository + Send + Sync + 'static,
{
    state
        .sessions
        .signup(UserProfile {
            username: payload.username,
            password: payload.password,
            full_name: payload.full_name,
            email: payload.email,
            address: payload.address,
            phone: payload.phone,
            is_admin: false,
        })
        .await?;
    Ok((
        axum::http::StatusCode::CREATED,
        Json(serde_json::json!({ "message": "user created" })),
    ))
}

async fn login<R>(
    State(state): State<Arc<AppState<R>>>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError>
where
    R: OrderRepository + Send + Sync + 'static,
{
    let token = state
        .sessions
        .login(&payload.username, &payload.password)
        .await?;
    Ok(Json(LoginResponse { token }))
}

async fn logout<R>(
    State(state): State<Arc<AppState<R>>>,
    headers: HeaderMap,
) -> Result<(axum::http::StatusCode, Json<serde_json::Value>), AppError>
where
    R: OrderRepository + Send + Sync + 'static,
{
    state.sessions.logout(&headers)?;
    Ok((
        axum::http::StatusCode::OK,
        Json(serde_json::json!({ "message": "logged out" })),
    ))
}

async fn create_order<R>(
    State(state): State<Arc<AppState<R>>>,
    headers: HeaderMap,
    Json(payload): Json<CreateOrderRequest>,
) -> Result<(axum::http::StatusCode, Json<CreateOrderResponse>), AppError>
where
    R: OrderRepository + Send + Sync + 'static,
{
    let principal = state.sessions.authenticate(&headers)?;
    let order = state
        .service
        .create_order(
            &principal,
            CreateOrder {
                payment_method: payload.payment_method,
                items: payload.items,
                delivery_address: payload.delivery_address,
            },
        )
        .await?;
    Ok((axum::http::StatusCode::CREATED, Json(order.into())))
}

async fn list_orders<R>(
    State(state): State<Arc<AppState<R>>>,
    headers: HeaderMap,
) -> Result<Json<Vec<Order>>, AppError>
where
    R: OrderRepository + Send + Sync + 'static,
{
    let principal = state.sessions.authenticate(&headers)?;
    let list = state.service.list_orders(&principal).await?;
    Ok(Json(list))
}

async fn get_order<R>(
    State(state): State<Arc<AppState<R>>>,
    headers: HeaderMap,
    Path(id): Path<OrderId>,
) -> Result<Json<Order>, AppError>
where
    R: OrderRepository + Send + Sync + 'static,
{
    let principal = state.sessions.authenticate(&headers)?;
    let order = state.service.get_order(&principal, id).await?;
    Ok(Json(order))
}

async fn update_order<R>(
    State(state): State<Arc<AppState<R>>>,
    headers: HeaderMap,
    Path(id): Path<OrderId>,
    Json(payload): Json<UpdateOrderRequest>,
) -> Result<Json<Order>, AppError>
where
    R: OrderRepository + Send + Sync + 'static,
{
    let principal = state.sessions.authenticate(&headers)?;
    let updated = state
        .service
        .update_order(
            &principal,
            id,
            UpdateOrder {
                payment_method: payload.payment_method,
                items: payload.items,
                delivery_address: payload.delivery_address,
            },
        )
        .await?;
    Ok(Json(updated))
}

async fn update_status<R>(
    State(state): State<Arc<AppState<R>>>,
    headers: HeaderMap,
    Path(id): Path<OrderId>,
    Json(payload): Json<UpdateStatusRequest>,
) -> Result<Json<Order>, AppError>
where
    R: OrderRepository + Send + Sync + 'static,
{
    let principal = state.sessions.authenticate(&headers)?;
    let updated = state
        .service
        .transition_order(&principal, id, payload.status)
        .await?;
    Ok(Json(updated))
}

async fn delete_order<R>(
    State(state): State<Arc<AppState<R>>>,
    headers: HeaderMap,
    Path(id): Path<OrderId>,
) -> Result<(axum::http::StatusCode, Json<serde_json::Value>), AppError>
where
    R: OrderRepository + Send + Sync + 'static,
{
    let principal = state.sessions.authenticate(&headers)?;
    state.service.delete_order(&principal, id).await?;
    Ok((
        axum::http::StatusCode::NO_CONTENT,
        Json(serde_json::json!({})),
    ))
}
