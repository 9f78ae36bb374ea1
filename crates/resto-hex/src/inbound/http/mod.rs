mod auth;
mod server;

pub use auth::Sessions;
pub use server::{
    AppState, CreateOrderRequest, CreateOrderResponse, HttpServer, HttpServerConfig,
    LoginRequest, LoginResponse, SignupRequest, UpdateOrderRequest, UpdateStatusRequest,
};
