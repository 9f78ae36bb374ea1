use resto_types::domain::status::StatusSet;
use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub server_port: String,
    /// Recognized status values for the Transition operation.
    pub statuses: StatusSet,
    /// Extension point: order deletion stays disabled unless opted into.
    pub allow_order_delete: bool,
    pub admin_username: String,
    pub admin_password: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let server_port = env::var("SERVER_PORT").unwrap_or_else(|_| "3000".into());
        let statuses = match env::var("ORDER_STATUSES") {
            Ok(csv) => StatusSet::from_csv(&csv)?,
            Err(_) => StatusSet::default(),
        };
        let allow_order_delete = env::var("ALLOW_ORDER_DELETE")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);
        let admin_username = env::var("ADMIN_USERNAME").unwrap_or_else(|_| "admin".into());
        let admin_password = env::var("ADMIN_PASSWORD").unwrap_or_else(|_| "admin".into());
        Ok(Self {
            server_port,
            statuses,
            allow_order_delete,
            admin_username,
            admin_password,
        })
    }
}
