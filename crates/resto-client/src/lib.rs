use std::time::Duration;

use anyhow::Context;
use reqwest::Url;
use resto_types::domain::order::{Order, OrderId, OrderItem};
use serde::{Deserialize, Serialize};

#[derive(Clone)]
pub struct RestoClientBuilder {
    base: Url,
    timeout: Option<Duration>,
    client: Option<reqwest::Client>,
}

/// Typed client for the ordering API. `login` stores the session token; all
/// order calls send it as a bearer header.
#[derive(Clone)]
pub struct RestoClient {
    base: Url,
    client: reqwest::Client,
    token: Option<String>,
}

impl RestoClient {
    pub fn new(base_url: &str) -> anyhow::Result<Self> {
        Self::builder(base_url)?.build()
    }

    pub fn builder(base_url: &str) -> anyhow::Result<RestoClientBuilder> {
        let base = Url::parse(base_url).context("invalid base url")?;
        Ok(RestoClientBuilder {
            base,
            timeout: None,
            client: None,
        })
    }

    fn url(&self, path: &str) -> anyhow::Result<Url> {
        self.base.join(path).context("failed to join url")
    }

    fn authed(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }

    pub async fn signup(&self, req: SignupRequest) -> anyhow::Result<()> {
        self.client
            .post(self.url("signup")?)
            .json(&req)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    pub async fn login(&mut self, username: &str, password: &str) -> anyhow::Result<()> {
        let res = self
            .client
            .post(self.url("login")?)
            .json(&LoginRequest {
                username: username.into(),
                password: password.into(),
            })
            .send()
            .await?
            .error_for_status()?;
        let body: LoginResponse = res.json().await?;
        self.token = Some(body.token);
        Ok(())
    }

    pub async fn logout(&mut self) -> anyhow::Result<()> {
        self.authed(self.client.post(self.url("logout")?))
            .send()
            .await?
            .error_for_status()?;
        self.token = None;
        Ok(())
    }

    pub async fn create_order(
        &self,
        req: CreateOrderRequest,
    ) -> anyhow::Result<CreateOrderResponse> {
        let res = self
            .authed(self.client.post(self.url("orders")?))
            .json(&req)
            .send()
            .await?
            .error_for_status()?;
        Ok(res.json().await?)
    }

    pub async fn get_order(&self, id: OrderId) -> anyhow::Result<Order> {
        let res = self
            .authed(self.client.get(self.url(&format!("orders/{id}"))?))
            .send()
            .await?
            .error_for_status()?;
        Ok(res.json().await?)
    }

    pub async fn list_orders(&self) -> anyhow::Result<Vec<Order>> {
        let res = self
            .authed(self.client.get(self.url("orders")?))
            .send()
            .await?
            .error_for_status()?;
        Ok(res.json().await?)
    }

    pub async fn update_order(
        &self,
        id: OrderId,
        req: UpdateOrderRequest,
    ) -> anyhow::Result<Order> {
        let res = self
            .authed(self.client.put(self.url(&format!("orders/{id}"))?))
            .json(&req)
            .send()
            .await?
            .error_for_status()?;
        Ok(res.json().await?)
    }

    pub async fn update_status(&self, id: OrderId, status: &str) -> anyhow::Result<Order> {
        let res = self
            .authed(
                self.client
                    .patch(self.url(&format!("orders/{id}/status"))?),
            )
            .json(&UpdateStatusRequest {
                status: status.into(),
            })
            .send()
            .await?
            .error_for_status()?;
        Ok(res.json().await?)
    }

    pub async fn delete_order(&self, id: OrderId) -> anyhow::Result<()> {
        self.authed(self.client.delete(self.url(&format!("orders/{id}"))?))
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}

impl RestoClientBuilder {
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_reqwest_client(mut self, client: reqwest::Client) -> Self {
        self.client = Some(client);
        self
    }

    pub fn build(self) -> anyhow::Result<RestoClient> {
        if let Some(client) = self.client {
            return Ok(RestoClient {
                base: self.base,
                client,
                token: None,
            });
        }

        let mut builder = reqwest::Client::builder();
        if let Some(t) = self.timeout {
            builder = builder.timeout(t);
        }
        let client = builder.build()?;
        Ok(RestoClient {
            base: self.base,
            client,
            token: None,
        })
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
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

#[derive(Serialize, Deserialize, Debug, Clone)]
struct LoginRequest {
    username: String,
    password: String,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
struct LoginResponse {
    token: String,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct CreateOrderRequest {
    pub payment_method: String,
    pub items: Vec<OrderItem>,
    #[serde(default)]
    pub delivery_address: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct UpdateOrderRequest {
    #[serde(default)]
    pub payment_method: Option<String>,
    #[serde(default)]
    pub items: Option<Vec<OrderItem>>,
    #[serde(default)]
    pub delivery_address: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct CreateOrderResponse {
    pub id: OrderId,
    pub status: String,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
struct UpdateStatusRequest {
    status: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    fn sample_order() -> Order {
        Order {
            id: 1,
            payment_method: "cash".into(),
            status: "Pending".into(),
            items: vec![OrderItem {
                product: "empanada".into(),
                qty: 6,
            }],
            delivery_address: "10 Rose St".into(),
            created_at: chrono::Utc::now(),
            owner_username: "alice".into(),
        }
    }

    async fn logged_in(server: &MockServer) -> RestoClient {
        let login_mock = server.mock(|when, then| {
            when.method(POST).path("/login");
            then.status(200)
                .json_body(serde_json::json!({ "token": "tok-123" }));
        });
        let mut client = RestoClient::new(&server.base_url()).unwrap();
        client.login("alice", "secret").await.unwrap();
        login_mock.assert();
        client
    }

    #[tokio::test]
    async fn login_then_create_and_get_send_bearer_token() {
        let server = MockServer::start();
        let order = sample_order();

        let create_mock = server.mock(|when, then| {
            when.method(POST)
                .path("/orders")
                .header("authorization", "Bearer tok-123")
                .json_body_obj(&CreateOrderRequest {
                    payment_method: order.payment_method.clone(),
                    items: order.items.clone(),
                    delivery_address: None,
                });
            then.status(201).json_body_obj(&CreateOrderResponse {
                id: order.id,
                status: "Pending".into(),
            });
        });

        let get_mock = server.mock(|when, then| {
            when.method(GET)
                .path(format!("/orders/{}", order.id))
                .header("authorization", "Bearer tok-123");
            then.status(200).json_body_obj(&order);
        });

        let client = logged_in(&server).await;
        let created = client
            .create_order(CreateOrderRequest {
                payment_method: order.payment_method.clone(),
                items: order.items.clone(),
                delivery_address: None,
            })
            .await
            .unwrap();
        assert_eq!(created.id, order.id);
        assert_eq!(created.status, "Pending");

        let fetched = client.get_order(order.id).await.unwrap();
        assert_eq!(fetched.owner_username, "alice");

        create_mock.assert();
        get_mock.assert();
    }

    #[tokio::test]
    async fn list_update_transition_delete() {
        let server = MockServer::start();
        let order = sample_order();

        let list_mock = server.mock(|when, then| {
            when.method(GET).path("/orders");
            then.status(200).json_body_obj(&vec![order.clone()]);
        });

        let update_mock = server.mock(|when, then| {
            when.method(httpmock::Method::PUT)
                .path(format!("/orders/{}", order.id));
            let mut updated = order.clone();
            updated.payment_method = "card".into();
            then.status(200).json_body_obj(&updated);
        });

        let transition_mock = server.mock(|when, then| {
            when.method(httpmock::Method::PATCH)
                .path(format!("/orders/{}/status", order.id))
                .json_body_obj(&UpdateStatusRequest {
                    status: "Delivered".into(),
                });
            let mut delivered = order.clone();
            delivered.status = "Delivered".into();
            then.status(200).json_body_obj(&delivered);
        });

        let delete_mock = server.mock(|when, then| {
            when.method(DELETE).path(format!("/orders/{}", order.id));
            then.status(204);
        });

        let client = logged_in(&server).await;
        let listed = client.list_orders().await.unwrap();
        assert_eq!(listed.len(), 1);

        let updated = client
            .update_order(
                order.id,
                UpdateOrderRequest {
                    payment_method: Some("card".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.payment_method, "card");

        let delivered = client.update_status(order.id, "Delivered").await.unwrap();
        assert_eq!(delivered.status, "Delivered");

        client.delete_order(order.id).await.unwrap();

        list_mock.assert();
        update_mock.assert();
        transition_mock.assert();
        delete_mock.assert();
    }

    #[tokio::test]
    async fn unauthenticated_calls_surface_http_errors() {
        let server = MockServer::start();
        let denied = server.mock(|when, then| {
            when.method(GET).path("/orders");
            then.status(401)
                .json_body(serde_json::json!({ "error": "Not logged in" }));
        });

        let client = RestoClient::new(&server.base_url()).unwrap();
        let res = client.list_orders().await;
        assert!(res.is_err());
        denied.assert();
    }
}
