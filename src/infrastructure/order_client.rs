use std::time::Duration;

use async_trait::async_trait;
use bigdecimal::BigDecimal;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use thiserror::Error;

use crate::domain::ports::{OrderVerification, OrderVerifier};

/// Order as published by the order service (`GET /pedidos/{id}`).
#[derive(Debug, Clone, Deserialize)]
pub struct ExternalOrder {
    pub id: i64,
    #[serde(rename = "clienteId", default)]
    pub customer_id: Option<i64>,
    #[serde(rename = "productos", default)]
    pub items: Vec<ExternalOrderItem>,
    pub total: BigDecimal,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExternalOrderItem {
    #[serde(rename = "nombre", default)]
    pub name: Option<String>,
    #[serde(rename = "precio", default)]
    pub price: Option<BigDecimal>,
}

#[derive(Debug, Error)]
pub enum OrderClientError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("unexpected status {0}")]
    UnexpectedStatus(StatusCode),
    #[error("malformed order body: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("asked for order {requested} but got order {returned}")]
    Mismatch { requested: i64, returned: i64 },
}

/// Client for the order service. Every call is a single attempt bounded by
/// the configured timeout.
#[derive(Clone)]
pub struct HttpOrderClient {
    client: Client,
    base_url: String,
}

impl HttpOrderClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// `Ok(None)` when the order service says the order does not exist.
    pub async fn fetch_order(&self, order_id: i64) -> Result<Option<ExternalOrder>, OrderClientError> {
        let url = format!("{}/pedidos/{}", self.base_url, order_id);
        log::debug!("Fetching order {} from {}", order_id, url);

        let resp = self.client.get(&url).send().await?;
        let status = resp.status();
        if status == StatusCode::NOT_FOUND || status == StatusCode::GONE {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(OrderClientError::UnexpectedStatus(status));
        }

        let body = resp.bytes().await?;
        let order: ExternalOrder = serde_json::from_slice(&body)?;
        if order.id != order_id {
            return Err(OrderClientError::Mismatch {
                requested: order_id,
                returned: order.id,
            });
        }
        Ok(Some(order))
    }
}

#[async_trait]
impl OrderVerifier for HttpOrderClient {
    async fn verify(&self, order_id: i64) -> OrderVerification {
        match self.fetch_order(order_id).await {
            Ok(Some(_)) => OrderVerification::Exists,
            Ok(None) => OrderVerification::NotFound,
            Err(e) => {
                log::warn!("Could not verify order {}: {}", order_id, e);
                OrderVerification::Unknown
            }
        }
    }
}
