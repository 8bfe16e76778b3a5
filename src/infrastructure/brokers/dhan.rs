use crate::domain::error::DomainError;
use crate::domain::ports::broker_client::{BrokerClient, OrderRequest, OrderResult, OrderStatus};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

const DEFAULT_BASE_URL: &str = "https://api.dhan.co/v2";

/// Dhan order-placement client (v2 REST API).
pub struct DhanClient {
    client: reqwest::Client,
    base_url: String,
    client_id: String,
    access_token: String,
}

impl DhanClient {
    pub fn new(client_id: String, access_token: String) -> Self {
        Self::with_base_url(client_id, access_token, DEFAULT_BASE_URL.to_string())
    }

    pub fn with_base_url(client_id: String, access_token: String, base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
            client_id,
            access_token,
        }
    }
}

/// Map a catalog exchange identifier onto Dhan's equity segment codes.
fn map_exchange_segment(exchange: &str) -> &'static str {
    match exchange {
        "BSE" => "BSE_EQ",
        _ => "NSE_EQ",
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DhanOrderBody {
    dhan_client_id: String,
    correlation_id: String,
    transaction_type: String,
    exchange_segment: String,
    product_type: String,
    order_type: String,
    validity: String,
    security_id: String,
    quantity: String,
    disclosed_quantity: String,
    price: String,
    trigger_price: String,
    after_market_order: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DhanOrderResponse {
    order_id: String,
    order_status: String,
}

#[derive(Debug, Deserialize)]
struct DhanErrorResponse {
    #[serde(alias = "errorMessage")]
    message: Option<String>,
}

#[async_trait]
impl BrokerClient for DhanClient {
    async fn place_order(&self, request: &OrderRequest) -> Result<OrderResult, DomainError> {
        let body = DhanOrderBody {
            dhan_client_id: self.client_id.clone(),
            correlation_id: format!("STKSYNC_{}", uuid::Uuid::new_v4().simple()),
            transaction_type: request.side.to_string(),
            exchange_segment: map_exchange_segment(&request.exchange_segment).to_string(),
            product_type: request.product_type.to_string(),
            order_type: request.order_type.to_string(),
            validity: "DAY".to_string(),
            security_id: request.security_id.clone(),
            quantity: request.quantity.to_string(),
            disclosed_quantity: String::new(),
            price: request.price.to_string(),
            trigger_price: String::new(),
            after_market_order: false,
        };

        let resp = self
            .client
            .post(format!("{}/orders", self.base_url))
            .header("access-token", &self.access_token)
            .json(&body)
            .send()
            .await
            .map_err(|e| DomainError::Broker(e.to_string()))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let message = resp
                .json::<DhanErrorResponse>()
                .await
                .ok()
                .and_then(|e| e.message)
                .unwrap_or_else(|| format!("Order placement failed: {status}"));
            return Err(DomainError::Broker(message));
        }

        let data: DhanOrderResponse = resp
            .json()
            .await
            .map_err(|e| DomainError::Broker(format!("Malformed order response: {e}")))?;

        // Terminal failure statuses map to a rejection; anything the
        // exchange has accepted or may still fill counts as executed.
        let status = match data.order_status.as_str() {
            "REJECTED" | "CANCELLED" | "EXPIRED" => OrderStatus::Rejected,
            _ => OrderStatus::Executed,
        };
        let message = match status {
            OrderStatus::Rejected => Some(format!("Order {}: {}", data.order_id, data.order_status)),
            OrderStatus::Executed => None,
        };

        Ok(OrderResult {
            order_id: data.order_id,
            status,
            message,
        })
    }

    fn name(&self) -> &str {
        "dhan"
    }
}
