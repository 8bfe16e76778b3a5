use crate::domain::error::DomainError;
use crate::domain::values::order_side::OrderSide;
use crate::domain::values::order_type::OrderType;
use crate::domain::values::product_type::ProductType;
use serde::{Deserialize, Serialize};

/// The operator's single trade instruction, immutable for the whole batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TradeIntent {
    pub symbol: String,
    pub side: OrderSide,
    pub order_type: OrderType,
    pub quantity: i64,
    /// Required for LIMIT orders, absent otherwise.
    pub limit_price: Option<f64>,
    pub product_type: ProductType,
}

impl TradeIntent {
    pub fn market(symbol: impl Into<String>, side: OrderSide, quantity: i64) -> Self {
        Self {
            symbol: symbol.into(),
            side,
            order_type: OrderType::Market,
            quantity,
            limit_price: None,
            product_type: ProductType::default(),
        }
    }

    pub fn limit(
        symbol: impl Into<String>,
        side: OrderSide,
        quantity: i64,
        limit_price: f64,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            side,
            order_type: OrderType::Limit,
            quantity,
            limit_price: Some(limit_price),
            product_type: ProductType::default(),
        }
    }

    pub fn with_product(mut self, product_type: ProductType) -> Self {
        self.product_type = product_type;
        self
    }

    /// Reject malformed intents before any batch work starts.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.symbol.trim().is_empty() {
            return Err(DomainError::InvalidInput("Symbol is required".into()));
        }
        if self.quantity < 1 {
            return Err(DomainError::InvalidInput(format!(
                "Requested quantity must be at least 1, got {}",
                self.quantity
            )));
        }
        match (self.order_type, self.limit_price) {
            (OrderType::Limit, None) => Err(DomainError::InvalidInput(
                "Limit orders require a limit price".into(),
            )),
            (OrderType::Limit, Some(p)) if p <= 0.0 => Err(DomainError::InvalidInput(format!(
                "Limit price must be positive, got {p}"
            ))),
            (OrderType::Market, Some(_)) => Err(DomainError::InvalidInput(
                "Market orders must not carry a limit price".into(),
            )),
            _ => Ok(()),
        }
    }
}
