use crate::domain::error::DomainError;
use crate::domain::ports::broker_client::{BrokerClient, OrderRequest, OrderResult, OrderStatus};
use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Mutex;

/// Simulated brokerage with a configurable fill rate.
///
/// Stands in for a real broker's nondeterministic accept/reject behavior:
/// each order fills with probability `fill_rate`, otherwise it is rejected
/// as a liquidity failure. A rate of 1.0 (or 0.0) makes the double fully
/// deterministic; `with_seed` pins the draw sequence for reproducible runs.
pub struct PaperBroker {
    fill_rate: f64,
    rng: Mutex<StdRng>,
}

impl PaperBroker {
    pub fn new(fill_rate: f64) -> Self {
        Self {
            fill_rate: fill_rate.clamp(0.0, 1.0),
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    pub fn with_seed(fill_rate: f64, seed: u64) -> Self {
        Self {
            fill_rate: fill_rate.clamp(0.0, 1.0),
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl Default for PaperBroker {
    fn default() -> Self {
        // The reference simulation fills 9 orders in 10
        Self::new(0.9)
    }
}

#[async_trait]
impl BrokerClient for PaperBroker {
    async fn place_order(&self, request: &OrderRequest) -> Result<OrderResult, DomainError> {
        if request.quantity <= 0 {
            return Err(DomainError::Broker(format!(
                "Refusing order with quantity {}",
                request.quantity
            )));
        }

        let filled = {
            let mut rng = self
                .rng
                .lock()
                .map_err(|e| DomainError::Broker(e.to_string()))?;
            rng.gen::<f64>() < self.fill_rate
        };

        let order_id = format!("PAPER-{}", uuid::Uuid::new_v4().simple());
        if filled {
            Ok(OrderResult {
                order_id,
                status: OrderStatus::Executed,
                message: None,
            })
        } else {
            Ok(OrderResult {
                order_id,
                status: OrderStatus::Rejected,
                message: Some("Market execution failed - insufficient liquidity".to_string()),
            })
        }
    }

    fn name(&self) -> &str {
        "paper"
    }
}
