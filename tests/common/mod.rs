//! Shared test helpers.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use stocksync::domain::error::DomainError;
use stocksync::domain::ports::broker_client::{
    BrokerClient, OrderRequest, OrderResult, OrderStatus,
};
use stocksync::domain::values::holding::Holding;
use stocksync::domain::values::subscription_status::SubscriptionStatus;
use stocksync::infrastructure::marketdata::catalog::StaticCatalog;
use stocksync::StockSync;

/// One scripted broker behavior, consumed per `place_order` call.
#[allow(dead_code)]
pub enum ScriptedCall {
    Fill,
    Reject(&'static str),
    Fault(&'static str),
}

/// Broker double driven by a fixed script. Calls beyond the script fill.
/// Every request is captured for inspection.
pub struct ScriptedBroker {
    script: Mutex<VecDeque<ScriptedCall>>,
    requests: Mutex<Vec<OrderRequest>>,
}

impl ScriptedBroker {
    pub fn new(script: Vec<ScriptedCall>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn always_fill() -> Self {
        Self::new(Vec::new())
    }

    #[allow(dead_code)]
    pub fn requests(&self) -> Vec<OrderRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl BrokerClient for ScriptedBroker {
    async fn place_order(&self, request: &OrderRequest) -> Result<OrderResult, DomainError> {
        self.requests.lock().unwrap().push(request.clone());
        let call = self.script.lock().unwrap().pop_front();
        let order_id = format!("SCRIPT-{}", self.requests.lock().unwrap().len());
        match call {
            None | Some(ScriptedCall::Fill) => Ok(OrderResult {
                order_id,
                status: OrderStatus::Executed,
                message: None,
            }),
            Some(ScriptedCall::Reject(reason)) => Ok(OrderResult {
                order_id,
                status: OrderStatus::Rejected,
                message: Some(reason.to_string()),
            }),
            Some(ScriptedCall::Fault(message)) => Err(DomainError::Broker(message.to_string())),
        }
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

#[allow(dead_code)]
pub fn setup_with_broker(broker: Arc<dyn BrokerClient>) -> StockSync {
    StockSync::with_providers(":memory:", broker, Arc::new(StaticCatalog::nse_default())).unwrap()
}

#[allow(dead_code)]
pub fn setup() -> StockSync {
    setup_with_broker(Arc::new(ScriptedBroker::always_fill()))
}

/// Add a subscriber and mark them active; returns the id.
#[allow(dead_code)]
pub fn add_active_subscriber(sync: &StockSync, email: &str, max_capital: f64) -> String {
    let name = email.split('@').next().unwrap_or("subscriber").to_string();
    let subscriber = sync
        .subscriber_add(email.to_string(), name, max_capital)
        .unwrap();
    sync.set_subscription(&subscriber.id, SubscriptionStatus::Active)
        .unwrap();
    subscriber.id
}

#[allow(dead_code)]
pub fn give_holding(sync: &StockSync, subscriber_id: &str, symbol: &str, quantity: i64) {
    sync.set_holding(subscriber_id, &Holding::new(symbol, quantity, 1000.0))
        .unwrap();
}
