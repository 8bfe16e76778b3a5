//! Batch orchestrator: fans one trade intent out across every active
//! subscriber, one execution record each, and aggregates the outcome.

use crate::application::attempt::attempt_order;
use crate::domain::entities::execution_record::ExecutionRecord;
use crate::domain::entities::stock::StockReference;
use crate::domain::entities::subscriber::SubscriberProfile;
use crate::domain::error::DomainError;
use crate::domain::ports::broker_client::BrokerClient;
use crate::domain::ports::execution_ledger::ExecutionLedger;
use crate::domain::ports::market_data::MarketData;
use crate::domain::ports::subscriber_directory::SubscriberDirectory;
use crate::domain::values::intent::TradeIntent;
use crate::domain::values::order_side::OrderSide;
use crate::domain::values::outcome::ExecutionOutcome;
use crate::domain::values::sizing::{size_order, SizingDecision};
use crate::domain::values::summary::BatchSummary;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn};

pub const DEFAULT_BROKER_TIMEOUT: Duration = Duration::from_secs(10);

pub struct ExecuteBatchUseCase {
    directory: Arc<dyn SubscriberDirectory>,
    market_data: Arc<dyn MarketData>,
    broker: Arc<dyn BrokerClient>,
    ledger: Arc<dyn ExecutionLedger>,
    broker_timeout: Duration,
}

impl ExecuteBatchUseCase {
    pub fn new(
        directory: Arc<dyn SubscriberDirectory>,
        market_data: Arc<dyn MarketData>,
        broker: Arc<dyn BrokerClient>,
        ledger: Arc<dyn ExecutionLedger>,
    ) -> Self {
        Self {
            directory,
            market_data,
            broker,
            ledger,
            broker_timeout: DEFAULT_BROKER_TIMEOUT,
        }
    }

    pub fn with_broker_timeout(mut self, timeout: Duration) -> Self {
        self.broker_timeout = timeout;
        self
    }

    /// Run one fan-out batch. Input errors reject the whole call before any
    /// record is written; once the loop starts, every subscriber in the
    /// snapshot produces exactly one record and nothing short of a ledger
    /// loss aborts the batch.
    pub async fn execute(&self, intent: TradeIntent) -> Result<BatchSummary, DomainError> {
        intent.validate()?;

        let stock = self
            .market_data
            .resolve(&intent.symbol)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("Stock not found: {}", intent.symbol)))?;
        if stock.last_price <= 0.0 {
            return Err(DomainError::InvalidInput(format!(
                "Reference price for {} is {}, refusing to size against it",
                stock.symbol, stock.last_price
            )));
        }

        let subscribers = self.directory.list_active()?;
        if subscribers.is_empty() {
            return Err(DomainError::InvalidInput(
                "No active subscribers found".into(),
            ));
        }

        let batch_id = uuid::Uuid::new_v4().to_string();
        info!(
            batch_id = %batch_id,
            symbol = %stock.symbol,
            side = %intent.side,
            requested = intent.quantity,
            subscribers = subscribers.len(),
            broker = self.broker.name(),
            "starting bulk execution"
        );

        let mut records = Vec::with_capacity(subscribers.len());
        for subscriber in &subscribers {
            let record = match self
                .process_subscriber(&batch_id, subscriber, &intent, &stock)
                .await
            {
                Ok(record) => record,
                // The subscriber boundary: any fault becomes that
                // subscriber's FAILED record and the loop moves on.
                Err(e) => {
                    warn!(
                        batch_id = %batch_id,
                        subscriber_id = %subscriber.id,
                        error = %e,
                        "subscriber processing fault"
                    );
                    self.failed_record(
                        &batch_id,
                        subscriber,
                        &intent,
                        &stock,
                        format!("System error: {e}"),
                    )
                }
            };
            self.append_with_retry(&record)?;
            records.push(record);
        }

        let summary = BatchSummary::from_records(batch_id, records);
        info!(
            batch_id = %summary.batch_id,
            total = summary.total_subscribers,
            succeeded = summary.success_count,
            failed = summary.failure_count,
            "bulk execution completed"
        );
        Ok(summary)
    }

    async fn process_subscriber(
        &self,
        batch_id: &str,
        subscriber: &SubscriberProfile,
        intent: &TradeIntent,
        stock: &StockReference,
    ) -> Result<ExecutionRecord, DomainError> {
        // Holdings are keyed by the canonical catalog symbol, not whatever
        // casing the operator typed.
        let held_quantity = match intent.side {
            OrderSide::Sell => self
                .directory
                .get_holding(&subscriber.id, &stock.symbol)?
                .map(|h| h.quantity)
                .unwrap_or(0),
            OrderSide::Buy => 0,
        };

        match size_order(
            intent.side,
            stock.last_price,
            intent.quantity,
            subscriber.max_capital,
            held_quantity,
        ) {
            SizingDecision::Ineligible { reason } => {
                Ok(self.failed_record(batch_id, subscriber, intent, stock, reason))
            }
            SizingDecision::Eligible { quantity } => {
                let attempt = attempt_order(
                    self.broker.as_ref(),
                    intent,
                    stock,
                    quantity,
                    self.broker_timeout,
                )
                .await;
                Ok(ExecutionRecord::new(
                    batch_id.to_string(),
                    subscriber.id.clone(),
                    subscriber.email.clone(),
                    stock.symbol.clone(),
                    intent.side,
                    intent.order_type,
                    intent.product_type,
                    intent.quantity,
                    attempt.executed_quantity,
                    stock.last_price,
                    attempt.outcome,
                    attempt.failure_reason,
                    attempt.broker_response,
                ))
            }
        }
    }

    fn failed_record(
        &self,
        batch_id: &str,
        subscriber: &SubscriberProfile,
        intent: &TradeIntent,
        stock: &StockReference,
        reason: String,
    ) -> ExecutionRecord {
        ExecutionRecord::new(
            batch_id.to_string(),
            subscriber.id.clone(),
            subscriber.email.clone(),
            stock.symbol.clone(),
            intent.side,
            intent.order_type,
            intent.product_type,
            intent.quantity,
            0,
            stock.last_price,
            ExecutionOutcome::Failed,
            Some(reason),
            None,
        )
    }

    /// A record the ledger cannot hold is a processed subscriber the batch
    /// cannot account for: retry once, then escalate. Never drop silently.
    fn append_with_retry(&self, record: &ExecutionRecord) -> Result<(), DomainError> {
        if let Err(first) = self.ledger.append(record) {
            error!(
                record_id = %record.id,
                subscriber_id = %record.subscriber_id,
                error = %first,
                "ledger append failed, retrying once"
            );
            self.ledger.append(record).map_err(|e| {
                DomainError::Database(format!(
                    "Ledger append failed after retry for record {}: {e}",
                    record.id
                ))
            })?;
        }
        Ok(())
    }
}
