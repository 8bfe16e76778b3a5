use crate::domain::entities::execution_record::ExecutionRecord;
use crate::domain::error::DomainError;
use crate::domain::ports::execution_ledger::ExecutionLedger;
use std::sync::Arc;

pub struct HistoryUseCase {
    ledger: Arc<dyn ExecutionLedger>,
}

impl HistoryUseCase {
    pub fn new(ledger: Arc<dyn ExecutionLedger>) -> Self {
        Self { ledger }
    }

    pub fn recent(&self, limit: usize) -> Result<Vec<ExecutionRecord>, DomainError> {
        self.ledger.recent(limit)
    }

    pub fn by_batch(&self, batch_id: &str) -> Result<Vec<ExecutionRecord>, DomainError> {
        self.ledger.by_batch(batch_id)
    }

    pub fn by_subscriber(
        &self,
        subscriber_id: &str,
        limit: usize,
    ) -> Result<Vec<ExecutionRecord>, DomainError> {
        self.ledger.by_subscriber(subscriber_id, limit)
    }
}
