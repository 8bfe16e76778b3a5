use crate::domain::entities::execution_record::ExecutionRecord;
use crate::domain::error::DomainError;

/// Append-only store of execution records. No update, no delete: each
/// record is an independent insert keyed by its own id, so concurrent
/// appends cannot race on shared rows.
pub trait ExecutionLedger: Send + Sync {
    fn append(&self, record: &ExecutionRecord) -> Result<(), DomainError>;

    /// All records of one batch, in append order.
    fn by_batch(&self, batch_id: &str) -> Result<Vec<ExecutionRecord>, DomainError>;

    /// One subscriber's records, most recent first.
    fn by_subscriber(
        &self,
        subscriber_id: &str,
        limit: usize,
    ) -> Result<Vec<ExecutionRecord>, DomainError>;

    /// Latest records across all batches, most recent first.
    fn recent(&self, limit: usize) -> Result<Vec<ExecutionRecord>, DomainError>;
}
