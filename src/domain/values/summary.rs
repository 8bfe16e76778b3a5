use crate::domain::entities::execution_record::ExecutionRecord;
use serde::Serialize;

/// Aggregate result of one fan-out batch. Derived from the records and not
/// itself persisted; the durable state is the records sharing the batch id.
#[derive(Debug, Serialize)]
pub struct BatchSummary {
    pub batch_id: String,
    pub total_subscribers: usize,
    pub success_count: usize,
    pub failure_count: usize,
    /// Records in processing order, one per subscriber.
    pub records: Vec<ExecutionRecord>,
}

impl BatchSummary {
    pub fn from_records(batch_id: String, records: Vec<ExecutionRecord>) -> Self {
        let success_count = records.iter().filter(|r| r.is_success()).count();
        Self {
            batch_id,
            total_subscribers: records.len(),
            success_count,
            failure_count: records.len() - success_count,
            records,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::values::order_side::OrderSide;
    use crate::domain::values::outcome::ExecutionOutcome;

    fn record(outcome: ExecutionOutcome) -> ExecutionRecord {
        ExecutionRecord::new(
            "batch-1".into(),
            "sub-1".into(),
            "sub@example.com".into(),
            "RELIANCE".into(),
            OrderSide::Buy,
            crate::domain::values::order_type::OrderType::Market,
            crate::domain::values::product_type::ProductType::Cnc,
            10,
            if outcome == ExecutionOutcome::Success { 8 } else { 0 },
            2950.50,
            outcome,
            None,
            None,
        )
    }

    #[test]
    fn counts_always_sum_to_total() {
        let summary = BatchSummary::from_records(
            "batch-1".into(),
            vec![
                record(ExecutionOutcome::Success),
                record(ExecutionOutcome::Failed),
                record(ExecutionOutcome::Success),
            ],
        );
        assert_eq!(summary.total_subscribers, 3);
        assert_eq!(summary.success_count, 2);
        assert_eq!(summary.failure_count, 1);
        assert_eq!(summary.success_count + summary.failure_count, summary.total_subscribers);
    }

    #[test]
    fn empty_record_set_counts_zero() {
        let summary = BatchSummary::from_records("batch-1".into(), vec![]);
        assert_eq!(summary.total_subscribers, 0);
        assert_eq!(summary.success_count, 0);
        assert_eq!(summary.failure_count, 0);
    }
}
