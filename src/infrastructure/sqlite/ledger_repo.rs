use crate::domain::entities::execution_record::ExecutionRecord;
use crate::domain::error::DomainError;
use crate::domain::ports::execution_ledger::ExecutionLedger;
use chrono::DateTime;
use rusqlite::{params, Connection};
use std::sync::Mutex;

const RECORD_COLUMNS: &str = "id, batch_id, subscriber_id, subscriber_email, symbol, side, \
     order_type, product_type, requested_quantity, executed_quantity, reference_price, \
     outcome, failure_reason, broker_response, created_at";

pub struct SqliteExecutionLedger {
    conn: Mutex<Connection>,
}

impl SqliteExecutionLedger {
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    fn row_to_record(row: &rusqlite::Row) -> Result<ExecutionRecord, rusqlite::Error> {
        let side_str: String = row.get(5)?;
        let order_type_str: String = row.get(6)?;
        let product_str: String = row.get(7)?;
        let outcome_str: String = row.get(11)?;
        let response_str: Option<String> = row.get(13)?;
        let created_str: String = row.get(14)?;

        Ok(ExecutionRecord {
            id: row.get(0)?,
            batch_id: row.get(1)?,
            subscriber_id: row.get(2)?,
            subscriber_email: row.get(3)?,
            symbol: row.get(4)?,
            side: side_str
                .parse()
                .map_err(|_| rusqlite::Error::InvalidParameterName(side_str.clone()))?,
            order_type: order_type_str
                .parse()
                .map_err(|_| rusqlite::Error::InvalidParameterName(order_type_str.clone()))?,
            product_type: product_str
                .parse()
                .map_err(|_| rusqlite::Error::InvalidParameterName(product_str.clone()))?,
            requested_quantity: row.get(8)?,
            executed_quantity: row.get(9)?,
            reference_price: row.get(10)?,
            outcome: outcome_str
                .parse()
                .map_err(|_| rusqlite::Error::InvalidParameterName(outcome_str.clone()))?,
            failure_reason: row.get(12)?,
            broker_response: response_str.and_then(|s| serde_json::from_str(&s).ok()),
            created_at: DateTime::parse_from_rfc3339(&created_str)
                .map(|dt| dt.with_timezone(&chrono::Utc))
                .unwrap_or_else(|_| chrono::Utc::now()),
        })
    }
}

impl ExecutionLedger for SqliteExecutionLedger {
    fn append(&self, record: &ExecutionRecord) -> Result<(), DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        conn.execute(
            "INSERT INTO execution_records (id, batch_id, subscriber_id, subscriber_email, \
             symbol, side, order_type, product_type, requested_quantity, executed_quantity, \
             reference_price, outcome, failure_reason, broker_response, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15)",
            params![
                record.id,
                record.batch_id,
                record.subscriber_id,
                record.subscriber_email,
                record.symbol,
                record.side.to_string(),
                record.order_type.to_string(),
                record.product_type.to_string(),
                record.requested_quantity,
                record.executed_quantity,
                record.reference_price,
                record.outcome.to_string(),
                record.failure_reason,
                record
                    .broker_response
                    .as_ref()
                    .map(|v| v.to_string()),
                record.created_at.to_rfc3339(),
            ],
        )
        .map_err(|e| DomainError::Database(format!("Failed to append execution record: {e}")))?;
        Ok(())
    }

    fn by_batch(&self, batch_id: &str) -> Result<Vec<ExecutionRecord>, DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let sql = format!(
            "SELECT {RECORD_COLUMNS} FROM execution_records WHERE batch_id = ?1 ORDER BY rowid ASC"
        );
        let mut stmt = conn
            .prepare(&sql)
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let records = stmt
            .query_map(params![batch_id], Self::row_to_record)
            .map_err(|e| DomainError::Database(e.to_string()))?
            .filter_map(|r| r.ok())
            .collect();
        Ok(records)
    }

    fn by_subscriber(
        &self,
        subscriber_id: &str,
        limit: usize,
    ) -> Result<Vec<ExecutionRecord>, DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let sql = format!(
            "SELECT {RECORD_COLUMNS} FROM execution_records WHERE subscriber_id = ?1 \
             ORDER BY created_at DESC, rowid DESC LIMIT ?2"
        );
        let mut stmt = conn
            .prepare(&sql)
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let records = stmt
            .query_map(params![subscriber_id, limit as i64], Self::row_to_record)
            .map_err(|e| DomainError::Database(e.to_string()))?
            .filter_map(|r| r.ok())
            .collect();
        Ok(records)
    }

    fn recent(&self, limit: usize) -> Result<Vec<ExecutionRecord>, DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let sql = format!(
            "SELECT {RECORD_COLUMNS} FROM execution_records \
             ORDER BY created_at DESC, rowid DESC LIMIT ?1"
        );
        let mut stmt = conn
            .prepare(&sql)
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let records = stmt
            .query_map(params![limit as i64], Self::row_to_record)
            .map_err(|e| DomainError::Database(e.to_string()))?
            .filter_map(|r| r.ok())
            .collect();
        Ok(records)
    }
}
