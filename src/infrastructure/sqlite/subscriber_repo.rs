use crate::domain::entities::subscriber::SubscriberProfile;
use crate::domain::error::DomainError;
use crate::domain::ports::subscriber_directory::SubscriberDirectory;
use crate::domain::values::holding::Holding;
use crate::domain::values::subscription_status::SubscriptionStatus;
use chrono::DateTime;
use rusqlite::{params, Connection};
use std::sync::Mutex;

pub struct SqliteSubscriberDirectory {
    conn: Mutex<Connection>,
}

impl SqliteSubscriberDirectory {
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    fn row_to_subscriber(row: &rusqlite::Row) -> Result<SubscriberProfile, rusqlite::Error> {
        let status_str: String = row.get(3)?;
        let created_str: String = row.get(5)?;

        Ok(SubscriberProfile {
            id: row.get(0)?,
            email: row.get(1)?,
            name: row.get(2)?,
            status: status_str
                .parse()
                .unwrap_or(SubscriptionStatus::Inactive),
            max_capital: row.get(4)?,
            created_at: DateTime::parse_from_rfc3339(&created_str)
                .map(|dt| dt.with_timezone(&chrono::Utc))
                .unwrap_or_else(|_| chrono::Utc::now()),
        })
    }

    fn list_where(&self, where_clause: &str) -> Result<Vec<SubscriberProfile>, DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let sql = format!(
            "SELECT id, email, name, status, max_capital, created_at FROM subscribers \
             {where_clause} ORDER BY rowid ASC"
        );
        let mut stmt = conn
            .prepare(&sql)
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let subscribers = stmt
            .query_map([], Self::row_to_subscriber)
            .map_err(|e| DomainError::Database(e.to_string()))?
            .filter_map(|r| r.ok())
            .collect();
        Ok(subscribers)
    }

    fn update_field(&self, sql: &str, params: &[&dyn rusqlite::types::ToSql], id: &str)
        -> Result<(), DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let rows = conn
            .execute(sql, params)
            .map_err(|e| DomainError::Database(format!("Failed to update subscriber: {e}")))?;
        if rows == 0 {
            return Err(DomainError::NotFound(format!("Subscriber not found: {id}")));
        }
        Ok(())
    }
}

impl SubscriberDirectory for SqliteSubscriberDirectory {
    fn add_subscriber(&self, subscriber: &SubscriberProfile) -> Result<(), DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        conn.execute(
            "INSERT INTO subscribers (id, email, name, status, max_capital, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                subscriber.id,
                subscriber.email,
                subscriber.name,
                subscriber.status.to_string(),
                subscriber.max_capital,
                subscriber.created_at.to_rfc3339(),
            ],
        )
        .map_err(|e| DomainError::Database(format!("Failed to add subscriber: {e}")))?;
        Ok(())
    }

    fn get_subscriber(&self, id: &str) -> Result<Option<SubscriberProfile>, DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let mut stmt = conn
            .prepare(
                "SELECT id, email, name, status, max_capital, created_at FROM subscribers \
                 WHERE id = ?1",
            )
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let mut rows = stmt
            .query_map(params![id], Self::row_to_subscriber)
            .map_err(|e| DomainError::Database(e.to_string()))?;
        Ok(rows.next().and_then(|r| r.ok()))
    }

    fn list_all(&self) -> Result<Vec<SubscriberProfile>, DomainError> {
        self.list_where("")
    }

    fn list_active(&self) -> Result<Vec<SubscriberProfile>, DomainError> {
        self.list_where("WHERE status = 'active'")
    }

    fn set_subscription_status(
        &self,
        id: &str,
        status: SubscriptionStatus,
    ) -> Result<(), DomainError> {
        self.update_field(
            "UPDATE subscribers SET status = ?1 WHERE id = ?2",
            &[&status.to_string(), &id],
            id,
        )
    }

    fn set_max_capital(&self, id: &str, max_capital: f64) -> Result<(), DomainError> {
        self.update_field(
            "UPDATE subscribers SET max_capital = ?1 WHERE id = ?2",
            &[&max_capital, &id],
            id,
        )
    }

    fn get_holding(
        &self,
        subscriber_id: &str,
        symbol: &str,
    ) -> Result<Option<Holding>, DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let mut stmt = conn
            .prepare(
                "SELECT symbol, quantity, avg_price FROM holdings \
                 WHERE subscriber_id = ?1 AND symbol = ?2",
            )
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let mut rows = stmt
            .query_map(params![subscriber_id, symbol], |row| {
                Ok(Holding {
                    symbol: row.get(0)?,
                    quantity: row.get(1)?,
                    avg_price: row.get(2)?,
                })
            })
            .map_err(|e| DomainError::Database(e.to_string()))?;
        Ok(rows.next().and_then(|r| r.ok()))
    }

    fn list_holdings(&self, subscriber_id: &str) -> Result<Vec<Holding>, DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let mut stmt = conn
            .prepare(
                "SELECT symbol, quantity, avg_price FROM holdings \
                 WHERE subscriber_id = ?1 ORDER BY symbol ASC",
            )
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let holdings = stmt
            .query_map(params![subscriber_id], |row| {
                Ok(Holding {
                    symbol: row.get(0)?,
                    quantity: row.get(1)?,
                    avg_price: row.get(2)?,
                })
            })
            .map_err(|e| DomainError::Database(e.to_string()))?
            .filter_map(|r| r.ok())
            .collect();
        Ok(holdings)
    }

    fn set_holding(&self, subscriber_id: &str, holding: &Holding) -> Result<(), DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        conn.execute(
            "INSERT INTO holdings (subscriber_id, symbol, quantity, avg_price)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT (subscriber_id, symbol)
             DO UPDATE SET quantity = excluded.quantity, avg_price = excluded.avg_price",
            params![
                subscriber_id,
                holding.symbol,
                holding.quantity,
                holding.avg_price,
            ],
        )
        .map_err(|e| DomainError::Database(format!("Failed to set holding: {e}")))?;
        Ok(())
    }
}
