use crate::domain::values::subscription_status::SubscriptionStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A subscriber account as seen by the fan-out engine: a capital ceiling and
/// a contact identifier. The orchestrator reads a snapshot and never writes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubscriberProfile {
    pub id: String,
    pub email: String,
    pub name: String,
    pub status: SubscriptionStatus,
    pub max_capital: f64,
    pub created_at: DateTime<Utc>,
}

impl SubscriberProfile {
    pub fn new(email: String, name: String, max_capital: f64) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            email,
            name,
            status: SubscriptionStatus::Inactive,
            max_capital,
            created_at: Utc::now(),
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == SubscriptionStatus::Active
    }
}
