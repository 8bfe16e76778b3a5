use crate::domain::entities::subscriber::SubscriberProfile;
use crate::domain::error::DomainError;
use crate::domain::values::holding::Holding;
use crate::domain::values::subscription_status::SubscriptionStatus;

/// Subscriber directory port. Filtering by "active" is this collaborator's
/// responsibility; the orchestrator only ever asks for the active snapshot.
pub trait SubscriberDirectory: Send + Sync {
    fn add_subscriber(&self, subscriber: &SubscriberProfile) -> Result<(), DomainError>;
    fn get_subscriber(&self, id: &str) -> Result<Option<SubscriberProfile>, DomainError>;
    fn list_all(&self) -> Result<Vec<SubscriberProfile>, DomainError>;
    fn list_active(&self) -> Result<Vec<SubscriberProfile>, DomainError>;
    fn set_subscription_status(&self, id: &str, status: SubscriptionStatus)
        -> Result<(), DomainError>;
    fn set_max_capital(&self, id: &str, max_capital: f64) -> Result<(), DomainError>;

    fn get_holding(&self, subscriber_id: &str, symbol: &str)
        -> Result<Option<Holding>, DomainError>;
    fn list_holdings(&self, subscriber_id: &str) -> Result<Vec<Holding>, DomainError>;
    fn set_holding(&self, subscriber_id: &str, holding: &Holding) -> Result<(), DomainError>;
}
