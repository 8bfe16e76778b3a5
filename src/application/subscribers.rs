use crate::domain::entities::subscriber::SubscriberProfile;
use crate::domain::error::DomainError;
use crate::domain::ports::subscriber_directory::SubscriberDirectory;
use crate::domain::values::holding::Holding;
use crate::domain::values::subscription_status::SubscriptionStatus;
use std::sync::Arc;

/// Subscriber administration: the directory mutations the operator console
/// needs. Registration/auth stays outside; this only manages the profile
/// fields the fan-out engine reads.
pub struct SubscriberUseCase {
    directory: Arc<dyn SubscriberDirectory>,
}

impl SubscriberUseCase {
    pub fn new(directory: Arc<dyn SubscriberDirectory>) -> Self {
        Self { directory }
    }

    pub fn add(
        &self,
        email: String,
        name: String,
        max_capital: f64,
    ) -> Result<SubscriberProfile, DomainError> {
        if email.trim().is_empty() {
            return Err(DomainError::InvalidInput("Email is required".into()));
        }
        if max_capital < 0.0 {
            return Err(DomainError::InvalidInput(format!(
                "Max capital must be non-negative, got {max_capital}"
            )));
        }
        let subscriber = SubscriberProfile::new(email, name, max_capital);
        self.directory.add_subscriber(&subscriber)?;
        Ok(subscriber)
    }

    pub fn get(&self, id: &str) -> Result<SubscriberProfile, DomainError> {
        self.directory
            .get_subscriber(id)?
            .ok_or_else(|| DomainError::NotFound(format!("Subscriber not found: {id}")))
    }

    pub fn list(&self) -> Result<Vec<SubscriberProfile>, DomainError> {
        self.directory.list_all()
    }

    pub fn set_subscription_status(
        &self,
        id: &str,
        status: SubscriptionStatus,
    ) -> Result<(), DomainError> {
        self.directory.set_subscription_status(id, status)
    }

    pub fn set_max_capital(&self, id: &str, max_capital: f64) -> Result<(), DomainError> {
        if max_capital < 0.0 {
            return Err(DomainError::InvalidInput(format!(
                "Max capital must be non-negative, got {max_capital}"
            )));
        }
        self.directory.set_max_capital(id, max_capital)
    }

    pub fn portfolio(&self, subscriber_id: &str) -> Result<Vec<Holding>, DomainError> {
        self.directory.list_holdings(subscriber_id)
    }

    pub fn set_holding(
        &self,
        subscriber_id: &str,
        holding: &Holding,
    ) -> Result<(), DomainError> {
        if holding.quantity < 0 {
            return Err(DomainError::InvalidInput(format!(
                "Holding quantity must be non-negative, got {}",
                holding.quantity
            )));
        }
        self.directory.set_holding(subscriber_id, holding)
    }
}
