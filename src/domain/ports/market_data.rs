use crate::domain::entities::stock::StockReference;
use crate::domain::error::DomainError;
use async_trait::async_trait;

/// Market-data lookup port for resolving a symbol to its reference snapshot.
#[async_trait]
pub trait MarketData: Send + Sync {
    /// Resolve a symbol to its reference data. `Ok(None)` when unknown.
    async fn resolve(&self, symbol: &str) -> Result<Option<StockReference>, DomainError>;

    /// Case-insensitive substring search over symbol and company name.
    async fn search(&self, query: &str) -> Result<Vec<StockReference>, DomainError>;
}
