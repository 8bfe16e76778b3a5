use crate::domain::entities::stock::StockReference;
use crate::domain::error::DomainError;
use crate::domain::ports::market_data::MarketData;
use async_trait::async_trait;

/// In-memory market-data catalog.
///
/// Serves a fixed reference table of symbols; the default set is the NSE
/// large-caps the operator console trades. A live quote feed would slot in
/// behind the same port.
pub struct StaticCatalog {
    stocks: Vec<StockReference>,
}

impl StaticCatalog {
    pub fn new(stocks: Vec<StockReference>) -> Self {
        Self { stocks }
    }

    pub fn nse_default() -> Self {
        let stock = |symbol: &str, security_id: &str, name: &str, last_price: f64| StockReference {
            symbol: symbol.to_string(),
            name: name.to_string(),
            security_id: security_id.to_string(),
            exchange: "NSE".to_string(),
            last_price,
        };
        Self::new(vec![
            stock("RELIANCE", "2885", "Reliance Industries Ltd", 2950.50),
            stock("TCS", "11536", "Tata Consultancy Services Ltd", 4120.75),
            stock("HDFCBANK", "1333", "HDFC Bank Ltd", 1580.25),
            stock("INFY", "1594", "Infosys Ltd", 1805.60),
            stock("ICICIBANK", "4963", "ICICI Bank Ltd", 1245.80),
            stock("HINDUNILVR", "356", "Hindustan Unilever Ltd", 2380.90),
            stock("ITC", "424", "ITC Ltd", 465.35),
            stock("BHARTIARTL", "10604", "Bharti Airtel Ltd", 1520.40),
            stock("KOTAKBANK", "1922", "Kotak Mahindra Bank Ltd", 1890.65),
            stock("LT", "11483", "Larsen & Toubro Ltd", 3560.25),
        ])
    }
}

#[async_trait]
impl MarketData for StaticCatalog {
    async fn resolve(&self, symbol: &str) -> Result<Option<StockReference>, DomainError> {
        Ok(self
            .stocks
            .iter()
            .find(|s| s.symbol.eq_ignore_ascii_case(symbol))
            .cloned())
    }

    async fn search(&self, query: &str) -> Result<Vec<StockReference>, DomainError> {
        let q = query.to_lowercase();
        Ok(self
            .stocks
            .iter()
            .filter(|s| {
                s.symbol.to_lowercase().contains(&q) || s.name.to_lowercase().contains(&q)
            })
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn resolves_known_symbol_case_insensitively() {
        let catalog = StaticCatalog::nse_default();
        let stock = catalog.resolve("reliance").await.unwrap().unwrap();
        assert_eq!(stock.symbol, "RELIANCE");
        assert_eq!(stock.security_id, "2885");
        assert!((stock.last_price - 2950.50).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn unknown_symbol_resolves_to_none() {
        let catalog = StaticCatalog::nse_default();
        assert!(catalog.resolve("AAPL").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn search_matches_symbol_and_name() {
        let catalog = StaticCatalog::nse_default();
        let by_symbol = catalog.search("bank").await.unwrap();
        // HDFCBANK, ICICIBANK, KOTAKBANK by symbol; HDFC Bank etc. by name
        assert!(by_symbol.len() >= 3);

        let by_name = catalog.search("infosys").await.unwrap();
        assert_eq!(by_name.len(), 1);
        assert_eq!(by_name[0].symbol, "INFY");
    }
}
