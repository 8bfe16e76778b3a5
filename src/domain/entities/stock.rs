use serde::{Deserialize, Serialize};

/// Market-data snapshot for one symbol: the external security identifier the
/// broker needs plus the last-known reference price sizing runs against.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockReference {
    pub symbol: String,
    pub name: String,
    pub security_id: String,
    pub exchange: String,
    pub last_price: f64,
}
