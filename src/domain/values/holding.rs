use serde::{Deserialize, Serialize};

/// A subscriber's position in one symbol, as reported by the holdings lookup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Holding {
    pub symbol: String,
    pub quantity: i64,
    pub avg_price: f64,
}

impl Holding {
    pub fn new(symbol: impl Into<String>, quantity: i64, avg_price: f64) -> Self {
        Self {
            symbol: symbol.into(),
            quantity,
            avg_price,
        }
    }

    /// Holding value at the given reference price.
    pub fn value_at(&self, price: f64) -> f64 {
        self.quantity as f64 * price
    }
}
