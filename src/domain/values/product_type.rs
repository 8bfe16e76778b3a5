use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Brokerage product bucket. CNC is delivery, the default for subscriber
/// accounts; INTRADAY and MARGIN pass through to the broker unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ProductType {
    Cnc,
    Intraday,
    Margin,
}

impl Default for ProductType {
    fn default() -> Self {
        ProductType::Cnc
    }
}

impl fmt::Display for ProductType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProductType::Cnc => write!(f, "CNC"),
            ProductType::Intraday => write!(f, "INTRADAY"),
            ProductType::Margin => write!(f, "MARGIN"),
        }
    }
}

impl FromStr for ProductType {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "CNC" | "DELIVERY" => Ok(ProductType::Cnc),
            "INTRADAY" | "MIS" => Ok(ProductType::Intraday),
            "MARGIN" => Ok(ProductType::Margin),
            _ => Err(format!("Unknown product type: {s}")),
        }
    }
}
