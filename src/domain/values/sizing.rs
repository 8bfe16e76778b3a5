//! Per-subscriber position sizing.
//!
//! Pure function of the subscriber's risk inputs: no I/O, no hidden state.
//! Identical inputs always produce the identical decision.

use crate::domain::values::order_side::OrderSide;

/// Fraction of a subscriber's capital ceiling one BUY order may deploy.
/// Bounds the exposure from any single signal no matter how many batches run.
pub const PER_ORDER_CAPITAL_FRACTION: f64 = 0.25;

/// Outcome of sizing one subscriber for one trade intent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SizingDecision {
    Eligible { quantity: i64 },
    Ineligible { reason: String },
}

/// Compute the executable quantity for one subscriber.
///
/// - BUY: capped by `floor(max_capital * 0.25 / reference_price)` and by the
///   requested quantity. An affordable quantity of zero makes the subscriber
///   ineligible.
/// - SELL: capped by the held quantity (no short selling). Holding nothing
///   makes the subscriber ineligible; holding less than requested silently
///   clamps to what is held.
///
/// The caller must have verified `reference_price > 0`; a non-positive
/// price is a data-integrity failure, not a sizing decision.
pub fn size_order(
    side: OrderSide,
    reference_price: f64,
    requested_quantity: i64,
    max_capital: f64,
    held_quantity: i64,
) -> SizingDecision {
    match side {
        OrderSide::Buy => {
            let capital_slice = max_capital * PER_ORDER_CAPITAL_FRACTION;
            let affordable = (capital_slice / reference_price).floor() as i64;
            let quantity = requested_quantity.min(affordable);
            if quantity <= 0 {
                SizingDecision::Ineligible {
                    reason: "Insufficient funds - cannot afford even 1 share".to_string(),
                }
            } else {
                SizingDecision::Eligible { quantity }
            }
        }
        OrderSide::Sell => {
            if held_quantity <= 0 {
                SizingDecision::Ineligible {
                    reason: "Stock not available in portfolio".to_string(),
                }
            } else {
                SizingDecision::Eligible {
                    quantity: requested_quantity.min(held_quantity),
                }
            }
        }
    }
}
