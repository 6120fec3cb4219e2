//! Static tip catalogue.

use super::types::Advisory;

/// Tip codes in presentation order.
pub const TIP_CODES: [&str; 4] = [
    "track_expenses",
    "ajo_savings",
    "data_subscriptions",
    "plan_dependents",
];

/// Every static tip, in catalogue order.
pub fn catalogue() -> impl Iterator<Item = Advisory> + Clone {
    TIP_CODES.into_iter().map(Advisory::tip)
}
