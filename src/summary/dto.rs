use rust_decimal::Decimal;
use serde::Serialize;

/// Per-user totals across all visible payments. `net` is positive when
/// the user is a net creditor of the household.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserBalance {
    pub id: i64,
    pub name: String,
    pub paid: Decimal,
    pub owed: Decimal,
    pub net: Decimal,
}
