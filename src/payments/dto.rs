use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::split::SplitMode;

#[derive(Debug, Deserialize)]
pub struct CreatePaymentRequest {
    pub date: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    pub amount: Option<Decimal>,
    pub payer_id: Option<i64>,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub split_by: SplitMode,
    #[serde(default, rename = "splitUsers")]
    pub split_users: Vec<i64>,
    #[serde(default, rename = "splitRooms")]
    pub split_rooms: Vec<i64>,
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub archived: u8,
}

#[derive(Debug, Serialize)]
pub struct PaymentListItem {
    pub id: i64,
    pub date: String,
    pub category: String,
    pub amount: Decimal,
    pub payer_id: i64,
    pub note: String,
    pub payer_name: String,
}

/// One share row joined to its recipient, carrying the recipient's
/// CURRENT room, not the room the money was computed against.
#[derive(Debug, Clone, Serialize)]
pub struct SplitUser {
    pub id: i64,
    pub name: String,
    pub amount: Decimal,
    pub room_id: Option<i64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RoomSplitUser {
    pub id: i64,
    pub name: String,
    pub amount: Decimal,
}

#[derive(Debug, Serialize)]
pub struct RoomSplit {
    pub room_id: i64,
    pub room_name: String,
    pub users: Vec<RoomSplitUser>,
}

#[derive(Debug, Serialize)]
pub struct PaymentWithUsers {
    pub id: i64,
    pub date: String,
    pub category: String,
    pub amount: Decimal,
    pub note: String,
    pub payer_id: i64,
    pub split_by: SplitMode,
    pub payer_name: String,
    pub split_users: Vec<SplitUser>,
    /// Present only for room-split payments; `None` for per-user splits.
    pub split_per_room: Option<Vec<RoomSplit>>,
}
