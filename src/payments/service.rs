use std::collections::HashMap;

use rust_decimal::Decimal;
use sqlx::SqlitePool;
use tracing::warn;

use crate::error::ApiError;
use crate::money::parse_stored_amount;
use crate::rooms;

use super::dto::{
    CreatePaymentRequest, PaymentListItem, PaymentWithUsers, RoomSplit, RoomSplitUser, SplitUser,
};
use super::repo::{self, NewPayment, PaymentDetailRow};
use super::split::{self, RoomOccupants, SplitMode};

/// Validates the request, computes the split and persists payment plus
/// shares as one atomic unit. Room occupancy is resolved live, here.
pub async fn create_payment(
    db: &SqlitePool,
    req: CreatePaymentRequest,
) -> Result<i64, ApiError> {
    let date = req.date.as_deref().map(str::trim).unwrap_or_default();
    if date.is_empty() {
        return Err(ApiError::validation("date is required"));
    }
    let amount = req
        .amount
        .ok_or_else(|| ApiError::validation("amount is required"))?;
    if amount <= Decimal::ZERO {
        return Err(ApiError::validation("amount must be positive"));
    }
    let payer_id = req
        .payer_id
        .ok_or_else(|| ApiError::validation("payer_id is required"))?;

    let (shares, room_list) = match req.split_by {
        SplitMode::User => {
            if req.split_users.is_empty() {
                return Err(ApiError::validation(
                    "splitUsers must not be empty when splitting by user",
                ));
            }
            (split::split_by_user(amount, &req.split_users), None)
        }
        SplitMode::Room => {
            if req.split_rooms.is_empty() {
                return Err(ApiError::validation(
                    "splitRooms must not be empty when splitting by room",
                ));
            }
            let occupancy = resolve_occupants(db, &req.split_rooms).await?;
            (
                split::split_by_room(amount, &occupancy),
                Some(req.split_rooms),
            )
        }
    };

    let payment_id = repo::insert_with_shares(
        db,
        NewPayment {
            date,
            category: req.category.as_deref().unwrap_or_default(),
            amount,
            payer_id,
            note: req.note.as_deref().unwrap_or_default(),
            split_by: req.split_by,
            room_list: room_list.as_deref(),
        },
        &shares,
    )
    .await?;
    Ok(payment_id)
}

async fn resolve_occupants(
    db: &SqlitePool,
    room_ids: &[i64],
) -> Result<Vec<RoomOccupants>, ApiError> {
    let mut occupancy = Vec::with_capacity(room_ids.len());
    for &room_id in room_ids {
        let occupant_ids = rooms::repo::occupant_ids(db, room_id).await?;
        occupancy.push(RoomOccupants {
            room_id,
            occupant_ids,
        });
    }
    Ok(occupancy)
}

pub async fn list_payments(db: &SqlitePool) -> Result<Vec<PaymentListItem>, ApiError> {
    let rows = repo::list_active(db).await?;
    rows.into_iter()
        .map(|r| {
            Ok(PaymentListItem {
                id: r.id,
                date: r.date,
                category: r.category,
                amount: parse_stored_amount(&r.amount)?,
                payer_id: r.payer_id,
                note: r.note,
                payer_name: r.payer_name,
            })
        })
        .collect()
}

/// Payments filtered by archive flag, each enriched with its flat share
/// list and, for room splits, the room-grouped view.
pub async fn list_with_split_detail(
    db: &SqlitePool,
    archived: bool,
) -> Result<Vec<PaymentWithUsers>, ApiError> {
    let payments = repo::list_with_payer(db, archived).await?;
    let shares = repo::active_shares_with_users(db).await?;
    let room_names: HashMap<i64, String> =
        rooms::repo::names(db).await?.into_iter().collect();

    let mut by_payment: HashMap<i64, Vec<SplitUser>> = HashMap::new();
    for row in shares {
        let split_user = SplitUser {
            id: row.user_id,
            name: row.user_name,
            amount: parse_stored_amount(&row.amount)?,
            room_id: row.room_id,
        };
        by_payment.entry(row.payment_id).or_default().push(split_user);
    }

    payments
        .into_iter()
        .map(|row| {
            let split_users = by_payment.remove(&row.id).unwrap_or_default();
            build_detail(row, split_users, &room_names)
        })
        .collect()
}

fn build_detail(
    row: PaymentDetailRow,
    split_users: Vec<SplitUser>,
    room_names: &HashMap<i64, String>,
) -> Result<PaymentWithUsers, ApiError> {
    let split_by = SplitMode::parse(&row.split_by);
    let split_per_room = match split_by {
        SplitMode::User => None,
        SplitMode::Room => Some(group_by_room(
            &parse_room_list(row.rooms.as_deref()),
            &split_users,
            room_names,
        )),
    };

    Ok(PaymentWithUsers {
        id: row.id,
        date: row.date,
        category: row.category,
        amount: parse_stored_amount(&row.amount)?,
        note: row.note,
        payer_id: row.payer_id,
        split_by,
        payer_name: row.payer_name,
        split_users,
        split_per_room,
    })
}

/// The stored list is JSON text; anything unreadable degrades to an
/// empty list so one bad row cannot take down the whole listing.
fn parse_room_list(raw: Option<&str>) -> Vec<i64> {
    let Some(raw) = raw else {
        return Vec::new();
    };
    match serde_json::from_str(raw) {
        Ok(ids) => ids,
        Err(error) => {
            warn!(%error, "stored room list is not valid JSON, treating as empty");
            Vec::new()
        }
    }
}

/// Groups shares under the rooms the payment was split across, matching
/// on each recipient's current room. A user who moved since the split
/// shows up under the new room; the persisted amounts are untouched.
fn group_by_room(
    room_ids: &[i64],
    split_users: &[SplitUser],
    room_names: &HashMap<i64, String>,
) -> Vec<RoomSplit> {
    room_ids
        .iter()
        .map(|&room_id| RoomSplit {
            room_id,
            room_name: room_names
                .get(&room_id)
                .cloned()
                .unwrap_or_else(|| "unknown room".to_string()),
            users: split_users
                .iter()
                .filter(|u| u.room_id == Some(room_id))
                .map(|u| RoomSplitUser {
                    id: u.id,
                    name: u.name.clone(),
                    amount: u.amount,
                })
                .collect(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().expect("decimal literal")
    }

    fn share(id: i64, room_id: Option<i64>, amount: &str) -> SplitUser {
        SplitUser {
            id,
            name: format!("user-{id}"),
            amount: dec(amount),
            room_id,
        }
    }

    #[test]
    fn room_list_parses_stored_json() {
        assert_eq!(parse_room_list(Some("[1,2,3]")), vec![1, 2, 3]);
        assert_eq!(parse_room_list(None), Vec::<i64>::new());
    }

    #[test]
    fn malformed_room_list_degrades_to_empty() {
        assert_eq!(parse_room_list(Some("not json")), Vec::<i64>::new());
        assert_eq!(parse_room_list(Some("{\"a\":1}")), Vec::<i64>::new());
    }

    #[test]
    fn grouping_follows_current_room_assignment() {
        let names: HashMap<i64, String> = [(1, "east".to_string())].into();
        // User 11 was split against room 1 but has since moved to room 2.
        let shares = vec![share(10, Some(1), "25.00"), share(11, Some(2), "25.00")];

        let grouped = group_by_room(&[1], &shares, &names);
        assert_eq!(grouped.len(), 1);
        assert_eq!(grouped[0].room_name, "east");
        assert_eq!(grouped[0].users.len(), 1);
        assert_eq!(grouped[0].users[0].id, 10);
    }

    #[test]
    fn vanished_room_gets_placeholder_name() {
        let names = HashMap::new();
        let grouped = group_by_room(&[9], &[], &names);
        assert_eq!(grouped[0].room_name, "unknown room");
        assert!(grouped[0].users.is_empty());
    }
}
