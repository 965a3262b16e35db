//! Split engine: turns one payment amount into per-user obligations.
//!
//! All functions here are pure; resolving a room's occupants against the
//! store is the caller's job, and persisting the resulting shares happens
//! atomically with the payment insert in the repo layer.

use std::collections::HashSet;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::money::round2;

/// How a payment's amount is divided among residents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SplitMode {
    #[default]
    User,
    Room,
}

impl SplitMode {
    pub fn as_str(self) -> &'static str {
        match self {
            SplitMode::User => "user",
            SplitMode::Room => "room",
        }
    }

    /// Stored values are free text; anything unrecognized falls back to
    /// per-user splitting, the schema default.
    pub fn parse(raw: &str) -> Self {
        match raw {
            "room" => SplitMode::Room,
            _ => SplitMode::User,
        }
    }
}

/// One user's computed portion of a payment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Share {
    pub user_id: i64,
    pub amount: Decimal,
}

/// A room selected for splitting, with its occupants as resolved at
/// computation time.
#[derive(Debug, Clone)]
pub struct RoomOccupants {
    pub room_id: i64,
    pub occupant_ids: Vec<i64>,
}

/// Divides `amount` evenly across the distinct user ids. Each share is
/// rounded half-up to cents independently, so the shares may sum to
/// slightly more or less than `amount`; the remainder is not
/// redistributed.
pub fn split_by_user(amount: Decimal, user_ids: &[i64]) -> Vec<Share> {
    let distinct = distinct_ids(user_ids);
    if distinct.is_empty() {
        return Vec::new();
    }

    let per_user = round2(amount / Decimal::from(distinct.len() as i64));
    distinct
        .into_iter()
        .map(|user_id| Share {
            user_id,
            amount: per_user,
        })
        .collect()
}

/// Divides `amount` evenly across the distinct rooms, then each room's
/// allocation evenly across its current occupants. A room without
/// occupants contributes no shares: its allocation is dropped, not
/// redistributed to the other rooms. Rounding applies at both division
/// steps and compounds.
pub fn split_by_room(amount: Decimal, rooms: &[RoomOccupants]) -> Vec<Share> {
    let mut seen = HashSet::new();
    let distinct: Vec<&RoomOccupants> =
        rooms.iter().filter(|r| seen.insert(r.room_id)).collect();
    if distinct.is_empty() {
        return Vec::new();
    }

    let per_room = round2(amount / Decimal::from(distinct.len() as i64));

    let mut shares = Vec::new();
    for room in distinct {
        let occupants = distinct_ids(&room.occupant_ids);
        if occupants.is_empty() {
            continue;
        }
        let per_user = round2(per_room / Decimal::from(occupants.len() as i64));
        shares.extend(occupants.into_iter().map(|user_id| Share {
            user_id,
            amount: per_user,
        }));
    }
    shares
}

fn distinct_ids(ids: &[i64]) -> Vec<i64> {
    let mut seen = HashSet::new();
    ids.iter().copied().filter(|id| seen.insert(*id)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().expect("decimal literal")
    }

    fn total(shares: &[Share]) -> Decimal {
        shares.iter().map(|s| s.amount).sum()
    }

    #[test]
    fn by_user_splits_evenly() {
        let shares = split_by_user(dec("90"), &[1, 2, 3]);
        assert_eq!(shares.len(), 3);
        for share in &shares {
            assert_eq!(share.amount, dec("30.00"));
        }
        assert_eq!(total(&shares), dec("90.00"));
    }

    #[test]
    fn by_user_rounds_each_share_half_up() {
        let shares = split_by_user(dec("100.01"), &[1, 2]);
        assert_eq!(shares[0].amount, dec("50.01"));
        assert_eq!(shares[1].amount, dec("50.01"));
    }

    #[test]
    fn by_user_remainder_is_not_redistributed() {
        let shares = split_by_user(dec("100"), &[1, 2, 3]);
        for share in &shares {
            assert_eq!(share.amount, dec("33.33"));
        }
        // 0.01 short of the payment amount; accepted drift.
        assert_eq!(total(&shares), dec("99.99"));
    }

    #[test]
    fn by_user_ignores_duplicate_ids() {
        let shares = split_by_user(dec("10"), &[7, 7, 8]);
        assert_eq!(shares.len(), 2);
        assert_eq!(shares[0].user_id, 7);
        assert_eq!(shares[1].user_id, 8);
        assert_eq!(shares[0].amount, dec("5.00"));
    }

    #[test]
    fn by_user_empty_group_yields_no_shares() {
        assert!(split_by_user(dec("10"), &[]).is_empty());
    }

    #[test]
    fn by_room_drops_allocation_of_empty_room() {
        let rooms = vec![
            RoomOccupants {
                room_id: 1,
                occupant_ids: vec![10, 11],
            },
            RoomOccupants {
                room_id: 2,
                occupant_ids: vec![],
            },
        ];
        let shares = split_by_room(dec("100"), &rooms);

        assert_eq!(shares.len(), 2);
        for share in &shares {
            assert_eq!(share.amount, dec("25.00"));
        }
        // Room 2's 50.00 vanishes from the ledger.
        assert_eq!(total(&shares), dec("50.00"));
    }

    #[test]
    fn by_room_rounding_compounds_per_step() {
        let rooms = vec![
            RoomOccupants {
                room_id: 1,
                occupant_ids: vec![10, 11],
            },
            RoomOccupants {
                room_id: 2,
                occupant_ids: vec![12],
            },
            RoomOccupants {
                room_id: 3,
                occupant_ids: vec![13],
            },
        ];
        let shares = split_by_room(dec("100"), &rooms);

        // per-room 33.33, then 33.33 / 2 = 16.665 rounds up to 16.67.
        assert_eq!(shares[0].amount, dec("16.67"));
        assert_eq!(shares[1].amount, dec("16.67"));
        assert_eq!(shares[2].amount, dec("33.33"));
        assert_eq!(shares[3].amount, dec("33.33"));
    }

    #[test]
    fn by_room_ignores_duplicate_rooms() {
        let rooms = vec![
            RoomOccupants {
                room_id: 1,
                occupant_ids: vec![10],
            },
            RoomOccupants {
                room_id: 1,
                occupant_ids: vec![10],
            },
        ];
        let shares = split_by_room(dec("60"), &rooms);
        assert_eq!(shares.len(), 1);
        assert_eq!(shares[0].amount, dec("60.00"));
    }

    #[test]
    fn by_room_all_rooms_empty_yields_no_shares() {
        let rooms = vec![RoomOccupants {
            room_id: 1,
            occupant_ids: vec![],
        }];
        assert!(split_by_room(dec("40"), &rooms).is_empty());
    }

    #[test]
    fn split_mode_round_trips_through_storage() {
        assert_eq!(SplitMode::parse(SplitMode::User.as_str()), SplitMode::User);
        assert_eq!(SplitMode::parse(SplitMode::Room.as_str()), SplitMode::Room);
        assert_eq!(SplitMode::parse("something else"), SplitMode::User);
    }
}
