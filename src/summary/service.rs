use std::collections::HashMap;

use rust_decimal::Decimal;
use sqlx::SqlitePool;

use crate::error::ApiError;
use crate::money::{parse_stored_amount, round2};

use super::dto::UserBalance;
use super::repo::{self, ActiveUser, AmountRow};

/// Recomputed from scratch on every call. Payments get archived and
/// deleted at arbitrary times, so nothing here is cached.
pub async fn balances(db: &SqlitePool) -> Result<Vec<UserBalance>, ApiError> {
    let users = repo::active_users(db).await?;
    let paid = rows_to_amounts(repo::paid_rows(db).await?)?;
    let owed = rows_to_amounts(repo::owed_rows(db).await?)?;
    Ok(summarize(users, &paid, &owed))
}

fn rows_to_amounts(rows: Vec<AmountRow>) -> Result<Vec<(i64, Decimal)>, ApiError> {
    rows.into_iter()
        .map(|r| Ok((r.user_id, parse_stored_amount(&r.amount)?)))
        .collect()
}

/// Zero-fills every active user, then folds paid and owed amounts in.
/// Rows pointing at users outside the active set are dropped, so
/// history of deleted residents never surfaces here.
pub fn summarize(
    users: Vec<ActiveUser>,
    paid: &[(i64, Decimal)],
    owed: &[(i64, Decimal)],
) -> Vec<UserBalance> {
    let mut index: HashMap<i64, usize> = HashMap::new();
    let mut result: Vec<UserBalance> = users
        .into_iter()
        .enumerate()
        .map(|(i, u)| {
            index.insert(u.id, i);
            UserBalance {
                id: u.id,
                name: u.name,
                paid: Decimal::ZERO,
                owed: Decimal::ZERO,
                net: Decimal::ZERO,
            }
        })
        .collect();

    for (user_id, amount) in paid {
        if let Some(&i) = index.get(user_id) {
            result[i].paid += *amount;
        }
    }
    for (user_id, amount) in owed {
        if let Some(&i) = index.get(user_id) {
            result[i].owed += *amount;
        }
    }
    for entry in &mut result {
        entry.net = round2(entry.paid - entry.owed);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().expect("decimal literal")
    }

    fn users(names: &[(i64, &str)]) -> Vec<ActiveUser> {
        names
            .iter()
            .map(|&(id, name)| ActiveUser {
                id,
                name: name.to_string(),
            })
            .collect()
    }

    #[test]
    fn no_payments_zero_fills_every_user() {
        let result = summarize(users(&[(1, "ana"), (2, "bo")]), &[], &[]);
        assert_eq!(result.len(), 2);
        for entry in &result {
            assert_eq!(entry.paid, Decimal::ZERO);
            assert_eq!(entry.owed, Decimal::ZERO);
            assert_eq!(entry.net, Decimal::ZERO);
        }
    }

    #[test]
    fn paid_and_owed_produce_net_positions() {
        // 90 paid by user 1, split three ways.
        let paid = vec![(1, dec("90"))];
        let owed = vec![(1, dec("30")), (2, dec("30")), (3, dec("30"))];

        let result = summarize(users(&[(1, "ana"), (2, "bo"), (3, "cy")]), &paid, &owed);

        assert_eq!(result[0].paid, dec("90"));
        assert_eq!(result[0].owed, dec("30"));
        assert_eq!(result[0].net, dec("60.00"));
        assert_eq!(result[1].net, dec("-30.00"));
        assert_eq!(result[2].net, dec("-30.00"));
    }

    #[test]
    fn amounts_accumulate_across_payments() {
        let paid = vec![(1, dec("10.50")), (1, dec("4.25"))];
        let owed = vec![(1, dec("5.00")), (1, dec("2.00"))];

        let result = summarize(users(&[(1, "ana")]), &paid, &owed);
        assert_eq!(result[0].paid, dec("14.75"));
        assert_eq!(result[0].owed, dec("7.00"));
        assert_eq!(result[0].net, dec("7.75"));
    }

    #[test]
    fn rows_for_unknown_users_are_dropped() {
        // User 9 was deleted; their historical rows stay in storage but
        // are excluded from the summary.
        let paid = vec![(9, dec("100"))];
        let owed = vec![(9, dec("50")), (1, dec("50"))];

        let result = summarize(users(&[(1, "ana")]), &paid, &owed);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, 1);
        assert_eq!(result[0].paid, Decimal::ZERO);
        assert_eq!(result[0].owed, dec("50"));
        assert_eq!(result[0].net, dec("-50.00"));
    }
}
