//! Balance ledger
//!
//! The `balances` table is the single authoritative store of user funds.
//! One row per user, amounts in paise. Rows are mutated only inside the
//! atomic units of work owned by the transfer engine and the on-ramp
//! settlement path; nothing in this crate caches balances in memory.

use crate::core_types::UserId;
use crate::money::Paise;
use sqlx::{FromRow, PgExecutor, PgPool, Row};

/// One user's balance row
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromRow, serde::Serialize)]
pub struct BalanceRow {
    pub user_id: UserId,
    /// Spendable funds in paise, never negative
    pub amount: i64,
    /// Reserved-but-unspent funds in paise
    pub locked: i64,
}

/// Repository for balance rows
pub struct BalanceLedger;

impl BalanceLedger {
    /// Read a user's balance (unlocked read, for display and tests)
    pub async fn get(pool: &PgPool, user_id: UserId) -> Result<Option<BalanceRow>, sqlx::Error> {
        sqlx::query_as::<_, BalanceRow>(
            r#"SELECT user_id, amount, locked FROM balances WHERE user_id = $1"#,
        )
        .bind(user_id)
        .fetch_optional(pool)
        .await
    }

    /// Ensure a zero balance row exists for a user
    pub async fn open(pool: &PgPool, user_id: UserId) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"INSERT INTO balances (user_id, amount, locked)
               VALUES ($1, 0, 0)
               ON CONFLICT (user_id) DO NOTHING"#,
        )
        .bind(user_id)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Credit a user's balance by `amount`.
    ///
    /// Upserts so a missing row is equivalent to a zero row. Takes any
    /// executor so the on-ramp settlement and the transfer engine can run
    /// it inside their own transactions.
    pub async fn credit(
        executor: impl PgExecutor<'_>,
        user_id: UserId,
        amount: Paise,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"INSERT INTO balances (user_id, amount, locked)
               VALUES ($1, $2, 0)
               ON CONFLICT (user_id)
               DO UPDATE SET amount = balances.amount + EXCLUDED.amount"#,
        )
        .bind(user_id)
        .bind(amount.as_i64())
        .execute(executor)
        .await?;
        Ok(())
    }

    /// Sum of all spendable balances in paise.
    ///
    /// Conservation check: unchanged by any batch of transfers, grows only
    /// by settled on-ramp credits.
    pub async fn total_supply(pool: &PgPool) -> Result<i64, sqlx::Error> {
        let row = sqlx::query(r#"SELECT COALESCE(SUM(amount), 0)::BIGINT AS total FROM balances"#)
            .fetch_one(pool)
            .await?;
        Ok(row.get("total"))
    }
}
