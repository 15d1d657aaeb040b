//! On-ramp deposits
//!
//! Deposit intents move through `Processing → Success | Failure`. The
//! settlement path shares the ledger-consistency pattern of the transfer
//! engine: the status flip and the balance credit commit in one unit of
//! work, and settlement of an already-terminal intent is rejected rather
//! than applied twice.

use chrono::{DateTime, Utc};
use rand::Rng;
use rand::distributions::Alphanumeric;
use serde::Serialize;
use sqlx::{FromRow, PgPool, Row};
use thiserror::Error;

use crate::core_types::{OnRampId, UserId};
use crate::ledger::BalanceLedger;
use crate::money::Paise;

#[derive(Debug, Error)]
pub enum OnRampError {
    #[error("On-ramp transaction not found for token")]
    NotFound,

    #[error("On-ramp transaction already settled")]
    AlreadySettled,

    /// Defensive: the schema rejects non-positive intent amounts
    #[error("Corrupt intent amount: {0}")]
    CorruptAmount(i64),

    #[error("Ledger store unavailable: {0}")]
    Store(#[from] sqlx::Error),
}

/// Lifecycle status of a deposit intent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[repr(i16)]
pub enum OnRampStatus {
    Processing = 0,
    Success = 1,
    Failure = 2,
}

impl From<i16> for OnRampStatus {
    fn from(v: i16) -> Self {
        match v {
            1 => OnRampStatus::Success,
            2 => OnRampStatus::Failure,
            _ => OnRampStatus::Processing,
        }
    }
}

/// A deposit intent row
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct OnRampTransaction {
    pub onramp_id: OnRampId,
    pub user_id: UserId,
    pub provider: String,
    #[sqlx(try_from = "i16")]
    pub status: OnRampStatus,
    pub token: String,
    /// Amount in paise
    pub amount: i64,
    pub start_time: DateTime<Utc>,
}

pub struct OnRampService;

impl OnRampService {
    /// Create a `Processing` deposit intent and return its provider token
    pub async fn create_intent(
        pool: &PgPool,
        user_id: UserId,
        provider: &str,
        amount: Paise,
    ) -> Result<OnRampTransaction, OnRampError> {
        let token: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(24)
            .map(char::from)
            .collect();

        let intent = sqlx::query_as::<_, OnRampTransaction>(
            r#"INSERT INTO onramp_transactions (user_id, provider, status, token, amount)
               VALUES ($1, $2, $3, $4, $5)
               RETURNING onramp_id, user_id, provider, status, token, amount, start_time"#,
        )
        .bind(user_id)
        .bind(provider)
        .bind(OnRampStatus::Processing as i16)
        .bind(&token)
        .bind(amount.as_i64())
        .fetch_one(pool)
        .await?;

        tracing::info!(
            onramp_id = intent.onramp_id,
            user_id,
            provider,
            amount = amount.as_i64(),
            "on-ramp intent created"
        );
        Ok(intent)
    }

    /// Settle a deposit intent by provider token.
    ///
    /// Locks the intent row, rejects anything already terminal, then flips
    /// the status; a successful settlement credits the user's balance in
    /// the same transaction.
    pub async fn settle(
        pool: &PgPool,
        token: &str,
        success: bool,
    ) -> Result<OnRampTransaction, OnRampError> {
        let mut tx = pool.begin().await?;

        let row = sqlx::query(
            r#"SELECT onramp_id, user_id, status, amount
               FROM onramp_transactions WHERE token = $1 FOR UPDATE"#,
        )
        .bind(token)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(OnRampError::NotFound)?;

        let status = OnRampStatus::from(row.get::<i16, _>("status"));
        if status != OnRampStatus::Processing {
            return Err(OnRampError::AlreadySettled);
        }

        let user_id: UserId = row.get("user_id");
        let amount: i64 = row.get("amount");
        let new_status = if success {
            OnRampStatus::Success
        } else {
            OnRampStatus::Failure
        };

        let settled = sqlx::query_as::<_, OnRampTransaction>(
            r#"UPDATE onramp_transactions SET status = $1 WHERE token = $2
               RETURNING onramp_id, user_id, provider, status, token, amount, start_time"#,
        )
        .bind(new_status as i16)
        .bind(token)
        .fetch_one(&mut *tx)
        .await?;

        if success {
            let credit = Paise::new(amount).map_err(|_| OnRampError::CorruptAmount(amount))?;
            BalanceLedger::credit(&mut *tx, user_id, credit).await?;
        }

        tx.commit().await?;

        tracing::info!(
            onramp_id = settled.onramp_id,
            user_id,
            amount,
            success,
            "on-ramp intent settled"
        );
        Ok(settled)
    }

    /// Deposit intents for a user, newest first
    pub async fn history(
        pool: &PgPool,
        user_id: UserId,
        limit: i64,
    ) -> Result<Vec<OnRampTransaction>, OnRampError> {
        let records = sqlx::query_as::<_, OnRampTransaction>(
            r#"SELECT onramp_id, user_id, provider, status, token, amount, start_time
               FROM onramp_transactions
               WHERE user_id = $1
               ORDER BY start_time DESC
               LIMIT $2"#,
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(pool)
        .await?;

        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_onramp_status_from_i16() {
        assert_eq!(OnRampStatus::from(0), OnRampStatus::Processing);
        assert_eq!(OnRampStatus::from(1), OnRampStatus::Success);
        assert_eq!(OnRampStatus::from(2), OnRampStatus::Failure);
        assert_eq!(OnRampStatus::from(99), OnRampStatus::Processing); // default
    }
}
