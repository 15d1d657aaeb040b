//! Transfer engine: the one atomic unit of work that moves money.

use sqlx::{PgPool, Row};

use super::error::TransferError;
use super::record::TransferRecord;
use crate::core_types::UserId;
use crate::ledger::BalanceLedger;
use crate::money::Paise;
use crate::users::UserDirectory;

/// Lock both balance rows in ascending user-id order.
///
/// The order is a property of the pair, not of who is sending, so two
/// opposing transfers between the same users always take the locks in
/// the same sequence and cannot deadlock each other.
fn lock_order(a: UserId, b: UserId) -> (UserId, UserId) {
    if a <= b { (a, b) } else { (b, a) }
}

/// Peer-to-peer transfer engine.
///
/// Stateless per call: every invocation re-reads authoritative balance
/// state inside its own transaction. The only configuration is the bound
/// on row-lock waits.
pub struct TransferEngine {
    lock_timeout_ms: u64,
}

impl Default for TransferEngine {
    fn default() -> Self {
        Self {
            lock_timeout_ms: 2_000,
        }
    }
}

impl TransferEngine {
    pub fn new(lock_timeout_ms: u64) -> Self {
        Self { lock_timeout_ms }
    }

    /// Move `amount` from `sender_id` to the user owning `recipient_phone`.
    ///
    /// All-or-nothing: on success the sender is debited, the recipient is
    /// credited, and exactly one [`TransferRecord`] is appended, all in one
    /// transaction. On any error the ledger is observably unchanged.
    ///
    /// `sender_id` must come from the caller's identity layer; this engine
    /// does not authenticate.
    pub async fn execute(
        &self,
        pool: &PgPool,
        sender_id: UserId,
        recipient_phone: &str,
        amount: Paise,
    ) -> Result<TransferRecord, TransferError> {
        // Validation before any lock is taken
        let recipient = UserDirectory::get_by_phone(pool, recipient_phone)
            .await?
            .ok_or_else(|| TransferError::RecipientNotFound(recipient_phone.to_string()))?;
        let recipient_id = recipient.user_id;

        if recipient_id == sender_id {
            return Err(TransferError::SelfTransfer);
        }

        let mut tx = pool.begin().await?;

        // Bounded lock wait: past this, Postgres aborts the statement and
        // the transaction rolls back on drop.
        sqlx::query(&format!("SET LOCAL lock_timeout = '{}ms'", self.lock_timeout_ms))
            .execute(&mut *tx)
            .await?;

        // Exclusive row locks, always in ascending user-id order
        let (first, second) = lock_order(sender_id, recipient_id);
        let first_row = Self::lock_balance(&mut tx, first).await?;
        let second_row = Self::lock_balance(&mut tx, second).await?;

        let sender_balance = if first == sender_id { first_row } else { second_row };
        let available =
            sender_balance.ok_or(TransferError::SenderNotFound(sender_id))?;

        // Balance check happens under lock, never before: a concurrent
        // debit committed between an early check and our writes would
        // otherwise allow a double-spend.
        if available < amount.as_i64() {
            tracing::warn!(
                sender_id,
                available,
                requested = amount.as_i64(),
                "transfer rejected: insufficient funds"
            );
            return Err(TransferError::InsufficientFunds {
                available,
                requested: amount.as_i64(),
            });
        }

        // Debit sender
        sqlx::query(r#"UPDATE balances SET amount = amount - $1 WHERE user_id = $2"#)
            .bind(amount.as_i64())
            .bind(sender_id)
            .execute(&mut *tx)
            .await?;

        // Credit recipient (upsert; a user without a balance row yet
        // starts from zero)
        BalanceLedger::credit(&mut *tx, recipient_id, amount).await?;

        // Append the immutable transfer record
        let record = sqlx::query_as::<_, TransferRecord>(
            r#"INSERT INTO p2p_transfers (from_user_id, to_user_id, amount)
               VALUES ($1, $2, $3)
               RETURNING transfer_id, from_user_id, to_user_id, amount, timestamp"#,
        )
        .bind(sender_id)
        .bind(recipient_id)
        .bind(amount.as_i64())
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        tracing::info!(
            transfer_id = record.transfer_id,
            from = sender_id,
            to = recipient_id,
            amount = amount.as_i64(),
            "transfer committed"
        );

        Ok(record)
    }

    /// Lock one balance row, returning its spendable amount if it exists
    async fn lock_balance(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        user_id: UserId,
    ) -> Result<Option<i64>, sqlx::Error> {
        let row = sqlx::query(r#"SELECT amount FROM balances WHERE user_id = $1 FOR UPDATE"#)
            .bind(user_id)
            .fetch_optional(&mut **tx)
            .await?;
        Ok(row.map(|r| r.get("amount")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lock_order_is_deterministic() {
        assert_eq!(lock_order(1, 2), (1, 2));
        assert_eq!(lock_order(2, 1), (1, 2));
        assert_eq!(lock_order(7, 7), (7, 7));
    }

    #[test]
    fn test_lock_order_independent_of_call_role() {
        // A->B and B->A must take locks in the same sequence
        let a = 1001;
        let b = 2002;
        assert_eq!(lock_order(a, b), lock_order(b, a));
    }
}
