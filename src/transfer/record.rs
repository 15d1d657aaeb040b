use crate::core_types::{TransferId, UserId};
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::{FromRow, PgPool};

/// Immutable record of a committed transfer
///
/// Created exactly once per successful transfer, inside the same unit of
/// work as the balance writes. Never updated or deleted.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct TransferRecord {
    pub transfer_id: TransferId,
    pub from_user_id: UserId,
    pub to_user_id: UserId,
    /// Amount moved, in paise
    pub amount: i64,
    pub timestamp: DateTime<Utc>,
}

/// Append-only transfer log queries
pub struct TransferLog;

impl TransferLog {
    /// Transfers sent by a user, newest first (history display)
    pub async fn history(
        pool: &PgPool,
        from_user_id: UserId,
        limit: i64,
    ) -> Result<Vec<TransferRecord>, sqlx::Error> {
        sqlx::query_as::<_, TransferRecord>(
            r#"SELECT transfer_id, from_user_id, to_user_id, amount, timestamp
               FROM p2p_transfers
               WHERE from_user_id = $1
               ORDER BY timestamp DESC
               LIMIT $2"#,
        )
        .bind(from_user_id)
        .bind(limit)
        .fetch_all(pool)
        .await
    }

    /// Count of records appended by a sender (used by atomicity checks)
    pub async fn count_from(pool: &PgPool, from_user_id: UserId) -> Result<i64, sqlx::Error> {
        use sqlx::Row;
        let row = sqlx::query(
            r#"SELECT COUNT(*)::BIGINT AS n FROM p2p_transfers WHERE from_user_id = $1"#,
        )
        .bind(from_user_id)
        .fetch_one(pool)
        .await?;
        Ok(row.get("n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_serializes_for_api_marshalling() {
        let record = TransferRecord {
            transfer_id: 7,
            from_user_id: 1,
            to_user_id: 2,
            amount: 20_000,
            timestamp: DateTime::parse_from_rfc3339("2026-01-15T10:30:00Z")
                .unwrap()
                .with_timezone(&Utc),
        };

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["transfer_id"], 7);
        assert_eq!(json["from_user_id"], 1);
        assert_eq!(json["to_user_id"], 2);
        assert_eq!(json["amount"], 20_000);
    }
}
