use crate::core_types::UserId;
use crate::money::MoneyError;
use thiserror::Error;

/// Transfer engine failures.
///
/// Every variant maps to a stable machine-readable kind via [`kind`],
/// so callers can branch without string-matching display messages.
///
/// [`kind`]: TransferError::kind
#[derive(Error, Debug)]
pub enum TransferError {
    #[error("Recipient not found for contact key: {0}")]
    RecipientNotFound(String),

    /// Defensive: the caller's identity layer should make this impossible
    #[error("Sender not found: user {0}")]
    SenderNotFound(UserId),

    #[error("Insufficient funds: available {available}, requested {requested}")]
    InsufficientFunds { available: i64, requested: i64 },

    #[error("Cannot transfer to yourself")]
    SelfTransfer,

    #[error("Invalid amount: must be positive")]
    InvalidAmount,

    /// Transient store failure (connection loss, lock timeout). The unit
    /// of work rolled back, so retrying the whole operation is safe.
    #[error("Ledger store unavailable: {0}")]
    Store(#[from] sqlx::Error),
}

// A malformed or non-positive amount at the parse boundary is a
// validation failure of the transfer call
impl From<MoneyError> for TransferError {
    fn from(_: MoneyError) -> Self {
        TransferError::InvalidAmount
    }
}

impl TransferError {
    /// Stable error kind for programmatic handling by callers
    pub fn kind(&self) -> &'static str {
        match self {
            TransferError::RecipientNotFound(_) => "RecipientNotFound",
            TransferError::SenderNotFound(_) => "SenderNotFound",
            TransferError::InsufficientFunds { .. } => "InsufficientFunds",
            TransferError::SelfTransfer => "SelfTransfer",
            TransferError::InvalidAmount => "InvalidAmount",
            TransferError::Store(_) => "StoreUnavailable",
        }
    }

    /// Whether the caller may safely retry the entire operation.
    ///
    /// Only true for store failures: nothing partial was committed.
    /// Business-rule failures are deterministic and not retried.
    pub fn is_retryable(&self) -> bool {
        matches!(self, TransferError::Store(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds_are_stable() {
        assert_eq!(
            TransferError::RecipientNotFound("9999999999".into()).kind(),
            "RecipientNotFound"
        );
        assert_eq!(TransferError::SenderNotFound(42).kind(), "SenderNotFound");
        assert_eq!(
            TransferError::InsufficientFunds {
                available: 100,
                requested: 200
            }
            .kind(),
            "InsufficientFunds"
        );
        assert_eq!(TransferError::SelfTransfer.kind(), "SelfTransfer");
        assert_eq!(TransferError::InvalidAmount.kind(), "InvalidAmount");
        assert_eq!(
            TransferError::Store(sqlx::Error::PoolTimedOut).kind(),
            "StoreUnavailable"
        );
    }

    #[test]
    fn test_only_store_errors_retryable() {
        assert!(TransferError::Store(sqlx::Error::PoolTimedOut).is_retryable());
        assert!(
            !TransferError::InsufficientFunds {
                available: 100,
                requested: 200
            }
            .is_retryable()
        );
        assert!(!TransferError::RecipientNotFound("x".into()).is_retryable());
        assert!(!TransferError::SelfTransfer.is_retryable());
    }

    #[test]
    fn test_money_errors_map_to_invalid_amount() {
        let err: TransferError = MoneyError::InvalidAmount.into();
        assert_eq!(err.kind(), "InvalidAmount");
        let err: TransferError = MoneyError::Overflow.into();
        assert_eq!(err.kind(), "InvalidAmount");
    }

    #[test]
    fn test_display_messages() {
        let err = TransferError::InsufficientFunds {
            available: 100,
            requested: 200,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient funds: available 100, requested 200"
        );
    }
}
