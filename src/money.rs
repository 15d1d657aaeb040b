//! Money Conversion Module
//!
//! Unified conversion between the internal paise representation and the
//! client-facing rupee string/Decimal representation. All conversions MUST
//! go through this module.
//!
//! ## Internal Representation
//! - All amounts are stored as `i64` paise (smallest currency unit)
//! - The scale factor is fixed at 10^2 (1 rupee = 100 paise)
//! - Internal logic never reasons in floating-point currency
//!
//! ## Usage
//! ```ignore
//! // Client sends "150.00" rupees
//! let amount = Paise::parse_rupees("150.00")?;
//! assert_eq!(amount.as_i64(), 15_000);
//!
//! // Display balance to client
//! assert_eq!(format_rupees(15_000), "150.00");
//! ```

use rust_decimal::prelude::*;
use serde::Serialize;
use thiserror::Error;

/// Fixed decimal places for the rupee/paise scale
pub const RUPEE_DECIMALS: u32 = 2;

const SCALE: i64 = 100;

/// Money conversion errors
#[derive(Debug, Error)]
pub enum MoneyError {
    #[error("Amount must be positive")]
    InvalidAmount,

    #[error("Amount too large, would overflow")]
    Overflow,

    #[error("Precision overflow: provided {provided} decimals, max allowed {max}")]
    PrecisionOverflow { provided: u32, max: u32 },

    #[error("Invalid format: {0}")]
    InvalidFormat(String),
}

/// A strictly positive amount of money in paise.
///
/// Constructing a `Paise` is the only way to hand an amount to the
/// ledger-mutating operations, so zero/negative/overflowing amounts are
/// rejected before any lock is taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Paise(i64);

impl Paise {
    /// Wrap a raw paise amount, rejecting zero and negative values
    pub fn new(paise: i64) -> Result<Self, MoneyError> {
        if paise <= 0 {
            return Err(MoneyError::InvalidAmount);
        }
        Ok(Self(paise))
    }

    /// Parse a client rupee string (e.g. "150", "99.50") into paise.
    ///
    /// Strict format: no sign, no empty side of the dot, at most
    /// [`RUPEE_DECIMALS`] fractional digits, no silent truncation.
    pub fn parse_rupees(amount_str: &str) -> Result<Self, MoneyError> {
        let amount_str = amount_str.trim();
        if amount_str.is_empty() {
            return Err(MoneyError::InvalidFormat("empty string".into()));
        }

        if amount_str.starts_with('-') || amount_str.starts_with('+') {
            return Err(MoneyError::InvalidAmount);
        }

        let parts: Vec<&str> = amount_str.split('.').collect();
        let (whole, frac) = match parts.len() {
            1 => (parts[0], ""),
            2 => {
                // Require both sides of the dot to be non-empty
                // so ambiguous forms like ".5" or "5." are rejected
                if parts[0].is_empty() {
                    return Err(MoneyError::InvalidFormat(
                        "missing leading zero (e.g., use 0.5 instead of .5)".into(),
                    ));
                }
                if parts[1].is_empty() {
                    return Err(MoneyError::InvalidFormat(
                        "missing fractional part (e.g., use 5.0 instead of 5.)".into(),
                    ));
                }
                (parts[0], parts[1])
            }
            _ => return Err(MoneyError::InvalidFormat("multiple decimal points".into())),
        };

        if frac.len() > RUPEE_DECIMALS as usize {
            return Err(MoneyError::PrecisionOverflow {
                provided: frac.len() as u32,
                max: RUPEE_DECIMALS,
            });
        }

        let whole_num: i64 = whole.parse::<i64>().map_err(|e| {
            let err_str = e.to_string();
            if err_str.contains("too large") || err_str.contains("overflow") {
                MoneyError::Overflow
            } else {
                MoneyError::InvalidFormat(format!("invalid character in whole part: {}", whole))
            }
        })?;

        let frac_num: i64 = if frac.is_empty() {
            0
        } else {
            let frac_padded = format!("{:0<width$}", frac, width = RUPEE_DECIMALS as usize);
            frac_padded
                .parse::<i64>()
                .map_err(|_| MoneyError::InvalidFormat("invalid fractional part".into()))?
        };

        let paise = whole_num
            .checked_mul(SCALE)
            .and_then(|v| v.checked_add(frac_num))
            .ok_or(MoneyError::Overflow)?;

        Self::new(paise)
    }

    /// Convert a validated Decimal rupee amount into paise.
    ///
    /// Used at JSON boundaries where `rust_decimal::Decimal` carries the
    /// deserialized amount.
    pub fn from_rupees(decimal: Decimal) -> Result<Self, MoneyError> {
        if decimal.is_sign_negative() || decimal.is_zero() {
            return Err(MoneyError::InvalidAmount);
        }

        if decimal.scale() > RUPEE_DECIMALS {
            return Err(MoneyError::PrecisionOverflow {
                provided: decimal.scale(),
                max: RUPEE_DECIMALS,
            });
        }

        let scaled = decimal * Decimal::from(SCALE);
        let paise = scaled.to_i64().ok_or(MoneyError::Overflow)?;
        Self::new(paise)
    }

    /// Raw paise value for binding into SQL
    #[inline(always)]
    pub const fn as_i64(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for Paise {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", format_rupees(self.0))
    }
}

/// Format a raw paise value as a rupee display string
///
/// e.g. stored=15000 -> "150.00"
pub fn format_rupees(paise: i64) -> String {
    let decimal_value = Decimal::from(paise) / Decimal::from(SCALE);
    format!("{:.prec$}", decimal_value, prec = RUPEE_DECIMALS as usize)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn qa_parse_rupees_variations() {
        // Normal cases
        assert_eq!(Paise::parse_rupees("1.23").unwrap().as_i64(), 123);
        assert_eq!(Paise::parse_rupees("150").unwrap().as_i64(), 15_000);
        assert_eq!(Paise::parse_rupees("0.01").unwrap().as_i64(), 1);

        // Leading/trailing zeros
        assert_eq!(Paise::parse_rupees("001.23").unwrap().as_i64(), 123);
        assert_eq!(Paise::parse_rupees("1.2").unwrap().as_i64(), 120);

        // Zero representations (rejected, amounts must be positive)
        assert!(Paise::parse_rupees("0").is_err());
        assert!(Paise::parse_rupees("0.00").is_err());
    }

    #[test]
    fn qa_parse_rupees_invalid_formats() {
        let cases = vec![
            "1,000.00", // Commas not allowed
            "1.2.3",    // Multiple dots
            "1. 23",    // Spaces inside
            "-5",       // Negative rejected
            "+1.23",    // Explicit plus rejected
            "1e2",      // Scientific notation rejected
            ".",        // Just a dot rejected
            ".5",       // Missing leading zero rejected
            "5.",       // Missing fractional part rejected
            "",         // Empty rejected
        ];

        for case in cases {
            assert!(
                Paise::parse_rupees(case).is_err(),
                "Should reject invalid format: {:?}",
                case
            );
        }
    }

    #[test]
    fn qa_parse_rupees_precision_limits() {
        assert!(Paise::parse_rupees("1.23").is_ok());

        let res = Paise::parse_rupees("1.234");
        assert!(matches!(
            res,
            Err(MoneyError::PrecisionOverflow {
                provided: 3,
                max: 2
            })
        ));
    }

    #[test]
    fn qa_parse_rupees_i64_boundary() {
        // Max i64 is 9,223,372,036,854,775,807 paise
        let max_rupees = "92233720368547758.07";
        assert_eq!(
            Paise::parse_rupees(max_rupees).unwrap().as_i64(),
            i64::MAX
        );

        let too_big = "92233720368547758.08";
        assert!(matches!(
            Paise::parse_rupees(too_big),
            Err(MoneyError::Overflow)
        ));
    }

    #[test]
    fn qa_from_rupees_edge_cases() {
        let d = Decimal::from_str("1.23").unwrap();
        assert_eq!(Paise::from_rupees(d).unwrap().as_i64(), 123);

        // Scale 5 rejected even with trailing zeros
        let d = Decimal::from_str("1.23000").unwrap();
        assert!(Paise::from_rupees(d).is_err());

        let d = Decimal::from_str("-1.00").unwrap();
        assert!(matches!(
            Paise::from_rupees(d),
            Err(MoneyError::InvalidAmount)
        ));
    }

    #[test]
    fn qa_new_rejects_non_positive() {
        assert!(Paise::new(0).is_err());
        assert!(Paise::new(-100).is_err());
        assert_eq!(Paise::new(200).unwrap().as_i64(), 200);
    }

    #[test]
    fn qa_format_rupees_display() {
        assert_eq!(format_rupees(15_000), "150.00");
        assert_eq!(format_rupees(1), "0.01");
        assert_eq!(format_rupees(0), "0.00");
        assert_eq!(format_rupees(-250), "-2.50");
        assert_eq!(Paise::new(9_950).unwrap().to_string(), "99.50");
    }

    #[test]
    fn qa_roundtrip_consistency() {
        let values = vec!["1", "1.5", "0.01", "1234.56", "999999.99"];
        for val_str in values {
            let paise = Paise::parse_rupees(val_str).unwrap();
            let formatted = format_rupees(paise.as_i64());
            let back = Paise::parse_rupees(&formatted).unwrap();
            assert_eq!(paise, back, "Roundtrip failed for {}", val_str);
        }
    }
}
