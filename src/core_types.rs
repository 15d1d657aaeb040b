//! Core types used throughout the system
//!
//! These are fundamental type aliases used by all modules.
//! They provide semantic meaning and enable future type evolution.

/// User ID - globally unique, immutable after assignment.
///
/// Matches the BIGSERIAL primary key of the `users` table, so it is
/// signed end to end; no u64/i64 casts at the database boundary.
pub type UserId = i64;

/// Transfer ID - primary key of a committed `p2p_transfers` row
pub type TransferId = i64;

/// On-ramp ID - primary key of an `onramp_transactions` row
pub type OnRampId = i64;
