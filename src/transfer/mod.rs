//! Peer-to-peer transfer core
//!
//! Atomically moves money between two users' balance rows and appends an
//! immutable transfer record, or leaves the ledger observably unchanged.
//!
//! # Unit of work
//!
//! ```text
//! Started → Locked → Validated → Written → Committed
//!     ↓        ↓         ↓           ↓
//!     └────────┴─────────┴───────────┴──→ Aborted (full rollback)
//! ```
//!
//! # Safety Invariants
//!
//! 1. **Conservation**: sum of all balance amounts is unchanged by any
//!    transfer, successful or not
//! 2. **Deterministic lock order**: balance rows are locked in ascending
//!    user-id order regardless of who is sender, so opposing concurrent
//!    transfers between the same pair cannot deadlock
//! 3. **Check under lock**: the sufficient-funds check runs after the
//!    sender row is locked, so concurrent debits cannot race it
//! 4. **No partial state**: every exit before commit rolls back; a failed
//!    transfer is indistinguishable from one that never ran

pub mod engine;
pub mod error;
pub mod record;

pub use engine::TransferEngine;
pub use error::TransferError;
pub use record::{TransferLog, TransferRecord};
