//! zippay - Peer-to-Peer Wallet Ledger Core
//!
//! Users hold paise-denominated balances, top up via on-ramp intents,
//! and send money to each other by phone number. The hard part lives in
//! [`transfer`]: moving money between two balance rows under concurrent
//! access without creating, destroying, or duplicating value.
//!
//! # Modules
//!
//! - [`core_types`] - Core type definitions (UserId, TransferId, etc.)
//! - [`money`] - Paise smallest-unit type; all rupee/paise conversion
//! - [`config`] - YAML application configuration
//! - [`logging`] - tracing subscriber setup
//! - [`db`] - PostgreSQL pool and ledger schema
//! - [`users`] - User directory (phone number → user id)
//! - [`ledger`] - Balance rows and credits
//! - [`transfer`] - Atomic P2P transfer engine
//! - [`onramp`] - Deposit intent lifecycle
//!
//! The HTTP layer and session authentication are external collaborators:
//! handlers resolve the caller to a [`core_types::UserId`] and invoke
//! [`transfer::TransferEngine::execute`] directly.

pub mod config;
pub mod core_types;
pub mod db;
pub mod ledger;
pub mod logging;
pub mod money;
pub mod onramp;
pub mod transfer;
pub mod users;

// Convenient re-exports at crate root
pub use config::AppConfig;
pub use core_types::{OnRampId, TransferId, UserId};
pub use db::Database;
pub use ledger::{BalanceLedger, BalanceRow};
pub use money::{MoneyError, Paise, format_rupees};
pub use onramp::{OnRampError, OnRampService, OnRampStatus, OnRampTransaction};
pub use transfer::{TransferEngine, TransferError, TransferLog, TransferRecord};
pub use users::{User, UserDirectory};
