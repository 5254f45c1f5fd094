#![allow(clippy::missing_errors_doc, clippy::must_use_candidate)]

mod client;
mod error;
mod guard;
mod recorder;
mod types;

pub use client::LedgerClient;
pub use error::{BillingError, StoreError};
pub use guard::BalanceGuard;
pub use recorder::{LedgerRecorder, UsageLogRecorder};
pub use types::{Charge, ChargeMetadata, UsageLogEntry};
