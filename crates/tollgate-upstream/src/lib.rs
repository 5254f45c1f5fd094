#![allow(clippy::missing_errors_doc, clippy::must_use_candidate)]

mod extract;
mod invoker;

pub use extract::error_text;
pub use invoker::{UpstreamInvoker, UpstreamOutcome, resolve_credential};
