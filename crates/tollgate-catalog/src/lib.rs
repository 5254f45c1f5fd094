#![allow(clippy::missing_errors_doc, clippy::must_use_candidate)]

mod client;
mod error;
mod types;
mod unit;

pub use client::CatalogClient;
pub use error::CatalogError;
pub use types::{ModelRecord, ModelStatus, PriceSheet};
pub use unit::{PricingUnit, ResolvedPricing, resolve_pricing};
