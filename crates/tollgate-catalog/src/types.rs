use serde::Deserialize;

/// Model lifecycle status from the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelStatus {
    Active,
    Inactive,
    Deprecated,
}

/// A model row from the catalog
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelRecord {
    /// Unique model slug
    pub slug: String,
    /// Lifecycle status
    pub status: ModelStatus,
    /// Activation flag, independent of status
    pub enabled: bool,
}

impl ModelRecord {
    /// A model is usable only when active AND enabled
    pub const fn is_usable(&self) -> bool {
        matches!(self.status, ModelStatus::Active) && self.enabled
    }
}

/// Price sheet row, one-to-one with a model
///
/// The unit label is free text in the store; it is normalized into
/// [`crate::PricingUnit`] immediately after this row is read, so no
/// downstream code sees the raw label.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceSheet {
    /// Rate applied to request input, in `currency` per unit
    pub input_price: f64,
    /// Rate applied to request output, in `currency` per unit
    pub output_price: f64,
    /// Free-text unit label (e.g. "Minutes", "1000 characters")
    pub unit: String,
    /// ISO currency code; only "USD" is accepted
    pub currency: String,
}
