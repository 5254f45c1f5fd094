use serde::Serialize;
use tollgate_core::Modality;

use crate::{CatalogError, PriceSheet};

/// Normalized billing granularity a model's rate is expressed in
///
/// The store holds the unit as free text; this closed variant is the
/// only representation downstream code works with, so every match on
/// it is exhaustively checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PricingUnit {
    PerMinute,
    PerSecond,
    PerImage,
    PerCharacter,
    PerThousandCharacters,
}

impl PricingUnit {
    /// Wire name used in ledger metadata and the response billing block
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PerMinute => "minute",
            Self::PerSecond => "second",
            Self::PerImage => "image",
            Self::PerCharacter => "character",
            Self::PerThousandCharacters => "1000_characters",
        }
    }

    /// Classify a raw unit label against a modality's accepted unit family
    ///
    /// Labels are matched case-insensitively with surrounding and
    /// repeated inner whitespace ignored, so "Minutes", "MINUTE " and
    /// "minutes" all resolve to per-minute.
    pub fn classify(label: &str, modality: Modality) -> Option<Self> {
        let normalized = label.trim().to_lowercase();
        let normalized = normalized.split_whitespace().collect::<Vec<_>>().join(" ");

        match modality {
            Modality::Transcription => match normalized.as_str() {
                "minute" | "min" | "minutes" => Some(Self::PerMinute),
                "second" | "sec" | "seconds" => Some(Self::PerSecond),
                _ => None,
            },
            Modality::ImageGeneration => match normalized.as_str() {
                "image" | "images" => Some(Self::PerImage),
                _ => None,
            },
            Modality::Speech => match normalized.as_str() {
                "character" | "char" | "characters" => Some(Self::PerCharacter),
                "1k chars" | "1k char" | "1k characters" | "1000 chars" | "1000 characters" => {
                    Some(Self::PerThousandCharacters)
                }
                _ => None,
            },
            // Video pricing rows are always per-second
            Modality::VideoGeneration => match normalized.as_str() {
                "second" => Some(Self::PerSecond),
                _ => None,
            },
        }
    }
}

impl std::fmt::Display for PricingUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A price sheet resolved into a typed unit and a single per-unit rate
#[derive(Debug, Clone, Copy)]
pub struct ResolvedPricing {
    /// Normalized unit family
    pub unit: PricingUnit,
    /// Rate in USD per unit
    pub unit_price: f64,
}

/// Resolve a raw price sheet against a modality
///
/// The per-unit rate is `max(input_price, output_price, 0)`; the row's
/// input/output split is collapsed because every modality here bills a
/// single quantity.
///
/// # Errors
///
/// Returns `UnsupportedUnit` when the currency is not USD or the label
/// does not match the modality's accepted family, and `InvalidPricing`
/// when the resolved rate is not a finite positive number
pub fn resolve_pricing(sheet: &PriceSheet, modality: Modality) -> Result<ResolvedPricing, CatalogError> {
    let unsupported = || CatalogError::UnsupportedUnit {
        unit: sheet.unit.clone(),
        currency: sheet.currency.clone(),
        modality,
    };

    if !sheet.currency.trim().eq_ignore_ascii_case("USD") {
        return Err(unsupported());
    }

    let unit = PricingUnit::classify(&sheet.unit, modality).ok_or_else(unsupported)?;

    let unit_price = sheet.input_price.max(sheet.output_price).max(0.0);
    if !unit_price.is_finite() || unit_price <= 0.0 {
        return Err(CatalogError::InvalidPricing { rate: unit_price });
    }

    Ok(ResolvedPricing { unit, unit_price })
}
