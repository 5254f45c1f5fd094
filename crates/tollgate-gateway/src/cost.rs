use tollgate_catalog::PricingUnit;

use crate::error::{GatewayError, Result};

/// Convert a billable quantity into a USD cost
///
/// The quantity is in the modality's natural measure: seconds for
/// transcription and video, image count for image generation, character
/// count for speech. Per-minute and per-1000-characters rates divide
/// the quantity into the priced unit; the other families bill the
/// quantity directly. Cost is deterministic and strictly proportional
/// to the quantity.
///
/// # Errors
///
/// Returns `InvalidCost` when the product is not a finite positive
/// number (the quantity and rate are validated upstream, so this only
/// trips on overflow or a degenerate combination)
pub fn compute_cost(quantity: f64, unit: PricingUnit, unit_price: f64) -> Result<f64> {
    let cost = match unit {
        PricingUnit::PerSecond | PricingUnit::PerImage | PricingUnit::PerCharacter => quantity * unit_price,
        PricingUnit::PerMinute => (quantity / 60.0) * unit_price,
        PricingUnit::PerThousandCharacters => (quantity / 1000.0) * unit_price,
    };

    if !cost.is_finite() || cost <= 0.0 {
        return Err(GatewayError::InvalidCost(cost));
    }

    Ok(cost)
}
