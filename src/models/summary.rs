//! Reconciled budget figures

use serde::{Deserialize, Serialize};

/// Result of reconciling an allocation against the primary accommodation
///
/// Serialized in camelCase because the presentation layer reads it as-is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetSummary {
    /// Base budget minus all category totals; negative when categories overspend
    pub remaining_budget: f64,
    /// Price of the primary accommodation for the whole stay, 0 when absent
    pub primary_accommodation_total: f64,
    /// Primary accommodation price divided by the trip length
    pub primary_accommodation_per_night: f64,
    /// How far the accommodation exceeds the remaining budget
    pub accommodation_overflow: f64,
    /// `accommodation_overflow > 0`
    pub has_overflow: bool,
    /// Base budget plus accommodation
    pub combined_total: f64,
}

impl BudgetSummary {
    /// Whether a primary accommodation price is part of this summary
    #[must_use]
    pub fn has_accommodation(&self) -> bool {
        self.primary_accommodation_total > 0.0
    }
}

/// Per-night price and overflow for a single accommodation option
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccommodationQuote {
    /// Hotel name
    pub name: String,
    /// Currency code
    pub currency: String,
    /// Price for the entire stay
    pub total: f64,
    /// Price per night
    pub per_night: f64,
    /// How far the price exceeds the remaining budget
    pub overflow: f64,
    /// `overflow > 0`
    pub has_overflow: bool,
}
