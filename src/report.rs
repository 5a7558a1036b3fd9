//! Budget breakdown report
//!
//! Bundles everything the presentation layer shows next to an itinerary:
//! the category allocation, the reconciled summary, alternative hotel quotes
//! and any payload fields that had to be zeroed.

use std::fmt;

use serde::Serialize;
use tracing::info;

use crate::config::DefaultsConfig;
use crate::models::{
    AccommodationOption, AccommodationQuote, BudgetAllocation, BudgetSummary, TripLength,
};
use crate::payload::{InputIssue, PlannerInput};
use crate::reconciler::{reconcile, reconcile_alternatives};

/// Display-ready budget breakdown for one itinerary
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetReport {
    pub destination: Option<String>,
    pub currency: String,
    pub nights: TripLength,
    pub trip_days: u32,
    pub allocation: BudgetAllocation,
    pub accommodation: Option<AccommodationOption>,
    pub summary: BudgetSummary,
    pub alternatives: Vec<AccommodationQuote>,
    pub issues: Vec<InputIssue>,
}

impl BudgetReport {
    /// Resolve the payload and reconcile it
    #[must_use]
    pub fn build(input: &PlannerInput, defaults: &DefaultsConfig) -> Self {
        let resolved = input.resolve(defaults);
        let nights = i64::from(resolved.nights.nights());

        let summary = reconcile(&resolved.allocation, resolved.accommodation.as_ref(), nights);
        let alternatives = reconcile_alternatives(&resolved.allocation, &resolved.alternatives, nights);

        info!(
            nights,
            remaining = summary.remaining_budget,
            overflow = summary.has_overflow,
            alternatives = alternatives.len(),
            "Budget reconciled"
        );

        let currency = resolved
            .accommodation
            .as_ref()
            .map_or_else(|| defaults.currency.clone(), |a| a.currency.clone());

        Self {
            destination: input.request.destination.clone(),
            currency,
            nights: resolved.nights,
            trip_days: resolved.trip_days,
            allocation: resolved.allocation,
            accommodation: resolved.accommodation,
            summary,
            alternatives,
            issues: resolved.issues,
        }
    }
}

/// Whole amounts print without decimals, anything else with cents
fn amount(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.2}")
    }
}

/// Rounded to whole units, halves away from zero
fn whole(value: f64) -> String {
    format!("{:.0}", value.round())
}

impl fmt::Display for BudgetReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.destination {
            Some(destination) => writeln!(
                f,
                "Budget Breakdown: {destination} ({}-day trip, {})",
                self.trip_days, self.nights
            )?,
            None => writeln!(f, "Budget Breakdown ({}-day trip, {})", self.trip_days, self.nights)?,
        }

        for (label, value) in self.allocation.categories() {
            writeln!(f, "  {label:<24}{:>12} {}", amount(value), self.currency)?;
        }

        if let Some(hotel) = &self.accommodation {
            writeln!(
                f,
                "  {:<24}{:>12} {}",
                hotel.display_name(),
                amount(self.summary.primary_accommodation_total),
                self.currency
            )?;
            writeln!(
                f,
                "  {:<24}{:>12} {}",
                "  per night",
                whole(self.summary.primary_accommodation_per_night),
                self.currency
            )?;
        } else {
            writeln!(f, "  Hotel booking required separately.")?;
        }

        if self.summary.has_overflow {
            writeln!(
                f,
                "  ⚠️ Budget Overflow: {} {} over budget",
                whole(self.summary.accommodation_overflow),
                self.currency
            )?;
            writeln!(f, "     Consider alternative hotels or adjust your budget")?;
        }

        writeln!(
            f,
            "  {:<24}{:>12} {}",
            "Base Budget",
            amount(self.allocation.total_trip_budget),
            self.currency
        )?;
        if self.summary.has_accommodation() {
            writeln!(
                f,
                "  {:<24}{:>12} {}",
                "Total with Hotels",
                whole(self.summary.combined_total),
                self.currency
            )?;
        } else {
            writeln!(
                f,
                "  {:<24}{:>12} {}",
                "Total Budget",
                amount(self.summary.combined_total),
                self.currency
            )?;
        }

        if !self.alternatives.is_empty() {
            writeln!(f)?;
            writeln!(f, "Alternative Options")?;
            for quote in &self.alternatives {
                let marker = if quote.has_overflow { " (over budget)" } else { "" };
                writeln!(
                    f,
                    "  {:<24}{:>12} {} total, {} per night{marker}",
                    quote.name,
                    amount(quote.total),
                    quote.currency,
                    whole(quote.per_night)
                )?;
            }
        }

        if !self.issues.is_empty() {
            writeln!(f)?;
            writeln!(f, "Treated as 0:")?;
            for issue in &self.issues {
                writeln!(f, "  {issue}")?;
            }
        }

        Ok(())
    }
}
