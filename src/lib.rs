//! `tripbudget` - budget reconciliation for itinerary planning
//!
//! This library takes the budget allocation and hotel pricing an itinerary
//! provider returns and derives what the traveller sees: the budget left
//! after spending categories, the hotel's per-night price, how far the hotel
//! overflows what remains, and the total including accommodation.

pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod payload;
pub mod reconciler;
pub mod report;
pub mod telemetry;

// Re-export core types for public API
pub use config::TripBudgetConfig;
pub use error::TripBudgetError;
pub use models::{
    AccommodationOption, AccommodationQuote, AlternativeHotel, BudgetAllocation, BudgetSummary,
    TripLength,
};
pub use payload::{InputIssue, ItineraryPayload, PlannerInput, TripRequest};
pub use reconciler::{reconcile, reconcile_alternatives};
pub use report::BudgetReport;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, TripBudgetError>;
