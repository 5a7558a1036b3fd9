//! Data models for `tripbudget`
//!
//! This module contains the core domain models organized by concern:
//! - Allocation: the provider's split of the trip budget across categories
//! - Accommodation: the primary hotel and alternative options
//! - Trip: trip length in nights
//! - Summary: the reconciled figures handed to the presentation layer

pub mod accommodation;
pub mod allocation;
pub mod summary;
pub mod trip;

// Re-export all public types for convenient access
pub use accommodation::{AccommodationOption, AlternativeHotel};
pub use allocation::BudgetAllocation;
pub use summary::{AccommodationQuote, BudgetSummary};
pub use trip::TripLength;
