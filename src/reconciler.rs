//! Budget reconciliation
//!
//! Derives the remaining non-accommodation budget, the per-night price of the
//! primary hotel, how far that hotel overflows what remains, and the
//! combined total. Pure functions: no I/O, no state, never fails.

use crate::models::{
    AccommodationOption, AccommodationQuote, AlternativeHotel, BudgetAllocation, BudgetSummary,
    TripLength,
};

/// Reconcile an allocation against the primary accommodation.
///
/// `nights` below 1 is treated as 1. The combined total adds the hotel to the
/// base budget even though the hotel is also measured against the remaining
/// budget; that is the display convention consumers expect.
#[tracing::instrument(name = "reconcile", level = "debug", skip(allocation, accommodation))]
#[must_use]
pub fn reconcile(
    allocation: &BudgetAllocation,
    accommodation: Option<&AccommodationOption>,
    nights: i64,
) -> BudgetSummary {
    let nights = TripLength::from_nights(nights);
    let remaining_budget = allocation.remaining();
    let primary_accommodation_total = accommodation.map_or(0.0, |a| a.total_price_for_stay);
    let primary_accommodation_per_night = primary_accommodation_total / nights.as_divisor();
    let accommodation_overflow = primary_accommodation_total - remaining_budget;
    let has_overflow = accommodation_overflow > 0.0;

    if has_overflow {
        tracing::debug!(
            overflow = accommodation_overflow,
            remaining = remaining_budget,
            "Accommodation exceeds remaining budget"
        );
    }

    BudgetSummary {
        remaining_budget,
        primary_accommodation_total,
        primary_accommodation_per_night,
        accommodation_overflow,
        has_overflow,
        combined_total: allocation.total_trip_budget + primary_accommodation_total,
    }
}

/// Quote every alternative hotel against the same remaining budget, preserving order.
#[must_use]
pub fn reconcile_alternatives(
    allocation: &BudgetAllocation,
    alternatives: &[AlternativeHotel],
    nights: i64,
) -> Vec<AccommodationQuote> {
    let divisor = TripLength::from_nights(nights).as_divisor();
    let remaining = allocation.remaining();

    alternatives
        .iter()
        .map(|hotel| {
            let overflow = hotel.total_price_for_stay - remaining;
            AccommodationQuote {
                name: hotel.name.clone(),
                currency: hotel.currency.clone(),
                total: hotel.total_price_for_stay,
                per_night: hotel.total_price_for_stay / divisor,
                overflow,
                has_overflow: overflow > 0.0,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn sample_allocation() -> BudgetAllocation {
        BudgetAllocation::new(2000.0).with_categories(400.0, 300.0, 150.0, 100.0)
    }

    fn alternative(name: &str, total: f64) -> AlternativeHotel {
        AlternativeHotel {
            name: name.to_string(),
            address: None,
            hotel_id: None,
            rationale: None,
            currency: "USD".to_string(),
            total_price_for_stay: total,
        }
    }

    #[test]
    fn test_hotel_over_remaining_budget() {
        let hotel = AccommodationOption::new(1200.0, "USD");
        let summary = reconcile(&sample_allocation(), Some(&hotel), 6);

        assert_eq!(summary.remaining_budget, 1050.0);
        assert_eq!(summary.primary_accommodation_total, 1200.0);
        assert_eq!(summary.primary_accommodation_per_night, 200.0);
        assert_eq!(summary.accommodation_overflow, 150.0);
        assert!(summary.has_overflow);
        assert_eq!(summary.combined_total, 3200.0);
    }

    #[test]
    fn test_no_accommodation() {
        let summary = reconcile(&sample_allocation(), None, 6);

        assert_eq!(summary.remaining_budget, 1050.0);
        assert_eq!(summary.primary_accommodation_total, 0.0);
        assert_eq!(summary.primary_accommodation_per_night, 0.0);
        assert_eq!(summary.accommodation_overflow, -1050.0);
        assert!(!summary.has_overflow);
        assert_eq!(summary.combined_total, 2000.0);
    }

    #[rstest]
    #[case(0)]
    #[case(-1)]
    #[case(-365)]
    fn test_non_positive_nights_clamp_to_one(#[case] nights: i64) {
        let hotel = AccommodationOption::new(700.0, "EUR");
        let summary = reconcile(&BudgetAllocation::new(1000.0), Some(&hotel), nights);

        assert_eq!(summary.primary_accommodation_per_night, 700.0);
        assert!(summary.primary_accommodation_per_night.is_finite());
    }

    #[test]
    fn test_exact_fit_is_not_overflow() {
        let hotel = AccommodationOption::new(1050.0, "USD");
        let summary = reconcile(&sample_allocation(), Some(&hotel), 3);

        assert_eq!(summary.accommodation_overflow, 0.0);
        assert!(!summary.has_overflow);
    }

    #[test]
    fn test_categories_exceeding_base_budget() {
        let allocation = BudgetAllocation::new(500.0).with_categories(400.0, 300.0, 0.0, 0.0);
        let summary = reconcile(&allocation, None, 2);

        assert_eq!(summary.remaining_budget, -200.0);
        // Even without a hotel, a negative remainder means an overflow of 200
        assert_eq!(summary.accommodation_overflow, 200.0);
        assert!(summary.has_overflow);
        assert_eq!(summary.combined_total, 500.0);
    }

    #[rstest]
    #[case(0.0)]
    #[case(450.0)]
    #[case(5000.0)]
    fn test_combined_total_ignores_overflow(#[case] hotel_total: f64) {
        let hotel = AccommodationOption::new(hotel_total, "USD");
        let summary = reconcile(&sample_allocation(), Some(&hotel), 4);
        assert_eq!(summary.combined_total, 2000.0 + hotel_total);
    }

    #[test]
    fn test_idempotent() {
        let allocation = BudgetAllocation::new(1234.56).with_categories(100.1, 200.2, 33.3, 7.7);
        let hotel = AccommodationOption::new(987.65, "USD");

        let first = reconcile(&allocation, Some(&hotel), 3);
        let second = reconcile(&allocation, Some(&hotel), 3);

        assert_eq!(first, second);
        assert_eq!(
            first.primary_accommodation_per_night.to_bits(),
            second.primary_accommodation_per_night.to_bits()
        );
        assert_eq!(
            first.remaining_budget.to_bits(),
            second.remaining_budget.to_bits()
        );
    }

    #[test]
    fn test_alternatives_quoted_against_remaining_budget() {
        let alternatives = vec![alternative("Budget Inn", 600.0), alternative("Grand Palace", 1800.0)];
        let quotes = reconcile_alternatives(&sample_allocation(), &alternatives, 6);

        assert_eq!(quotes.len(), 2);
        assert_eq!(quotes[0].name, "Budget Inn");
        assert_eq!(quotes[0].per_night, 100.0);
        assert_eq!(quotes[0].overflow, -450.0);
        assert!(!quotes[0].has_overflow);

        assert_eq!(quotes[1].name, "Grand Palace");
        assert_eq!(quotes[1].per_night, 300.0);
        assert_eq!(quotes[1].overflow, 750.0);
        assert!(quotes[1].has_overflow);
    }

    #[test]
    fn test_alternatives_with_zero_nights() {
        let quotes = reconcile_alternatives(&sample_allocation(), &[alternative("Motel", 90.0)], 0);
        assert_eq!(quotes[0].per_night, 90.0);
    }
}
