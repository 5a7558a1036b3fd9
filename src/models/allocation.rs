//! Budget allocation model

use serde::{Deserialize, Serialize};

/// Split of a trip's total budget across spending categories
///
/// Amounts come straight from the itinerary provider. The category totals are
/// expected to sum to at most `total_trip_budget`, but nothing enforces it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BudgetAllocation {
    /// Base budget for the whole trip
    pub total_trip_budget: f64,
    /// Food and dining
    pub food_budget_total: f64,
    /// Activities and attractions
    pub activities_budget_total: f64,
    /// Local transportation
    pub transportation_budget: f64,
    /// Shopping
    pub shopping_budget: f64,
}

impl BudgetAllocation {
    /// Create an allocation with a base budget and no category spending
    #[must_use]
    pub fn new(total_trip_budget: f64) -> Self {
        Self {
            total_trip_budget,
            ..Self::default()
        }
    }

    /// Set the four category totals
    #[must_use]
    pub fn with_categories(
        mut self,
        food: f64,
        activities: f64,
        transportation: f64,
        shopping: f64,
    ) -> Self {
        self.food_budget_total = food;
        self.activities_budget_total = activities;
        self.transportation_budget = transportation;
        self.shopping_budget = shopping;
        self
    }

    /// Sum of all non-accommodation categories
    #[must_use]
    pub fn other_expenses(&self) -> f64 {
        self.food_budget_total
            + self.activities_budget_total
            + self.transportation_budget
            + self.shopping_budget
    }

    /// Base budget left after the categories. Negative when they already exceed it.
    #[must_use]
    pub fn remaining(&self) -> f64 {
        self.total_trip_budget - self.other_expenses()
    }

    /// Category lines in display order
    #[must_use]
    pub fn categories(&self) -> [(&'static str, f64); 4] {
        [
            ("Food Budget", self.food_budget_total),
            ("Activities Budget", self.activities_budget_total),
            ("Transportation", self.transportation_budget),
            ("Shopping Budget", self.shopping_budget),
        ]
    }
}
