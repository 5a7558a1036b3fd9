//! Accommodation models for the primary hotel and its alternatives

use serde::{Deserialize, Serialize};

/// Primary accommodation chosen by the itinerary provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccommodationOption {
    /// Price for the entire stay
    pub total_price_for_stay: f64,
    /// Currency code (e.g. "USD")
    pub currency: String,
    /// Hotel name
    pub name: Option<String>,
    /// Street address
    pub address: Option<String>,
    /// Provider-side hotel identifier
    pub hotel_id: Option<String>,
    /// Why the provider picked this hotel
    pub rationale: Option<String>,
}

impl AccommodationOption {
    /// Create an accommodation option with only a price and currency
    #[must_use]
    pub fn new<S: Into<String>>(total_price_for_stay: f64, currency: S) -> Self {
        Self {
            total_price_for_stay,
            currency: currency.into(),
            name: None,
            address: None,
            hotel_id: None,
            rationale: None,
        }
    }

    /// Attach a hotel name
    #[must_use]
    pub fn with_name<S: Into<String>>(mut self, name: S) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Name for display, or a placeholder when the provider gave none
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("Hotel Accommodation")
    }
}

/// Alternative accommodation offered next to the primary hotel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlternativeHotel {
    /// Hotel name
    pub name: String,
    /// Street address
    pub address: Option<String>,
    /// Provider-side hotel identifier
    pub hotel_id: Option<String>,
    /// Why the provider suggests it
    pub rationale: Option<String>,
    /// Currency code
    pub currency: String,
    /// Price for the entire stay
    pub total_price_for_stay: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_placeholder() {
        let hotel = AccommodationOption::new(700.0, "USD");
        assert_eq!(hotel.display_name(), "Hotel Accommodation");

        let hotel = hotel.with_name("Hotel Figueroa");
        assert_eq!(hotel.display_name(), "Hotel Figueroa");
    }
}
