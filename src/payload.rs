//! Itinerary payload parsing
//!
//! The itinerary provider returns loosely shaped JSON: amounts may be
//! numbers, numeric strings, `null` or missing entirely. This module accepts
//! that shape, turns every amount into an `f64` (0 when absent or
//! non-numeric) and records each non-numeric value as an [`InputIssue`].
//! Structural problems, such as a `budget_allocation` that is not an object,
//! are parse errors.

use std::fmt;
use std::io::Read;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, instrument, warn};

use crate::Result;
use crate::config::DefaultsConfig;
use crate::models::{AccommodationOption, AlternativeHotel, BudgetAllocation, TripLength};

/// Budget allocation as sent by the provider
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawBudgetAllocation {
    #[serde(default)]
    pub total_trip_budget: Option<Value>,
    #[serde(default)]
    pub food_budget_total: Option<Value>,
    #[serde(default)]
    pub activities_budget_total: Option<Value>,
    #[serde(default)]
    pub transportation_budget: Option<Value>,
    #[serde(default)]
    pub shopping_budget: Option<Value>,
}

/// Hotel entry as sent by the provider, for both the primary and alternative hotels
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawHotel {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default, alias = "hotelId")]
    pub hotel_id: Option<String>,
    #[serde(default)]
    pub rationale: Option<String>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub total_price_for_stay: Option<Value>,
    /// Alternatives carry the stay total under this key
    #[serde(default)]
    pub price_per_night: Option<Value>,
}

/// Itinerary document returned by the provider
///
/// Only the parts that feed budget reconciliation are modelled; everything
/// else in the document is ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ItineraryPayload {
    #[serde(default)]
    pub budget_allocation: Option<RawBudgetAllocation>,
    #[serde(default)]
    pub hotel_details: Option<RawHotel>,
    #[serde(default)]
    pub alternative_hotel_options: Option<Vec<RawHotel>>,
    /// Itinerary days; only their count is used
    #[serde(default)]
    pub days: Option<Vec<Value>>,
}

/// The traveller's request that accompanies an itinerary
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripRequest {
    #[serde(default)]
    pub destination: Option<String>,
    /// Requested budget, used when the allocation has no base budget
    #[serde(default)]
    pub budget: Option<Value>,
    #[serde(default, alias = "start_date")]
    pub start_date: Option<String>,
    #[serde(default, alias = "end_date")]
    pub end_date: Option<String>,
    /// Trip length in days as typed into the form; number or numeric string
    #[serde(default, alias = "trip_length")]
    pub trip_length: Option<Value>,
}

/// A request and its itinerary, as the front-end passes them around
#[derive(Debug, Clone, Default)]
pub struct PlannerInput {
    pub request: TripRequest,
    pub itinerary: ItineraryPayload,
}

/// A payload field that held a non-numeric value and was read as 0
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InputIssue {
    /// Dotted path of the offending field
    pub field: String,
    /// What was wrong with it
    pub reason: String,
}

impl fmt::Display for InputIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.reason)
    }
}

/// Typed inputs for the reconciler, extracted from a [`PlannerInput`]
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedItinerary {
    pub allocation: BudgetAllocation,
    pub accommodation: Option<AccommodationOption>,
    pub alternatives: Vec<AlternativeHotel>,
    pub nights: TripLength,
    /// Days in the trip for headings: requested length, else itinerary days, else fallback
    pub trip_days: u32,
    pub issues: Vec<InputIssue>,
}

/// Reads amounts leniently and remembers what it had to zero out
#[derive(Debug, Default)]
struct AmountReader {
    issues: Vec<InputIssue>,
}

impl AmountReader {
    fn read(&mut self, field: &str, value: Option<&Value>) -> f64 {
        match value {
            None | Some(Value::Null) => 0.0,
            Some(Value::Number(number)) => match number.as_f64() {
                Some(amount) if amount.is_finite() => amount,
                _ => self.reject(field, format!("number {number} is out of range")),
            },
            Some(Value::String(text)) if text.trim().is_empty() => 0.0,
            Some(Value::String(text)) => match text.trim().parse::<f64>() {
                Ok(amount) if amount.is_finite() => amount,
                _ => self.reject(field, format!("'{text}' is not a number")),
            },
            Some(other) => self.reject(field, format!("expected a number, got {}", json_kind(other))),
        }
    }

    fn reject(&mut self, field: &str, reason: String) -> f64 {
        warn!(field, %reason, "Non-numeric amount treated as 0");
        self.issues.push(InputIssue {
            field: field.to_string(),
            reason,
        });
        0.0
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

impl ItineraryPayload {
    /// Number of itinerary days, if the provider sent any
    #[must_use]
    pub fn day_count(&self) -> Option<usize> {
        self.days.as_ref().map(Vec::len)
    }
}

impl PlannerInput {
    /// Parse either a bare itinerary or a `{ "formData", "itineraryData" }` envelope
    pub fn from_json_str(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_value(value)
    }

    /// Same as [`PlannerInput::from_json_str`], reading from any source
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let value: Value = serde_json::from_reader(reader)?;
        Self::from_value(value)
    }

    fn from_value(mut value: Value) -> Result<Self> {
        let envelope = value.as_object_mut().and_then(|object| {
            let itinerary = object.remove("itineraryData")?;
            Some((object.remove("formData"), itinerary))
        });

        match envelope {
            Some((form, itinerary)) => {
                debug!("Reading request/itinerary envelope");
                let request = match form {
                    Some(Value::Null) | None => TripRequest::default(),
                    Some(form) => serde_json::from_value(form)?,
                };
                Ok(Self {
                    request,
                    itinerary: serde_json::from_value(itinerary)?,
                })
            }
            None => Ok(Self {
                request: TripRequest::default(),
                itinerary: serde_json::from_value(value)?,
            }),
        }
    }

    /// Extract typed reconciler inputs, defaulting whatever is missing
    #[instrument(level = "debug", skip(self, defaults))]
    #[must_use]
    pub fn resolve(&self, defaults: &DefaultsConfig) -> ResolvedItinerary {
        let mut reader = AmountReader::default();
        let raw = self.itinerary.budget_allocation.clone().unwrap_or_default();

        let mut total = reader.read(
            "budget_allocation.total_trip_budget",
            raw.total_trip_budget.as_ref(),
        );
        if total == 0.0 {
            total = reader.read("formData.budget", self.request.budget.as_ref());
            if total != 0.0 {
                debug!(total, "Using requested budget as base budget");
            }
        }

        let allocation = BudgetAllocation::new(total).with_categories(
            reader.read(
                "budget_allocation.food_budget_total",
                raw.food_budget_total.as_ref(),
            ),
            reader.read(
                "budget_allocation.activities_budget_total",
                raw.activities_budget_total.as_ref(),
            ),
            reader.read(
                "budget_allocation.transportation_budget",
                raw.transportation_budget.as_ref(),
            ),
            reader.read(
                "budget_allocation.shopping_budget",
                raw.shopping_budget.as_ref(),
            ),
        );

        let accommodation = self.itinerary.hotel_details.as_ref().and_then(|hotel| {
            let price = reader.read(
                "hotel_details.total_price_for_stay",
                hotel.total_price_for_stay.as_ref(),
            );
            // A zero price means the hotel has to be booked separately
            (price != 0.0).then(|| AccommodationOption {
                total_price_for_stay: price,
                currency: hotel
                    .currency
                    .clone()
                    .unwrap_or_else(|| defaults.currency.clone()),
                name: hotel.name.clone(),
                address: hotel.address.clone(),
                hotel_id: hotel.hotel_id.clone(),
                rationale: hotel.rationale.clone(),
            })
        });

        let alternatives = self
            .itinerary
            .alternative_hotel_options
            .iter()
            .flatten()
            .enumerate()
            .map(|(index, hotel)| {
                let field = format!("alternative_hotel_options[{index}]");
                let price = match hotel.total_price_for_stay.as_ref() {
                    Some(value) if !value.is_null() => {
                        reader.read(&format!("{field}.total_price_for_stay"), Some(value))
                    }
                    _ => reader.read(
                        &format!("{field}.price_per_night"),
                        hotel.price_per_night.as_ref(),
                    ),
                };
                AlternativeHotel {
                    name: hotel
                        .name
                        .clone()
                        .unwrap_or_else(|| format!("Option {}", index + 1)),
                    address: hotel.address.clone(),
                    hotel_id: hotel.hotel_id.clone(),
                    rationale: hotel.rationale.clone(),
                    currency: hotel
                        .currency
                        .clone()
                        .unwrap_or_else(|| defaults.currency.clone()),
                    total_price_for_stay: price,
                }
            })
            .collect();

        let nights = TripLength::derive(
            self.request.start_date.as_deref(),
            self.request.end_date.as_deref(),
            self.itinerary.day_count(),
            defaults.fallback_nights,
        );

        let requested_days = reader.read("formData.tripLength", self.request.trip_length.as_ref());
        let trip_days = if requested_days >= 1.0 && requested_days <= f64::from(u32::MAX) {
            requested_days.round() as u32
        } else {
            self.itinerary
                .day_count()
                .filter(|days| *days > 0)
                .and_then(|days| u32::try_from(days).ok())
                .unwrap_or(defaults.fallback_nights)
        };

        ResolvedItinerary {
            allocation,
            accommodation,
            alternatives,
            nights,
            trip_days,
            issues: reader.issues,
        }
    }
}
