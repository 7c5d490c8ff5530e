use serde::{Deserialize, Serialize};

use super::input::Field;

/// Fields shown for every method.
pub const SHARED_FIELDS: [Field; 4] = [
    Field::FuelPrice,
    Field::Consumption,
    Field::TankSize,
    Field::RentalCost,
];

/// Measurement strategy used to estimate how much fuel a trip consumed.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum Method {
    /// Trip A/B odometer reading with a correction percentage.
    #[default]
    #[value(alias = "trip")]
    TripMeter,
    /// Plain distance (map or route planner).
    Distance,
    /// Liters actually pumped into the tank.
    #[value(alias = "fuel")]
    ActualFuel,
    /// Dashboard gauge marks before and after the trip.
    #[value(alias = "gauge")]
    FuelGauge,
}

impl Method {
    pub const ALL: [Method; 4] = [
        Method::TripMeter,
        Method::Distance,
        Method::ActualFuel,
        Method::FuelGauge,
    ];

    /// English display name used in reports.
    pub fn display_name(self) -> &'static str {
        match self {
            Method::TripMeter => "Trip Meter",
            Method::Distance => "Distance",
            Method::ActualFuel => "Actual Fuel",
            Method::FuelGauge => "Fuel Gauge",
        }
    }

    /// Key of the localized label in the language pack.
    pub fn label_key(self) -> &'static str {
        match self {
            Method::TripMeter => "method.trip",
            Method::Distance => "method.distance",
            Method::ActualFuel => "method.fuel",
            Method::FuelGauge => "method.gauge",
        }
    }

    /// Fields read only by this method.
    pub fn fields(self) -> &'static [Field] {
        match self {
            Method::TripMeter => &[Field::TripKm, Field::TripError],
            Method::Distance => &[Field::DistanceKm],
            Method::ActualFuel => &[Field::FuelLiters, Field::FuelKmDriven],
            Method::FuelGauge => &[
                Field::GaugeStart,
                Field::GaugeEnd,
                Field::GaugeTotalMarks,
                Field::GaugeKmDriven,
            ],
        }
    }

    /// Whether the consumption rate and the condition modifier take part in the formula.
    pub fn uses_consumption_rate(self) -> bool {
        matches!(self, Method::TripMeter | Method::Distance)
    }
}

/// One driving condition toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Condition {
    City,
    Highway,
    AirConditioning,
}

impl Condition {
    pub const ALL: [Condition; 3] = [Condition::City, Condition::Highway, Condition::AirConditioning];

    /// Multiplicative factor applied to consumption while the condition is on.
    pub fn factor(self) -> f64 {
        match self {
            Condition::City => 1.10,
            Condition::Highway => 0.90,
            Condition::AirConditioning => 1.05,
        }
    }

    pub fn label_key(self) -> &'static str {
        match self {
            Condition::City => "condition.city",
            Condition::Highway => "condition.highway",
            Condition::AirConditioning => "condition.ac",
        }
    }
}

/// Set of active driving conditions. Any subset may be on at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ConditionFlags {
    pub city: bool,
    pub highway: bool,
    pub ac: bool,
}

impl ConditionFlags {
    pub fn is_set(&self, condition: Condition) -> bool {
        match condition {
            Condition::City => self.city,
            Condition::Highway => self.highway,
            Condition::AirConditioning => self.ac,
        }
    }

    pub fn set(&mut self, condition: Condition, on: bool) {
        match condition {
            Condition::City => self.city = on,
            Condition::Highway => self.highway = on,
            Condition::AirConditioning => self.ac = on,
        }
    }

    /// Product of the factors of every active condition, starting at 1.0.
    pub fn modifier(&self) -> f64 {
        Condition::ALL
            .iter()
            .filter(|c| self.is_set(**c))
            .fold(1.0, |acc, c| acc * c.factor())
    }
}
