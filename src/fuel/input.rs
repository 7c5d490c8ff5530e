use std::collections::HashMap;

/// Default fuel price [VND/L].
pub const DEFAULT_FUEL_PRICE: f64 = 20_000.0;
/// Default consumption [L/100km].
pub const DEFAULT_CONSUMPTION: f64 = 8.0;
/// Default tank size [L].
pub const DEFAULT_TANK_SIZE: f64 = 55.0;
/// Default number of marks on the fuel gauge.
pub const DEFAULT_GAUGE_MARKS: f64 = 8.0;

/// Every user-editable numeric field of the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    FuelPrice,
    Consumption,
    TankSize,
    RentalCost,
    TripKm,
    TripError,
    DistanceKm,
    FuelLiters,
    FuelKmDriven,
    GaugeStart,
    GaugeEnd,
    GaugeTotalMarks,
    GaugeKmDriven,
}

/// Stepper increment and bounds of a field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepSpec {
    pub step: f64,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl Field {
    pub const ALL: [Field; 13] = [
        Field::FuelPrice,
        Field::Consumption,
        Field::TankSize,
        Field::RentalCost,
        Field::TripKm,
        Field::TripError,
        Field::DistanceKm,
        Field::FuelLiters,
        Field::FuelKmDriven,
        Field::GaugeStart,
        Field::GaugeEnd,
        Field::GaugeTotalMarks,
        Field::GaugeKmDriven,
    ];

    /// Value used when the text is empty, unparsable, non-finite or zero.
    pub fn default_value(self) -> f64 {
        match self {
            Field::FuelPrice => DEFAULT_FUEL_PRICE,
            Field::Consumption => DEFAULT_CONSUMPTION,
            Field::TankSize => DEFAULT_TANK_SIZE,
            Field::GaugeTotalMarks => DEFAULT_GAUGE_MARKS,
            _ => 0.0,
        }
    }

    pub fn step_spec(self) -> StepSpec {
        let (step, min, max) = match self {
            Field::FuelPrice => (500.0, Some(0.0), None),
            Field::Consumption => (0.5, Some(1.0), Some(30.0)),
            Field::TankSize => (1.0, Some(10.0), Some(200.0)),
            Field::RentalCost => (50_000.0, Some(0.0), None),
            Field::TripKm | Field::DistanceKm | Field::FuelKmDriven | Field::GaugeKmDriven => {
                (10.0, Some(0.0), None)
            }
            Field::TripError => (1.0, Some(-20.0), Some(20.0)),
            Field::FuelLiters => (1.0, Some(0.0), None),
            Field::GaugeStart | Field::GaugeEnd => (1.0, Some(0.0), Some(16.0)),
            Field::GaugeTotalMarks => (1.0, Some(1.0), Some(16.0)),
        };
        StepSpec { step, min, max }
    }

    /// Key of the localized field label.
    pub fn label_key(self) -> &'static str {
        match self {
            Field::FuelPrice => "field.fuel_price",
            Field::Consumption => "field.consumption",
            Field::TankSize => "field.tank_size",
            Field::RentalCost => "field.rental_cost",
            Field::TripKm => "field.trip_km",
            Field::TripError => "field.trip_error",
            Field::DistanceKm => "field.distance_km",
            Field::FuelLiters => "field.fuel_liters",
            Field::FuelKmDriven => "field.fuel_km_driven",
            Field::GaugeStart => "field.gauge_start",
            Field::GaugeEnd => "field.gauge_end",
            Field::GaugeTotalMarks => "field.gauge_total_marks",
            Field::GaugeKmDriven => "field.gauge_km_driven",
        }
    }
}

/// Parses a raw field text, falling back to `default` for anything that is not
/// a finite, non-zero number.
pub fn parse_or(raw: &str, default: f64) -> f64 {
    match raw.trim().parse::<f64>() {
        Ok(v) if v.is_finite() && v != 0.0 => v,
        _ => default,
    }
}

/// Text of every form field as typed by the user.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawFields {
    values: HashMap<Field, String>,
}

impl RawFields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: Field) -> &str {
        self.values.get(&field).map(String::as_str).unwrap_or("")
    }

    pub fn set(&mut self, field: Field, text: impl Into<String>) {
        self.values.insert(field, text.into());
    }

    pub fn with(mut self, field: Field, text: impl Into<String>) -> Self {
        self.set(field, text);
        self
    }

    /// Parsed value of a field after the fallback policy.
    pub fn value(&self, field: Field) -> f64 {
        parse_or(self.get(field), field.default_value())
    }
}

/// Numeric inputs of one calculation, already defaulted.
#[derive(Debug, Clone, PartialEq)]
pub struct CalculationInput {
    /// Trip meter reading [km]
    pub trip_km: f64,
    /// Trip meter error [%], positive when the meter under-reads
    pub trip_error_percent: f64,
    /// Distance [km]
    pub distance_km: f64,
    /// Liters pumped [L]
    pub fuel_liters: f64,
    /// Distance driven on the pumped fuel [km]
    pub fuel_km_driven: f64,
    /// Gauge marks at the start
    pub gauge_start: f64,
    /// Gauge marks at the end
    pub gauge_end: f64,
    /// Total marks on the gauge
    pub gauge_total_marks: f64,
    /// Distance driven between gauge readings [km]
    pub gauge_km_driven: f64,
    /// Fuel price [VND/L]
    pub fuel_price_per_liter: f64,
    /// Consumption [L/100km]
    pub consumption_per_100km: f64,
    /// Tank size [L]
    pub tank_size_liters: f64,
    /// Vehicle rental [VND]
    pub rental_cost: f64,
}

impl Default for CalculationInput {
    fn default() -> Self {
        Self::from_raw(&RawFields::default())
    }
}

impl CalculationInput {
    /// Applies the per-field fallback policy to the raw form text.
    pub fn from_raw(raw: &RawFields) -> Self {
        Self {
            trip_km: raw.value(Field::TripKm),
            trip_error_percent: raw.value(Field::TripError),
            distance_km: raw.value(Field::DistanceKm),
            fuel_liters: raw.value(Field::FuelLiters),
            fuel_km_driven: raw.value(Field::FuelKmDriven),
            gauge_start: raw.value(Field::GaugeStart),
            gauge_end: raw.value(Field::GaugeEnd),
            gauge_total_marks: raw.value(Field::GaugeTotalMarks),
            gauge_km_driven: raw.value(Field::GaugeKmDriven),
            fuel_price_per_liter: raw.value(Field::FuelPrice),
            consumption_per_100km: raw.value(Field::Consumption),
            tank_size_liters: raw.value(Field::TankSize),
            rental_cost: raw.value(Field::RentalCost),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn garbage_and_zero_fall_back_to_defaults() {
        assert_eq!(parse_or("abc", 8.0), 8.0);
        assert_eq!(parse_or("", 55.0), 55.0);
        assert_eq!(parse_or("0", 20_000.0), 20_000.0);
        assert_eq!(parse_or("inf", 8.0), 8.0);
        assert_eq!(parse_or(" 7.5 ", 8.0), 7.5);
        assert_eq!(parse_or("-3", 0.0), -3.0);
    }

    #[test]
    fn empty_form_uses_documented_defaults() {
        let input = CalculationInput::default();
        assert_eq!(input.fuel_price_per_liter, 20_000.0);
        assert_eq!(input.consumption_per_100km, 8.0);
        assert_eq!(input.tank_size_liters, 55.0);
        assert_eq!(input.gauge_total_marks, 8.0);
        assert_eq!(input.trip_km, 0.0);
        assert_eq!(input.rental_cost, 0.0);
    }

    #[test]
    fn raw_fields_are_parsed_per_field() {
        let raw = RawFields::new()
            .with(Field::DistanceKm, "300")
            .with(Field::Consumption, "7.5")
            .with(Field::FuelPrice, "22000");
        let input = CalculationInput::from_raw(&raw);
        assert_eq!(input.distance_km, 300.0);
        assert_eq!(input.consumption_per_100km, 7.5);
        assert_eq!(input.fuel_price_per_liter, 22_000.0);
    }
}
