use super::input::CalculationInput;
use super::method::{ConditionFlags, Method};

/// Outputs of one calculation cycle.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CalculationResult {
    /// Fuel consumed [L]
    pub liters_used: f64,
    /// Distance the cost is spread over [km]
    pub km_driven: f64,
    /// Fuel cost [VND]
    pub fuel_cost: f64,
    /// Cost per kilometer [VND/km]
    pub cost_per_km: f64,
    /// Efficiency [km/L]
    pub efficiency_km_per_liter: f64,
    /// Fuel cost plus rental [VND]
    pub total_cost: f64,
}

/// Trip meter distance corrected by the meter error percentage.
pub fn adjusted_trip_km(trip_km: f64, error_percent: f64) -> f64 {
    trip_km * (1.0 + error_percent / 100.0)
}

/// Liters represented by one gauge mark. Zero marks give zero.
pub fn liters_per_mark(tank_size_liters: f64, total_marks: f64) -> f64 {
    if total_marks != 0.0 {
        tank_size_liters / total_marks
    } else {
        0.0
    }
}

/// Liters consumed between two gauge readings, never negative.
pub fn gauge_liters_used(start: f64, end: f64, liters_per_mark: f64) -> f64 {
    ((start - end) * liters_per_mark).max(0.0)
}

/// Non-finite and negative values become 0.
fn measured(value: f64) -> f64 {
    if value.is_finite() {
        value.max(0.0)
    } else {
        0.0
    }
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

fn liters_from_rate(km: f64, consumption_per_100km: f64, modifier: f64) -> f64 {
    km * consumption_per_100km / 100.0 * modifier
}

/// Computes fuel cost and efficiency for the selected method.
///
/// The condition modifier and consumption rate only apply to the distance based
/// methods; actual fuel and gauge readings already describe what was burned.
/// Liters and kilometers are never negative and no field of the result is NaN
/// or infinite.
pub fn compute(method: Method, input: &CalculationInput, flags: ConditionFlags) -> CalculationResult {
    let modifier = flags.modifier();
    let (liters, km) = match method {
        Method::TripMeter => {
            let km = adjusted_trip_km(input.trip_km, input.trip_error_percent);
            (liters_from_rate(km, input.consumption_per_100km, modifier), km)
        }
        Method::Distance => {
            let km = input.distance_km;
            (liters_from_rate(km, input.consumption_per_100km, modifier), km)
        }
        Method::ActualFuel => (input.fuel_liters, input.fuel_km_driven),
        Method::FuelGauge => {
            let per_mark = liters_per_mark(input.tank_size_liters, input.gauge_total_marks);
            (
                gauge_liters_used(input.gauge_start, input.gauge_end, per_mark),
                input.gauge_km_driven,
            )
        }
    };

    let liters_used = measured(liters);
    let km_driven = measured(km);

    let fuel_cost = finite_or_zero(liters_used * input.fuel_price_per_liter);
    let cost_per_km = if km_driven > 0.0 {
        finite_or_zero(fuel_cost / km_driven)
    } else {
        0.0
    };
    let efficiency_km_per_liter = if liters_used > 0.0 && km_driven > 0.0 {
        finite_or_zero(km_driven / liters_used)
    } else {
        0.0
    };

    CalculationResult {
        liters_used,
        km_driven,
        fuel_cost,
        cost_per_km,
        efficiency_km_per_liter,
        total_cost: finite_or_zero(fuel_cost + input.rental_cost),
    }
}
