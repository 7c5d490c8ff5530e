use super::calculator::{gauge_liters_used, liters_per_mark};
use super::input::CalculationInput;

/// Breakdown of a gauge reading shown next to the gauge form.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GaugeSummary {
    pub tank_size_liters: f64,
    pub total_marks: f64,
    pub liters_per_mark: f64,
    pub marks_used: f64,
    pub liters_used: f64,
}

/// Describes how the gauge reading turns into liters.
pub fn gauge_summary(input: &CalculationInput) -> GaugeSummary {
    let per_mark = liters_per_mark(input.tank_size_liters, input.gauge_total_marks);
    GaugeSummary {
        tank_size_liters: input.tank_size_liters,
        total_marks: input.gauge_total_marks,
        liters_per_mark: per_mark,
        marks_used: input.gauge_start - input.gauge_end,
        liters_used: gauge_liters_used(input.gauge_start, input.gauge_end, per_mark),
    }
}
