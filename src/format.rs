//! Display-boundary formatting shared by the screen and every report.

use crate::fuel::{CalculationResult, GaugeSummary};

/// Separator placed between groups of three digits.
pub const THOUSANDS_SEPARATOR: char = '.';

/// Rounds to the nearest whole unit. Negative zero collapses to zero.
pub fn round_whole(value: f64) -> i64 {
    if !value.is_finite() {
        return 0;
    }
    value.round() as i64
}

/// Groups the digits of an integer by threes: `1234567` -> `"1.234.567"`.
pub fn group_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(THOUSANDS_SEPARATOR);
        }
        out.push(ch);
    }
    out
}

/// Rounded, grouped money amount without unit.
pub fn format_money(value: f64) -> String {
    group_thousands(round_whole(value))
}

/// Exactly one fractional digit.
pub fn format_one_decimal(value: f64) -> String {
    if !value.is_finite() {
        return "0.0".to_string();
    }
    let s = format!("{value:.1}");
    if s == "-0.0" {
        "0.0".to_string()
    } else {
        s
    }
}

/// Shortest plain decimal form (`8`, `7.5`).
pub fn format_plain(value: f64) -> String {
    if !value.is_finite() || value == 0.0 {
        return "0".to_string();
    }
    format!("{value}")
}

/// Display strings of one calculation result.
///
/// Built once per calculation cycle; the on-screen view and the export snapshot
/// both read these strings so they cannot drift apart.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormattedResult {
    pub fuel_cost: String,
    pub cost_per_km: String,
    pub liters_used: String,
    pub efficiency: String,
    pub rental: String,
    pub total_cost: String,
}

impl FormattedResult {
    pub fn new(result: &CalculationResult, rental_cost: f64) -> Self {
        Self {
            fuel_cost: format_money(result.fuel_cost),
            cost_per_km: format_money(result.cost_per_km),
            liters_used: format_one_decimal(result.liters_used),
            efficiency: format_one_decimal(result.efficiency_km_per_liter),
            rental: format_money(rental_cost),
            total_cost: format_money(result.total_cost),
        }
    }
}

/// Values substituted into the localized gauge summary template.
pub fn gauge_vars(summary: &GaugeSummary) -> Vec<(&'static str, String)> {
    vec![
        ("tank", format_plain(summary.tank_size_liters)),
        ("marks", format_plain(summary.total_marks)),
        ("per_mark", format_one_decimal(summary.liters_per_mark)),
        ("used", format_plain(summary.marks_used)),
        ("liters", format_one_decimal(summary.liters_used)),
    ]
}
