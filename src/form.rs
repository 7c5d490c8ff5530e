//! Form state and the change -> compute -> format pipeline driven by the UIs.

use chrono::{DateTime, Local};
use log::debug;

use crate::config::FormDefaults;
use crate::format::FormattedResult;
use crate::fuel::{
    compute, gauge_summary, parse_or, CalculationInput, CalculationResult, Condition,
    ConditionFlags, Field, GaugeSummary, Method, RawFields, StepSpec,
};
use crate::report::ExportSnapshot;

/// Direction of a stepper button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepAction {
    Increase,
    Decrease,
}

/// Applies one stepper press to the field text and returns the new text.
/// Unparsable text counts as 0 before stepping.
pub fn step_value(raw: &str, spec: StepSpec, action: StepAction) -> String {
    let current = parse_or(raw, 0.0);
    let mut value = match action {
        StepAction::Increase => current + spec.step,
        StepAction::Decrease => current - spec.step,
    };
    if let Some(min) = spec.min {
        value = value.max(min);
    }
    if let Some(max) = spec.max {
        value = value.min(max);
    }
    // 0.1 + 0.2 style noise from repeated fractional steps
    let value = (value * 1e9).round() / 1e9;
    format!("{value}")
}

/// Everything the user has entered. The single source of truth for a calculation.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FormState {
    pub method: Method,
    pub flags: ConditionFlags,
    pub fields: RawFields,
}

impl FormState {
    /// Form pre-filled with the configured shared settings.
    pub fn with_defaults(defaults: &FormDefaults) -> Self {
        let mut state = Self::default();
        state.fields.set(Field::FuelPrice, defaults.fuel_price.clone());
        state.fields.set(Field::Consumption, defaults.consumption.clone());
        state.fields.set(Field::TankSize, defaults.tank_size.clone());
        state.fields.set(Field::GaugeTotalMarks, defaults.gauge_total_marks.clone());
        state
    }

    pub fn input(&self) -> CalculationInput {
        CalculationInput::from_raw(&self.fields)
    }
}

/// A single user interaction.
#[derive(Debug, Clone, PartialEq)]
pub enum FormEvent {
    SelectMethod(Method),
    SetField(Field, String),
    SetCondition(Condition, bool),
    Step(Field, StepAction),
}

/// Result of one calculation cycle together with its display strings.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    pub input: CalculationInput,
    pub result: CalculationResult,
    pub formatted: FormattedResult,
    pub gauge: GaugeSummary,
}

impl Outcome {
    pub fn evaluate(state: &FormState) -> Self {
        let input = state.input();
        let result = compute(state.method, &input, state.flags);
        let formatted = FormattedResult::new(&result, input.rental_cost);
        let gauge = gauge_summary(&input);
        Self {
            input,
            result,
            formatted,
            gauge,
        }
    }
}

/// Owns the form and the latest outcome; every event recomputes synchronously.
#[derive(Debug, Clone)]
pub struct Session {
    state: FormState,
    outcome: Outcome,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(FormState::default())
    }
}

impl Session {
    pub fn new(state: FormState) -> Self {
        let outcome = Outcome::evaluate(&state);
        Self { state, outcome }
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn outcome(&self) -> &Outcome {
        &self.outcome
    }

    /// Applies the event and replaces the outcome.
    pub fn dispatch(&mut self, event: FormEvent) -> &Outcome {
        match event {
            FormEvent::SelectMethod(method) => self.state.method = method,
            FormEvent::SetField(field, text) => self.state.fields.set(field, text),
            FormEvent::SetCondition(condition, on) => self.state.flags.set(condition, on),
            FormEvent::Step(field, action) => {
                let next = step_value(self.state.fields.get(field), field.step_spec(), action);
                self.state.fields.set(field, next);
            }
        }
        self.outcome = Outcome::evaluate(&self.state);
        debug!(
            "recomputed {:?}: {:.3} L over {:.3} km",
            self.state.method, self.outcome.result.liters_used, self.outcome.result.km_driven
        );
        &self.outcome
    }

    /// Export snapshot of the outcome currently on screen.
    pub fn snapshot_at(&self, timestamp: DateTime<Local>) -> ExportSnapshot {
        ExportSnapshot::from_formatted(
            self.state.method,
            &self.outcome.input,
            &self.outcome.formatted,
            timestamp,
        )
    }

    pub fn snapshot(&self) -> ExportSnapshot {
        self.snapshot_at(Local::now())
    }
}
