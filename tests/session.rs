use chum_fuel::config::FormDefaults;
use chum_fuel::form::{step_value, FormEvent, FormState, Session, StepAction};
use chum_fuel::format::gauge_vars;
use chum_fuel::fuel::{Field, Method};
use chum_fuel::i18n::{keys, Translator};
use pretty_assertions::assert_eq;

#[test]
fn every_event_replaces_the_outcome() {
    let mut session = Session::new(FormState::default());
    assert_eq!(session.outcome().formatted.total_cost, "0");

    session.dispatch(FormEvent::SelectMethod(Method::Distance));
    let out = session.dispatch(FormEvent::SetField(Field::DistanceKm, "100".into()));
    assert_eq!(out.formatted.liters_used, "8.0");
    assert_eq!(out.formatted.fuel_cost, "160.000");

    session.dispatch(FormEvent::SetField(Field::RentalCost, "500000".into()));
    assert_eq!(session.outcome().formatted.total_cost, "660.000");

    session.dispatch(FormEvent::SelectMethod(Method::ActualFuel));
    assert_eq!(session.outcome().formatted.fuel_cost, "0");
    assert_eq!(session.outcome().formatted.total_cost, "500.000");
}

#[test]
fn configured_defaults_seed_the_form() {
    let defaults = FormDefaults {
        fuel_price: "25000".into(),
        consumption: "6".into(),
        ..FormDefaults::default()
    };
    let mut session = Session::new(FormState::with_defaults(&defaults));
    session.dispatch(FormEvent::SelectMethod(Method::Distance));
    session.dispatch(FormEvent::SetField(Field::DistanceKm, "100".into()));
    assert_eq!(session.outcome().formatted.fuel_cost, "150.000");
    assert_eq!(session.state().fields.get(Field::TankSize), "55");
}

#[test]
fn garbage_text_falls_back_without_error() {
    let mut session = Session::new(FormState::default());
    session.dispatch(FormEvent::SelectMethod(Method::Distance));
    session.dispatch(FormEvent::SetField(Field::DistanceKm, "100".into()));
    session.dispatch(FormEvent::SetField(Field::FuelPrice, "twenty".into()));
    session.dispatch(FormEvent::SetField(Field::Consumption, "".into()));
    let out = session.outcome();
    assert_eq!(out.input.fuel_price_per_liter, 20_000.0);
    assert_eq!(out.input.consumption_per_100km, 8.0);
    assert_eq!(out.formatted.fuel_cost, "160.000");
    // the typed text is kept as entered
    assert_eq!(session.state().fields.get(Field::FuelPrice), "twenty");
}

#[test]
fn steppers_clamp_to_field_bounds() {
    let consumption = Field::Consumption.step_spec();
    assert_eq!(step_value("8", consumption, StepAction::Increase), "8.5");
    assert_eq!(step_value("30", consumption, StepAction::Increase), "30");
    assert_eq!(step_value("1", consumption, StepAction::Decrease), "1");

    let error = Field::TripError.step_spec();
    assert_eq!(step_value("-20", error, StepAction::Decrease), "-20");
    assert_eq!(step_value("", error, StepAction::Increase), "1");

    let price = Field::FuelPrice.step_spec();
    assert_eq!(step_value("abc", price, StepAction::Increase), "500");
    assert_eq!(step_value("20000", price, StepAction::Decrease), "19500");

    let marks = Field::GaugeTotalMarks.step_spec();
    assert_eq!(step_value("16", marks, StepAction::Increase), "16");
}

#[test]
fn repeated_fractional_steps_stay_clean() {
    let spec = Field::Consumption.step_spec();
    let mut text = "7".to_string();
    for _ in 0..7 {
        text = step_value(&text, spec, StepAction::Increase);
    }
    assert_eq!(text, "10.5");
}

#[test]
fn step_event_goes_through_dispatch() {
    let mut session = Session::new(FormState::default());
    session.dispatch(FormEvent::SelectMethod(Method::TripMeter));
    session.dispatch(FormEvent::SetField(Field::TripKm, "90".into()));
    session.dispatch(FormEvent::Step(Field::TripKm, StepAction::Increase));
    assert_eq!(session.state().fields.get(Field::TripKm), "100");
    assert_eq!(session.outcome().formatted.liters_used, "8.0");
}

#[test]
fn gauge_summary_text_is_localized() {
    let mut session = Session::new(FormState::default());
    session.dispatch(FormEvent::SelectMethod(Method::FuelGauge));
    for (field, text) in [
        (Field::TankSize, "56"),
        (Field::GaugeTotalMarks, "8"),
        (Field::GaugeStart, "8"),
        (Field::GaugeEnd, "3"),
    ] {
        session.dispatch(FormEvent::SetField(field, text.into()));
    }
    let vars = gauge_vars(&session.outcome().gauge);
    let en = Translator::new("en-us").tf(keys::GAUGE_SUMMARY, &vars);
    assert_eq!(en, "Tank 56L / 8 marks = 7.0L/mark, used 5 marks = 35.0L");

    let vi = Translator::new("vi-vn").tf(keys::GAUGE_SUMMARY, &vars);
    assert!(vi.contains("56") && vi.contains("35.0"), "{vi}");
    assert_ne!(vi, en);
}
