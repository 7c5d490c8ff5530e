use chrono::{Local, TimeZone};
use chum_fuel::form::{FormEvent, FormState, Session};
use chum_fuel::fuel::{compute, Condition, ConditionFlags, Field, Method};
use chum_fuel::report::{
    self, ExportError, ExportSnapshot, MarkdownRenderer, PdfRenderer, PngRenderer, ReportKind,
    ReportRenderer,
};
use image::GenericImageView;
use pretty_assertions::assert_eq;

fn distance_session() -> Session {
    let mut session = Session::new(FormState::default());
    session.dispatch(FormEvent::SelectMethod(Method::Distance));
    session.dispatch(FormEvent::SetField(Field::DistanceKm, "300".into()));
    session.dispatch(FormEvent::SetField(Field::Consumption, "7.5".into()));
    session.dispatch(FormEvent::SetField(Field::FuelPrice, "22000".into()));
    session.dispatch(FormEvent::SetCondition(Condition::City, true));
    session
}

fn fixed_time() -> chrono::DateTime<Local> {
    Local
        .with_ymd_and_hms(2024, 5, 1, 14, 3, 9)
        .single()
        .expect("unambiguous local time")
}

fn snapshot() -> ExportSnapshot {
    distance_session().snapshot_at(fixed_time())
}

#[test]
fn snapshot_matches_what_is_on_screen() {
    let session = distance_session();
    let shown = &session.outcome().formatted;
    let snap = session.snapshot_at(fixed_time());
    assert_eq!(snap.fuel_cost, format!("{} VND", shown.fuel_cost));
    assert_eq!(snap.per_km, format!("{} VND/km", shown.cost_per_km));
    assert_eq!(snap.liters, format!("{} L", shown.liters_used));
    assert_eq!(snap.efficiency, format!("{} km/L", shown.efficiency));
    assert_eq!(snap.total, format!("{} VND", shown.total_cost));
}

#[test]
fn projection_from_raw_result_agrees_with_session() {
    let session = distance_session();
    let state = session.state();
    let input = state.input();
    let result = compute(state.method, &input, state.flags);
    let projected = report::project_at(state.method, &input, &result, fixed_time());
    assert_eq!(projected, session.snapshot_at(fixed_time()));
}

#[test]
fn snapshot_fields_are_unit_annotated() {
    let snap = snapshot();
    assert_eq!(snap.title, "CHUM Fuel - Fuel Cost Report");
    assert_eq!(snap.date, "14:03:09 01/05/2024");
    assert_eq!(snap.method, "Distance");
    assert_eq!(snap.fuel_price, "22.000 VND/L");
    assert_eq!(snap.consumption, "7.5 L/100km");
    assert_eq!(snap.fuel_cost, "544.500 VND");
    assert_eq!(snap.per_km, "1.815 VND/km");
    assert_eq!(snap.efficiency, "12.1 km/L");
    assert_eq!(snap.rental, "0 VND");
    assert_eq!(snap.total, "544.500 VND");
}

#[test]
fn method_names_in_reports() {
    let names: Vec<&str> = Method::ALL.iter().map(|m| m.display_name()).collect();
    assert_eq!(names, ["Trip Meter", "Distance", "Actual Fuel", "Fuel Gauge"]);
}

#[test]
fn markdown_lists_every_row() {
    let md = MarkdownRenderer.to_markdown(&snapshot());
    assert!(md.starts_with("## ") && md.contains("CHUM Fuel Report"), "{md}");
    for row in [
        "**Date:** 14:03:09 01/05/2024",
        "Method | Distance |",
        "Fuel Price | 22.000 VND/L |",
        "Consumption | 7.5 L/100km |",
        "Fuel Cost | 544.500 VND |",
        "Liters Used | 24.8 L |",
        "Cost per km | 1.815 VND/km |",
        "Efficiency | 12.1 km/L |",
        "Rental Fee | 0 VND |",
        "TOTAL: 544.500 VND",
    ] {
        assert!(md.contains(row), "missing {row:?} in\n{md}");
    }
    assert!(md.contains("*Generated by CHUM Fuel"));
}

#[test]
fn png_report_is_a_600_by_700_image() {
    let bytes = PngRenderer::default().render(&snapshot()).unwrap();
    assert_eq!(&bytes[..4], b"\x89PNG");
    let img = image::load_from_memory(&bytes).unwrap();
    assert_eq!((img.width(), img.height()), (600, 700));
}

#[test]
fn pdf_report_has_pdf_header() {
    let bytes = PdfRenderer.render(&snapshot()).unwrap();
    assert!(bytes.starts_with(b"%PDF"), "{:?}", &bytes[..8.min(bytes.len())]);
    assert!(bytes.len() > 500);
}

#[test]
fn renderers_are_picked_by_kind() {
    for kind in [ReportKind::Markdown, ReportKind::Png, ReportKind::Pdf] {
        assert_eq!(kind.renderer().kind(), kind);
    }
}

#[test]
fn saved_report_uses_timestamped_name() {
    let dir = tempfile::tempdir().unwrap();
    let ts = fixed_time();
    let snap = snapshot();
    let path = report::save_report(&MarkdownRenderer, &snap, dir.path(), ts).unwrap();

    let name = path.file_name().unwrap().to_string_lossy().to_string();
    assert_eq!(name, format!("chum-fuel-{}.md", ts.timestamp_millis()));
    assert_eq!(name, report::timestamped_file_name(ReportKind::Markdown, ts));
    let written = std::fs::read_to_string(&path).unwrap();
    assert_eq!(written, MarkdownRenderer.to_markdown(&snap));
}

#[test]
fn export_into_missing_directory_creates_it() {
    let dir = tempfile::tempdir().unwrap();
    let nested = dir.path().join("reports").join("2024");
    let path = report::save_report(&PngRenderer::default(), &snapshot(), &nested, fixed_time()).unwrap();
    assert!(path.starts_with(&nested));
    assert!(path.exists());
}

#[test]
fn conditions_do_not_change_actual_fuel_report() {
    let mut session = Session::new(FormState::default());
    session.dispatch(FormEvent::SelectMethod(Method::ActualFuel));
    session.dispatch(FormEvent::SetField(Field::FuelLiters, "40".into()));
    let before = session.snapshot_at(fixed_time());
    session.dispatch(FormEvent::SetCondition(Condition::AirConditioning, true));
    let after = session.snapshot_at(fixed_time());
    assert_eq!(before, after);
    assert_eq!(session.state().flags, ConditionFlags { ac: true, ..Default::default() });
}

#[test]
fn failed_export_reports_io_error_and_keeps_state() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("not-a-dir");
    std::fs::write(&blocker, "plain file").unwrap();

    let session = distance_session();
    let outcome_before = session.outcome().clone();
    let snap_before = session.snapshot_at(fixed_time());

    for renderer in [&PngRenderer::default() as &dyn ReportRenderer, &PdfRenderer] {
        let err = report::save_report(renderer, &snap_before, &blocker, fixed_time())
            .expect_err("parent path is a regular file");
        assert!(matches!(err, ExportError::Io(_)), "{err:?}");
    }
    let err = report::write_report(&MarkdownRenderer, &snap_before, &blocker.join("r.md"))
        .expect_err("parent path is a regular file");
    assert!(matches!(err, ExportError::Io(_)), "{err:?}");

    assert_eq!(session.outcome(), &outcome_before);
    assert_eq!(session.snapshot_at(fixed_time()), snap_before);
}
