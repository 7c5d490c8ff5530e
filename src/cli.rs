//! Command-line arguments of `chum_fuel_cli`.

use std::path::PathBuf;

use chrono::Local;
use clap::{Args, Parser, Subcommand};

use crate::app::AppError;
use crate::config::Config;
use crate::form::{FormEvent, FormState, Session};
use crate::fuel::{Condition, Field, Method};
use crate::i18n::Translator;
use crate::report::{self, ReportKind};
use crate::ui_cli;

#[derive(Parser, Debug, Clone)]
#[command(name = "chum_fuel_cli")]
#[command(about = "Estimate trip fuel cost and efficiency, and export reports")]
#[command(version)]
pub struct Cli {
    /// Language (auto, en-us, vi-vn)
    #[arg(long, short = 'L', global = true, default_value = "auto")]
    pub lang: String,

    /// Settings file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Calculate once from the given values and print the results
    Calc(CalcArgs),
}

/// Raw field values are taken as text; anything unparsable falls back to the field default.
#[derive(Args, Debug, Clone, Default)]
pub struct CalcArgs {
    /// Measurement method
    #[arg(long, value_enum, default_value_t = Method::TripMeter)]
    pub method: Method,

    /// Fuel price [VND/L]
    #[arg(long)]
    pub price: Option<String>,
    /// Consumption [L/100km]
    #[arg(long)]
    pub consumption: Option<String>,
    /// Tank size [L]
    #[arg(long)]
    pub tank_size: Option<String>,
    /// Vehicle rental [VND]
    #[arg(long)]
    pub rental: Option<String>,

    /// Trip meter reading [km]
    #[arg(long)]
    pub trip_km: Option<String>,
    /// Trip meter error [%]
    #[arg(long, allow_hyphen_values = true)]
    pub trip_error: Option<String>,
    /// Distance [km]
    #[arg(long)]
    pub distance_km: Option<String>,
    /// Liters pumped [L]
    #[arg(long)]
    pub fuel_liters: Option<String>,
    /// Distance driven on the pumped fuel [km]
    #[arg(long)]
    pub fuel_km: Option<String>,
    /// Gauge marks at the start
    #[arg(long)]
    pub gauge_start: Option<String>,
    /// Gauge marks at the end
    #[arg(long)]
    pub gauge_end: Option<String>,
    /// Total marks on the gauge
    #[arg(long)]
    pub gauge_marks: Option<String>,
    /// Distance driven between gauge readings [km]
    #[arg(long)]
    pub gauge_km: Option<String>,

    /// City driving (+10%)
    #[arg(long)]
    pub city: bool,
    /// Highway driving (-10%)
    #[arg(long)]
    pub highway: bool,
    /// Air conditioning on (+5%)
    #[arg(long)]
    pub ac: bool,

    /// Also write a report (repeatable)
    #[arg(long, value_enum)]
    pub export: Vec<ReportKind>,

    /// Directory for exported reports (defaults to the configured one)
    #[arg(long, value_name = "DIR")]
    pub out_dir: Option<PathBuf>,
}

impl CalcArgs {
    fn field_values(&self) -> [(Field, &Option<String>); 13] {
        [
            (Field::FuelPrice, &self.price),
            (Field::Consumption, &self.consumption),
            (Field::TankSize, &self.tank_size),
            (Field::RentalCost, &self.rental),
            (Field::TripKm, &self.trip_km),
            (Field::TripError, &self.trip_error),
            (Field::DistanceKm, &self.distance_km),
            (Field::FuelLiters, &self.fuel_liters),
            (Field::FuelKmDriven, &self.fuel_km),
            (Field::GaugeStart, &self.gauge_start),
            (Field::GaugeEnd, &self.gauge_end),
            (Field::GaugeTotalMarks, &self.gauge_marks),
            (Field::GaugeKmDriven, &self.gauge_km),
        ]
    }

    /// Replays the arguments through a session seeded with the configured defaults.
    pub fn to_session(&self, cfg: &Config) -> Session {
        let mut session = Session::new(FormState::with_defaults(&cfg.defaults));
        session.dispatch(FormEvent::SelectMethod(self.method));
        for (field, value) in self.field_values() {
            if let Some(text) = value {
                session.dispatch(FormEvent::SetField(field, text.clone()));
            }
        }
        for (condition, on) in [
            (Condition::City, self.city),
            (Condition::Highway, self.highway),
            (Condition::AirConditioning, self.ac),
        ] {
            session.dispatch(FormEvent::SetCondition(condition, on));
        }
        session
    }
}

/// Runs `calc`: prints results and writes any requested reports.
/// A failed export is reported and does not stop the remaining ones, but the
/// run still ends with [`AppError::ExportsFailed`].
pub fn run_calc(args: &CalcArgs, cfg: &Config, tr: &Translator) -> Result<(), AppError> {
    let session = args.to_session(cfg);
    ui_cli::print_results(tr, &session);

    let dir = args.out_dir.clone().unwrap_or_else(|| cfg.export_dir.clone());
    let now = Local::now();
    let snapshot = session.snapshot_at(now);
    let mut failed = 0;
    for kind in &args.export {
        let renderer = kind.renderer();
        match report::save_report(renderer.as_ref(), &snapshot, &dir, now) {
            Ok(path) => println!("{}", path.display()),
            Err(e) => {
                log::error!("{kind:?} export failed: {e}");
                eprintln!("{kind:?}: {e}");
                failed += 1;
            }
        }
    }
    if failed > 0 {
        return Err(AppError::ExportsFailed {
            failed,
            requested: args.export.len(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn calc_arguments_parse() {
        let cli = Cli::parse_from([
            "chum_fuel_cli",
            "calc",
            "--method",
            "distance",
            "--distance-km",
            "300",
            "--trip-error",
            "-5",
            "--city",
            "--export",
            "markdown",
            "--export",
            "png",
        ]);
        let Some(Command::Calc(args)) = cli.command else {
            panic!("expected calc");
        };
        assert_eq!(args.method, Method::Distance);
        assert_eq!(args.distance_km.as_deref(), Some("300"));
        assert_eq!(args.trip_error.as_deref(), Some("-5"));
        assert!(args.city && !args.highway);
        assert_eq!(args.export, vec![ReportKind::Markdown, ReportKind::Png]);
    }

    #[test]
    fn method_aliases_are_accepted() {
        let cli = Cli::parse_from(["chum_fuel_cli", "calc", "--method", "gauge"]);
        let Some(Command::Calc(args)) = cli.command else {
            panic!("expected calc");
        };
        assert_eq!(args.method, Method::FuelGauge);
    }

    #[test]
    fn session_from_args_computes_end_to_end_example() {
        let args = CalcArgs {
            method: Method::Distance,
            distance_km: Some("300".into()),
            consumption: Some("7.5".into()),
            price: Some("22000".into()),
            city: true,
            ..CalcArgs::default()
        };
        let session = args.to_session(&Config::default());
        let f = &session.outcome().formatted;
        assert_eq!(f.fuel_cost, "544.500");
        assert_eq!(f.cost_per_km, "1.815");
        assert_eq!(f.efficiency, "12.1");
    }

    #[test]
    fn calc_fails_when_an_export_cannot_be_written() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        std::fs::write(&blocker, "x").unwrap();
        let args = CalcArgs {
            export: vec![ReportKind::Markdown, ReportKind::Png],
            out_dir: Some(blocker),
            ..CalcArgs::default()
        };
        let err = run_calc(&args, &Config::default(), &Translator::new("en-us")).unwrap_err();
        assert!(
            matches!(err, AppError::ExportsFailed { failed: 2, requested: 2 }),
            "{err:?}"
        );
    }

    #[test]
    fn calc_succeeds_when_exports_are_written() {
        let dir = tempfile::tempdir().unwrap();
        let args = CalcArgs {
            export: vec![ReportKind::Markdown],
            out_dir: Some(dir.path().to_path_buf()),
            ..CalcArgs::default()
        };
        run_calc(&args, &Config::default(), &Translator::new("en-us")).unwrap();
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }
}
