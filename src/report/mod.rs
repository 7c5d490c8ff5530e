//! Export snapshot projection and report renderers.

pub mod markdown;
pub mod pdf;
pub mod raster;

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use log::{debug, info};
use thiserror::Error;

use crate::format::{format_money, format_plain, FormattedResult};
use crate::fuel::{CalculationInput, CalculationResult, Method};

pub use markdown::MarkdownRenderer;
pub use pdf::PdfRenderer;
pub use raster::PngRenderer;

/// Application name printed on every report.
pub const APP_NAME: &str = "CHUM Fuel";
/// Prefix of exported file names.
pub const FILE_PREFIX: &str = "chum-fuel";

/// Failures while producing or saving a report.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("image encoding failed: {0}")]
    Image(#[from] image::ImageError),

    #[error("PDF generation failed: {0}")]
    Pdf(String),

    #[error("clipboard unavailable: {0}")]
    Clipboard(String),
}

/// Output formats a report can be rendered to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum ReportKind {
    Markdown,
    Png,
    Pdf,
}

impl ReportKind {
    pub fn extension(self) -> &'static str {
        match self {
            ReportKind::Markdown => "md",
            ReportKind::Png => "png",
            ReportKind::Pdf => "pdf",
        }
    }

    pub fn renderer(self) -> Box<dyn ReportRenderer> {
        match self {
            ReportKind::Markdown => Box::new(MarkdownRenderer),
            ReportKind::Png => Box::new(PngRenderer::default()),
            ReportKind::Pdf => Box::new(PdfRenderer),
        }
    }
}

/// Formatted, unit-annotated projection of one calculation for reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSnapshot {
    pub title: String,
    pub date: String,
    pub method: String,
    pub fuel_price: String,
    pub consumption: String,
    pub fuel_cost: String,
    pub liters: String,
    pub per_km: String,
    pub efficiency: String,
    pub rental: String,
    pub total: String,
}

impl ExportSnapshot {
    /// Builds the snapshot from display strings the caller already shows on screen.
    pub fn from_formatted(
        method: Method,
        input: &CalculationInput,
        formatted: &FormattedResult,
        timestamp: DateTime<Local>,
    ) -> Self {
        Self {
            title: format!("{APP_NAME} - Fuel Cost Report"),
            date: timestamp.format("%H:%M:%S %d/%m/%Y").to_string(),
            method: method.display_name().to_string(),
            fuel_price: format!("{} VND/L", format_money(input.fuel_price_per_liter)),
            consumption: format!("{} L/100km", format_plain(input.consumption_per_100km)),
            fuel_cost: format!("{} VND", formatted.fuel_cost),
            liters: format!("{} L", formatted.liters_used),
            per_km: format!("{} VND/km", formatted.cost_per_km),
            efficiency: format!("{} km/L", formatted.efficiency),
            rental: format!("{} VND", formatted.rental),
            total: format!("{} VND", formatted.total_cost),
        }
    }

    /// Label/value pairs of the information section.
    pub fn info_rows(&self) -> [(&'static str, &str); 3] {
        [
            ("Method", self.method.as_str()),
            ("Fuel Price", self.fuel_price.as_str()),
            ("Consumption", self.consumption.as_str()),
        ]
    }

    /// Label/value pairs of the results section, in layout order.
    pub fn result_rows(&self) -> [(&'static str, &str); 5] {
        [
            ("Fuel Cost", self.fuel_cost.as_str()),
            ("Liters Used", self.liters.as_str()),
            ("Cost/km", self.per_km.as_str()),
            ("Efficiency", self.efficiency.as_str()),
            ("Rental Fee", self.rental.as_str()),
        ]
    }
}

/// Projects a calculation into an export snapshot dated now.
pub fn project(method: Method, input: &CalculationInput, result: &CalculationResult) -> ExportSnapshot {
    project_at(method, input, result, Local::now())
}

/// Projects a calculation into an export snapshot with an explicit date.
pub fn project_at(
    method: Method,
    input: &CalculationInput,
    result: &CalculationResult,
    timestamp: DateTime<Local>,
) -> ExportSnapshot {
    let formatted = FormattedResult::new(result, input.rental_cost);
    ExportSnapshot::from_formatted(method, input, &formatted, timestamp)
}

/// Renders a snapshot into the bytes of one report format.
pub trait ReportRenderer {
    fn kind(&self) -> ReportKind;
    fn render(&self, snapshot: &ExportSnapshot) -> Result<Vec<u8>, ExportError>;
}

/// `chum-fuel-<unix millis>.<ext>`
pub fn timestamped_file_name(kind: ReportKind, timestamp: DateTime<Local>) -> String {
    format!("{FILE_PREFIX}-{}.{}", timestamp.timestamp_millis(), kind.extension())
}

/// Renders and writes the report to an explicit path.
pub fn write_report(
    renderer: &dyn ReportRenderer,
    snapshot: &ExportSnapshot,
    path: &Path,
) -> Result<(), ExportError> {
    let bytes = renderer.render(snapshot)?;
    debug!("rendered {:?} report ({} bytes)", renderer.kind(), bytes.len());
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, bytes)?;
    info!("saved report to {}", path.display());
    Ok(())
}

/// Renders and writes the report into `dir` under a timestamped name.
pub fn save_report(
    renderer: &dyn ReportRenderer,
    snapshot: &ExportSnapshot,
    dir: &Path,
    timestamp: DateTime<Local>,
) -> Result<PathBuf, ExportError> {
    let path = dir.join(timestamped_file_name(renderer.kind(), timestamp));
    write_report(renderer, snapshot, &path)?;
    Ok(path)
}
