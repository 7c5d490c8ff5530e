#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

//! eframe/egui desktop front end.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use std::{env, fs};

use chrono::Local;
use chum_fuel::clipboard::{copy_with_fallback, ClipboardWriter, CopyOutcome, FileClipboard};
use chum_fuel::form::{FormEvent, FormState, Session, StepAction};
use chum_fuel::format::gauge_vars;
use chum_fuel::fuel::{Condition, Field, Method, SHARED_FIELDS};
use chum_fuel::i18n::{self, keys};
use chum_fuel::config;
use chum_fuel::report::{self, ExportError, MarkdownRenderer, ReportKind, APP_NAME};
use eframe::{egui, App, Frame};
use rfd::FileDialog;

/// How long a completion message stays on the export buttons.
const STATUS_TTL: Duration = Duration::from_secs(2);

fn main() -> Result<(), eframe::Error> {
    env_logger::init();

    // --lang xx or --lang=xx (auto/en-us/vi-vn)
    let mut cli_lang: Option<String> = None;
    let args: Vec<String> = env::args().collect();
    let mut i = 1;
    while i < args.len() {
        let a = &args[i];
        if let Some(val) = a.strip_prefix("--lang=") {
            cli_lang = Some(val.to_string());
        } else if (a == "--lang" || a == "-L") && i + 1 < args.len() {
            cli_lang = Some(args[i + 1].clone());
            i += 1;
        }
        i += 1;
    }

    let mut app_cfg = config::load_or_default().unwrap_or_else(|e| {
        log::warn!("settings not loaded, using defaults: {e}");
        config::Config::default()
    });
    if let Some(lang_cli) = cli_lang {
        app_cfg.language = i18n::resolve_language(&lang_cli, Some(app_cfg.language.as_str()));
    }

    let viewport = egui::ViewportBuilder::default()
        .with_inner_size([520.0, 760.0])
        .with_transparent(true);
    let opts = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };
    eframe::run_native(
        APP_NAME,
        opts,
        Box::new(move |cc| {
            if let Some(path) = app_cfg.font_path.as_deref() {
                if let Err(e) = load_custom_font(&cc.egui_ctx, path) {
                    log::warn!("{e}");
                }
            }
            Box::new(GuiApp::new(app_cfg.clone()))
        }),
    )
}

const USER_FONT: &str = "user_font";

/// Default fonts with `bytes` taking priority in every text family.
fn fonts_with_user_font(bytes: Vec<u8>) -> egui::FontDefinitions {
    let mut fonts = egui::FontDefinitions::default();
    fonts
        .font_data
        .insert(USER_FONT.to_owned(), egui::FontData::from_owned(bytes));
    for family in [egui::FontFamily::Proportional, egui::FontFamily::Monospace] {
        fonts
            .families
            .entry(family)
            .or_default()
            .insert(0, USER_FONT.to_owned());
    }
    fonts
}

/// Registers the font at `path` ahead of the built-in ones.
fn load_custom_font(ctx: &egui::Context, path: &str) -> Result<(), String> {
    let p = Path::new(path);
    if !p.exists() {
        return Err(format!("Font file not found: {path}"));
    }
    let bytes = fs::read(p).map_err(|e| format!("Failed to read font file: {e}"))?;
    ctx.set_fonts(fonts_with_user_font(bytes));
    Ok(())
}

/// System clipboard through egui's platform output.
struct EguiClipboard<'a> {
    ctx: &'a egui::Context,
}

impl ClipboardWriter for EguiClipboard<'_> {
    fn write_text(&mut self, text: &str) -> Result<(), ExportError> {
        // egui treats an empty copied_text as "nothing to copy"
        if text.is_empty() {
            return Err(ExportError::Clipboard("empty text".into()));
        }
        self.ctx.output_mut(|o| o.copied_text = text.to_string());
        Ok(())
    }
}

/// Button pressed inside the export window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ExportAction {
    CopyText,
    Save(ReportKind),
}

/// Transient message shown after an export action.
#[derive(Debug, Clone)]
struct Status {
    text: String,
    since: Instant,
    sticky: bool,
}

struct GuiApp {
    config: config::Config,
    tr: i18n::Translator,
    session: Session,
    show_export: bool,
    show_settings: bool,
    status: Option<Status>,
    window_alpha: f32,
    lang_input: String,
    export_dir_input: String,
    font_path_input: String,
    settings_status: Option<String>,
}

impl GuiApp {
    fn new(config: config::Config) -> Self {
        let lang_code = i18n::resolve_language("auto", Some(config.language.as_str()));
        let tr = i18n::Translator::new_with_pack(&lang_code, config.language_pack_dir.as_deref());
        let session = Session::new(FormState::with_defaults(&config.defaults));
        Self {
            tr,
            session,
            show_export: false,
            show_settings: false,
            status: None,
            window_alpha: config.window_alpha,
            lang_input: config.language.clone(),
            export_dir_input: config.export_dir.display().to_string(),
            font_path_input: config.font_path.clone().unwrap_or_default(),
            settings_status: None,
            config,
        }
    }

    fn apply(&mut self, event: FormEvent) {
        self.session.dispatch(event);
    }

    fn markdown(&self) -> String {
        MarkdownRenderer.to_markdown(&self.session.snapshot())
    }

    fn set_status(&mut self, text: String, sticky: bool) {
        self.status = Some(Status {
            text,
            since: Instant::now(),
            sticky,
        });
    }

    /// Message to show at `now`; completion messages expire, errors stay until the next action.
    fn status_text(&self, now: Instant) -> Option<&str> {
        self.status
            .as_ref()
            .filter(|s| s.sticky || now.duration_since(s.since) < STATUS_TTL)
            .map(|s| s.text.as_str())
    }

    fn copy_text(&mut self, ctx: &egui::Context) {
        let text = self.markdown();
        let fallback_path = self.config.export_dir.join(format!("{}-report.md", report::FILE_PREFIX));
        let mut primary = EguiClipboard { ctx };
        let mut fallback = FileClipboard {
            path: fallback_path.clone(),
        };
        match copy_with_fallback(&mut primary, &mut fallback, &text) {
            Ok(CopyOutcome::Primary) => self.set_status(self.tr.t(keys::EXPORT_COPIED), false),
            Ok(CopyOutcome::Fallback) => {
                let msg = self.tr.tf(
                    keys::EXPORT_COPIED_FALLBACK,
                    &[("path", fallback_path.display().to_string())],
                );
                self.set_status(msg, false);
            }
            Err(e) => self.report_failure(&e),
        }
    }

    fn save(&mut self, kind: ReportKind) {
        let now = Local::now();
        let snapshot = self.session.snapshot_at(now);
        let mut dialog = FileDialog::new()
            .set_file_name(report::timestamped_file_name(kind, now))
            .add_filter(kind.extension(), &[kind.extension()]);
        if self.config.export_dir.is_dir() {
            dialog = dialog.set_directory(&self.config.export_dir);
        }
        let Some(path) = dialog.save_file() else {
            self.set_status(self.tr.t(keys::EXPORT_CANCELLED), false);
            return;
        };
        let renderer = kind.renderer();
        match report::write_report(renderer.as_ref(), &snapshot, &path) {
            Ok(()) => {
                let msg = self
                    .tr
                    .tf(keys::EXPORT_SAVED, &[("path", path.display().to_string())]);
                self.set_status(msg, false);
            }
            Err(e) => self.report_failure(&e),
        }
    }

    fn report_failure(&mut self, e: &ExportError) {
        log::error!("export failed: {e}");
        let msg = self.tr.tf(keys::EXPORT_FAILED, &[("error", e.to_string())]);
        self.set_status(msg, true);
    }

    fn save_settings(&mut self) {
        self.config.language = self.lang_input.clone();
        self.config.window_alpha = self.window_alpha;
        self.config.export_dir = PathBuf::from(self.export_dir_input.trim());
        let font = self.font_path_input.trim();
        self.config.font_path = (!font.is_empty()).then(|| font.to_string());
        let resolved = i18n::resolve_language(&self.config.language, None);
        self.tr = i18n::Translator::new_with_pack(&resolved, self.config.language_pack_dir.as_deref());
        self.settings_status = Some(match self.config.save() {
            Ok(()) => self.tr.t(keys::SETTINGS_SAVED),
            Err(e) => format!("{}: {e}", self.tr.t(keys::ERROR_PREFIX)),
        });
    }

    fn field_row(&mut self, ui: &mut egui::Ui, field: Field) {
        let label = self.tr.t(field.label_key());
        let mut text = self.session.state().fields.get(field).to_string();
        let mut event = None;
        ui.label(label);
        ui.horizontal(|ui| {
            if ui.small_button("-").clicked() {
                event = Some(FormEvent::Step(field, StepAction::Decrease));
            }
            let edit = egui::TextEdit::singleline(&mut text).desired_width(140.0);
            if ui.add(edit).changed() {
                event = Some(FormEvent::SetField(field, text.clone()));
            }
            if ui.small_button("+").clicked() {
                event = Some(FormEvent::Step(field, StepAction::Increase));
            }
        });
        ui.end_row();
        if let Some(event) = event {
            self.apply(event);
        }
    }

    fn ui_form(&mut self, ui: &mut egui::Ui) {
        ui.heading(self.tr.t(keys::METHOD_HEADING));
        let current = self.session.state().method;
        ui.horizontal_wrapped(|ui| {
            for method in Method::ALL {
                if ui
                    .selectable_label(current == method, self.tr.t(method.label_key()))
                    .clicked()
                    && current != method
                {
                    self.apply(FormEvent::SelectMethod(method));
                }
            }
        });
        ui.separator();

        ui.heading(self.tr.t(keys::FIELD_HEADING));
        egui::Grid::new("shared_fields")
            .num_columns(2)
            .spacing([8.0, 4.0])
            .show(ui, |ui| {
                for field in SHARED_FIELDS {
                    self.field_row(ui, field);
                }
            });
        ui.separator();

        ui.label(self.tr.t(keys::CONDITION_HEADING));
        ui.horizontal_wrapped(|ui| {
            for condition in Condition::ALL {
                let mut on = self.session.state().flags.is_set(condition);
                if ui.checkbox(&mut on, self.tr.t(condition.label_key())).changed() {
                    self.apply(FormEvent::SetCondition(condition, on));
                }
            }
        });
        if !self.session.state().method.uses_consumption_rate() {
            ui.small(self.tr.t(keys::CONDITION_NOTE));
        }
        ui.separator();

        let method = self.session.state().method;
        egui::Grid::new("method_fields")
            .num_columns(2)
            .spacing([8.0, 4.0])
            .show(ui, |ui| {
                for field in method.fields() {
                    self.field_row(ui, *field);
                }
            });
        if method == Method::FuelGauge {
            let summary = self
                .tr
                .tf(keys::GAUGE_SUMMARY, &gauge_vars(&self.session.outcome().gauge));
            ui.small(summary);
        }
    }

    fn ui_results(&self, ui: &mut egui::Ui) {
        let f = &self.session.outcome().formatted;
        ui.heading(self.tr.t(keys::RESULT_HEADING));
        egui::Grid::new("results")
            .num_columns(2)
            .spacing([16.0, 4.0])
            .show(ui, |ui| {
                for (key, value) in [
                    (keys::RESULT_FUEL_COST, format!("{} VND", f.fuel_cost)),
                    (keys::RESULT_COST_PER_KM, format!("{} VND/km", f.cost_per_km)),
                    (keys::RESULT_LITERS, format!("{} L", f.liters_used)),
                    (keys::RESULT_EFFICIENCY, format!("{} km/L", f.efficiency)),
                    (keys::RESULT_RENTAL, format!("{} VND", f.rental)),
                ] {
                    ui.label(self.tr.t(key));
                    ui.monospace(value);
                    ui.end_row();
                }
                ui.strong(self.tr.t(keys::RESULT_TOTAL));
                ui.strong(format!("{} VND", f.total_cost));
                ui.end_row();
            });
    }
}

impl App for GuiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        let mut style = (*ctx.style()).clone();
        style.visuals.window_fill = style.visuals.window_fill.linear_multiply(self.window_alpha);
        style.visuals.panel_fill = style.visuals.panel_fill.linear_multiply(self.window_alpha);
        ctx.set_style(style);

        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading(self.tr.t(keys::APP_TITLE));
                ui.separator();
                if ui.button(self.tr.t(keys::EXPORT_BUTTON)).clicked() {
                    self.show_export = true;
                }
                if ui.button(self.tr.t(keys::SETTINGS_HEADING)).clicked() {
                    self.show_settings = true;
                }
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false; 2])
                .show(ui, |ui| {
                    self.ui_form(ui);
                    ui.separator();
                    self.ui_results(ui);
                });
        });

        if self.show_export {
            let mut open = true;
            let mut close = false;
            let mut action = None;
            let markdown = self.markdown();
            let status = self.status_text(Instant::now()).map(str::to_string);
            egui::Window::new(self.tr.t(keys::EXPORT_HEADING))
                .collapsible(false)
                .resizable(true)
                .open(&mut open)
                .show(ctx, |ui| {
                    ui.label(self.tr.t(keys::EXPORT_PREVIEW));
                    let mut preview: &str = &markdown;
                    egui::ScrollArea::vertical().max_height(320.0).show(ui, |ui| {
                        ui.add(
                            egui::TextEdit::multiline(&mut preview)
                                .code_editor()
                                .desired_width(f32::INFINITY),
                        );
                    });
                    ui.separator();
                    ui.horizontal(|ui| {
                        if ui.button(self.tr.t(keys::EXPORT_COPY_TEXT)).clicked() {
                            action = Some(ExportAction::CopyText);
                        }
                        if ui.button(self.tr.t(keys::EXPORT_SAVE_IMAGE)).clicked() {
                            action = Some(ExportAction::Save(ReportKind::Png));
                        }
                        if ui.button(self.tr.t(keys::EXPORT_SAVE_PDF)).clicked() {
                            action = Some(ExportAction::Save(ReportKind::Pdf));
                        }
                        if ui.button(self.tr.t(keys::EXPORT_CLOSE)).clicked() {
                            close = true;
                        }
                    });
                    if let Some(msg) = &status {
                        ui.label(msg);
                    }
                });
            self.show_export = open && !close;
            match action {
                Some(ExportAction::CopyText) => self.copy_text(ctx),
                Some(ExportAction::Save(kind)) => self.save(kind),
                None => {}
            }
            if self.status.is_some() {
                ctx.request_repaint_after(STATUS_TTL);
            }
        }

        if self.show_settings {
            let mut open = true;
            let mut save = false;
            let mut apply_font = false;
            egui::Window::new(self.tr.t(keys::SETTINGS_HEADING))
                .collapsible(false)
                .resizable(true)
                .open(&mut open)
                .show(ctx, |ui| {
                    ui.label(self.tr.t(keys::SETTINGS_LANGUAGE));
                    egui::ComboBox::from_id_source("lang_choice")
                        .selected_text(&self.lang_input)
                        .show_ui(ui, |ui| {
                            ui.selectable_value(
                                &mut self.lang_input,
                                "auto".into(),
                                self.tr.t(keys::SETTINGS_LANG_AUTO),
                            );
                            ui.selectable_value(&mut self.lang_input, "en-us".into(), "English");
                            ui.selectable_value(&mut self.lang_input, "vi-vn".into(), "Tiếng Việt");
                        });
                    ui.separator();
                    ui.label(self.tr.t(keys::SETTINGS_EXPORT_DIR));
                    ui.text_edit_singleline(&mut self.export_dir_input);
                    ui.separator();
                    ui.label(self.tr.t(keys::SETTINGS_ALPHA));
                    ui.add(egui::Slider::new(&mut self.window_alpha, 0.3..=1.0).text("alpha"));
                    ui.separator();
                    ui.label("Font (.ttf/.ttc)");
                    ui.horizontal(|ui| {
                        ui.text_edit_singleline(&mut self.font_path_input);
                        if ui.button("...").clicked() {
                            if let Some(p) = FileDialog::new().add_filter("font", &["ttf", "ttc", "otf"]).pick_file() {
                                self.font_path_input = p.display().to_string();
                                apply_font = true;
                            }
                        }
                    });
                    ui.separator();
                    if ui.button(self.tr.t(keys::SETTINGS_SAVE)).clicked() {
                        save = true;
                    }
                    if let Some(msg) = &self.settings_status {
                        ui.label(msg);
                    }
                });
            self.show_settings = open;
            if apply_font {
                if let Err(e) = load_custom_font(ctx, self.font_path_input.trim()) {
                    self.settings_status = Some(e);
                }
            }
            if save {
                self.save_settings();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_font_comes_first_in_both_families() {
        let fonts = fonts_with_user_font(vec![0u8; 4]);
        assert!(fonts.font_data.contains_key(USER_FONT));
        for family in [egui::FontFamily::Proportional, egui::FontFamily::Monospace] {
            assert_eq!(fonts.families[&family].first().map(String::as_str), Some(USER_FONT));
        }
    }

    #[test]
    fn new_app_starts_from_configured_defaults() {
        let app = GuiApp::new(config::Config::default());
        assert_eq!(app.session.state().method, Method::TripMeter);
        assert_eq!(app.session.state().fields.get(Field::FuelPrice), "20000");
        assert!(!app.show_export);
    }

    #[test]
    fn preview_follows_form_changes() {
        let mut app = GuiApp::new(config::Config::default());
        app.apply(FormEvent::SelectMethod(Method::ActualFuel));
        app.apply(FormEvent::SetField(Field::FuelLiters, "40".into()));
        let md = app.markdown();
        assert!(md.contains("Actual Fuel"), "{md}");
        assert!(md.contains("800.000 VND"), "{md}");
    }

    #[test]
    fn completion_status_expires_but_errors_stay() {
        let mut app = GuiApp::new(config::Config::default());
        app.set_status("Copied!".into(), false);
        let later = Instant::now() + STATUS_TTL + Duration::from_millis(10);
        assert_eq!(app.status_text(Instant::now()), Some("Copied!"));
        assert_eq!(app.status_text(later), None);

        app.set_status("Export failed".into(), true);
        assert_eq!(app.status_text(later), Some("Export failed"));
    }

    #[test]
    fn stepper_event_updates_field_text() {
        let mut app = GuiApp::new(config::Config::default());
        app.apply(FormEvent::Step(Field::Consumption, StepAction::Increase));
        assert_eq!(app.session.state().fields.get(Field::Consumption), "8.5");
    }
}
