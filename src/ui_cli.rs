use std::io::{self, Write};
use std::path::PathBuf;

use chrono::Local;

use crate::app::AppError;
use crate::config::Config;
use crate::form::{FormEvent, Outcome, Session};
use crate::format::gauge_vars;
use crate::fuel::{Condition, Field, Method, SHARED_FIELDS};
use crate::i18n::{keys, Translator};
use crate::report::{self, ReportKind};

/// Main menu choices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Method,
    Fields,
    Conditions,
    Results,
    Export,
    Settings,
    Exit,
}

/// Shows the main menu and returns the selection.
pub fn main_menu(tr: &Translator) -> Result<MenuChoice, AppError> {
    println!("\n{}", tr.t(keys::MAIN_MENU_TITLE));
    for key in [
        keys::MAIN_MENU_METHOD,
        keys::MAIN_MENU_FIELDS,
        keys::MAIN_MENU_CONDITIONS,
        keys::MAIN_MENU_RESULTS,
        keys::MAIN_MENU_EXPORT,
        keys::MAIN_MENU_SETTINGS,
        keys::MAIN_MENU_EXIT,
    ] {
        println!("{}", tr.t(key));
    }
    loop {
        let sel = read_line(&tr.t(keys::PROMPT_MENU_SELECT))?;
        match sel.trim() {
            "1" => return Ok(MenuChoice::Method),
            "2" => return Ok(MenuChoice::Fields),
            "3" => return Ok(MenuChoice::Conditions),
            "4" => return Ok(MenuChoice::Results),
            "5" => return Ok(MenuChoice::Export),
            "6" => return Ok(MenuChoice::Settings),
            "0" => return Ok(MenuChoice::Exit),
            _ => println!("{}", tr.t(keys::INVALID_SELECTION)),
        }
    }
}

/// Method selection.
pub fn handle_method(tr: &Translator, session: &mut Session) -> Result<(), AppError> {
    println!("\n-- {} --", tr.t(keys::METHOD_HEADING));
    for (i, method) in Method::ALL.iter().enumerate() {
        let marker = if *method == session.state().method { "*" } else { " " };
        println!("{marker}{}) {}", i + 1, tr.t(method.label_key()));
    }
    let sel = read_line(&tr.t(keys::PROMPT_SELECT))?;
    match sel.trim().parse::<usize>().ok().and_then(|n| Method::ALL.get(n.wrapping_sub(1))) {
        Some(method) => {
            session.dispatch(FormEvent::SelectMethod(*method));
        }
        None if sel.trim().is_empty() => {}
        None => println!("{}", tr.t(keys::INVALID_SELECTION)),
    }
    println!("{} {}", tr.t(keys::METHOD_CURRENT), tr.t(session.state().method.label_key()));
    Ok(())
}

/// Edits the shared fields and the fields of the current method one by one.
pub fn handle_fields(tr: &Translator, session: &mut Session) -> Result<(), AppError> {
    println!("\n-- {} --", tr.t(keys::FIELD_HEADING));
    let method = session.state().method;
    let fields: Vec<Field> = SHARED_FIELDS
        .iter()
        .chain(method.fields().iter())
        .copied()
        .collect();
    for field in fields {
        let current = session.state().fields.get(field).to_string();
        println!("{} [{}]", tr.t(field.label_key()), current);
        let text = read_line(&tr.t(keys::PROMPT_FIELD_VALUE))?;
        let text = text.trim();
        if !text.is_empty() {
            session.dispatch(FormEvent::SetField(field, text.to_string()));
        }
    }
    if method == Method::FuelGauge {
        println!("{}", tr.tf(keys::GAUGE_SUMMARY, &gauge_vars(&session.outcome().gauge)));
    }
    Ok(())
}

/// Toggles driving conditions until an empty line is entered.
pub fn handle_conditions(tr: &Translator, session: &mut Session) -> Result<(), AppError> {
    println!("\n-- {} --", tr.t(keys::CONDITION_HEADING));
    println!("{}", tr.t(keys::CONDITION_NOTE));
    loop {
        for (i, condition) in Condition::ALL.iter().enumerate() {
            let on = session.state().flags.is_set(*condition);
            println!("[{}] {}) {}", if on { "x" } else { " " }, i + 1, tr.t(condition.label_key()));
        }
        let sel = read_line(&tr.t(keys::CONDITION_TOGGLE_PROMPT))?;
        if sel.trim().is_empty() {
            return Ok(());
        }
        match sel.trim().parse::<usize>().ok().and_then(|n| Condition::ALL.get(n.wrapping_sub(1))) {
            Some(condition) => {
                let on = !session.state().flags.is_set(*condition);
                session.dispatch(FormEvent::SetCondition(*condition, on));
            }
            None => println!("{}", tr.t(keys::INVALID_SELECTION)),
        }
    }
}

/// Localized result lines for the current outcome.
pub fn result_lines(tr: &Translator, outcome: &Outcome) -> Vec<String> {
    let f = &outcome.formatted;
    vec![
        format!("{}: {} VND", tr.t(keys::RESULT_FUEL_COST), f.fuel_cost),
        format!("{}: {} VND/km", tr.t(keys::RESULT_COST_PER_KM), f.cost_per_km),
        format!("{}: {} L", tr.t(keys::RESULT_LITERS), f.liters_used),
        format!("{}: {} km/L", tr.t(keys::RESULT_EFFICIENCY), f.efficiency),
        format!("{}: {} VND", tr.t(keys::RESULT_RENTAL), f.rental),
        format!("{}: {} VND", tr.t(keys::RESULT_TOTAL), f.total_cost),
    ]
}

/// Prints the current results.
pub fn print_results(tr: &Translator, session: &Session) {
    println!("\n-- {} --", tr.t(keys::RESULT_HEADING));
    println!("{} {}", tr.t(keys::METHOD_CURRENT), tr.t(session.state().method.label_key()));
    for line in result_lines(tr, session.outcome()) {
        println!("{line}");
    }
}

/// Writes one report of the chosen kind into the export directory.
pub fn handle_export(tr: &Translator, session: &Session, cfg: &Config) -> Result<(), AppError> {
    println!("\n-- {} --", tr.t(keys::EXPORT_HEADING));
    println!("{}", tr.t(keys::EXPORT_OPTIONS));
    let kind = match read_line(&tr.t(keys::PROMPT_SELECT))?.trim() {
        "1" => ReportKind::Markdown,
        "2" => ReportKind::Png,
        "3" => ReportKind::Pdf,
        _ => {
            println!("{}", tr.t(keys::EXPORT_CANCELLED));
            return Ok(());
        }
    };
    let now = Local::now();
    let snapshot = session.snapshot_at(now);
    let renderer = kind.renderer();
    if kind == ReportKind::Markdown {
        println!("\n{}\n", report::MarkdownRenderer.to_markdown(&snapshot));
    }
    // an export failure only ends this action
    match report::save_report(renderer.as_ref(), &snapshot, &cfg.export_dir, now) {
        Ok(path) => println!("{}", tr.tf(keys::EXPORT_SAVED, &[("path", path.display().to_string())])),
        Err(e) => {
            log::error!("export failed: {e}");
            println!("{}", tr.tf(keys::EXPORT_FAILED, &[("error", e.to_string())]));
        }
    }
    Ok(())
}

/// Settings menu.
pub fn handle_settings(tr: &Translator, cfg: &mut Config) -> Result<(), AppError> {
    println!("\n-- {} --", tr.t(keys::SETTINGS_HEADING));
    println!("{} {}", tr.t(keys::SETTINGS_CURRENT_LANGUAGE), cfg.language);
    let lang = read_line(&tr.t(keys::SETTINGS_LANG_PROMPT))?;
    if !lang.trim().is_empty() {
        cfg.language = lang.trim().to_string();
    }
    println!("{}: {}", tr.t(keys::SETTINGS_EXPORT_DIR), cfg.export_dir.display());
    let dir = read_line(&tr.t(keys::SETTINGS_EXPORT_DIR_PROMPT))?;
    if !dir.trim().is_empty() {
        cfg.export_dir = PathBuf::from(dir.trim());
    }
    println!("{}", tr.t(keys::SETTINGS_SAVED));
    Ok(())
}

fn read_line(prompt: &str) -> Result<String, AppError> {
    print!("{prompt}");
    io::stdout().flush()?;
    let mut buf = String::new();
    io::stdin().read_line(&mut buf)?;
    Ok(buf)
}
