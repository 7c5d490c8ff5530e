use std::path::Path;

use thiserror::Error;

use crate::config::{Config, ConfigError};
use crate::form::{FormState, Session};
use crate::i18n::{self, Translator};
use crate::report::ExportError;
use crate::ui_cli::{self, MenuChoice};

/// Errors that end an application run.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("settings error: {0}")]
    Config(#[from] ConfigError),

    #[error("export error: {0}")]
    Export(#[from] ExportError),

    #[error("{failed} of {requested} exports failed")]
    ExportsFailed { failed: usize, requested: usize },
}

/// Runs the interactive CLI main loop. Settings changes are written to `config_path`.
pub fn run(config: &mut Config, config_path: &Path, tr: &mut Translator) -> Result<(), AppError> {
    let mut session = Session::new(FormState::with_defaults(&config.defaults));
    loop {
        match ui_cli::main_menu(tr)? {
            MenuChoice::Method => ui_cli::handle_method(tr, &mut session)?,
            MenuChoice::Fields => ui_cli::handle_fields(tr, &mut session)?,
            MenuChoice::Conditions => ui_cli::handle_conditions(tr, &mut session)?,
            MenuChoice::Results => ui_cli::print_results(tr, &session),
            MenuChoice::Export => ui_cli::handle_export(tr, &session, config)?,
            MenuChoice::Settings => {
                ui_cli::handle_settings(tr, config)?;
                config.save_to(config_path)?;
                let resolved = i18n::resolve_language(&config.language, None);
                *tr = Translator::new_with_pack(&resolved, config.language_pack_dir.as_deref());
            }
            MenuChoice::Exit => {
                config.save_to(config_path)?;
                println!("{}", tr.t(i18n::keys::APP_EXIT));
                break;
            }
        }
    }
    Ok(())
}
