use std::path::PathBuf;

use clap::Parser;
use chum_fuel::cli::{self, Cli, Command};
use chum_fuel::{app, config, i18n};

/// CLI entry point. Loads settings, then runs a subcommand or the interactive menu.
fn main() {
    env_logger::init();
    if let Err(err) = try_run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn try_run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Cli::parse();
    let cfg_path = args
        .config
        .clone()
        .unwrap_or_else(|| PathBuf::from(config::CONFIG_FILE));
    let mut cfg = config::load_from(&cfg_path)?;
    let lang = i18n::resolve_language(&args.lang, Some(cfg.language.as_str()));
    let mut tr = i18n::Translator::new_with_pack(&lang, cfg.language_pack_dir.as_deref());
    match &args.command {
        Some(Command::Calc(calc)) => cli::run_calc(calc, &cfg, &tr)?,
        None => app::run(&mut cfg, &cfg_path, &mut tr)?,
    }
    Ok(())
}
