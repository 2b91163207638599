use std::path::Path;

use {
    anyhow::{Result, bail},
    clap::Subcommand,
    passkeep_config::{PasskeepConfig, Severity, validate},
};

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print the effective configuration as TOML.
    Show,
    /// Validate the effective configuration and report errors/warnings.
    Check,
    /// Write a default config file.
    Init {
        /// Overwrite an existing file.
        #[arg(long)]
        force: bool,
    },
}

pub fn handle_config(
    action: ConfigAction,
    config: &PasskeepConfig,
    config_dir: Option<&Path>,
) -> Result<()> {
    match action {
        ConfigAction::Show => {
            print!("{}", toml::to_string_pretty(config)?);
            Ok(())
        },
        ConfigAction::Check => check(config),
        ConfigAction::Init { force } => init(config_dir, force),
    }
}

/// ANSI color codes.
const RED: &str = "\x1b[31m";
const YELLOW: &str = "\x1b[33m";
const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

fn check(config: &PasskeepConfig) -> Result<()> {
    let result = validate(config);

    for d in &result.diagnostics {
        let color = match d.severity {
            Severity::Error => RED,
            Severity::Warning => YELLOW,
        };
        eprintln!(
            "  {BOLD}{color}{}{RESET} {}: {}",
            d.severity, d.path, d.message
        );
    }

    let errors = result.count(Severity::Error);
    let warnings = result.count(Severity::Warning);

    if errors == 0 && warnings == 0 {
        eprintln!("No issues found.");
    } else {
        eprintln!("\n{errors} error(s), {warnings} warning(s)");
    }

    if result.has_errors() {
        bail!("configuration has errors");
    }
    Ok(())
}

fn init(config_dir: Option<&Path>, force: bool) -> Result<()> {
    let path = passkeep_config::find_or_default_config_path(config_dir);
    if path.exists() && !force {
        bail!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }
    passkeep_config::save_config(&PasskeepConfig::default(), &path)?;
    eprintln!("Wrote {}", path.display());
    Ok(())
}
