mod config_commands;
mod generate_commands;
mod secret_commands;

use {
    clap::{Parser, Subcommand},
    tracing::debug,
    tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt},
};

#[derive(Parser)]
#[command(name = "passkeep", about = "passkeep: credential cryptography toolkit", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    /// Output logs as JSON instead of human-readable.
    #[arg(long, global = true, default_value_t = false)]
    json_logs: bool,

    /// Custom config directory (overrides default ~/.config/passkeep/).
    #[arg(long, global = true, env = "PASSKEEP_CONFIG_DIR")]
    config_dir: Option<std::path::PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Hash a login password (Argon2id, PHC string on stdout).
    Hash {
        /// Password to hash; read from stdin when omitted.
        #[arg(long)]
        password: Option<String>,
    },
    /// Check a password against a stored hash. Exits 1 on mismatch.
    Verify {
        /// Stored PHC hash string.
        #[arg(long)]
        hash: String,
        /// Password to check; read from stdin when omitted.
        #[arg(long)]
        password: Option<String>,
    },
    /// Print the derived encryption key (base64).
    DeriveKey {
        #[command(flatten)]
        key: secret_commands::KeyArgs,
    },
    /// Encrypt a secret for storage.
    Encrypt {
        #[command(flatten)]
        key: secret_commands::KeyArgs,
        /// Secret to encrypt; read from stdin when omitted.
        #[arg(long)]
        value: Option<String>,
    },
    /// Decrypt a stored ciphertext.
    Decrypt {
        #[command(flatten)]
        key: secret_commands::KeyArgs,
        /// Base64 ciphertext; read from stdin when omitted.
        #[arg(long)]
        ciphertext: Option<String>,
    },
    /// Suggest a random password and score it.
    Generate(generate_commands::GenerateArgs),
    /// Score a password's strength.
    Strength {
        /// Password to score; read from stdin when omitted.
        #[arg(long)]
        password: Option<String>,
    },
    /// Check a password against the configured policy. Exits 1 on violation.
    CheckPolicy {
        /// Password to check; read from stdin when omitted.
        #[arg(long)]
        password: Option<String>,
    },
    /// Configuration management.
    Config {
        #[command(subcommand)]
        action: config_commands::ConfigAction,
    },
}

fn init_telemetry(cli: &Cli) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));

    let registry = tracing_subscriber::registry().with(filter);

    // stdout carries command output; logs go to stderr.
    if cli.json_logs {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_thread_ids(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_thread_ids(false)
                    .with_ansi(true)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    init_telemetry(&cli);

    debug!(version = env!("CARGO_PKG_VERSION"), "passkeep starting");

    let config = passkeep_config::discover_and_load(cli.config_dir.as_deref());

    match cli.command {
        Commands::Hash { password } => secret_commands::hash(&config, password),
        Commands::Verify { hash, password } => secret_commands::verify(&hash, password),
        Commands::DeriveKey { key } => secret_commands::derive_key(&config, &key),
        Commands::Encrypt { key, value } => secret_commands::encrypt(&config, &key, value),
        Commands::Decrypt { key, ciphertext } => {
            secret_commands::decrypt(&config, &key, ciphertext)
        },
        Commands::Generate(args) => generate_commands::generate(&config, &args),
        Commands::Strength { password } => generate_commands::strength(password),
        Commands::CheckPolicy { password } => generate_commands::check_policy(&config, password),
        Commands::Config { action } => {
            config_commands::handle_config(action, &config, cli.config_dir.as_deref())
        },
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_generate_with_classes() {
        let cli = Cli::try_parse_from([
            "passkeep",
            "generate",
            "--length",
            "20",
            "--upper",
            "--symbol",
        ])
        .unwrap();
        let Commands::Generate(args) = cli.command else {
            panic!("expected generate");
        };
        assert_eq!(args.length, Some(20));
        assert!(args.upper && args.symbol);
        assert!(!args.lower && !args.digit);
    }

    #[test]
    fn parses_encrypt_with_user_id() {
        let cli = Cli::try_parse_from([
            "passkeep",
            "encrypt",
            "--user-id",
            "42",
            "--value",
            "hunter2",
        ])
        .unwrap();
        let Commands::Encrypt { key, value } = cli.command else {
            panic!("expected encrypt");
        };
        assert_eq!(key.user_id, Some(42));
        assert_eq!(value.as_deref(), Some("hunter2"));
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "passkeep",
            "strength",
            "--log-level",
            "debug",
            "--json-logs",
        ])
        .unwrap();
        assert_eq!(cli.log_level, "debug");
        assert!(cli.json_logs);
    }

    #[test]
    fn subcommand_is_required() {
        assert!(Cli::try_parse_from(["passkeep"]).is_err());
    }
}
