use {
    anyhow::{Result, bail},
    clap::Args,
    passkeep_config::PasskeepConfig,
    passkeep_crypto::{
        CharClasses, PasswordGenerator, PasswordPolicy, StrengthReport, score, validate_password,
    },
    secrecy::ExposeSecret,
    serde::Serialize,
};

use crate::secret_commands::read_secret;

#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Password length, clamped to the configured range.
    #[arg(long, short)]
    pub length: Option<u32>,
    /// Include lowercase letters.
    #[arg(long)]
    pub lower: bool,
    /// Include uppercase letters.
    #[arg(long)]
    pub upper: bool,
    /// Include digits.
    #[arg(long)]
    pub digit: bool,
    /// Include symbols.
    #[arg(long)]
    pub symbol: bool,
}

#[derive(Serialize)]
struct Suggestion<'a> {
    password: &'a str,
    strength: StrengthReport,
}

/// Classes from flags; with no flags, the configured defaults.
fn selected_classes(config: &PasskeepConfig, args: &GenerateArgs) -> CharClasses {
    let from_flags = CharClasses {
        lower: args.lower,
        upper: args.upper,
        digit: args.digit,
        symbol: args.symbol,
    };
    if !from_flags.is_empty() {
        return from_flags;
    }
    let g = &config.generator;
    CharClasses {
        lower: g.lower,
        upper: g.upper,
        digit: g.digit,
        symbol: g.symbol,
    }
}

pub fn generate(config: &PasskeepConfig, args: &GenerateArgs) -> Result<()> {
    let length = config.generator.resolve_length(args.length);
    let classes = selected_classes(config, args);
    let password = PasswordGenerator::new().generate(i64::from(length), classes)?;

    let suggestion = Suggestion {
        password: password.as_str(),
        strength: score(password.as_str()),
    };
    println!("{}", serde_json::to_string_pretty(&suggestion)?);
    Ok(())
}

pub fn strength(password: Option<String>) -> Result<()> {
    let password = read_secret(password)?;
    let report = score(password.expose_secret());
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

pub fn check_policy(config: &PasskeepConfig, password: Option<String>) -> Result<()> {
    let password = read_secret(password)?;
    let policy = PasswordPolicy {
        min_length: config.policy.min_length,
        require_strong: config.policy.require_strong,
    };
    if let Err(violation) = validate_password(password.expose_secret(), &policy) {
        bail!(violation);
    }
    println!("ok");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_flags() -> GenerateArgs {
        GenerateArgs {
            length: None,
            lower: false,
            upper: false,
            digit: false,
            symbol: false,
        }
    }

    #[test]
    fn flags_override_config_classes() {
        let config = PasskeepConfig::default();
        let args = GenerateArgs {
            symbol: true,
            ..no_flags()
        };
        assert_eq!(selected_classes(&config, &args), CharClasses {
            symbol: true,
            ..Default::default()
        });
    }

    #[test]
    fn no_flags_use_config_classes() {
        let mut config = PasskeepConfig::default();
        config.generator.symbol = true;
        assert_eq!(selected_classes(&config, &no_flags()), CharClasses::ALL);
    }

    #[test]
    fn config_with_no_classes_falls_through_to_generator_default() {
        let mut config = PasskeepConfig::default();
        config.generator.lower = false;
        config.generator.upper = false;
        config.generator.digit = false;
        let classes = selected_classes(&config, &no_flags());
        assert!(classes.is_empty());
        assert_eq!(classes.alphabet(), CharClasses::DEFAULT.alphabet());
    }
}
