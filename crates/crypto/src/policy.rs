//! Password policy checks for account passwords.

use unicode_general_category::{GeneralCategory as G, get_general_category};

/// Requirements a chosen password must meet.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PasswordPolicy {
    /// Minimum length in UTF-8 bytes.
    pub min_length: usize,
    /// Require at least one uppercase, lowercase, digit, and symbol character.
    pub require_strong: bool,
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self {
            min_length: 8,
            require_strong: false,
        }
    }
}

/// First unmet requirement.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PolicyViolation {
    #[error("password must be at least {min} characters")]
    TooShort { min: usize },
    #[error("password must contain an uppercase letter")]
    MissingUpper,
    #[error("password must contain a lowercase letter")]
    MissingLower,
    #[error("password must contain a digit")]
    MissingDigit,
    #[error("password must contain a symbol")]
    MissingSymbol,
}

/// Check `password` against `policy`.
///
/// Length is measured in bytes. Classes follow the Unicode general category:
/// `Lu` upper, `Ll` lower, `N*` digit, `P*` or `S*` symbol. This is broader
/// than [`score`](crate::strength::score), which only counts the generator
/// alphabets.
pub fn validate_password(password: &str, policy: &PasswordPolicy) -> Result<(), PolicyViolation> {
    if password.len() < policy.min_length {
        return Err(PolicyViolation::TooShort {
            min: policy.min_length,
        });
    }

    if !policy.require_strong {
        return Ok(());
    }

    let mut has_upper = false;
    let mut has_lower = false;
    let mut has_digit = false;
    let mut has_symbol = false;
    for c in password.chars() {
        match get_general_category(c) {
            G::UppercaseLetter => has_upper = true,
            G::LowercaseLetter => has_lower = true,
            G::DecimalNumber | G::LetterNumber | G::OtherNumber => has_digit = true,
            G::ConnectorPunctuation
            | G::DashPunctuation
            | G::OpenPunctuation
            | G::ClosePunctuation
            | G::InitialPunctuation
            | G::FinalPunctuation
            | G::OtherPunctuation
            | G::MathSymbol
            | G::CurrencySymbol
            | G::ModifierSymbol
            | G::OtherSymbol => has_symbol = true,
            _ => {},
        }
    }

    if !has_upper {
        return Err(PolicyViolation::MissingUpper);
    }
    if !has_lower {
        return Err(PolicyViolation::MissingLower);
    }
    if !has_digit {
        return Err(PolicyViolation::MissingDigit);
    }
    if !has_symbol {
        return Err(PolicyViolation::MissingSymbol);
    }
    Ok(())
}
