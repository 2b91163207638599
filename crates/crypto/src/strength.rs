//! Heuristic password strength scoring.

use crate::generator::CharClass;

/// Strength tier derived from the score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Weak,
    Medium,
    Strong,
}

impl Tier {
    /// Score ≥ 5 is strong, ≥ 3 medium, anything lower weak.
    pub fn from_score(score: u8) -> Self {
        match score {
            5.. => Self::Strong,
            3.. => Self::Medium,
            _ => Self::Weak,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Weak => "weak",
            Self::Medium => "medium",
            Self::Strong => "strong",
        }
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of [`score`].
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct StrengthReport {
    /// Length in UTF-8 bytes.
    pub length: usize,
    pub has_lower: bool,
    pub has_upper: bool,
    pub has_digit: bool,
    pub has_symbol: bool,
    /// 0..=6.
    pub score: u8,
    pub tier: Tier,
}

/// Score a password.
///
/// One point each for length ≥ 8, length ≥ 12, and the presence of lowercase,
/// uppercase, digit, and symbol characters (symbols being the generator's
/// symbol set). Length is measured in bytes, so multi-byte characters count
/// more than once toward the length points but never toward a class.
pub fn score(password: &str) -> StrengthReport {
    let length = password.len();

    let mut has_lower = false;
    let mut has_upper = false;
    let mut has_digit = false;
    let mut has_symbol = false;
    for c in password.chars() {
        match CharClass::of(c) {
            Some(CharClass::Lower) => has_lower = true,
            Some(CharClass::Upper) => has_upper = true,
            Some(CharClass::Digit) => has_digit = true,
            Some(CharClass::Symbol) => has_symbol = true,
            None => {},
        }
    }

    let score: u8 = [
        length >= 8,
        length >= 12,
        has_lower,
        has_upper,
        has_digit,
        has_symbol,
    ]
    .into_iter()
    .map(u8::from)
    .sum();

    StrengthReport {
        length,
        has_lower,
        has_upper,
        has_digit,
        has_symbol,
        score,
        tier: Tier::from_score(score),
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("123", Tier::Weak)]
    #[case("Password123", Tier::Medium)]
    #[case("Password123!@#", Tier::Strong)]
    #[case("", Tier::Weak)]
    fn tier_table(#[case] password: &str, #[case] expected: Tier) {
        assert_eq!(score(password).tier, expected);
    }

    #[rstest]
    #[case(0, Tier::Weak)]
    #[case(2, Tier::Weak)]
    #[case(3, Tier::Medium)]
    #[case(4, Tier::Medium)]
    #[case(5, Tier::Strong)]
    #[case(6, Tier::Strong)]
    fn tier_boundaries(#[case] score: u8, #[case] expected: Tier) {
        assert_eq!(Tier::from_score(score), expected);
    }

    #[test]
    fn empty_password_scores_zero() {
        let report = score("");
        assert_eq!(report.score, 0);
        assert_eq!(report.length, 0);
        assert_eq!(report.tier, Tier::Weak);
    }

    #[test]
    fn medium_breakdown() {
        // Length 11: only the first length point, plus upper, lower, digit.
        let report = score("Password123");
        assert_eq!(report.length, 11);
        assert!(report.has_lower && report.has_upper && report.has_digit);
        assert!(!report.has_symbol);
        assert_eq!(report.score, 4);
    }

    #[test]
    fn maximum_score_is_six() {
        let report = score("Password123!@#");
        assert_eq!(report.score, 6);
    }

    #[test]
    fn repeated_class_counts_once() {
        assert_eq!(score("aaaaaaa").score, 1);
    }

    #[test]
    fn length_is_measured_in_bytes() {
        // Four characters, eight bytes.
        let report = score("éééé");
        assert_eq!(report.length, 8);
        assert!(!report.has_lower);
        assert_eq!(report.score, 1);
        assert_eq!(report.tier, Tier::Weak);
    }

    #[test]
    fn unknown_characters_only_count_toward_length() {
        // Six two-byte characters, a space and '~': 14 bytes.
        let report = score("éééééé ~");
        assert_eq!(report.length, 14);
        assert!(!report.has_lower && !report.has_symbol);
        assert_eq!(report.score, 2);
    }

    #[test]
    fn report_serializes_tier_lowercase() {
        let json = serde_json::to_value(score("123")).unwrap();
        assert_eq!(json["tier"], "weak");
        assert_eq!(json["has_digit"], true);
        assert_eq!(json["score"], 1);
    }
}
