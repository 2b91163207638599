//! Random password generation from selectable character classes.
//!
//! Each character is drawn independently and uniformly from the union of the
//! selected classes. There is no guarantee that every selected class shows
//! up in a given password: a 4-character password from all four classes can
//! easily contain only letters.

use zeroize::Zeroizing;

use crate::{
    error::CryptoError,
    random::{OsRandom, RandomSource},
};

pub const LOWER_CHARS: &str = "abcdefghijklmnopqrstuvwxyz";
pub const UPPER_CHARS: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
pub const DIGIT_CHARS: &str = "0123456789";
pub const SYMBOL_CHARS: &str = "!@#$%^&*()_+-=[]{}|;:,.<>?";

/// A character class the generator can draw from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CharClass {
    Lower,
    Upper,
    Digit,
    Symbol,
}

impl CharClass {
    pub const ALL: [Self; 4] = [Self::Lower, Self::Upper, Self::Digit, Self::Symbol];

    pub fn chars(self) -> &'static str {
        match self {
            Self::Lower => LOWER_CHARS,
            Self::Upper => UPPER_CHARS,
            Self::Digit => DIGIT_CHARS,
            Self::Symbol => SYMBOL_CHARS,
        }
    }

    /// Class of `c`, if it belongs to one of the generator alphabets.
    pub fn of(c: char) -> Option<Self> {
        Self::ALL.into_iter().find(|class| class.chars().contains(c))
    }
}

/// Selected character classes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct CharClasses {
    pub lower: bool,
    pub upper: bool,
    pub digit: bool,
    pub symbol: bool,
}

impl CharClasses {
    /// Substituted when nothing is selected: letters and digits.
    pub const DEFAULT: Self = Self {
        lower: true,
        upper: true,
        digit: true,
        symbol: false,
    };

    pub const ALL: Self = Self {
        lower: true,
        upper: true,
        digit: true,
        symbol: true,
    };

    pub fn is_empty(&self) -> bool {
        !(self.lower || self.upper || self.digit || self.symbol)
    }

    pub fn contains(&self, class: CharClass) -> bool {
        match class {
            CharClass::Lower => self.lower,
            CharClass::Upper => self.upper,
            CharClass::Digit => self.digit,
            CharClass::Symbol => self.symbol,
        }
    }

    pub fn with(mut self, class: CharClass) -> Self {
        match class {
            CharClass::Lower => self.lower = true,
            CharClass::Upper => self.upper = true,
            CharClass::Digit => self.digit = true,
            CharClass::Symbol => self.symbol = true,
        }
        self
    }

    /// Concatenated alphabet in lower, upper, digit, symbol order.
    ///
    /// An empty selection yields the [`DEFAULT`](Self::DEFAULT) alphabet.
    pub fn alphabet(&self) -> Vec<u8> {
        let selected = if self.is_empty() {
            Self::DEFAULT
        } else {
            *self
        };
        CharClass::ALL
            .into_iter()
            .filter(|class| selected.contains(*class))
            .flat_map(|class| class.chars().bytes())
            .collect()
    }
}

impl FromIterator<CharClass> for CharClasses {
    fn from_iter<I: IntoIterator<Item = CharClass>>(iter: I) -> Self {
        iter.into_iter().fold(Self::default(), Self::with)
    }
}

/// A generated password, zeroed on drop.
pub struct GeneratedPassword(Zeroizing<String>);

impl GeneratedPassword {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Length in characters (all generator alphabets are ASCII).
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Debug for GeneratedPassword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("GeneratedPassword([REDACTED])")
    }
}

/// Draws passwords from a [`RandomSource`].
#[derive(Debug, Clone, Default)]
pub struct PasswordGenerator<R = OsRandom> {
    rng: R,
}

impl PasswordGenerator<OsRandom> {
    pub fn new() -> Self {
        Self { rng: OsRandom }
    }
}

impl<R: RandomSource> PasswordGenerator<R> {
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }

    /// Generate `length` characters from `classes`.
    ///
    /// `length` must be positive; range limits such as 4..=128 belong to the
    /// caller. An empty `classes` falls back to [`CharClasses::DEFAULT`].
    pub fn generate(
        &self,
        length: i64,
        classes: CharClasses,
    ) -> Result<GeneratedPassword, CryptoError> {
        if length <= 0 {
            return Err(CryptoError::InvalidArgument(format!(
                "password length must be positive, got {length}"
            )));
        }
        let length = usize::try_from(length).map_err(|_| {
            CryptoError::InvalidArgument(format!("password length too large: {length}"))
        })?;

        #[cfg(feature = "tracing")]
        if classes.is_empty() {
            tracing::debug!("no character classes selected, using letters and digits");
        }

        let alphabet = classes.alphabet();
        // Alphabets are at most 88 bytes.
        let bound = alphabet.len() as u32;

        let mut password = Zeroizing::new(String::new());
        password.try_reserve_exact(length).map_err(|_| {
            CryptoError::InvalidArgument(format!("password length too large: {length}"))
        })?;
        for _ in 0..length {
            let index = self.rng.below(bound)? as usize;
            password.push(char::from(alphabet[index]));
        }

        Ok(GeneratedPassword(password))
    }
}

/// Generate with the OS RNG.
pub fn generate(length: i64, classes: CharClasses) -> Result<GeneratedPassword, CryptoError> {
    PasswordGenerator::new().generate(length, classes)
}
