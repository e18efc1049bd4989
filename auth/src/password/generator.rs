use std::fmt;

use rand::seq::SliceRandom;
use rand::Rng;

use super::errors::PasswordError;

const UPPERCASE: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const LOWERCASE: &[u8] = b"abcdefghijklmnopqrstuvwxyz";
const DIGITS: &[u8] = b"0123456789";
const SPECIAL_CHARACTERS: &[u8] = b"!@#$%^&*()_+-=[]{}|;:,.<>?";

/// Random password and PIN generation plus a coarse strength score.
///
/// Every enabled character class is guaranteed to appear at least once
/// (when the length allows it); the result is shuffled so the guaranteed
/// characters do not sit at predictable positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordGenerator {
    pub uppercase: bool,
    pub lowercase: bool,
    pub digits: bool,
    pub special: bool,
}

impl PasswordGenerator {
    pub const DEFAULT_LENGTH: usize = 12;

    /// All four character classes enabled.
    pub fn new() -> Self {
        Self {
            uppercase: true,
            lowercase: true,
            digits: true,
            special: true,
        }
    }

    /// Letters and digits only.
    pub fn alphanumeric() -> Self {
        Self {
            special: false,
            ..Self::new()
        }
    }

    /// Digits only.
    pub fn numeric() -> Self {
        Self {
            uppercase: false,
            lowercase: false,
            digits: true,
            special: false,
        }
    }

    /// Generate a password of `length` characters.
    ///
    /// # Errors
    /// * `InvalidLength` - `length` is zero
    /// * `NoCharacterClass` - Every character class is disabled
    pub fn generate(&self, length: usize) -> Result<String, PasswordError> {
        if length < 1 {
            return Err(PasswordError::InvalidLength);
        }

        let classes = self.enabled_classes();
        if classes.is_empty() {
            return Err(PasswordError::NoCharacterClass);
        }

        let mut rng = rand::rng();
        let pool: Vec<u8> = classes.concat();

        let mut chars: Vec<u8> = classes
            .iter()
            .map(|class| class[rng.random_range(0..class.len())])
            .collect();

        while chars.len() < length {
            chars.push(pool[rng.random_range(0..pool.len())]);
        }

        chars.shuffle(&mut rng);
        // More classes than requested characters: keep a prefix of the shuffle
        chars.truncate(length);

        Ok(chars.into_iter().map(char::from).collect())
    }

    fn enabled_classes(&self) -> Vec<&'static [u8]> {
        [
            (self.uppercase, UPPERCASE),
            (self.lowercase, LOWERCASE),
            (self.digits, DIGITS),
            (self.special, SPECIAL_CHARACTERS),
        ]
        .into_iter()
        .filter_map(|(enabled, class)| enabled.then_some(class))
        .collect()
    }
}

impl Default for PasswordGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Generate a 12 character password using every character class.
pub fn generate_password() -> Result<String, PasswordError> {
    PasswordGenerator::new().generate(PasswordGenerator::DEFAULT_LENGTH)
}

/// Generate a letters-and-digits password.
pub fn generate_simple_password(length: usize) -> Result<String, PasswordError> {
    PasswordGenerator::alphanumeric().generate(length)
}

/// Generate a numeric PIN.
pub fn generate_numeric_pin(length: usize) -> Result<String, PasswordError> {
    PasswordGenerator::numeric().generate(length)
}

/// Password strength levels, weakest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum PasswordStrength {
    VeryWeak,
    Weak,
    Medium,
    Strong,
    VeryStrong,
}

impl PasswordStrength {
    /// Score a password.
    ///
    /// One point each for length >= 8, >= 12 and >= 16; for containing a
    /// lowercase letter, an uppercase letter, a digit and a special
    /// character; for mixing both letter cases; and for mixing letters with
    /// digits. Anything shorter than 4 characters is `VeryWeak`.
    pub fn of(password: &str) -> Self {
        let length = password.chars().count();
        if length < 4 {
            return Self::VeryWeak;
        }

        let has_lower = password.chars().any(|c| c.is_ascii_lowercase());
        let has_upper = password.chars().any(|c| c.is_ascii_uppercase());
        let has_digit = password.chars().any(|c| c.is_ascii_digit());
        let has_special = password
            .bytes()
            .any(|b| SPECIAL_CHARACTERS.contains(&b));

        let score = [
            length >= 8,
            length >= 12,
            length >= 16,
            has_lower,
            has_upper,
            has_digit,
            has_special,
            has_lower && has_upper,
            (has_lower || has_upper) && has_digit,
        ]
        .into_iter()
        .filter(|point| *point)
        .count();

        match score {
            0..=2 => Self::VeryWeak,
            3..=4 => Self::Weak,
            5..=6 => Self::Medium,
            7..=8 => Self::Strong,
            _ => Self::VeryStrong,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::VeryWeak => "Very Weak",
            Self::Weak => "Weak",
            Self::Medium => "Medium",
            Self::Strong => "Strong",
            Self::VeryStrong => "Very Strong",
        }
    }
}

impl fmt::Display for PasswordStrength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}
