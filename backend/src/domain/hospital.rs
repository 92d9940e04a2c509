//! Hospitals: shared reference data that patients are admitted to.

use std::fmt;

use serde::Serialize;

use super::{EntityName, Error, HospitalId};

/// Number of digits a hospital phone number must contain.
pub const PHONE_DIGITS: usize = 10;

/// Validation errors for hospital phone numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhoneNumberValidationError {
    /// Phone number was missing or empty.
    Empty,
    /// Fewer or more than [`PHONE_DIGITS`] digits remained after cleaning.
    WrongDigitCount {
        /// Digits found after stripping other characters.
        found: usize,
    },
}

impl fmt::Display for PhoneNumberValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("Phone number cannot be empty."),
            Self::WrongDigitCount { .. } => {
                write!(f, "Phone number must contain {PHONE_DIGITS} digits.")
            }
        }
    }
}

impl std::error::Error for PhoneNumberValidationError {}

impl From<PhoneNumberValidationError> for Error {
    fn from(value: PhoneNumberValidationError) -> Self {
        Self::invalid_request(value.to_string())
    }
}

/// Phone number normalised to exactly ten ASCII digits.
///
/// # Examples
/// ```
/// use registry_backend::domain::PhoneNumber;
///
/// let phone = PhoneNumber::parse("(773) 702-1000").unwrap();
/// assert_eq!(phone.as_ref(), "7737021000");
/// assert!(PhoneNumber::parse("702-1000").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Strip every non-digit character and require exactly ten digits.
    pub fn parse(raw: &str) -> Result<Self, PhoneNumberValidationError> {
        if raw.is_empty() {
            return Err(PhoneNumberValidationError::Empty);
        }
        let cleaned: String = raw.chars().filter(char::is_ascii_digit).collect();
        if cleaned.len() != PHONE_DIGITS {
            return Err(PhoneNumberValidationError::WrongDigitCount {
                found: cleaned.len(),
            });
        }
        Ok(Self(cleaned))
    }
}

impl AsRef<str> for PhoneNumber {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl From<PhoneNumber> for String {
    fn from(value: PhoneNumber) -> Self {
        value.0
    }
}

/// Hospital row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hospital {
    id: HospitalId,
    name: EntityName,
    phone_number: PhoneNumber,
}

impl Hospital {
    /// Build a hospital from validated components.
    pub fn new(id: HospitalId, name: EntityName, phone_number: PhoneNumber) -> Self {
        Self {
            id,
            name,
            phone_number,
        }
    }

    /// Hospital identifier.
    pub fn id(&self) -> HospitalId {
        self.id
    }

    /// Unique hospital name.
    pub fn name(&self) -> &EntityName {
        &self.name
    }

    /// Normalised ten-digit phone number.
    pub fn phone_number(&self) -> &PhoneNumber {
        &self.phone_number
    }

    /// Replace the name.
    pub fn rename(&mut self, name: EntityName) {
        self.name = name;
    }

    /// Replace the phone number.
    pub fn set_phone_number(&mut self, phone_number: PhoneNumber) {
        self.phone_number = phone_number;
    }
}

/// Hospital awaiting insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewHospital {
    /// Unique hospital name.
    pub name: EntityName,
    /// Normalised phone number.
    pub phone_number: PhoneNumber,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("7737021000", "7737021000")]
    #[case("(312) 926-2000", "3129262000")]
    #[case("888.352.7874", "8883527874")]
    #[case("tel: 847 570 2000 ", "8475702000")]
    fn phone_numbers_keep_only_digits(#[case] raw: &str, #[case] expected: &str) {
        let phone = PhoneNumber::parse(raw).expect("ten digits");
        assert_eq!(phone.as_ref(), expected);
        assert!(phone.as_ref().chars().all(|c| c.is_ascii_digit()));
        assert_eq!(phone.as_ref().len(), PHONE_DIGITS);
    }

    #[rstest]
    #[case("708-684-800", 9)]
    #[case("1-708-684-8000", 11)]
    #[case("call me", 0)]
    fn wrong_digit_counts_are_rejected(#[case] raw: &str, #[case] found: usize) {
        let err = PhoneNumber::parse(raw).expect_err("wrong digit count");
        assert_eq!(err, PhoneNumberValidationError::WrongDigitCount { found });
        assert_eq!(err.to_string(), "Phone number must contain 10 digits.");
    }

    #[rstest]
    fn empty_phone_number_is_rejected() {
        let err = PhoneNumber::parse("").expect_err("empty phone");
        assert_eq!(err.to_string(), "Phone number cannot be empty.");
    }
}
