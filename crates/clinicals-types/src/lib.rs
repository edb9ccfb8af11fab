/// Errors that can occur when creating validated text types.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TextError {
    /// The input text was empty or contained only whitespace
    #[error("Text cannot be empty")]
    Empty,
    /// The input text has more characters than allowed
    #[error("Text exceeds maximum length of {max} characters")]
    TooLong { max: usize },
}

/// A string type that guarantees non-blank content.
///
/// The input must contain at least one non-whitespace character. Unlike a trimmed
/// name field, the input is stored verbatim so it round-trips exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NonEmptyText(String);

impl NonEmptyText {
    /// Wraps `input` unchanged, or fails with `TextError::Empty` when it is blank.
    pub fn new(input: impl AsRef<str>) -> Result<Self, TextError> {
        let input = input.as_ref();
        if input.trim().is_empty() {
            return Err(TextError::Empty);
        }
        Ok(Self(input.to_owned()))
    }

    /// Creates a new `NonEmptyText` that is at most `max` characters long.
    ///
    /// Length is measured in Unicode scalar values, not bytes.
    pub fn with_max_chars(input: impl AsRef<str>, max: usize) -> Result<Self, TextError> {
        let text = Self::new(input)?;
        if text.0.chars().count() > max {
            return Err(TextError::TooLong { max });
        }
        Ok(text)
    }

    /// Returns the inner string as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the wrapper and returns the owned string.
    pub fn into_inner(self) -> String {
        self.0
    }
}

/// Errors that can occur when creating an [`Age`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AgeError {
    #[error("Age must be at least {min}")]
    TooYoung { min: u8 },
    #[error("Age must not exceed {max}")]
    TooOld { max: u8 },
}

/// A patient age in whole years, guaranteed to lie within `Age::MIN..=Age::MAX`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Age(u8);

impl Age {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 150;

    /// Creates a new `Age`, rejecting values outside `1..=150`.
    pub fn new(years: i64) -> Result<Self, AgeError> {
        if years < i64::from(Self::MIN) {
            return Err(AgeError::TooYoung { min: Self::MIN });
        }
        if years > i64::from(Self::MAX) {
            return Err(AgeError::TooOld { max: Self::MAX });
        }
        // Range checked above.
        Ok(Self(years as u8))
    }

    pub fn years(self) -> u8 {
        self.0
    }
}
