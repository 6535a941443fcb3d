//! Validated value types shared by the clinic crates.
//!
//! Each type checks its invariant once, at construction, so code holding one never
//! re-checks it.

use rust_decimal::Decimal;

/// Errors that can occur when creating validated text types.
#[derive(Debug, thiserror::Error)]
pub enum TextError {
    /// The input text was empty or contained only whitespace
    #[error("Text cannot be empty")]
    Empty,
}

/// A string type that guarantees non-empty content.
///
/// The input is trimmed of leading and trailing whitespace during construction.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NonEmptyText(String);

impl NonEmptyText {
    /// Creates a new `NonEmptyText` from the given input.
    ///
    /// # Returns
    ///
    /// Returns `Ok(NonEmptyText)` if the trimmed input is non-empty,
    /// or `Err(TextError::Empty)` if it's empty or contains only whitespace.
    pub fn new(input: impl AsRef<str>) -> Result<Self, TextError> {
        let trimmed = input.as_ref().trim();
        if trimmed.is_empty() {
            return Err(TextError::Empty);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the inner string as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl std::fmt::Display for NonEmptyText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for NonEmptyText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl serde::Serialize for NonEmptyText {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> serde::Deserialize<'de> for NonEmptyText {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        NonEmptyText::new(&s).map_err(serde::de::Error::custom)
    }
}

/// Errors that can occur when creating a [`Fee`].
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum FeeError {
    #[error("Fee value must be positive")]
    NotPositive,
    #[error("Fee value is not a decimal number: {0}")]
    Unparseable(String),
}

/// A strictly positive monetary amount.
///
/// This is the flat per-visit charge of a health system. Zero and negative amounts
/// are rejected; the decimal value is kept exactly as given (no rounding).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Fee(Decimal);

impl Fee {
    /// Creates a new `Fee`, rejecting zero and negative amounts.
    pub fn new(amount: Decimal) -> Result<Self, FeeError> {
        if amount <= Decimal::ZERO {
            return Err(FeeError::NotPositive);
        }
        Ok(Self(amount))
    }

    /// Parses a fee from its canonical decimal text form (as stored on disk).
    pub fn parse(input: &str) -> Result<Self, FeeError> {
        let amount: Decimal = input
            .trim()
            .parse()
            .map_err(|_| FeeError::Unparseable(input.to_owned()))?;
        Self::new(amount)
    }

    pub fn amount(&self) -> Decimal {
        self.0
    }
}

impl std::fmt::Display for Fee {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Fee> for Decimal {
    fn from(fee: Fee) -> Self {
        fee.0
    }
}

impl serde::Serialize for Fee {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        <Decimal as serde::Serialize>::serialize(&self.0, serializer)
    }
}

impl<'de> serde::Deserialize<'de> for Fee {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let amount = <Decimal as serde::Deserialize>::deserialize(deserializer)?;
        Fee::new(amount).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_non_empty_text_trims_input() {
        let text = NonEmptyText::new("  Influenza \n").unwrap();
        assert_eq!(text.as_str(), "Influenza");
    }

    #[test]
    fn test_non_empty_text_rejects_whitespace() {
        assert!(matches!(NonEmptyText::new("   "), Err(TextError::Empty)));
        assert!(matches!(NonEmptyText::new(""), Err(TextError::Empty)));
    }

    #[test]
    fn test_non_empty_text_deserialize_rejects_blank() {
        let err = serde_json::from_str::<NonEmptyText>("\" \"");
        assert!(err.is_err());
    }

    #[test]
    fn test_fee_rejects_zero_and_negative() {
        assert_eq!(Fee::new(Decimal::ZERO), Err(FeeError::NotPositive));
        assert_eq!(Fee::new(dec!(-0.01)), Err(FeeError::NotPositive));
    }

    #[test]
    fn test_fee_keeps_exact_scale() {
        let fee = Fee::new(dec!(12.50)).unwrap();
        assert_eq!(fee.to_string(), "12.50");
    }

    #[test]
    fn test_fee_parse_round_trips_stored_text() {
        let fee = Fee::parse("30.05").unwrap();
        assert_eq!(fee.amount(), dec!(30.05));
        assert!(matches!(Fee::parse("abc"), Err(FeeError::Unparseable(_))));
        assert_eq!(Fee::parse("0"), Err(FeeError::NotPositive));
    }

    #[test]
    fn test_fee_serde_keeps_text_form_and_rejects_non_positive() {
        let json = serde_json::to_string(&Fee::new(dec!(12.50)).unwrap()).unwrap();
        assert_eq!(json, "\"12.50\"");

        let fee: Fee = serde_json::from_str("\"30.05\"").unwrap();
        assert_eq!(fee.amount(), dec!(30.05));
        assert!(serde_json::from_str::<Fee>("\"0\"").is_err());
        assert!(serde_json::from_str::<Fee>("\"-3\"").is_err());
    }
}
