use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::ValidationError;

const IATA_LEN: usize = 3;

/// Normalized IATA airport/city code: exactly three ASCII letters, stored
/// uppercase.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct IataCode(String);

impl IataCode {
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let normalized = input.trim().to_ascii_uppercase();
        let valid = normalized.len() == IATA_LEN
            && normalized.chars().all(|ch| ch.is_ascii_alphabetic());

        if !valid {
            return Err(ValidationError::InvalidIataCode {
                value: input.to_owned(),
            });
        }

        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for IataCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for IataCode {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl TryFrom<&str> for IataCode {
    type Error = ValidationError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<IataCode> for String {
    fn from(value: IataCode) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_normalizes_code() {
        let parsed = IataCode::parse(" ltn ").expect("code should parse");
        assert_eq!(parsed.as_str(), "LTN");
    }

    #[test]
    fn rejects_wrong_length() {
        let err = IataCode::parse("LHRX").expect_err("must fail");
        assert!(matches!(err, ValidationError::InvalidIataCode { .. }));
        assert!(IataCode::parse("LH").is_err());
    }

    #[test]
    fn rejects_non_letters() {
        assert!(IataCode::parse("L2N").is_err());
        assert!(IataCode::parse("").is_err());
    }
}
