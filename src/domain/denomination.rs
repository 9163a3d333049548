use crate::error::PaymentError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A coin the machine can accept and dispense.
///
/// Variants are declared largest-first, so the derived `Ord` sorts them in
/// table order and ordered maps keyed by `Denomination` iterate largest-first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Denomination {
    C20000,
    C10000,
    C5000,
    C2000,
    C1000,
    C500,
    C200,
    C100,
    C50,
    C20,
    C10,
    C5,
}

impl Denomination {
    /// Every denomination, descending by face value.
    pub const ALL: [Denomination; 12] = [
        Denomination::C20000,
        Denomination::C10000,
        Denomination::C5000,
        Denomination::C2000,
        Denomination::C1000,
        Denomination::C500,
        Denomination::C200,
        Denomination::C100,
        Denomination::C50,
        Denomination::C20,
        Denomination::C10,
        Denomination::C5,
    ];

    /// The smallest coin. Every amount the machine handles is a multiple of it.
    pub const MIN: Denomination = Denomination::C5;

    pub const fn face_value(self) -> u32 {
        match self {
            Denomination::C20000 => 20000,
            Denomination::C10000 => 10000,
            Denomination::C5000 => 5000,
            Denomination::C2000 => 2000,
            Denomination::C1000 => 1000,
            Denomination::C500 => 500,
            Denomination::C200 => 200,
            Denomination::C100 => 100,
            Denomination::C50 => 50,
            Denomination::C20 => 20,
            Denomination::C10 => 10,
            Denomination::C5 => 5,
        }
    }

    pub const fn min_face_value() -> u32 {
        Denomination::MIN.face_value()
    }

    /// Resolves an exact face value to its denomination.
    pub fn from_face_value(value: u32) -> Result<Self, PaymentError> {
        Self::ALL
            .into_iter()
            .find(|d| d.face_value() == value)
            .ok_or_else(|| PaymentError::UnknownDenomination(value.to_string()))
    }
}

impl FromStr for Denomination {
    type Err = PaymentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim();
        token
            .parse::<u32>()
            .map_err(|_| PaymentError::UnknownDenomination(token.to_string()))
            .and_then(Self::from_face_value)
    }
}

impl fmt::Display for Denomination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.face_value())
    }
}

impl Serialize for Denomination {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u32(self.face_value())
    }
}

impl<'de> Deserialize<'de> for Denomination {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = u32::deserialize(deserializer)?;
        Self::from_face_value(value).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_is_strictly_descending() {
        for pair in Denomination::ALL.windows(2) {
            assert!(pair[0].face_value() > pair[1].face_value());
            assert!(pair[0] < pair[1], "derived order must be largest-first");
        }
    }

    #[test]
    fn test_every_value_is_multiple_of_min() {
        let min = Denomination::min_face_value();
        assert_eq!(min, 5);
        for d in Denomination::ALL {
            assert_eq!(d.face_value() % min, 0);
        }
    }

    #[test]
    fn test_from_face_value() {
        assert_eq!(
            Denomination::from_face_value(500).unwrap(),
            Denomination::C500
        );
        assert!(matches!(
            Denomination::from_face_value(25),
            Err(PaymentError::UnknownDenomination(token)) if token == "25"
        ));
    }

    #[test]
    fn test_parse_token() {
        assert_eq!(" 50 ".parse::<Denomination>().unwrap(), Denomination::C50);
        assert!(matches!(
            "C50".parse::<Denomination>(),
            Err(PaymentError::UnknownDenomination(_))
        ));
        assert!(matches!(
            "".parse::<Denomination>(),
            Err(PaymentError::UnknownDenomination(_))
        ));
        assert!(matches!(
            "-5".parse::<Denomination>(),
            Err(PaymentError::UnknownDenomination(_))
        ));
    }

    #[test]
    fn test_serializes_as_face_value() {
        assert_eq!(serde_json::to_string(&Denomination::C200).unwrap(), "200");
        let d: Denomination = serde_json::from_str("10000").unwrap();
        assert_eq!(d, Denomination::C10000);
        assert!(serde_json::from_str::<Denomination>("3").is_err());
    }
}
