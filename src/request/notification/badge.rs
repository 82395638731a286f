use crate::error::Error;
use serde::{Serialize, Serializer};
use serde_json::Value;

/// The iOS badge of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Badge {
    /// Set the badge to this number.
    Value(i64),
    /// Let Airship count the badge up for every push.
    Auto,
    /// Add to the current badge, negative values count down.
    Increment(i64),
}

impl Serialize for Badge {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Badge::Value(value) => serializer.serialize_i64(*value),
            Badge::Auto => serializer.serialize_str("auto"),
            Badge::Increment(value) => serializer.serialize_str(&format!("{:+}", value)),
        }
    }
}

impl From<i64> for Badge {
    fn from(value: i64) -> Self {
        Badge::Value(value)
    }
}

/// Accepts `"auto"` or a signed number such as `"+1"` or `"-3"`. A bare
/// number in a string is rejected, use [`Badge::Value`] for those.
impl TryFrom<&str> for Badge {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        if value == "auto" {
            return Ok(Badge::Auto);
        }

        let invalid = || Error::InvalidArgument(format!("Invalid iOS badge value: {}", value));

        let (sign, digits) = match value.chars().next() {
            Some('+') => (1, &value[1..]),
            Some('-') => (-1, &value[1..]),
            _ => return Err(invalid()),
        };

        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }

        let amount: i64 = digits.parse().map_err(|_| invalid())?;

        Ok(Badge::Increment(sign * amount))
    }
}

/// Accepts an integer or one of the strings [`Badge`] parses from `&str`.
/// Other JSON types are rejected.
impl TryFrom<Value> for Badge {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Number(ref n) => n
                .as_i64()
                .map(Badge::Value)
                .ok_or_else(|| Error::InvalidArgument(format!("Invalid iOS badge value: {}", n))),
            Value::String(ref s) => Badge::try_from(s.as_str()),
            other => Err(Error::InvalidArgument(format!("Invalid iOS badge type: {}", other))),
        }
    }
}
