use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("invalid runtime format")]
pub struct RuntimeFormatError;

/// Movie duration in whole minutes.
///
/// Serialized as the JSON string `"<N> minutes"`. Parsed from the JSON string
/// `"<N> mins"`; the short suffix is the one clients send and the long one is
/// what the API renders, so the two directions are intentionally different.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Runtime(pub i32);

impl Runtime {
    pub fn minutes(self) -> i32 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for Runtime {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} minutes", self.0)
    }
}

impl FromStr for Runtime {
    type Err = RuntimeFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(' ').collect();
        let [minutes, "mins"] = parts.as_slice() else {
            return Err(RuntimeFormatError);
        };
        minutes
            .parse::<i32>()
            .map(Runtime)
            .map_err(|_| RuntimeFormatError)
    }
}

impl Serialize for Runtime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Runtime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // Anything but a JSON string is a format error, not a type error.
        match serde_json::Value::deserialize(deserializer)? {
            serde_json::Value::String(raw) => raw.parse().map_err(de::Error::custom),
            _ => Err(de::Error::custom(RuntimeFormatError)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(json: &str) -> Result<Runtime, serde_json::Error> {
        serde_json::from_str(json)
    }

    #[test]
    fn encodes_as_minutes_string() {
        assert_eq!(serde_json::to_string(&Runtime(102)).unwrap(), r#""102 minutes""#);
        assert_eq!(serde_json::to_string(&Runtime(0)).unwrap(), r#""0 minutes""#);
    }

    #[test]
    fn decodes_mins_string() {
        assert_eq!(decode(r#""102 mins""#).unwrap(), Runtime(102));
        assert_eq!(decode(r#""-5 mins""#).unwrap(), Runtime(-5));
    }

    #[test]
    fn rejects_the_encoded_suffix() {
        // Rendered output is not accepted back as input.
        let rendered = serde_json::to_string(&Runtime(102)).unwrap();
        let err = decode(&rendered).unwrap_err();
        assert!(err.to_string().starts_with("invalid runtime format"));
    }

    #[test]
    fn rejects_malformed_values() {
        for json in [
            r#""abc mins""#,
            r#""102""#,
            r#""102  mins""#,
            r#""102 mins extra""#,
            r#""99999999999 mins""#,
            r#""""#,
            "102",
            "null",
            "[102]",
        ] {
            let err = decode(json).expect_err(json);
            assert!(
                err.to_string().starts_with("invalid runtime format"),
                "{json}: {err}"
            );
        }
    }

    #[test]
    fn parse_is_left_inverse_of_mins_form() {
        for minutes in [0, 1, 90, 155, 1_000, i32::MAX] {
            let text = format!("{minutes} mins");
            assert_eq!(text.parse::<Runtime>(), Ok(Runtime(minutes)));
        }
    }
}
