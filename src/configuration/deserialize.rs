pub mod hex_color {
    use crate::reporter::color::Rgb;
    use serde::de::Error;
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Rgb, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        value.parse::<Rgb>().map_err(D::Error::custom)
    }
}

/// Lenient aggregate counter.
///
/// Engines occasionally report counters as floats or `null`; anything that is
/// not a non-negative number decodes to `None` and is defaulted later.
pub mod counter {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<Value>::deserialize(deserializer)?;
        Ok(value.and_then(|v| match v {
            Value::Number(num) => num
                .as_u64()
                .or_else(|| num.as_f64().filter(|f| *f >= 0.0).map(|f| f.round() as u64)),
            _ => None,
        }))
    }
}

/// Lenient string: non-string scalars are dropped instead of failing the
/// whole result.
pub mod lenient_string {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<Value>::deserialize(deserializer)?;
        Ok(value.and_then(|v| match v {
            Value::String(s) => Some(s),
            _ => None,
        }))
    }
}

#[cfg(test)]
mod test {
    use serde_derive::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Counters {
        #[serde(default, deserialize_with = "super::counter::deserialize")]
        value: Option<u64>,
    }

    fn decode(json: &str) -> Option<u64> {
        serde_json::from_str::<Counters>(json).unwrap().value
    }

    #[test]
    fn test_counter_accepts_integers_and_floats() {
        assert_eq!(decode(r#"{"value": 42}"#), Some(42));
        assert_eq!(decode(r#"{"value": 799.6}"#), Some(800));
    }

    #[test]
    fn test_counter_drops_garbage() {
        assert_eq!(decode(r#"{"value": null}"#), None);
        assert_eq!(decode(r#"{"value": "12"}"#), None);
        assert_eq!(decode(r#"{"value": -3}"#), None);
        assert_eq!(decode(r#"{}"#), None);
    }
}
