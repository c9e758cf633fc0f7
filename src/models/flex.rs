//! Lenient deserializers for API fields that arrive as either JSON numbers
//! or decimal strings (unit counts, nonces, chain ids).

use serde::{Deserialize, Deserializer, Serializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum Flex {
    Num(u64),
    Float(f64),
    Str(String),
    Null,
}

fn flex_to_u128<E: serde::de::Error>(flex: Flex) -> Result<u128, E> {
    match flex {
        Flex::Num(n) => Ok(n as u128),
        Flex::Float(f) if f >= 0.0 && f.fract() == 0.0 => Ok(f as u128),
        Flex::Float(f) => Err(E::custom(format!("expected a non-negative integer, got {}", f))),
        Flex::Str(s) => s
            .trim()
            .parse()
            .map_err(|_| E::custom(format!("expected an integer string, got '{}'", s))),
        Flex::Null => Ok(0),
    }
}

/// Integer from a number or numeric string; `null` reads as 0.
pub fn u128_lenient<'de, D>(deserializer: D) -> Result<u128, D::Error>
where
    D: Deserializer<'de>,
{
    flex_to_u128(Flex::deserialize(deserializer)?)
}

pub fn u128_vec_lenient<'de, D>(deserializer: D) -> Result<Vec<u128>, D::Error>
where
    D: Deserializer<'de>,
{
    let items: Option<Vec<Flex>> = Option::deserialize(deserializer)?;
    items
        .unwrap_or_default()
        .into_iter()
        .map(flex_to_u128)
        .collect()
}

/// Write as a decimal string. JSON numbers past `u64::MAX` come back as
/// floats, so unit counts are never written as numbers.
pub fn u128_as_string<S>(value: &u128, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_str(value)
}

pub fn u128_vec_as_string<S>(values: &[u128], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_seq(values.iter().map(u128::to_string))
}

/// String from a string or number; `null` reads as empty.
pub fn string_lenient<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Flex::deserialize(deserializer)? {
        Flex::Str(s) => s,
        Flex::Num(n) => n.to_string(),
        Flex::Float(f) => f.to_string(),
        Flex::Null => String::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Sample {
        #[serde(
            default,
            serialize_with = "u128_as_string",
            deserialize_with = "u128_lenient"
        )]
        units: u128,
        #[serde(
            default,
            serialize_with = "u128_vec_as_string",
            deserialize_with = "u128_vec_lenient"
        )]
        amounts: Vec<u128>,
        #[serde(default, deserialize_with = "string_lenient")]
        nonce: String,
    }

    #[test]
    fn test_numbers_and_strings() {
        let p: Sample = serde_json::from_str(
            r#"{"units": "100000000", "amounts": [1, "25"], "nonce": 7}"#,
        )
        .unwrap();
        assert_eq!(p.units, 100_000_000);
        assert_eq!(p.amounts, vec![1, 25]);
        assert_eq!(p.nonce, "7");
    }

    #[test]
    fn test_missing_and_null() {
        let p: Sample = serde_json::from_str(r#"{"units": null, "amounts": null}"#).unwrap();
        assert_eq!(p.units, 0);
        assert!(p.amounts.is_empty());
        assert_eq!(p.nonce, "");
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(serde_json::from_str::<Sample>(r#"{"units": "lots"}"#).is_err());
        assert!(serde_json::from_str::<Sample>(r#"{"units": -3}"#).is_err());
    }

    #[test]
    fn test_units_past_u64_survive_json() {
        let original = Sample {
            units: u64::MAX as u128 + 12_345,
            amounts: vec![u128::MAX, 1],
            nonce: "1".to_string(),
        };
        let text = serde_json::to_string(&original).unwrap();
        assert!(text.contains("\"units\":\"18446744073709563960\""));
        let reloaded: Sample = serde_json::from_str(&text).unwrap();
        assert_eq!(reloaded, original);
    }
}
