//! Serde helpers for floats that may be NaN or infinite.
//!
//! JSON has no encoding for non-finite numbers, so they are written as the
//! strings `"NaN"`, `"inf"` and `"-inf"`. Finite values stay plain numbers.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum Repr {
    Num(f64),
    Text(String),
}

fn encode(value: f64) -> Repr {
    if value.is_finite() {
        Repr::Num(value)
    } else if value.is_nan() {
        Repr::Text("NaN".to_string())
    } else if value > 0.0 {
        Repr::Text("inf".to_string())
    } else {
        Repr::Text("-inf".to_string())
    }
}

fn decode(repr: Repr) -> Result<f64, String> {
    match repr {
        Repr::Num(v) => Ok(v),
        Repr::Text(s) => match s.as_str() {
            "NaN" | "nan" => Ok(f64::NAN),
            "inf" | "Infinity" => Ok(f64::INFINITY),
            "-inf" | "-Infinity" => Ok(f64::NEG_INFINITY),
            other => Err(format!("expected a number, found string '{}'", other)),
        },
    }
}

pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    encode(*value).serialize(serializer)
}

pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    decode(Repr::deserialize(deserializer)?).map_err(D::Error::custom)
}

/// Same encoding for `Vec<f64>`
pub mod vec {
    use super::*;

    pub fn serialize<S: Serializer>(values: &[f64], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(values.iter().map(|v| encode(*v)))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<f64>, D::Error> {
        Vec::<Repr>::deserialize(deserializer)?
            .into_iter()
            .map(|r| decode(r).map_err(D::Error::custom))
            .collect()
    }
}

/// Same encoding for `Option<f64>`
pub mod opt {
    use super::*;

    pub fn serialize<S: Serializer>(value: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error> {
        value.map(encode).serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<f64>, D::Error> {
        Option::<Repr>::deserialize(deserializer)?
            .map(|r| decode(r).map_err(D::Error::custom))
            .transpose()
    }
}

/// Same encoding for `Option<[f64; 2]>`, used by ranges
pub mod opt_pair {
    use super::*;

    pub fn serialize<S: Serializer>(
        value: &Option<[f64; 2]>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        value
            .map(|[lo, hi]| [encode(lo), encode(hi)])
            .serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<[f64; 2]>, D::Error> {
        match Option::<[Repr; 2]>::deserialize(deserializer)? {
            Some([lo, hi]) => {
                let lo = decode(lo).map_err(D::Error::custom)?;
                let hi = decode(hi).map_err(D::Error::custom)?;
                Ok(Some([lo, hi]))
            }
            None => Ok(None),
        }
    }
}
