//! Serde helpers for loosely typed client payloads.

use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum NumOrText {
    Num(i32),
    Text(String),
}

/// Accept `3` as well as `"3"`; form-driven frontends send select values as strings.
pub fn lenient_i32<'de, D: Deserializer<'de>>(d: D) -> Result<i32, D::Error> {
    match NumOrText::deserialize(d)? {
        NumOrText::Num(n) => Ok(n),
        NumOrText::Text(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}
