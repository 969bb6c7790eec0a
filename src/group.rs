//! Typed view of a group entry in the state store

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Animation parameters of one group, as stored at `group/<id>`
///
/// Every field is optional: the same type describes both the stored state and
/// the partial deltas produced by the switch interpreter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GroupState {
    #[serde(
        default,
        deserialize_with = "truthy",
        skip_serializing_if = "Option::is_none"
    )]
    pub on: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amplitude: Option<f64>,
    /// An explicit `null` stops the animation, the same as `0`
    #[serde(
        default,
        deserialize_with = "null_as_static",
        skip_serializing_if = "Option::is_none"
    )]
    pub frequency: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub increase_brightness: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decrease_brightness: Option<bool>,
}

impl GroupState {
    /// Read a group from its stored JSON value
    pub fn from_value(value: &Value) -> Result<Self, serde_json::Error> {
        Self::deserialize(value)
    }

    pub fn is_on(&self) -> bool {
        self.on.unwrap_or(false)
    }

    pub fn amplitude_or(&self, default: f64) -> f64 {
        self.amplitude.unwrap_or(default)
    }

    pub fn frequency_or(&self, default: f64) -> f64 {
        self.frequency.unwrap_or(default)
    }

    /// Fields that are set, in a fixed order, ready to be merged one by one
    pub fn fields(&self) -> impl Iterator<Item = (&'static str, Value)> {
        [
            ("on", self.on.map(Value::Bool)),
            ("amplitude", self.amplitude.map(Value::from)),
            ("frequency", self.frequency.map(Value::from)),
            ("increase_brightness", self.increase_brightness.map(Value::Bool)),
            ("decrease_brightness", self.decrease_brightness.map(Value::Bool)),
        ]
        .into_iter()
        .filter_map(|(key, value)| value.map(|value| (key, value)))
    }
}

/// Round to one decimal digit, ties to even
pub fn round1(value: f64) -> f64 {
    libm::rint(value * 10.0) / 10.0
}

/// Round to two decimal digits, ties to even
pub fn round2(value: f64) -> f64 {
    libm::rint(value * 100.0) / 100.0
}

/// Truthiness of an arbitrary JSON value
///
/// `false`, `null`, zero, empty strings and empty containers are falsy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

fn truthy<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(Some(is_truthy(&value)))
}

fn null_as_static<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Some(Option::<f64>::deserialize(deserializer)?.unwrap_or(0.0)))
}
