//! Three-valued filter state.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// State of a ternary filter: true, false, or blank (no choice made).
///
/// Deserializes leniently from what form controls submit: `true`, `"1"`
/// and `1` are true; `false`, `"0"` and `0` are false; anything else,
/// including `null` and `""`, is blank.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Value", into = "Option<bool>")]
pub enum TernaryValue {
    True,
    False,
    #[default]
    Blank,
}

impl TernaryValue {
    /// Interpret a raw submitted value.
    pub fn parse(value: &Value) -> Self {
        match value {
            Value::Bool(true) => Self::True,
            Value::Bool(false) => Self::False,
            Value::Number(n) => match n.as_i64() {
                Some(1) => Self::True,
                Some(0) => Self::False,
                _ => Self::Blank,
            },
            Value::String(s) => match s.trim() {
                "1" | "true" => Self::True,
                "0" | "false" => Self::False,
                _ => Self::Blank,
            },
            _ => Self::Blank,
        }
    }

    /// `Some(bool)` for a concrete choice, `None` for blank.
    pub fn as_option(self) -> Option<bool> {
        self.into()
    }

    pub fn is_blank(self) -> bool {
        self == Self::Blank
    }
}

impl From<Value> for TernaryValue {
    fn from(value: Value) -> Self {
        Self::parse(&value)
    }
}

impl From<Option<bool>> for TernaryValue {
    fn from(value: Option<bool>) -> Self {
        match value {
            Some(true) => Self::True,
            Some(false) => Self::False,
            None => Self::Blank,
        }
    }
}

impl From<TernaryValue> for Option<bool> {
    fn from(value: TernaryValue) -> Self {
        match value {
            TernaryValue::True => Some(true),
            TernaryValue::False => Some(false),
            TernaryValue::Blank => None,
        }
    }
}
