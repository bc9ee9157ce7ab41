//! Casting raw option text to typed values.
//!
//! Lenient mode never fails: bad numbers become `0`, a malformed list becomes
//! absent. Strict mode reports those inputs instead.

use serde_json::Value as Json;

use super::options::OptionValue;
use crate::extract::ParamType;
use crate::value::Value;

/// The raw text could not be cast under strict rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejected {
    pub expected: ParamType,
    pub raw: String,
}

/// Cast a present option value to `kind`. `Ok(None)` means "bind as absent".
pub fn cast(raw: &OptionValue, kind: ParamType, strict: bool) -> Result<Option<Value>, Rejected> {
    let reject = || Rejected {
        expected: kind,
        raw: match raw {
            OptionValue::Single(s) => s.clone(),
            OptionValue::Many(items) => items.join(","),
        },
    };

    match kind {
        ParamType::Int => {
            let text = raw.scalar();
            if strict && !is_strict_int(text) {
                return Err(reject());
            }
            Ok(Some(Value::Int(cast_int(text))))
        }
        ParamType::Bool => {
            let text = raw.scalar();
            if strict {
                return strict_bool(text).map(|b| Some(Value::Bool(b))).ok_or_else(reject);
            }
            Ok(Some(Value::Bool(cast_bool(text))))
        }
        ParamType::List => match raw {
            OptionValue::Many(items) => Ok(Some(Value::List(
                items.iter().map(String::as_str).map(list_item).collect(),
            ))),
            OptionValue::Single(text) => match cast_list(text) {
                Some(items) => Ok(Some(Value::List(items))),
                None if strict => Err(reject()),
                None => Ok(None),
            },
        },
        ParamType::String => Ok(Some(Value::Str(raw.scalar().to_string()))),
    }
}

/// Leading-numeric integer parse: optional whitespace and sign, then digits.
/// Anything after the digits is ignored; no digits yields `0`; out-of-range
/// values saturate.
pub fn cast_int(text: &str) -> i64 {
    let text = text.trim_start();
    let (negative, digits) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };

    let mut value: i64 = 0;
    for digit in digits.bytes().take_while(u8::is_ascii_digit) {
        let digit = i64::from(digit - b'0');
        let next = value
            .checked_mul(10)
            .and_then(|v| if negative { v.checked_sub(digit) } else { v.checked_add(digit) });
        match next {
            Some(v) => value = v,
            None => return if negative { i64::MIN } else { i64::MAX },
        }
    }
    value
}

/// `""` and `"0"` are false, everything else is true.
pub fn cast_bool(text: &str) -> bool {
    !(text.is_empty() || text == "0")
}

/// Parse a JSON array literal. Anything else is `None`.
pub fn cast_list(text: &str) -> Option<Vec<Json>> {
    match serde_json::from_str::<Json>(text.trim()) {
        Ok(Json::Array(items)) => Some(items),
        _ => None,
    }
}

/// Items collected from `key[]=` pairs: JSON scalars where they parse,
/// strings otherwise.
fn list_item(item: &str) -> Json {
    serde_json::from_str::<Json>(item).unwrap_or_else(|_| Json::String(item.to_string()))
}

fn is_strict_int(text: &str) -> bool {
    text.trim().parse::<i64>().is_ok()
}

fn strict_bool(text: &str) -> Option<bool> {
    match text.trim().to_lowercase().as_str() {
        "" | "0" | "false" | "no" | "off" => Some(false),
        "1" | "true" | "yes" | "on" => Some(true),
        _ => None,
    }
}
