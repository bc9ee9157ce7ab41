//! Bound argument values handed to exposed methods.

use serde_json::Value as Json;

/// A parameter value after casting.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Str(String),
    Int(i64),
    Bool(bool),
    List(Vec<Json>),
}

impl Value {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Json]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }
}

/// Arguments bound for one invocation, in call-signature order.
///
/// Optional parameters that were not supplied are present with `None`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Arguments {
    slots: Vec<(String, Option<Value>)>,
}

impl Arguments {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, name: impl Into<String>, value: Option<Value>) {
        self.slots.push((name.into(), value));
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.slots
            .iter()
            .find(|(slot, _)| slot == name)
            .and_then(|(_, value)| value.as_ref())
    }

    pub fn is_present(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Value::as_str)
    }

    pub fn int(&self, name: &str) -> Option<i64> {
        self.get(name).and_then(Value::as_int)
    }

    pub fn bool(&self, name: &str) -> Option<bool> {
        self.get(name).and_then(Value::as_bool)
    }

    pub fn list(&self, name: &str) -> Option<&[Json]> {
        self.get(name).and_then(Value::as_list)
    }

    /// Positional view, as the method's signature declares it.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&Value>)> {
        self.slots
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_ref()))
    }
}
