//! Query-string option parsing.
//!
//! Tokens after the program name are joined with `&` and read as
//! `key=value` pairs, so `power -x=2 -y=10` becomes
//! `{"power": "", "-x": "2", "-y": "10"}` and `-d[]=3 -d[]=4` collects into a
//! list under `-d`.

use std::borrow::Cow;
use std::collections::HashMap;

/// Raw value of one option key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionValue {
    Single(String),
    /// Collected from `key[]=v` pairs, in input order.
    Many(Vec<String>),
}

impl OptionValue {
    /// The scalar view. For collected values the last item wins.
    pub fn scalar(&self) -> &str {
        match self {
            OptionValue::Single(value) => value,
            OptionValue::Many(items) => items.last().map(String::as_str).unwrap_or(""),
        }
    }
}

/// Parsed options for one invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionMap {
    entries: HashMap<String, OptionValue>,
}

impl OptionMap {
    /// Join `tokens` with `&` and parse the result as a query string.
    pub fn from_tokens<S: AsRef<str>>(tokens: &[S]) -> Self {
        let joined = tokens
            .iter()
            .map(|t| t.as_ref())
            .collect::<Vec<_>>()
            .join("&");
        Self::parse(&joined)
    }

    pub fn parse(query: &str) -> Self {
        let mut map = OptionMap::default();
        for pair in query.split('&') {
            if pair.is_empty() {
                continue;
            }
            let (raw_key, raw_value) = pair.split_once('=').unwrap_or((pair, ""));
            let key = decode(raw_key);
            let key = key.trim_start();
            if key.is_empty() {
                continue;
            }
            let value = decode(raw_value).into_owned();
            map.insert(key, value);
        }
        map
    }

    fn insert(&mut self, key: &str, value: String) {
        match split_bracket_key(key) {
            Some(base) => match self.entries.get_mut(base) {
                Some(OptionValue::Many(items)) => items.push(value),
                _ => {
                    self.entries
                        .insert(base.to_string(), OptionValue::Many(vec![value]));
                }
            },
            None => {
                self.entries
                    .insert(key.to_string(), OptionValue::Single(value));
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&OptionValue> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Value of the option for a parameter (`-name`).
    pub fn parameter(&self, name: &str) -> Option<&OptionValue> {
        self.entries.get(&format!("-{name}"))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Empty input, `--help` or `?`.
    pub fn wants_help(&self) -> bool {
        self.is_empty() || self.contains_key("--help") || self.contains_key("?")
    }
}

/// `name[]` or `name[anything]` -> `name`.
fn split_bracket_key(key: &str) -> Option<&str> {
    let open = key.find('[')?;
    if open == 0 || !key[open..].contains(']') {
        return None;
    }
    Some(&key[..open])
}

/// `+` is a space, then percent-decoding. Text that does not decode to UTF-8
/// is kept as typed.
fn decode(raw: &str) -> Cow<'_, str> {
    if !raw.contains('+') && !raw.contains('%') {
        return Cow::Borrowed(raw);
    }
    let spaced = raw.replace('+', " ");
    match urlencoding::decode(&spaced) {
        Ok(decoded) => Cow::Owned(decoded.into_owned()),
        Err(_) => Cow::Owned(spaced),
    }
}
