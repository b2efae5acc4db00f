use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

use crate::database::ColumnType;

/// A typed cell value.
///
/// Stored on disk as the bare JSON scalar. Equality is exact: `Int(1)` never
/// equals `Str("1")`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(untagged)]
pub enum Value {
    Bool(bool),
    Int(i64),
    Str(String),
}

impl Value {
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Str(s) => f.write_str(s),
        }
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self { Value::Int(value) }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self { Value::Bool(value) }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self { Value::Str(value.to_string()) }
}

impl From<String> for Value {
    fn from(value: String) -> Self { Value::Str(value) }
}

/// Trims `text` and removes one layer of matching `"` or `'` around it.
///
/// A closing quote preceded by an odd run of backslashes is escaped and does
/// not count.
pub fn strip_quotes(text: &str) -> &str {
    let text = text.trim();
    let bytes = text.as_bytes();
    if bytes.len() >= 2 {
        let (first, last) = (bytes[0], bytes[bytes.len() - 1]);
        let escapes = bytes[1..bytes.len() - 1].iter().rev().take_while(|b| **b == b'\\').count();
        if first == last && (first == b'"' || first == b'\'') && escapes % 2 == 0 {
            return &text[1..text.len() - 1];
        }
    }
    text
}

/// Drops the backslash of every `\x` pair, keeping `x`. A trailing lone
/// backslash is kept.
pub fn unescape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(ch) = chars.next() {
        match ch {
            '\\' => out.push(chars.next().unwrap_or('\\')),
            ch => out.push(ch),
        }
    }
    out
}

/// [`strip_quotes`] followed by [`unescape`].
pub fn unquote(text: &str) -> String {
    unescape(strip_quotes(text))
}

/// Converts a raw token into a value of the declared column type.
///
/// `raw` may carry one layer of quotes and backslash escapes. Returns `None`
/// when the text cannot represent that type.
pub fn coerce(raw: &str, ty: ColumnType) -> Option<Value> {
    let text = unquote(raw);
    match ty {
        ColumnType::Int => text.trim().parse::<i64>().ok().map(Value::Int),
        ColumnType::Str => Some(Value::Str(text)),
        ColumnType::Bool => {
            if text.eq_ignore_ascii_case("true") {
                Some(Value::Bool(true))
            } else if text.eq_ignore_ascii_case("false") {
                Some(Value::Bool(false))
            } else {
                None
            }
        }
    }
}
