use once_cell::sync::Lazy;
use regex::Regex;

use crate::database::{unquote, Conditions, Value};

static INTEGER_LITERAL: Lazy<Regex> = Lazy::new(|| Regex::new(r"^-?[0-9]+$").unwrap());

/// Guesses a value's type from its text alone.
///
/// `true`/`false` in any case are booleans, optionally signed digit strings
/// that fit in an `i64` are integers, everything else is a string. The column's
/// declared type is not consulted, so `name = "30"` filters on the integer 30.
pub fn infer_literal(text: &str) -> Value {
    if text.eq_ignore_ascii_case("true") {
        return Value::Bool(true);
    }
    if text.eq_ignore_ascii_case("false") {
        return Value::Bool(false);
    }
    if INTEGER_LITERAL.is_match(text) {
        if let Ok(i) = text.parse::<i64>() {
            return Value::Int(i);
        }
    }
    Value::Str(text.to_string())
}

/// Parses a single `column = value` clause, as used after `where` and `set`.
///
/// Splits on the first `=`; the column must be non-empty once trimmed. The
/// value is trimmed, unquoted once, unescaped and typed by [`infer_literal`].
pub fn parse_clause(text: &str) -> Option<Conditions> {
    let (column, value) = text.split_once('=')?;
    let column = column.trim();
    if column.is_empty() {
        return None;
    }

    let mut clause = Conditions::with_capacity(1);
    clause.insert(column.to_string(), infer_literal(&unquote(value)));
    Some(clause)
}
