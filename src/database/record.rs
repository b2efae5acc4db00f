use indexmap::IndexMap;

use crate::database::Value;

/// One row of a table: column name -> value.
pub type Record = IndexMap<String, Value>;

/// A set of `column = value` pairs, used both as a filter and as an assignment.
pub type Conditions = IndexMap<String, Value>;

/// True when every condition's column is present in `record` with an equal value.
pub fn matches(record: &Record, conditions: &Conditions) -> bool {
    conditions.iter().all(|(column, expected)| {
        match record.get(column) {
            Some(value) => value == expected,
            None => false,
        }
    })
}

/// Builds a [`Conditions`] set from `(column, value)` pairs.
pub fn conditions<I, K, V>(pairs: I) -> Conditions
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<Value>,
{
    pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alice() -> Record {
        conditions([("ID", Value::Int(1)), ("name", "Alice".into()), ("active", true.into())])
    }

    #[test]
    fn test_all_conditions_must_hold() {
        let record = alice();
        assert!(matches(&record, &conditions([("name", "Alice")])));
        assert!(matches(&record, &conditions([("name", Value::from("Alice")), ("active", Value::from(true))])));
        assert!(!matches(&record, &conditions([("name", Value::from("Alice")), ("active", Value::from(false))])));
    }

    #[test]
    fn test_missing_column_never_matches() {
        assert!(!matches(&alice(), &conditions([("email", "a@x")])));
    }

    #[test]
    fn test_no_type_coercion_in_comparison() {
        assert!(!matches(&alice(), &conditions([("ID", "1")])));
        assert!(matches(&alice(), &conditions([("ID", 1i64)])));
    }

    #[test]
    fn test_empty_conditions_match_everything() {
        assert!(matches(&alice(), &Conditions::new()));
    }
}
