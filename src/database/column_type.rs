use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

/// Declared type of a table column.
///
/// The set is fixed: integer, string and boolean. In commands and on disk the
/// types are spelled `int`, `str` and `bool`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum ColumnType {
    /// Signed 64-bit integer
    #[serde(rename = "int")]
    Int,
    /// UTF-8 text
    #[serde(rename = "str")]
    Str,
    /// `true` / `false`
    #[serde(rename = "bool")]
    Bool,
}

impl ColumnType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnType::Int => "int",
            ColumnType::Str => "str",
            ColumnType::Bool => "bool",
        }
    }
}

impl FromStr for ColumnType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "int" => Ok(ColumnType::Int),
            "str" => Ok(ColumnType::Str),
            "bool" => Ok(ColumnType::Bool),
            other => Err(format!("unknown column type '{other}'")),
        }
    }
}

impl Display for ColumnType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
