use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::database::ColumnType;

/// Canonical name of the implicit identity column.
pub const ID_COLUMN: &str = "ID";

/// A single column of a table schema: its name and declared type.
///
/// Serialized as the string `"name:type"`, which is also the form accepted by
/// `create_table`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(try_from = "String", into = "String")]
pub struct ColumnDef {
    pub name: String,
    pub ty: ColumnType,
}

impl ColumnDef {
    pub fn new(name: &str, ty: ColumnType) -> Self {
        Self { name: name.to_string(), ty }
    }

    /// The identity column every schema starts with.
    pub fn identity() -> Self {
        Self::new(ID_COLUMN, ColumnType::Int)
    }

    pub fn is_identity(&self) -> bool {
        self.name == ID_COLUMN
    }
}

impl FromStr for ColumnDef {
    type Err = String;

    /// Parses `name:type`, splitting on the first `:`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let Some((name, ty)) = s.split_once(':') else {
            return Err(format!("missing ':' in column definition '{s}'"));
        };
        if name.is_empty() {
            return Err(format!("empty column name in '{s}'"));
        }
        let ty = ty.parse::<ColumnType>()?;

        Ok(Self::new(name, ty))
    }
}

impl TryFrom<String> for ColumnDef {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ColumnDef> for String {
    fn from(value: ColumnDef) -> Self {
        value.to_string()
    }
}

impl Display for ColumnDef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.name, self.ty)
    }
}
