use serde::{Deserialize, Serialize};
use std::{borrow::Cow, fmt};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum DataType {
    Integer,
    VarChar,
}

impl DataType {
    pub fn postgres_name(&self) -> Cow<'static, str> {
        match self {
            DataType::Integer => Cow::Borrowed("INTEGER"),
            DataType::VarChar => Cow::Borrowed("VARCHAR"),
        }
    }

    pub fn mysql_name(&self) -> Cow<'static, str> {
        match self {
            DataType::Integer => Cow::Borrowed("INT"),
            DataType::VarChar => Cow::Borrowed("VARCHAR"),
        }
    }

    /// Whether the type accepts a `(n)` length modifier.
    pub fn supports_length(&self) -> bool {
        matches!(self, DataType::VarChar)
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.postgres_name())
    }
}
