use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Characters that can never appear in a schema or table name, whatever
/// quoting style the dialect uses.
const FORBIDDEN_CHARS: &[char] = &['"', '`', ';', '\0'];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum IdentifierError {
    #[error("{kind} name must not be empty")]
    Empty { kind: &'static str },

    #[error("{kind} name '{name}' contains forbidden character {ch:?}")]
    ForbiddenChar {
        kind: &'static str,
        name: String,
        ch: char,
    },
}

impl IdentifierError {
    /// `"Schema"` or `"Table"`.
    pub fn kind(&self) -> &'static str {
        match self {
            IdentifierError::Empty { kind } | IdentifierError::ForbiddenChar { kind, .. } => *kind,
        }
    }
}

/// Destination of a load: a table inside a schema.
///
/// Only built through [`TableRef::new`], so it serializes but never deserializes.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct TableRef {
    schema: String,
    table: String,
}

impl TableRef {
    pub fn new(schema: impl Into<String>, table: impl Into<String>) -> Result<Self, IdentifierError> {
        let schema = schema.into();
        let table = table.into();
        validate("Schema", &schema)?;
        validate("Table", &table)?;
        Ok(Self { schema, table })
    }

    pub fn schema(&self) -> &str {
        &self.schema
    }

    pub fn table(&self) -> &str {
        &self.table
    }
}

impl fmt::Display for TableRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.schema, self.table)
    }
}

fn validate(kind: &'static str, name: &str) -> Result<(), IdentifierError> {
    if name.trim().is_empty() {
        return Err(IdentifierError::Empty { kind });
    }
    if let Some(ch) = name.chars().find(|c| FORBIDDEN_CHARS.contains(c)) {
        return Err(IdentifierError::ForbiddenChar {
            kind,
            name: name.to_string(),
            ch,
        });
    }
    Ok(())
}
