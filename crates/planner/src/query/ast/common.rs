use model::core::identifiers;

/// A possibly schema-qualified table name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableRef {
    pub schema: Option<String>,
    pub name: String,
}

impl TableRef {
    pub fn qualified(schema: &str, name: &str) -> Self {
        TableRef {
            schema: Some(schema.to_string()),
            name: name.to_string(),
        }
    }

    pub fn bare(name: &str) -> Self {
        TableRef {
            schema: None,
            name: name.to_string(),
        }
    }
}

impl From<&identifiers::TableRef> for TableRef {
    fn from(table: &identifiers::TableRef) -> Self {
        TableRef::qualified(table.schema(), table.table())
    }
}
