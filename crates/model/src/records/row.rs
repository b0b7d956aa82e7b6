use crate::core::value::Value;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum number of characters stored in the `Name` column.
pub const NAME_MAX_LENGTH: usize = 255;

/// A single `(ID, Name)` record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Row {
    pub id: i32,
    pub name: Option<String>,
}

impl Row {
    pub fn new(id: i32, name: impl Into<String>) -> Self {
        Row {
            id,
            name: Some(name.into()),
        }
    }

    pub fn without_name(id: i32) -> Self {
        Row { id, name: None }
    }

    /// Values in destination column order: `ID`, `Name`.
    pub fn values(&self) -> Vec<Value> {
        vec![Value::Int32(self.id), Value::from(self.name.clone())]
    }
}

impl fmt::Display for Row {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "({}, {name:?})", self.id),
            None => write!(f, "({}, NULL)", self.id),
        }
    }
}

/// Ordered rows read from one source file, consumed once by a load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RowSet {
    rows: Vec<Row>,
}

impl RowSet {
    pub fn new(rows: Vec<Row>) -> Self {
        RowSet { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Row> {
        self.rows.iter()
    }

    /// Multiset equality: same rows with the same multiplicity, in any order.
    pub fn same_rows(&self, other: &RowSet) -> bool {
        if self.len() != other.len() {
            return false;
        }
        let mut left = self.rows.clone();
        let mut right = other.rows.clone();
        left.sort();
        right.sort();
        left == right
    }
}

impl From<Vec<Row>> for RowSet {
    fn from(rows: Vec<Row>) -> Self {
        RowSet::new(rows)
    }
}

impl FromIterator<Row> for RowSet {
    fn from_iter<I: IntoIterator<Item = Row>>(iter: I) -> Self {
        RowSet::new(iter.into_iter().collect())
    }
}

impl IntoIterator for RowSet {
    type Item = Row;
    type IntoIter = std::vec::IntoIter<Row>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.into_iter()
    }
}

impl<'a> IntoIterator for &'a RowSet {
    type Item = &'a Row;
    type IntoIter = std::slice::Iter<'a, Row>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_rows_ignores_order() {
        let a = RowSet::from(vec![Row::new(1, "A"), Row::new(2, "B")]);
        let b = RowSet::from(vec![Row::new(2, "B"), Row::new(1, "A")]);
        assert!(a.same_rows(&b));
    }

    #[test]
    fn test_same_rows_respects_multiplicity() {
        let once = RowSet::from(vec![Row::new(1, "A"), Row::new(2, "B")]);
        let twice = RowSet::from(vec![Row::new(1, "A"), Row::new(1, "A")]);
        assert!(!once.same_rows(&twice));

        let doubled = RowSet::from(vec![
            Row::new(1, "A"),
            Row::new(2, "B"),
            Row::new(1, "A"),
            Row::new(2, "B"),
        ]);
        assert!(!once.same_rows(&doubled));
    }

    #[test]
    fn test_row_values_in_column_order() {
        assert_eq!(
            Row::new(7, "Grace").values(),
            vec![Value::Int32(7), Value::String("Grace".to_string())]
        );
        assert_eq!(
            Row::without_name(8).values(),
            vec![Value::Int32(8), Value::Null]
        );
    }
}
