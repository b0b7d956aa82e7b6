use crate::query::ast::common::TableRef;

/// `DELETE FROM <table>`; without a filter every row goes.
#[derive(Debug, Clone, PartialEq)]
pub struct Delete {
    pub table: TableRef,
}
