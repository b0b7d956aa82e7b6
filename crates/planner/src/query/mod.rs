//! SQL generation: an AST for the handful of statements a table load needs,
//! and per-dialect rendering into SQL text plus bound parameters.

use crate::query::ast::expr::{Expr, Ident};
use model::core::value::Value;

pub mod ast;
pub mod builder;
pub mod dialect;
pub mod renderer;

pub fn ident(name: &str) -> Expr {
    Expr::Identifier(Ident {
        qualifier: None,
        name: name.to_string(),
    })
}

/// Unqualified column references, in order.
pub fn columns(names: &[&str]) -> Vec<Expr> {
    names.iter().map(|name| ident(name)).collect()
}

pub fn value(val: Value) -> Expr {
    Expr::Value(val)
}

/// One bound parameter per value, in order.
pub fn values(vals: Vec<Value>) -> Vec<Expr> {
    vals.into_iter().map(Expr::Value).collect()
}
