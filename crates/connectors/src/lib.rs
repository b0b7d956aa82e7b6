pub mod adapter;
pub mod file;
pub mod sql;
