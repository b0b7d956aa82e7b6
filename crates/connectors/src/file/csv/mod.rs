pub mod error;
pub mod metadata;
pub mod source;

pub use source::read_rowset;
