pub mod error;
pub mod secrets;
pub mod settings;
