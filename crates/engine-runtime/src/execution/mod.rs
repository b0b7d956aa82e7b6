pub mod executor;
pub mod loader;
pub mod outcome;
pub mod stage;
