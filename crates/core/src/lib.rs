// Jobby Core - Domain Logic & Ports
// NO infrastructure dependencies (hexagonal split)

pub mod application;
pub mod domain;
pub mod error;
pub mod port;

pub use error::{AppError, Result};
