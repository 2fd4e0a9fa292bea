// Port Layer - Interfaces for external dependencies

pub mod renderer; // Keeps locale/time zone swappable
pub mod status_source;
pub mod time_provider;

// Re-exports
pub use renderer::{DateTimeRenderer, PatternRenderer, RendererError, Zone};
pub use status_source::{FetchError, FetchResult, StatusSource};
pub use time_provider::{FixedTimeProvider, SystemTimeProvider, TimeProvider};
