// Domain Layer - Pure data and validation rules

pub mod error;
pub mod history;
pub mod job;
pub mod nanos;

// Re-exports
pub use error::{FormatError, InvalidReason};
pub use history::{HistoryTiming, HistoryViewRecord, RawHistoryRecord, STILL_RUNNING};
pub use job::{JobName, JobTiming, JobViewRecord, RawJobRecord, StatusPayload};
