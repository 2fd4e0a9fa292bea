// Application Layer - Use Cases

pub mod formatter;
pub mod history;
pub mod status_view;

// Re-exports
pub use formatter::{describe_etc, FormatOutcome, FormatPolicy, JobViewFormatter};
pub use history::HistoryFormatter;
pub use status_view::StatusViewService;
