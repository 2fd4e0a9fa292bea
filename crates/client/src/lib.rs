//! Jobby Client - HTTP adapter for the status service
//!
//! Implements the `StatusSource` port from `jobby-core` on top of reqwest.
//!
//! # Example
//!
//! ```no_run
//! use jobby_client::StatusClient;
//! use jobby_core::application::JobViewFormatter;
//! use jobby_core::port::{PatternRenderer, SystemTimeProvider, TimeProvider};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = StatusClient::connect("http://127.0.0.1:8080")?;
//!     let records = client.status().await?;
//!
//!     let formatter = JobViewFormatter::new(Arc::new(PatternRenderer::local()));
//!     for view in formatter.format(&records, SystemTimeProvider.now_millis())? {
//!         println!("{}: ends {} ({:.1} min)", view.job, view.end_time, view.etc_minutes);
//!     }
//!
//!     Ok(())
//! }
//! ```

mod client;
mod error;

pub use client::{ClientConfig, StatusClient};
pub use jobby_core::port::{FetchError, FetchResult};
