//! app-core: Shared infrastructure for the invoice-totals workspace.
pub mod config;
pub mod error;
pub mod observability;

pub use serde;
pub use serde_json;
pub use tracing;
