/// Gradebook: students, class projects and the grades students receive
///
/// One storage layer serves two front ends: an interactive comma-separated
/// command shell and a set of JSON web routes.

// Core configuration and setup
pub mod config;

// Storage layer - pooled SQLite access and typed operations over students, projects and grades
pub mod store;

// Command shell - line parsing, dispatch and the read loop
pub mod shell;

// HTTP API layer - lookup and creation routes
pub mod api;

// Server setup and initialization
pub mod server;

// Re-export commonly used types for external consumers
pub use config::Config;
pub use server::start_server;
pub use shell::{Dispatcher, Reply};
pub use store::{GradebookStore, StoreError};
