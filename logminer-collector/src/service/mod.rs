//! Service Module
//!
//! Business logic layer for the collector.
//! Services validate input and orchestrate calls to the log store.

pub mod log;

// Re-export for convenience
pub use log as log_service;
