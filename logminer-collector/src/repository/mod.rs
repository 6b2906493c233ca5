//! Repository Module
//!
//! Data access layer for the collector.
//!
//! The store is trait-based so that handlers hold an injected
//! `Arc<dyn LogStore>` instead of a global connection.

pub mod log;
#[cfg(test)]
pub mod memory;

// Re-export for convenience
pub use log::{LogStore, PgLogStore, StoreError};
