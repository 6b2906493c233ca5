//! Core domain types
//!
//! These types represent what the collector persists. They carry no
//! persistence or transport logic.

pub mod log;
