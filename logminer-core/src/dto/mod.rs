//! Data Transfer Objects for the collector HTTP API
//!
//! DTOs mirror the JSON bodies exchanged with clients. Request DTOs are
//! deliberately lenient (every field optional) so that missing fields can be
//! reported as validation errors instead of deserialization failures.

pub mod log;
