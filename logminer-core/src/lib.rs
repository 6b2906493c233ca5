//! LogMiner Core
//!
//! Core types shared by the LogMiner services.
//!
//! This crate contains:
//! - Domain types: the persisted log record and its source enumeration
//! - DTOs: request and response bodies of the collector HTTP API

pub mod domain;
pub mod dto;
