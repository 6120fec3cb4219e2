//! Shared types, errors, and configuration for Pocketbook.
//!
//! This crate provides common types used across all other crates:
//! - Money type with fixed two-place decimal precision
//! - Typed IDs for type-safe entity references
//! - Pagination types for history listings
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use crate::config::{AppConfig, EngineConfig, HistoryConfig, LogConfig};
pub use crate::error::{AppError, AppResult};
