//! Tgvault Core Library
//!
//! This crate provides the domain models, error types, and configuration
//! shared across all tgvault components.

pub mod backend_types;
pub mod config;
pub mod error;
pub mod models;

// Re-export commonly used types
pub use backend_types::UploadBackend;
pub use config::Config;
pub use error::{AppError, LogLevel};
pub use models::{UploadResponse, UploadedFile};
