#![deny(missing_docs)]

//! Core library for the docbrief document summarization service.

/// HTTP routing and REST handlers.
pub mod api;
/// Environment-driven configuration management.
pub mod config;
/// Structured logging and tracing setup.
pub mod logging;
/// Pipeline counters.
pub mod metrics;
/// Document extraction and summarization pipeline.
pub mod processing;
/// Generative summarization provider clients.
pub mod summarization;
