//! Core library for parsebench
//!
//! parsebench compares document-parsing backends by folding the metric files an
//! external evaluation engine writes for each backend into one comparative report.
//!
//! # Module Organization
//!
//! - [`commands`]: Command-line interface and orchestration
//! - [`config`]: Configuration file handling
//! - [`discovery`]: Locating per-backend metric files
//! - [`metrics`]: Decoding metric trees into normalized records
//! - [`reports`]: Aggregation and report rendering

pub type Result<T, E = ohno::AppError> = core::result::Result<T, E>;

pub mod commands;
pub mod config;
pub mod discovery;
pub mod metrics;
pub mod reports;

pub use crate::commands::{Host, run};
