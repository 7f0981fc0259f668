//! # Report Module
//!
//! The session-scoped result writer. A [`writer::ResultWriter`] owns the
//! configuration, at most one open output session (graph-score log, match
//! log and descriptor table, lifecycle-coupled), and the depiction builder
//! that accumulates match images between renders.
//!
//! ## Key Components
//!
//! - [`config`] - External configuration for paths, suffixes and image sizing
//! - [`error`] - The error taxonomy for all reporting operations
//! - [`metrics`] - Match statistics and derived similarity metrics
//! - [`session`] - The three lifecycle-coupled output streams
//! - [`writer`] - The result writer itself

pub mod config;
pub mod error;
pub mod metrics;
pub mod session;
pub mod writer;
