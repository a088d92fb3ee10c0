//! # Builders
//!
//! Builder patterns for configuring orchestration.
//!
//! ## Modules
//!
//! - [`config_builder`] - Builder for [`OrchestratorConfig`](config_builder::OrchestratorConfig)
//!
//! ## Usage
//!
//! Builders provide a fluent API with sensible defaults; `build()` validates
//! the result.

pub mod config_builder;
