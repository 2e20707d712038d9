//! Shared library for cross-cutting concerns in meugrind Rust test tooling.
//!
//! This crate provides centralized implementations for:
//! - Error types with local-recovery classification
//! - Environment sources and permissive environment parsing
//! - Tracing subscriber setup

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod env;
pub mod error;
pub mod tracing_config;

pub use env::{EnvSource, ProcessEnv, env_vars, flag_enabled, parse_env_or};
pub use error::HarnessError;
pub use tracing_config::{TracingConfig, init_tracing, try_init_tracing};
