//! Observability infrastructure for the Lumen storefront.
//!
//! This crate provides:
//! - `StructuredLogger` - Structured logging with shopper session context
//! - `LogSink` - Where formatted log lines go (stderr, memory)
//! - `init_tracing` - Process-wide `tracing` subscriber setup

mod logging;
mod subscriber;

pub use logging::*;
pub use subscriber::*;
