//! Built-in adapters for the [`app`](crate::app) ports.
//!
//! The host platform usually brings its own (a UI bridge, a metrics
//! pipeline); the log sink here is enough for headless operation and
//! tests.

pub mod log_sink;
