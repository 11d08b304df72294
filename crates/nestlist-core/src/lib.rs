#![forbid(unsafe_code)]

//! Core: canonical input events, geometry, and the logging facade shared by
//! the nestlist crates.

pub mod event;
pub mod geometry;
pub mod logging;

// With the feature off, the no-op macros are already at the crate root.
#[cfg(feature = "tracing")]
pub use logging::{debug, debug_span, trace};
