//! Common utilities for the sitemap crates.
//!
//! This crate provides foundational pieces shared by the sitemap encoder and decoder:
//!
//! - [`CountingWriter`] - Write adapter that tracks the number of bytes accepted by a sink
//! - [`datetime`] - W3C datetime formatting and lenient parsing for `<lastmod>` values

mod counter;
mod error;

pub mod datetime;

pub use counter::CountingWriter;
pub use error::{Error, Result};

/// Re-export chrono so downstream crates agree on the timestamp type.
pub use chrono;
