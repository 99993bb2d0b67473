//! Common utilities module
//!
//! Shared error type used by the codecs, the report parser and the pipeline.

pub mod error;

pub use error::{PcdError, Result};
