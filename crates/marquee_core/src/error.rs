//! # Marquee Error Types
//!
//! None of these ever reach the end user. The controller swallows them and
//! skips the affected cycle.

use thiserror::Error;

/// Errors that can occur inside the marquee engine.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MarqueeError {
    /// A configuration attribute did not hold a usable number.
    #[error("invalid number for {attribute}: {value:?}")]
    InvalidNumber {
        /// The attribute being read.
        attribute: String,
        /// The raw attribute value.
        value: String,
    },

    /// A TOML defaults file could not be parsed.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Tried to release a pointer capture that is no longer held.
    #[error("pointer capture {0} is not active")]
    CaptureNotActive(i32),
}

/// Result type for marquee operations.
pub type MarqueeResult<T> = Result<T, MarqueeError>;
