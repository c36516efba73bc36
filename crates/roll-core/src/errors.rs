//! Cross-cutting error types for Rollcall.
//!
//! This module defines errors that can originate from any crate in the system.
//! Domain-specific errors (e.g., `ParserError`, `TimelineError`) are defined in
//! their respective crates. Everything converges on `anyhow` in `roll-cli`.

use thiserror::Error;

/// Errors that can be raised by any Rollcall crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Data failed validation (duplicate ids, overlapping sets, etc.).
    #[error("Validation error: {0}")]
    Validation(String),
}
