//! Extensions for mapping errors to `ResidueResult` concisely.
//!
//! These helpers reduce repetitive `.map_err(|e| Arc::new(ResidueError::…(e)))`
//! patterns when converting external error types into the crate's
//! `ResidueResult<T>` alias (`Result<T, Arc<ResidueError>>`).
//!
//! # Examples
//!
//! ```
//! use json_residue::{ResidueResult, ResidueResultExt};
//!
//! fn decode(text: &str) -> ResidueResult<serde_json::Value> {
//!     // serde_json::Error implements Into<ResidueError>
//!     serde_json::from_str(text).into_residue()
//! }
//!
//! assert!(decode("{}").is_ok());
//! assert!(decode("{").is_err());
//! ```

use std::sync::Arc;

use crate::{ResidueError, ResidueResult};

/// Generic extension for mapping any `Result<T, E>` with
/// `E: Into<ResidueError>` into a `ResidueResult<T>`.
pub trait ResidueResultExt<T, E> {
    /// Convert `Result<T, E>` into `ResidueResult<T>` using `Into<ResidueError>`.
    ///
    /// # Errors
    ///
    /// Propagates the original error after conversion into `Arc<ResidueError>`.
    fn into_residue(self) -> ResidueResult<T>;
}

impl<T, E> ResidueResultExt<T, E> for Result<T, E>
where
    E: Into<ResidueError>,
{
    fn into_residue(self) -> ResidueResult<T> {
        self.map_err(|e| Arc::new(e.into()))
    }
}
