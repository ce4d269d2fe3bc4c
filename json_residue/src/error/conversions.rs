//! Trait-based conversions between external error types and `ResidueError`.

use figment::Error as FigmentError;

use super::ResidueError;

impl From<FigmentError> for ResidueError {
    fn from(e: FigmentError) -> Self {
        Self::options(e)
    }
}
