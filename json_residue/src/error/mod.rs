//! Error types produced when decoding documents and loading merge options.

mod constructors;
mod conversions;
mod types;

pub use types::ResidueError;
