//! Tunable merge options.
//!
//! Options are layered with Figment: the built-in defaults first, then any
//! environment variables carrying the [`ENV_PREFIX`]. Callers embedding the
//! merger in a larger application can hand over their own [`Figment`] through
//! [`MergeOptions::from_figment`].

use figment::Figment;
use figment::providers::{Env, Serialized};
use serde::{Deserialize, Serialize};

use crate::{ResidueResult, ResidueResultExt};

/// Default bound on record nesting depth.
///
/// Matches the recursion limit `serde_json` applies while decoding, so no
/// well-formed document is cut short by default.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Prefix for environment variables read by [`MergeOptions::load`].
pub const ENV_PREFIX: &str = "JSON_RESIDUE_";

/// Options controlling a merge.
#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct MergeOptions {
    /// Deepest level of nested records the merger descends into. Nested
    /// values below this level stay in the diff untouched.
    pub max_depth: usize,
}

impl Default for MergeOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl MergeOptions {
    /// Replace the depth limit.
    #[must_use]
    pub const fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Defaults overlaid with `JSON_RESIDUE_*` environment variables.
    #[must_use]
    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(Self::default())).merge(Env::prefixed(ENV_PREFIX))
    }

    /// Load options from the defaults and the environment.
    ///
    /// ```
    /// use json_residue::MergeOptions;
    ///
    /// let options = MergeOptions::load()?;
    /// assert!(options.max_depth > 0);
    /// # Ok::<_, std::sync::Arc<json_residue::ResidueError>>(())
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`crate::ResidueError::Options`] when an environment variable
    /// holds a value of the wrong type.
    pub fn load() -> ResidueResult<Self> {
        Self::from_figment(&Self::figment())
    }

    /// Extract options from a caller-assembled figment.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ResidueError::Options`] when extraction fails.
    pub fn from_figment(figment: &Figment) -> ResidueResult<Self> {
        let options: Self = figment.extract().into_residue()?;
        tracing::debug!(max_depth = options.max_depth, "loaded merge options");
        Ok(options)
    }
}
