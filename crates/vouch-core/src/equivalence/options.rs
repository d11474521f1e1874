use std::fmt;
use std::rc::Rc;

use super::path::ExclusionSet;
use crate::config::{max_depth_from_env, ConfigError, DEFAULT_MAX_DEPTH};
use crate::value::{MemberFilter, PublicInstanceMembers};

/// Options for one equivalence comparison
///
/// ```
/// use vouch_core::equivalence::EquivalenceOptions;
///
/// let options = EquivalenceOptions::new()
///     .with_strict(true)
///     .with_max_depth(10)
///     .with_exclusion("Shallow.Value1");
/// assert!(options.is_strict());
/// ```
#[derive(Clone)]
pub struct EquivalenceOptions {
    strict: bool,
    max_depth: usize,
    exclusions: ExclusionSet,
    member_filter: Rc<dyn MemberFilter>,
}

impl Default for EquivalenceOptions {
    fn default() -> Self {
        Self {
            strict: false,
            max_depth: DEFAULT_MAX_DEPTH,
            exclusions: ExclusionSet::new(),
            member_filter: Rc::new(PublicInstanceMembers),
        }
    }
}

impl EquivalenceOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults, with `max_depth` taken from the environment when set
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidMaxDepth`] when the override is not a
    /// positive integer.
    pub fn from_env() -> Result<Self, ConfigError> {
        let options = Self::default();
        Ok(match max_depth_from_env()? {
            Some(depth) => options.with_max_depth(depth),
            None => options,
        })
    }

    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Skip the member at `path` (dot-joined, relative to the root)
    pub fn with_exclusion(mut self, path: impl Into<String>) -> Self {
        self.exclusions.insert(path);
        self
    }

    pub fn with_exclusions(mut self, exclusions: ExclusionSet) -> Self {
        self.exclusions = exclusions;
        self
    }

    pub fn with_member_filter(mut self, filter: impl MemberFilter + 'static) -> Self {
        self.member_filter = Rc::new(filter);
        self
    }

    pub fn is_strict(&self) -> bool {
        self.strict
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn exclusions(&self) -> &ExclusionSet {
        &self.exclusions
    }

    pub fn member_filter(&self) -> &dyn MemberFilter {
        self.member_filter.as_ref()
    }
}

impl fmt::Debug for EquivalenceOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EquivalenceOptions")
            .field("strict", &self.strict)
            .field("max_depth", &self.max_depth)
            .field("exclusions", &self.exclusions)
            .finish_non_exhaustive()
    }
}
