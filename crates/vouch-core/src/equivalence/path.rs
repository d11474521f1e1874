//! Member paths and exclusion sets.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Member-name segments from the comparison root, displayed dot-joined
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Path(Vec<String>);

impl Path {
    pub fn root() -> Self {
        Self::default()
    }

    /// This path extended by one member name
    pub fn child(&self, name: &str) -> Self {
        let mut segments = self.0.clone();
        segments.push(name.to_string());
        Path(segments)
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// `name` qualified by this path: `x.y` under `x`
    pub fn qualify(&self, name: &str) -> String {
        if self.is_root() {
            name.to_string()
        } else {
            format!("{}.{}", self, name)
        }
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join("."))
    }
}

impl From<&str> for Path {
    fn from(dotted: &str) -> Self {
        Path(
            dotted
                .split('.')
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
        )
    }
}

/// Dot-joined member paths skipped during comparison
///
/// Matching is exact: excluding `Shallow.Value1` skips that member only, not
/// other members named `Value1`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExclusionSet(BTreeSet<String>);

impl ExclusionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, path: impl Into<String>) {
        self.0.insert(path.into());
    }

    /// The root is never excluded
    pub fn contains(&self, path: &Path) -> bool {
        !path.is_root() && self.0.contains(&path.to_string())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl<S: Into<String>> FromIterator<S> for ExclusionSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        ExclusionSet(iter.into_iter().map(Into::into).collect())
    }
}
