//! Comparison side marker
//!
//! Every comparison has an expected and an actual side. Several reports
//! (cycle detection, pointer placement) need to name the side they refer to.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which side of a comparison a report refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    /// The value the test author expects
    Expected,
    /// The value produced by the code under test
    Actual,
}

impl Side {
    /// Lower-case label used as a path root in messages (`expected.Other`)
    pub fn label(&self) -> &'static str {
        match self {
            Side::Expected => "expected",
            Side::Actual => "actual",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels() {
        assert_eq!(Side::Expected.label(), "expected");
        assert_eq!(Side::Actual.to_string(), "actual");
    }

    #[test]
    fn test_serde_snake_case() {
        let json = serde_json::to_string(&Side::Expected).unwrap();
        assert_eq!(json, "\"expected\"");
        let back: Side = serde_json::from_str("\"actual\"").unwrap();
        assert_eq!(back, Side::Actual);
    }
}
