//! Core data types for parsed lyrics.

use serde::{Deserialize, Serialize};

use crate::constants::time::EPSILON;

/// A single timed lyric entry.
///
/// `text` may contain embedded line breaks when several input lines
/// sharing one cue time were merged into a stacked multi-language entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LyricEntry {
    /// Lyric text; embedded `\n` separates stacked sub-lines.
    pub text: String,
    /// Cue time in seconds since track start.
    pub time: f64,
}

impl LyricEntry {
    /// Create a new entry.
    pub fn new(text: impl Into<String>, time: f64) -> Self {
        Self { text: text.into(), time }
    }

    /// Whether this entry's cue time approximately equals `time`.
    ///
    /// Uses an epsilon comparison rather than raw `==` to absorb
    /// floating-point representation error between tags that denote the
    /// same cue.
    #[must_use]
    pub fn at_time(&self, time: f64) -> bool {
        (self.time - time).abs() <= EPSILON
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    #[test]
    fn at_time_absorbs_representation_error() {
        let entry = LyricEntry::new("Hello", 61.5);
        assert!(entry.at_time(61.5 + 1e-9));
        assert!(entry.at_time(61.5 - 1e-9));
        assert!(!entry.at_time(61.51));
    }
}
