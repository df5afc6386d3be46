//! Forward-only playback cursor over parsed entries.
//!
//! A consumer drives this with a monotonically non-decreasing playback
//! clock; the cursor never scans backward, so a whole playback session
//! is a single pass over the entry sequence.

use crate::types::LyricEntry;

/// Tracks the active entry for a monotonically increasing playback time.
#[derive(Debug)]
pub struct LyricCursor<'a> {
    entries: &'a [LyricEntry],
    index: usize,
}

impl<'a> LyricCursor<'a> {
    /// Create a cursor over parser output (entries ordered by strictly
    /// increasing time).
    #[must_use]
    pub const fn new(entries: &'a [LyricEntry]) -> Self {
        Self { entries, index: 0 }
    }

    /// The entry currently active, if any entries exist.
    ///
    /// Before the second cue is reached this is the first entry, which
    /// mirrors showing the opening line while the intro plays.
    #[must_use]
    pub fn current(&self) -> Option<&'a LyricEntry> {
        self.entries.get(self.index)
    }

    /// Advance to playback position `seconds` and return the entry that
    /// just became active, or `None` when the active entry is unchanged.
    pub fn advance_to(&mut self, seconds: f64) -> Option<&'a LyricEntry> {
        let mut changed = false;
        while let Some(next) = self.entries.get(self.index + 1) {
            if next.time > seconds {
                break;
            }
            self.index += 1;
            changed = true;
        }
        if changed {
            self.current()
        } else {
            None
        }
    }

    /// Rewind to the first entry.
    pub fn reset(&mut self) {
        self.index = 0;
    }

    /// Jump to an arbitrary playback position, allowing backward seeks,
    /// and return the entry active there.
    pub fn seek(&mut self, seconds: f64) -> Option<&'a LyricEntry> {
        self.index = 0;
        self.advance_to(seconds);
        self.current()
    }
}
