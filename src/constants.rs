//! Engine constants.
//!
//! Centralizes magic numbers and tuning values for better maintainability.

/// Time-tag parsing constants.
pub mod time {
    /// Tolerance used when comparing two cue times for merge equality.
    ///
    /// Well below centisecond resolution, so tags that denote the same
    /// cue always compare equal while distinct cues never do.
    pub const EPSILON: f64 = 1e-6;

    /// Seconds per minute in a `mm:ss` tag.
    pub const SECONDS_PER_MINUTE: f64 = 60.0;

    /// Exclusive upper bound for the seconds field of a time tag.
    pub const MAX_SECONDS: u32 = 60;

    /// Maximum accepted digits in the fractional-seconds field.
    pub const MAX_FRACTION_DIGITS: usize = 9;
}

/// Rich-text template constants.
pub mod template {
    /// Placeholder marker splitting a wrap pattern into prefix and suffix.
    pub const PLACEHOLDER: char = '*';
}

/// Parser buffer sizing.
pub mod parser {
    /// Initial capacity for the raw entry list.
    pub const ENTRY_CAPACITY: usize = 64;

    /// Initial capacity for the merge text buffer.
    pub const MERGE_BUFFER_CAPACITY: usize = 256;
}
