//! LRC re-serialization.
//!
//! Turns parsed entries back into `[mm:ss.cc]`-tagged text. Merged
//! multi-line entries emit one tagged line per sub-line, all sharing
//! the entry's timestamp, so a subsequent parse regroups them.

use std::fmt::Write;

use crate::types::LyricEntry;

/// Format a cue time as `mm:ss.cc` with centisecond precision.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)] // clamped non-negative before rounding
pub fn format_timestamp(seconds: f64) -> String {
    let total_cs = (seconds.max(0.0) * 100.0).round() as u64;
    let cs = total_cs % 100;
    let total_s = total_cs / 100;
    let s = total_s % 60;
    let m = total_s / 60;
    format!("{m:02}:{s:02}.{cs:02}")
}

/// Serialize entries back to LRC text.
#[must_use]
pub fn to_lrc(entries: &[LyricEntry]) -> String {
    let mut out = String::new();
    for entry in entries {
        let stamp = format_timestamp(entry.time);
        for part in entry.text.split('\n') {
            let _ = writeln!(out, "[{stamp}]{part}");
        }
    }
    out
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;
    use crate::lyrics::parser::{parse_with, ParseOptions};

    #[test]
    fn test_format_timestamp() {
        assert_eq!(format_timestamp(1.5), "00:01.50");
        assert_eq!(format_timestamp(150.0), "02:30.00");
        assert_eq!(format_timestamp(0.0), "00:00.00");
        assert_eq!(format_timestamp(61.05), "01:01.05");
    }

    #[test]
    fn test_format_timestamp_clamps_negative() {
        assert_eq!(format_timestamp(-3.0), "00:00.00");
    }

    #[test]
    fn test_merged_entry_emits_one_line_per_sub_line() {
        let entries = [LyricEntry::new("Bonjour\nHello", 1.0)];
        assert_eq!(to_lrc(&entries), "[00:01.00]Bonjour\n[00:01.00]Hello\n");
    }

    #[test]
    fn test_empty_text_emits_blank_frame() {
        let entries = [LyricEntry::new("", 9.0)];
        assert_eq!(to_lrc(&entries), "[00:09.00]\n");
    }

    #[test]
    fn test_round_trip_preserves_entries() {
        let options = ParseOptions { reverse: true, ..ParseOptions::default() };
        let original = parse_with(
            "[00:01.00]Hello\n[00:01.00]Bonjour\n[00:05.50]World",
            &options,
        )
        .unwrap();
        let reparsed = parse_with(&to_lrc(&original), &options).unwrap();
        assert_eq!(original, reparsed);
    }
}
