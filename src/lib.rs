//! `lrcsplit` - LRC synchronized-lyric parsing and formatting.
//!
//! This crate converts raw LRC text (`[mm:ss.xx]`-tagged lyric lines) into
//! an ordered sequence of timed entries, merging lines that share a cue
//! time into stacked multi-language entries with optional per-language
//! rich-text wrapping.

// Re-export public modules for use in integration tests and as a library
pub mod constants;
pub mod error;
pub mod lyrics;
pub mod types;
