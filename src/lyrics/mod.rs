//! LRC lyric parsing, merging, formatting, and playback tracking.
//!
//! The submodules cover the full text-in/entries-out pipeline:
//! - `parser`: scan raw LRC text into merged [`crate::types::LyricEntry`] sequences
//! - `template`: per-language rich-text wrap patterns
//! - `format`: re-serialization back to LRC text
//! - `cursor`: forward-only active-entry tracking against a playback clock

pub mod cursor;
pub mod format;
pub mod parser;
pub mod template;

pub use cursor::LyricCursor;
pub use format::{format_timestamp, to_lrc};
pub use parser::{parse, parse_file, parse_with, ParseOptions};
pub use template::RichTextTemplate;
