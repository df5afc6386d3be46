//! LRC text parsing and merge engine.
//!
//! Scans raw `[mm:ss.xx]`-tagged text line by line, fans out every
//! leading time tag into a raw entry, then merges entries sharing a cue
//! time into stacked multi-language entries. Metadata tags such as
//! `[ar:Artist]` and blank separators are skipped; malformed time tags
//! drop only their own line unless strict mode is enabled.

use std::path::Path;

use crate::constants::{parser, time};
use crate::error::{Error, Result};
use crate::lyrics::template::{wrap_stacked, RichTextTemplate};
use crate::types::LyricEntry;

/// Parse behavior options.
#[derive(Debug, Clone, Default)]
pub struct ParseOptions {
    /// Controls stacking order of lines sharing one cue time.
    ///
    /// Downloaded LRC files with translations usually place the
    /// translated line after the original at the same timestamp. With
    /// `false` the later line (the translation) is stacked first; with
    /// `true` file order is preserved, so the original stays on top.
    pub reverse: bool,
    /// Per-language wrap templates for stacked sub-lines.
    pub templates: Vec<RichTextTemplate>,
    /// Reject lines with malformed time tags instead of skipping them.
    pub strict: bool,
}

impl ParseOptions {
    /// Build options with wrap templates compiled from raw patterns.
    ///
    /// See [`RichTextTemplate`] for the pattern syntax.
    #[must_use]
    pub fn with_templates<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            templates: patterns
                .into_iter()
                .map(|p| RichTextTemplate::new(p.as_ref()))
                .collect(),
            ..Self::default()
        }
    }
}

/// Parse LRC text with default options (lenient, no templates).
#[must_use]
pub fn parse(text: &str) -> Vec<LyricEntry> {
    // Lenient parsing has no failure mode
    parse_with(text, &ParseOptions::default()).unwrap_or_default()
}

/// Parse LRC text with explicit options.
///
/// `Ok` with an empty vec means the input contained no usable cue
/// lines; `Err` only occurs in strict mode. Output entries are ordered
/// by strictly increasing time: raw entries are re-sorted if the input
/// was not already time-ordered, and adjacent entries whose cue times
/// are approximately equal are merged into one stacked entry.
pub fn parse_with(text: &str, options: &ParseOptions) -> Result<Vec<LyricEntry>> {
    if text.is_empty() {
        return Ok(Vec::new());
    }

    let mut raw: Vec<(f64, &str)> = Vec::with_capacity(parser::ENTRY_CAPACITY);
    let mut times: Vec<f64> = Vec::new();
    let mut skipped = 0usize;

    for (index, line) in LogicalLines::new(text).enumerate() {
        let line = line.trim();
        if line.is_empty() || !line.starts_with('[') {
            continue;
        }

        match scan_tagged_line(line, &mut times) {
            LineScan::Metadata => {}
            LineScan::Malformed(reason) => {
                if options.strict {
                    return Err(Error::parse(index + 1, reason));
                }
                skipped += 1;
                tracing::debug!("Skipping malformed line {}: {reason}", index + 1);
            }
            LineScan::Cues(lyric) => {
                for &cue in &times {
                    raw.push((cue, lyric));
                }
            }
        }
    }

    // Multi-tag lines can emit cues out of file order; restore the
    // output contract with a stable sort so equal-time entries keep
    // their file order for the merge step.
    if !raw.windows(2).all(|pair| pair[0].0 <= pair[1].0) {
        raw.sort_by(|a, b| a.0.total_cmp(&b.0));
    }

    let entries = merge_entries(&raw, options);
    if skipped > 0 {
        tracing::debug!("Parsed {} entries, skipped {skipped} malformed lines", entries.len());
    }
    Ok(entries)
}

/// Read and parse an `.lrc` file.
pub fn parse_file(path: impl AsRef<Path>, options: &ParseOptions) -> Result<Vec<LyricEntry>> {
    let path = path.as_ref();
    let text = fs_err::read_to_string(path).map_err(|e| Error::io(e, path.to_path_buf()))?;
    let entries = parse_with(&text, options)?;
    tracing::info!("Parsed {} lyric entries from {}", entries.len(), path.display());
    Ok(entries)
}

/// Iterator over logical lines, treating `\n`, `\r\n`, and bare `\r`
/// as terminators. Yields borrowed slices; no per-line allocation.
struct LogicalLines<'a> {
    rest: &'a str,
}

impl<'a> LogicalLines<'a> {
    const fn new(text: &'a str) -> Self {
        Self { rest: text }
    }
}

impl<'a> Iterator for LogicalLines<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        if self.rest.is_empty() {
            return None;
        }
        match self.rest.find(['\n', '\r']) {
            Some(pos) => {
                let line = &self.rest[..pos];
                let bytes = self.rest.as_bytes();
                let terminator = if bytes[pos] == b'\r' && bytes.get(pos + 1) == Some(&b'\n') {
                    2
                } else {
                    1
                };
                self.rest = &self.rest[pos + terminator..];
                Some(line)
            }
            None => Some(std::mem::take(&mut self.rest)),
        }
    }
}

/// Outcome of scanning one `[`-prefixed line.
enum LineScan<'a> {
    /// Not a cue line (metadata tag such as `[ar:...]` or a bare `[]`).
    Metadata,
    /// A malformed time tag that lenient parsing drops.
    Malformed(&'static str),
    /// At least one cue time plus the trailing lyric text.
    Cues(&'a str),
}

/// Classification of a single `[...]` tag body.
enum TagBody {
    Time(f64),
    Metadata,
    Malformed(&'static str),
}

/// Consume every adjacent leading time tag of `line` into `times` and
/// return the trailing lyric text.
///
/// Only the first tag classifies the line: a metadata or malformed tag
/// after at least one valid cue ends tag consumption and becomes
/// literal lyric text.
fn scan_tagged_line<'a>(line: &'a str, times: &mut Vec<f64>) -> LineScan<'a> {
    times.clear();
    let mut rest = line;

    while rest.starts_with('[') {
        let Some(end) = rest.find(']') else {
            if times.is_empty() {
                return LineScan::Malformed("unterminated time tag");
            }
            break;
        };
        if end < 2 {
            // bare "[]" carries no tag body
            if times.is_empty() {
                return LineScan::Metadata;
            }
            break;
        }
        match parse_tag_body(&rest[1..end]) {
            TagBody::Time(cue) => {
                times.push(cue);
                rest = &rest[end + 1..];
            }
            TagBody::Metadata => {
                if times.is_empty() {
                    return LineScan::Metadata;
                }
                break;
            }
            TagBody::Malformed(reason) => {
                if times.is_empty() {
                    return LineScan::Malformed(reason);
                }
                break;
            }
        }
    }

    LineScan::Cues(rest.trim())
}

/// Parse a tag body in `mm:ss[.fraction]` form into a cue time.
///
/// A body whose minutes component is not numeric is metadata, not an
/// error; a numeric minutes component followed by an unparseable or
/// out-of-range remainder is malformed.
fn parse_tag_body(body: &str) -> TagBody {
    let Some(colon) = body.find(':') else {
        return TagBody::Metadata;
    };
    if colon == 0 || colon == body.len() - 1 {
        return TagBody::Metadata;
    }

    let Ok(minutes) = body[..colon].parse::<u32>() else {
        return TagBody::Metadata;
    };

    let remainder = &body[colon + 1..];
    let (seconds_str, fraction_digits) = match remainder.find('.') {
        Some(dot) => (&remainder[..dot], Some(&remainder[dot + 1..])),
        None => (remainder, None),
    };

    let Ok(seconds) = seconds_str.parse::<u32>() else {
        return TagBody::Malformed("seconds field is not a number");
    };
    if seconds >= time::MAX_SECONDS {
        return TagBody::Malformed("seconds field out of range");
    }

    // Fraction scale follows digit count: .5 is 0.5s, .50 is 0.50s
    let fraction = match fraction_digits {
        None | Some("") => 0.0,
        Some(digits) => {
            if digits.len() > time::MAX_FRACTION_DIGITS {
                return TagBody::Malformed("fraction has too many digits");
            }
            let Ok(value) = digits.parse::<u32>() else {
                return TagBody::Malformed("fraction is not a number");
            };
            let Ok(exponent) = i32::try_from(digits.len()) else {
                return TagBody::Malformed("fraction has too many digits");
            };
            f64::from(value) / 10f64.powi(exponent)
        }
    };

    TagBody::Time(f64::from(minutes).mul_add(time::SECONDS_PER_MINUTE, f64::from(seconds) + fraction))
}

/// Merge time-sorted raw entries, combining runs of approximately equal
/// cue times into single stacked entries.
fn merge_entries(raw: &[(f64, &str)], options: &ParseOptions) -> Vec<LyricEntry> {
    let mut entries = Vec::with_capacity(raw.len());
    let mut group: Vec<&str> = Vec::new();
    let mut group_time = 0.0;

    for &(cue, lyric) in raw {
        if !group.is_empty() && (cue - group_time).abs() > time::EPSILON {
            entries.push(flush_group(&group, group_time, options));
            group.clear();
        }
        if group.is_empty() {
            group_time = cue;
        }
        group.push(lyric);
    }
    if !group.is_empty() {
        entries.push(flush_group(&group, group_time, options));
    }

    entries
}

/// Join one same-cue group into its display text and apply templates.
fn flush_group(group: &[&str], cue: f64, options: &ParseOptions) -> LyricEntry {
    let mut joined = String::with_capacity(parser::MERGE_BUFFER_CAPACITY);
    if options.reverse {
        for (i, part) in group.iter().enumerate() {
            if i > 0 {
                joined.push('\n');
            }
            joined.push_str(part);
        }
    } else {
        for (i, part) in group.iter().rev().enumerate() {
            if i > 0 {
                joined.push('\n');
            }
            joined.push_str(part);
        }
    }

    let text = if options.templates.is_empty() {
        joined
    } else {
        wrap_stacked(&joined, &options.templates, options.reverse)
    };
    LyricEntry::new(text, cue)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    #[test]
    fn test_single_line() {
        let entries = parse("[00:05.50]World");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].text, "World");
        assert!(entries[0].at_time(5.5));
    }

    #[test]
    fn test_minutes_contribute_sixty_seconds() {
        let entries = parse("[02:30]halfway");
        assert_eq!(entries.len(), 1);
        assert!(entries[0].at_time(150.0));
    }

    #[test]
    fn test_fraction_scale_follows_digit_count() {
        for text in ["[00:01.5]x", "[00:01.50]x", "[00:01.500]x"] {
            let entries = parse(text);
            assert_eq!(entries.len(), 1, "input {text:?}");
            assert!(entries[0].at_time(1.5), "input {text:?}");
        }
        let entries = parse("[00:01.05]x");
        assert!(entries[0].at_time(1.05));
    }

    #[test]
    fn test_trailing_dot_means_zero_fraction() {
        let entries = parse("[00:03.]x");
        assert_eq!(entries.len(), 1);
        assert!(entries[0].at_time(3.0));
    }

    #[test]
    fn test_merge_default_order_stacks_translation_first() {
        let entries = parse("[00:01.00]Hello\n[00:01.00]Bonjour\n[00:05.50]World");
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].text, "Bonjour\nHello");
        assert!(entries[0].at_time(1.0));
        assert_eq!(entries[1].text, "World");
        assert!(entries[1].at_time(5.5));
    }

    #[test]
    fn test_merge_reverse_order_keeps_file_order() {
        let options = ParseOptions { reverse: true, ..ParseOptions::default() };
        let entries =
            parse_with("[00:01.00]Hello\n[00:01.00]Bonjour\n[00:05.50]World", &options).unwrap();
        assert_eq!(entries[0].text, "Hello\nBonjour");
        assert_eq!(entries[1].text, "World");
    }

    #[test]
    fn test_template_wrapping_end_to_end() {
        let options = ParseOptions::with_templates(["<b>*</b>", "<i>*</i>"]);
        let entries =
            parse_with("[00:01.00]Hello\n[00:01.00]Bonjour\n[00:05.50]World", &options).unwrap();
        assert_eq!(entries[0].text, "<i>Bonjour</i>\n<b>Hello</b>");
        assert_eq!(entries[1].text, "<b>World</b>");
    }

    #[test]
    fn test_three_way_merge() {
        let entries = parse("[00:01.00]a\n[00:01.00]b\n[00:01.00]c");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].text, "c\nb\na");
    }

    #[test]
    fn test_metadata_tags_skipped() {
        let text = "[ar:Artist Name]\n[ti:Title]\n[al:Album]\n[00:01.00]Hello";
        let entries = parse(text);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].text, "Hello");
    }

    #[test]
    fn test_empty_input_yields_empty_sequence() {
        assert!(parse("").is_empty());
        assert!(parse("\n\n\n").is_empty());
    }

    #[test]
    fn test_empty_lyric_text_is_valid() {
        // A deliberate blank display frame
        let entries = parse("[00:01.00]Hello\n[00:09.00]");
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].text, "");
        assert!(entries[1].at_time(9.0));
    }

    #[test]
    fn test_line_ending_variants_are_equivalent() {
        let unix = parse("[00:01.00]a\n[00:02.00]b");
        let dos = parse("[00:01.00]a\r\n[00:02.00]b");
        let mac = parse("[00:01.00]a\r[00:02.00]b");
        assert_eq!(unix, dos);
        assert_eq!(unix, mac);
    }

    #[test]
    fn test_lines_without_bracket_skipped() {
        let entries = parse("plain text\n[00:01.00]Hello\n   \nanother");
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_malformed_tags_drop_only_their_line() {
        let text = "[00:60.00]bad seconds\n[xx:10.00]not numeric\n[00:0x.00]bad\n[00:01\n[]\n[x]\n[00:02.00]good";
        let entries = parse(text);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].text, "good");
    }

    #[test]
    fn test_strict_mode_rejects_malformed_time_tag() {
        let options = ParseOptions { strict: true, ..ParseOptions::default() };
        let err = parse_with("[00:01.00]ok\n[00:75.00]bad", &options).unwrap_err();
        match err {
            Error::Parse { line, message } => {
                assert_eq!(line, 2);
                assert!(message.contains("out of range"));
            }
            Error::Io { .. } => panic!("Expected Parse error"),
        }
    }

    #[test]
    fn test_strict_mode_still_skips_metadata() {
        let options = ParseOptions { strict: true, ..ParseOptions::default() };
        let entries = parse_with("[ar:Artist]\n[00:01.00]Hello", &options).unwrap();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_multi_tag_line_fans_out() {
        let entries = parse("[00:01.00][00:05.00]chorus\n[00:03.00]verse");
        assert_eq!(entries.len(), 3);
        assert!(entries[0].at_time(1.0));
        assert_eq!(entries[0].text, "chorus");
        assert!(entries[1].at_time(3.0));
        assert_eq!(entries[1].text, "verse");
        assert!(entries[2].at_time(5.0));
        assert_eq!(entries[2].text, "chorus");
    }

    #[test]
    fn test_invalid_second_tag_is_literal_text() {
        let entries = parse("[00:01.00][ar:x]hi");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].text, "[ar:x]hi");
    }

    #[test]
    fn test_unsorted_input_is_reordered_and_merged() {
        let entries = parse("[00:05.00]late\n[00:01.00]early\n[00:05.00]late too");
        assert_eq!(entries.len(), 2);
        assert!(entries[0].at_time(1.0));
        assert_eq!(entries[1].text, "late too\nlate");
    }

    #[test]
    fn test_output_times_strictly_increase() {
        let text = "[00:01.00]a\n[00:01.00]b\n[00:02.50]c\n[01:00.00]d\n[01:00.00]e";
        let entries = parse(text);
        for pair in entries.windows(2) {
            assert!(pair[1].time > pair[0].time + crate::constants::time::EPSILON);
        }
    }

    #[test]
    fn test_brackets_in_lyric_body_are_literal() {
        let entries = parse("[00:01.00]lyrics [with] brackets [");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].text, "lyrics [with] brackets [");
    }

    #[test]
    fn test_surrounding_whitespace_trimmed() {
        let entries = parse("   [00:01.00]   padded lyric   ");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].text, "padded lyric");
    }
}
