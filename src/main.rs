//! `lrcsplit` - parse an `.lrc` file and print its timed entries.
//!
//! Usage: lrcsplit FILE [--reverse] [--strict] [--json] [--template PATTERN]...

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use lrcsplit::lyrics::{format_timestamp, parse_file, ParseOptions, RichTextTemplate};

fn print_usage() {
    println!("Usage: lrcsplit FILE [options]");
    println!();
    println!("Options:");
    println!("  --reverse            keep file order when stacking same-cue lines");
    println!("  --strict             reject malformed time tags instead of skipping them");
    println!("  --json               print entries as JSON");
    println!("  --template PATTERN   wrap pattern with a '*' placeholder, one per language");
    println!("                       (repeatable, e.g. --template '<b>*</b>' --template '<i>*</i>')");
}

fn main() -> Result<()> {
    let mut file: Option<PathBuf> = None;
    let mut options = ParseOptions::default();
    let mut json = false;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--reverse" => options.reverse = true,
            "--strict" => options.strict = true,
            "--json" => json = true,
            "--template" => {
                let Some(pattern) = args.next() else {
                    bail!("--template requires a pattern argument");
                };
                options.templates.push(RichTextTemplate::new(&pattern));
            }
            "--help" | "-h" => {
                print_usage();
                return Ok(());
            }
            _ if arg.starts_with('-') => bail!("unknown flag: {arg}"),
            _ => {
                if file.replace(PathBuf::from(&arg)).is_some() {
                    bail!("unexpected extra argument: {arg}");
                }
            }
        }
    }

    let Some(file) = file else {
        print_usage();
        bail!("missing input file");
    };

    let entries = parse_file(&file, &options)
        .with_context(|| format!("failed to parse {}", file.display()))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    println!("=== Entries ({}) ===", entries.len());
    for entry in &entries {
        let stamp = format_timestamp(entry.time);
        for (i, part) in entry.text.split('\n').enumerate() {
            if i == 0 {
                println!("[{stamp}] {part}");
            } else {
                // continuation sub-lines of a merged entry
                println!("{:>width$} {part}", "", width = stamp.len() + 2);
            }
        }
    }

    Ok(())
}
