use std::collections::BTreeSet;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};

/// Splits text into lines, each keeping its terminator.
pub fn split_lines(text: &str) -> Vec<&str> {
    text.split_inclusive('\n').collect()
}

pub fn retained_lines<'a>(lines: &[&'a str], dropped: &BTreeSet<usize>) -> Vec<&'a str> {
    lines
        .iter()
        .enumerate()
        .filter(|(index, _)| !dropped.contains(index))
        .map(|(_, line)| *line)
        .collect()
}

pub fn write_lines(path: &Path, lines: &[&str]) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create output file: {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    for line in lines {
        writer
            .write_all(line.as_bytes())
            .with_context(|| format!("failed to write output file: {}", path.display()))?;
    }
    writer
        .flush()
        .with_context(|| format!("failed to finalize output file: {}", path.display()))?;

    Ok(())
}
