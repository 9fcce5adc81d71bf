use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};

/// Resolve the transcript from CLI arguments.
///
/// `--text` is used verbatim. `--transcript -` reads stdin, any other value
/// is a file path. With neither, the transcript is empty, which analysis
/// treats as "no speech detected".
pub fn resolve_transcript(file: Option<&Path>, text: Option<&str>) -> Result<String> {
    match (file, text) {
        (Some(_), Some(_)) => anyhow::bail!("Use either --transcript or --text, not both"),
        (None, Some(text)) => Ok(text.to_string()),
        (Some(path), None) if path == Path::new("-") => {
            read_transcript(std::io::stdin().lock()).context("Failed to read transcript from stdin")
        }
        (Some(path), None) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read transcript {}", path.display())),
        (None, None) => Ok(String::new()),
    }
}

fn read_transcript(mut reader: impl Read) -> std::io::Result<String> {
    let mut buf = String::new();
    reader.read_to_string(&mut buf)?;
    Ok(buf)
}

/// Short display name for a recording path.
pub fn source_label(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
