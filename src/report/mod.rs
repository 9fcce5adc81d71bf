pub mod markdown;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use console::style;

use crate::analysis::SpeechMetrics;
use crate::narrative::AnalysisReport;
use crate::paths;

/// Write a markdown report.
///
/// With `output`, writes exactly there. Otherwise picks a timestamped name
/// in the reports directory. Parent directories are created as needed.
/// Returns the path written.
pub fn save_report(markdown: &str, output: Option<&Path>) -> Result<PathBuf> {
    let path = match output {
        Some(p) => p.to_path_buf(),
        None => default_report_path(&paths::reports_dir(), chrono::Local::now()),
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    std::fs::write(&path, markdown)
        .with_context(|| format!("Failed to write report to {}", path.display()))?;

    log::debug!("wrote {} bytes to {}", markdown.len(), path.display());
    Ok(path)
}

/// `<dir>/speech_YYYY-MM-DD_HHMMSS.md`
pub fn default_report_path(dir: &Path, at: chrono::DateTime<chrono::Local>) -> PathBuf {
    dir.join(format!("speech_{}.md", at.format("%Y-%m-%d_%H%M%S")))
}

/// Print the qualitative feedback to the terminal.
pub fn print_feedback(report: &AnalysisReport, narrator: &str) {
    println!("\n  {} {}", style("Feedback").bold(), style(format!("({narrator})")).dim());
    println!("     {}", report.overall_assessment);

    let p = &report.language_proficiency;
    println!(
        "\n     Level:       {}  (grammar {}/10, vocabulary {}/10, fluency {}/10)",
        style(p.level()).cyan(),
        p.grammar_score(),
        p.vocabulary_score(),
        p.fluency_score()
    );

    println!("\n  {}", style("Strengths").green().bold());
    for s in &report.strengths {
        println!("     + {s}");
    }

    println!("\n  {}", style("To work on").yellow().bold());
    for a in &report.areas_for_improvement {
        println!("     - {a}");
    }

    println!("\n  {}", style("Recommendations").bold());
    for (i, r) in report.recommendations.iter().enumerate() {
        println!("     {}. {}", i + 1, style(&r.title).bold());
        if !r.description.is_empty() {
            println!("        {}", r.description);
        }
    }
}

/// JSON document combining measurements and feedback.
pub fn to_json(metrics: &SpeechMetrics, report: &AnalysisReport, narrator: &str) -> Result<String> {
    let doc = serde_json::json!({
        "metrics": metrics,
        "report": report,
        "narrator": narrator,
    });
    serde_json::to_string_pretty(&doc).context("Failed to serialize analysis")
}
