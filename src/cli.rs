use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "speechcoach")]
#[command(about = "Measure how you speak and get coaching feedback")]
pub struct Cli {
    /// More log output (-v info, -vv debug). RUST_LOG overrides.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Analyze a recording and its transcript
    Analyze {
        /// WAV file to analyze
        audio: PathBuf,

        /// Transcript file ("-" reads stdin)
        #[arg(long, conflicts_with = "text")]
        transcript: Option<PathBuf>,

        /// Transcript given inline
        #[arg(long)]
        text: Option<String>,

        /// LLM provider: "claude" or "gpt" (default from config)
        #[arg(long)]
        provider: Option<String>,

        /// Model override (ignores --fast/--think)
        #[arg(long)]
        model: Option<String>,

        /// Use fastest/cheapest model (Haiku / GPT-5.2)
        #[arg(long, conflicts_with = "think")]
        fast: bool,

        /// Use most capable model (Opus / GPT-5.2-pro)
        #[arg(long, conflicts_with = "fast")]
        think: bool,

        /// Skip the LLM and use built-in feedback only
        #[arg(long)]
        offline: bool,

        /// Print metrics and feedback as JSON
        #[arg(long)]
        json: bool,

        /// Save a markdown report to the reports directory
        #[arg(long)]
        save: bool,

        /// Save the markdown report to this path
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Show where config and reports are stored
    Paths,

    /// Print the effective configuration as TOML
    Config,
}
