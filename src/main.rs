mod analysis;
mod audio;
mod cli;
mod config;
mod dsp;
mod error;
mod narrative;
mod paths;
mod report;
mod util;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use console::style;

use analysis::SpeechAnalyzer;
use config::AppConfig;
use narrative::provider::{ModelTier, Provider};
use narrative::Narrator;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Analyze {
            audio,
            transcript,
            text,
            provider,
            model,
            fast,
            think,
            offline,
            json,
            save,
            output,
        } => {
            let mut config = config::load_config()?;
            apply_overrides(
                &mut config,
                provider.as_deref(),
                model,
                ModelTier::from_flags(fast, think),
                offline,
            )?;
            let transcript = util::resolve_transcript(transcript.as_deref(), text.as_deref())?;
            run_analyze(&config, audio, &transcript, json, save, output)
        }

        Command::Paths => {
            println!("Config: {}", paths::config_file().display());
            println!("Data:    {}", paths::data_dir().display());
            println!("Reports: {}", paths::reports_dir().display());
            Ok(())
        }

        Command::Config => {
            let config = config::load_config()?;
            let toml = toml::to_string_pretty(&config).context("Failed to serialize config")?;
            print!("{toml}");
            Ok(())
        }
    }
}

/// Default `warn`; each `-v` raises one level. RUST_LOG wins when set.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

/// Fold CLI flags into the loaded configuration.
fn apply_overrides(
    config: &mut AppConfig,
    provider: Option<&str>,
    model: Option<String>,
    tier: Option<ModelTier>,
    offline: bool,
) -> Result<()> {
    if let Some(p) = provider {
        // Reject typos up front instead of silently going offline
        Provider::from_str_loose(p)?;
        config.narrative.provider = p.to_string();
    }
    if model.is_some() {
        config.narrative.model = model;
    }
    if let Some(tier) = tier {
        config.narrative.tier = tier.to_string();
    }
    if offline {
        config.narrative.enabled = false;
    }
    Ok(())
}

fn run_analyze(
    config: &AppConfig,
    audio_path: PathBuf,
    transcript: &str,
    json: bool,
    save: bool,
    output: Option<PathBuf>,
) -> Result<()> {
    let waveform = audio::wav::load_waveform(&audio_path)
        .with_context(|| format!("Failed to load {}", audio_path.display()))?;
    let analyzer = SpeechAnalyzer::new(&config.analysis)?;
    let metrics = analyzer.analyze(&waveform, transcript)?;

    let narrator = Narrator::from_config(&config.narrative);
    if !json && !narrator.is_offline() {
        println!("{}", style(format!("Asking {} for feedback...", narrator.source())).dim());
    }
    let feedback = narrator.report(transcript, &metrics);
    let source = narrator.source();

    if json {
        println!("{}", report::to_json(&metrics, &feedback, source)?);
    } else {
        let label = util::source_label(&audio_path);
        println!("\n  {} {}", style("Speech analysis").bold(), style(&label).dim());
        analysis::analyzer::print_metrics(&metrics);
        report::print_feedback(&feedback, source);
    }

    if save || output.is_some() {
        let md = report::markdown::generate_report(
            &util::source_label(&audio_path),
            &metrics,
            &feedback,
            source,
        );
        let path = report::save_report(&md, output.as_deref())?;
        // Keep stdout clean for --json
        if json {
            eprintln!("Report saved to {}", path.display());
        } else {
            println!("\nReport saved to {}", style(path.display()).green());
        }
    }

    Ok(())
}
