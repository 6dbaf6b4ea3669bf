//! Phonochunk CLI: turn pronunciation-scoring payloads into learner chunks.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};

use phonochunk_core::audio::io::read_wav;
use phonochunk_core::audio::slice::write_chunk_clips;
use phonochunk_core::feedback::analyze::analyze_sentence;
use phonochunk_core::feedback::payload::parse_words;
use phonochunk_core::language::canonicalize::canonicalize;
use phonochunk_core::{AnalysisCache, EngineConfig, RawWord};

// ─── Top-level CLI ───────────────────────────────────────────────

#[derive(Parser)]
#[command(
    name = "phonochunk",
    about = "Phoneme normalization, scoring and chunking for pronunciation feedback",
    version,
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Analyze provider payloads into scored chunks (JSON output)
    Analyze(AnalyzeArgs),
    /// Show the canonical form of phoneme symbols
    Canonicalize(CanonicalizeArgs),
    /// Write one WAV clip per chunk from the learner's recording
    Slice(SliceArgs),
}

// ─── Shared arguments (embedded in each subcommand) ──────────────

#[derive(Parser, Debug)]
struct EngineArgs {
    /// Engine config JSON file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seconds per provider time unit (overrides config)
    #[arg(long)]
    unit_scale: Option<f64>,

    /// Playback padding before each span, in ms (overrides config)
    #[arg(long)]
    pad_pre_ms: Option<f64>,

    /// Playback padding after each span, in ms (overrides config)
    #[arg(long)]
    pad_post_ms: Option<f64>,

    /// Show verbose output
    #[arg(short, long, default_value_t = false)]
    verbose: bool,
}

#[derive(Parser, Debug)]
struct AnalyzeArgs {
    /// Provider payload JSON files, one sentence each
    #[arg(required = true)]
    payloads: Vec<PathBuf>,

    /// Payload for the reference (coach) recording of the same text
    #[arg(long)]
    coach: Option<PathBuf>,

    /// Pretty-print JSON output
    #[arg(long, default_value_t = false)]
    pretty: bool,

    #[command(flatten)]
    engine: EngineArgs,
}

#[derive(Parser, Debug)]
struct CanonicalizeArgs {
    /// Raw symbols (IPA or ARPABET)
    #[arg(required = true)]
    symbols: Vec<String>,

    /// Show verbose output
    #[arg(short, long, default_value_t = false)]
    verbose: bool,
}

#[derive(Parser, Debug)]
struct SliceArgs {
    /// Provider payload JSON file
    payload: PathBuf,

    /// Learner recording the payload was scored from
    #[arg(long)]
    audio: PathBuf,

    /// Output directory for chunk clips
    #[arg(long, default_value = "./phonochunk-clips")]
    output_dir: PathBuf,

    #[command(flatten)]
    engine: EngineArgs,
}

// ─── Main ────────────────────────────────────────────────────────

fn main() {
    let cli = Cli::parse();

    // Init logging
    let log_level = match &cli.command {
        Command::Analyze(a) if a.engine.verbose => "debug",
        Command::Canonicalize(a) if a.verbose => "debug",
        Command::Slice(a) if a.engine.verbose => "debug",
        _ => "info",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .format_timestamp(None)
        .init();

    let result = match cli.command {
        Command::Analyze(args) => run_analyze(args),
        Command::Canonicalize(args) => run_canonicalize(args),
        Command::Slice(args) => run_slice(args),
    };

    if let Err(e) = result {
        log::error!("{:#}", e);
        std::process::exit(1);
    }
}

// ─── Helpers ─────────────────────────────────────────────────────

/// Engine config from `--config`, then flag overrides, validated.
fn build_config(args: &EngineArgs) -> Result<EngineConfig> {
    let mut config = match &args.config {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };
    if let Some(scale) = args.unit_scale {
        config.unit_to_seconds = scale;
    }
    if let Some(ms) = args.pad_pre_ms {
        config.padding.pre = ms / 1000.0;
    }
    if let Some(ms) = args.pad_post_ms {
        config.padding.post = ms / 1000.0;
    }
    config.validate()?;
    Ok(config)
}

fn load_payload(path: &Path) -> Result<Vec<RawWord>> {
    if !path.exists() {
        bail!("File not found: {}", path.display());
    }
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read payload: {}", path.display()))?;
    let words = parse_words(&text).with_context(|| format!("Invalid payload: {}", path.display()))?;
    log::debug!("Loaded {} words from {}", words.len(), path.display());
    Ok(words)
}

// ─── Runners ─────────────────────────────────────────────────────

fn run_analyze(args: AnalyzeArgs) -> Result<()> {
    let config = build_config(&args.engine)?;
    let coach = args.coach.as_deref().map(load_payload).transpose()?;

    let mut cache = AnalysisCache::new();
    for path in &args.payloads {
        let words = load_payload(path)?;
        if let Some(coach) = &coach {
            if coach.len() != words.len() {
                log::warn!(
                    "{}: {} words but coach has {}; unmatched words get no coach spans",
                    path.display(),
                    words.len(),
                    coach.len()
                );
            }
        }
        let sentence = cache.analyze_sentence(&words, coach.as_deref(), &config)?;
        let json = if args.pretty {
            serde_json::to_string_pretty(&sentence)?
        } else {
            serde_json::to_string(&sentence)?
        };
        println!("{}", json);
    }

    log::info!(
        "Analyzed {} payload(s): {} word analyses, {} cached",
        args.payloads.len(),
        cache.misses(),
        cache.hits()
    );
    Ok(())
}

fn run_canonicalize(args: CanonicalizeArgs) -> Result<()> {
    for raw in &args.symbols {
        println!("{}", describe_symbol(raw));
    }
    Ok(())
}

fn describe_symbol(raw: &str) -> String {
    let phone = canonicalize(raw);
    let class = if !phone.is_known() {
        "unknown"
    } else if phone.is_vowel() {
        "vowel"
    } else {
        "consonant"
    };
    format!("{} -> {} ({})", raw, phone, class)
}

fn run_slice(args: SliceArgs) -> Result<()> {
    let config = build_config(&args.engine)?;
    let words = load_payload(&args.payload)?;
    let sentence = analyze_sentence(&words, None, &config);

    let (samples, sr) = read_wav(&args.audio)?;
    log::info!(
        "Slicing {} ({:.2}s) into {}",
        args.audio.display(),
        samples.len() as f64 / sr as f64,
        args.output_dir.display()
    );

    let clips = write_chunk_clips(&sentence.words, &samples, sr, &config.padding, &args.output_dir)?;
    for clip in &clips {
        println!(
            "{:>7.3}-{:<7.3} {:<10} {}",
            clip.span.start,
            clip.span.end,
            clip.letters,
            clip.path.display()
        );
    }
    println!("Wrote {} clip(s) to {}", clips.len(), args.output_dir.display());
    Ok(())
}
