use anyhow::{Context, Result};
use atgps::simulation::{
    ControlNoiseConfig, MissingFieldConfig, StreamNoiseConfig, TruncationConfig,
    generate_random_stream,
};
use clap::Parser;
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "generate_stream")]
#[command(about = "Generate synthetic '@' record streams with configurable noise")]
struct Args {
    /// TOML noise configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output directory
    #[arg(short, long, default_value = "data/synthetic")]
    output_dir: PathBuf,

    /// Number of streams to write
    #[arg(short, long, default_value_t = 1)]
    trials: u32,

    /// Records per stream
    #[arg(short, long, default_value_t = 100)]
    records: usize,

    /// Base seed for reproducibility
    #[arg(short, long)]
    seed: Option<u64>,

    /// Output filename prefix
    #[arg(long, default_value = "synth")]
    prefix: String,

    /// Generate manifest.json
    #[arg(long)]
    manifest: bool,

    /// Mean bytes between control-byte runs (CLI override)
    #[arg(long)]
    control_gap: Option<f64>,

    /// Per-field missing probability (CLI override)
    #[arg(long)]
    missing: Option<f64>,

    /// Per-record truncation probability (CLI override)
    #[arg(long)]
    truncation: Option<f64>,
}

#[derive(Debug, Deserialize, Default)]
struct TomlConfig {
    leading_garbage: Option<usize>,
    control: Option<ControlSection>,
    missing: Option<ProbabilitySection>,
    truncation: Option<ProbabilitySection>,
}

#[derive(Debug, Deserialize)]
struct ControlSection {
    mean_gap: f64,
    max_run: Option<usize>,
}

#[derive(Debug, Deserialize)]
struct ProbabilitySection {
    probability: f64,
}

#[derive(Debug, serde::Serialize)]
struct ManifestEntry {
    file: String,
    trial: u32,
    seed: u64,
    records: usize,
    truncated: usize,
    bytes: usize,
}

#[derive(Debug, serde::Serialize)]
struct Manifest {
    records_per_stream: usize,
    files: Vec<ManifestEntry>,
}

fn load_toml_config(path: &PathBuf) -> Result<TomlConfig> {
    let content = fs::read_to_string(path).context("Failed to read config file")?;
    toml::from_str(&content).context("Failed to parse config file")
}

fn build_noise_config(toml: &TomlConfig, args: &Args, seed: u64) -> StreamNoiseConfig {
    let mut config = StreamNoiseConfig::default().with_seed(seed);
    config.leading_garbage = toml.leading_garbage.unwrap_or(0);

    if let Some(gap) = args.control_gap {
        config.control = Some(ControlNoiseConfig {
            mean_gap: gap,
            max_run: 3,
        });
    } else if let Some(ref control) = toml.control {
        config.control = Some(ControlNoiseConfig {
            mean_gap: control.mean_gap,
            max_run: control.max_run.unwrap_or(3),
        });
    }

    if let Some(p) = args.missing.or(toml.missing.as_ref().map(|m| m.probability)) {
        config.missing = Some(MissingFieldConfig { probability: p });
    }

    if let Some(p) = args
        .truncation
        .or(toml.truncation.as_ref().map(|t| t.probability))
    {
        config.truncation = Some(TruncationConfig { probability: p });
    }

    config
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    fs::create_dir_all(&args.output_dir).context("Failed to create output directory")?;

    let toml_config = if let Some(ref config_path) = args.config {
        load_toml_config(config_path)?
    } else {
        TomlConfig::default()
    };

    let base_seed = args.seed.unwrap_or(0);
    let mut manifest_entries = Vec::new();

    for trial in 0..args.trials {
        let seed = base_seed + trial as u64 * 1000;
        let noise_config = build_noise_config(&toml_config, &args, seed);
        let stream = generate_random_stream(args.records, &noise_config);

        let filename = format!("{}_t{:02}.bin", args.prefix, trial);
        let filepath = args.output_dir.join(&filename);
        fs::write(&filepath, &stream.bytes)
            .with_context(|| format!("Failed to write {}", filepath.display()))?;

        log::debug!(
            "Wrote {} ({} bytes, {} truncated records)",
            filename,
            stream.bytes.len(),
            stream.truncated_count()
        );

        manifest_entries.push(ManifestEntry {
            file: filename,
            trial,
            seed,
            records: stream.records.len(),
            truncated: stream.truncated_count(),
            bytes: stream.bytes.len(),
        });

        eprint!("\rGenerating: {}/{}", trial + 1, args.trials);
    }
    eprintln!();

    if args.manifest {
        let manifest = Manifest {
            records_per_stream: args.records,
            files: manifest_entries,
        };
        let manifest_path = args.output_dir.join("manifest.json");
        let manifest_json =
            serde_json::to_string_pretty(&manifest).context("Failed to serialize manifest")?;
        fs::write(&manifest_path, manifest_json).context("Failed to write manifest")?;
        eprintln!("Manifest written to: {}", manifest_path.display());
    }

    eprintln!(
        "Generated {} streams in {}",
        args.trials,
        args.output_dir.display()
    );
    Ok(())
}
