use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use atgps::config::{AtGpsConfig, ByteLiteral};
use atgps::output::{OutputFormat, create_formatter};
use atgps::processing::FixProcessor;
use atgps::record::{Fix, GpsFix, TimeFix};
use atgps::source::{ByteSource, ReaderSource};

#[derive(Parser, Debug)]
#[command(name = "atgps")]
#[command(about = "Decode '@' GPS position records from a byte stream", long_about = None)]
struct Args {
    /// Input file or device (stdin when omitted)
    input: Option<PathBuf>,

    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output format: text, json, csv
    #[arg(short = 'f', long, value_enum)]
    format: Option<OutputFormat>,

    /// Add decimal degrees and receive time to text output
    #[arg(short = 'v', long)]
    verbose: bool,

    /// Read size in bytes
    #[arg(long)]
    chunk_size: Option<usize>,

    /// Record marker byte (e.g. "@", "0x40")
    #[arg(long)]
    marker: Option<ByteLiteral>,

    /// Missing-field sentinel byte (e.g. "_", "0x5f")
    #[arg(long)]
    sentinel: Option<ByteLiteral>,

    /// Record buffer capacity, marker included
    #[arg(long)]
    max_record_len: Option<usize>,

    /// Print decode statistics to stderr when input ends
    #[arg(long)]
    stats: bool,
}

fn build_config(args: &Args) -> anyhow::Result<AtGpsConfig> {
    let mut config = match args.config {
        Some(ref path) => AtGpsConfig::from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => AtGpsConfig::default(),
    };

    if let Some(format) = args.format {
        config.output.format = format;
    }
    if args.verbose {
        config.output.verbose = true;
    }
    if let Some(chunk_size) = args.chunk_size {
        config.input.chunk_size = chunk_size;
    }
    if let Some(marker) = args.marker {
        config.framing.marker = marker;
    }
    if let Some(sentinel) = args.sentinel {
        config.framing.sentinel = sentinel;
    }
    if let Some(len) = args.max_record_len {
        config.framing.max_record_len = len;
    }

    config.validate()?;
    Ok(config)
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = Args::parse();
    let config = build_config(&args)?;

    log::info!(
        "Framing: marker={} sentinel={} control<={} capacity={}",
        config.framing.marker,
        config.framing.sentinel,
        config.framing.control_threshold,
        config.framing.max_record_len
    );

    let mut source: Box<dyn ByteSource> = match args.input {
        Some(ref path) => {
            log::info!("Reading {}", path.display());
            Box::new(ReaderSource::open(path, config.input.chunk_size)?)
        }
        None => Box::new(ReaderSource::stdin(config.input.chunk_size)),
    };

    let formatter = create_formatter(config.output.format, config.output.verbose);
    if let Some(header) = formatter.header() {
        println!("{}", header);
    }

    let mut processor = FixProcessor::new(&config.framing)?;
    let mut print_fix = |time: &TimeFix, position: &GpsFix| {
        let fix = Fix {
            time: *time,
            position: *position,
        };
        println!("{}", formatter.format(&fix));
    };
    processor.run(source.as_mut(), &mut print_fix)?;

    if args.stats {
        let stats = processor.stats();
        eprintln!(
            "bytes: {}  records: {}  decoded: {}  malformed: {}  overflows: {}  transport errors: {}",
            stats.bytes,
            stats.records,
            stats.decoded,
            stats.malformed,
            stats.overflows,
            stats.transport_errors
        );
    }

    Ok(())
}
