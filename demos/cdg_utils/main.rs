//! CD+G stream utility.
//!
//! Provides five subcommands:
//! - `info`: summarize a `.cdg` stream (length, duration, instruction histogram).
//! - `dump`: print packets as hex, one frame per line.
//! - `render`: replay a stream up to a point in time and save the screen as PNG or BMP.
//! - `repair`: validate and repair tile blocks, then save the patched stream.
//! - `encode`: turn a 300x216 image into a stream that draws it.
//!
//! # Usage
//!
//! ```bash
//! cargo run --example cdg_utils info track.cdg
//! cargo run --example cdg_utils dump track.cdg --start 300 --count 20
//! cargo run --example cdg_utils render track.cdg frame.png --at 42.5
//! cargo run --example cdg_utils repair track.cdg fixed.cdg --config repair.toml --json report.json
//! cargo run --example cdg_utils encode title.png title.cdg
//! ```
//!
//! Repair settings are read from an optional TOML file and `CDG_` prefixed
//! environment variables, for example `CDG_REPAIR__SEARCH_LIMIT=200`:
//!
//! ```toml
//! [repair]
//! search_limit = 1000
//! repair_on_color = false
//!
//! [rules]
//! primary = [1]
//! highlight = [10]
//! background = [0]
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result, bail};
use cdg_rs::prelude::*;
use clap::{Args, Parser, Subcommand};
use serde::Deserialize;

fn main() -> Result<()> {
	env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

	let cli = Cli::parse();
	match cli.command {
		Command::Info(args) => run_info(args),
		Command::Dump(args) => run_dump(args),
		Command::Render(args) => run_render(args),
		Command::Repair(args) => run_repair(args),
		Command::Encode(args) => run_encode(args),
	}
}

#[derive(Parser)]
#[command(name = "cdg_utils")]
#[command(author = "cdg-rs project")]
#[command(version)]
#[command(about = "Inspect, render, repair and encode CD+G karaoke streams", long_about = None)]
struct Cli {
	#[command(subcommand)]
	command: Command,
}

#[derive(Subcommand)]
enum Command {
	/// Summarize a .cdg stream
	Info(InfoArgs),
	/// Print packets as hex
	Dump(DumpArgs),
	/// Render the screen at a point in time
	Render(RenderArgs),
	/// Validate and repair tile blocks
	Repair(RepairArgs),
	/// Encode a 300x216 image into a .cdg stream
	Encode(EncodeArgs),
}

#[derive(Args)]
struct InfoArgs {
	/// Input .cdg file
	#[arg(value_name = "INPUT_CDG")]
	input: PathBuf,
}

#[derive(Args)]
struct DumpArgs {
	/// Input .cdg file
	#[arg(value_name = "INPUT_CDG")]
	input: PathBuf,

	/// First packet to print
	#[arg(short, long, default_value_t = 0)]
	start: usize,

	/// Number of packets to print
	#[arg(short, long, default_value_t = 32)]
	count: usize,

	/// Skip timing packets
	#[arg(long, default_value_t = false)]
	skip_timing: bool,
}

#[derive(Args)]
struct RenderArgs {
	/// Input .cdg file
	#[arg(value_name = "INPUT_CDG")]
	input: PathBuf,

	/// Output image (.png or .bmp)
	#[arg(value_name = "OUTPUT_IMAGE")]
	output: PathBuf,

	/// Playback time in seconds; renders the whole stream when omitted
	#[arg(short, long, value_name = "SECONDS")]
	at: Option<f64>,

	/// Repair the stream before rendering
	#[arg(short, long, default_value_t = false)]
	repair: bool,

	/// Repair settings file (TOML)
	#[arg(long, value_name = "FILE")]
	config: Option<PathBuf>,
}

#[derive(Args)]
struct RepairArgs {
	/// Input .cdg file
	#[arg(value_name = "INPUT_CDG")]
	input: PathBuf,

	/// Output .cdg file; the stream is only validated when omitted
	#[arg(value_name = "OUTPUT_CDG")]
	output: Option<PathBuf>,

	/// Repair settings file (TOML)
	#[arg(long, value_name = "FILE")]
	config: Option<PathBuf>,

	/// Write every diagnostic to a JSON file
	#[arg(long, value_name = "FILE")]
	json: Option<PathBuf>,

	/// Print every diagnostic, not only unresolved ones
	#[arg(short, long, default_value_t = false)]
	verbose: bool,
}

#[derive(Args)]
struct EncodeArgs {
	/// Input image, exactly 300x216
	#[arg(value_name = "INPUT_IMAGE")]
	input: PathBuf,

	/// Output .cdg file
	#[arg(value_name = "OUTPUT_CDG")]
	output: PathBuf,

	/// Render the encoded stream back to this image for comparison
	#[arg(long, value_name = "FILE")]
	preview: Option<PathBuf>,
}

/// Settings accepted by `--config`.
#[derive(Debug, Default, Deserialize)]
struct ToolConfig {
	#[serde(default)]
	repair: RepairConfig,
	#[serde(default)]
	rules: Rules,
}

fn load_config(path: Option<&Path>) -> Result<ToolConfig> {
	let mut builder = config::Config::builder();
	if let Some(path) = path {
		builder = builder.add_source(config::File::from(path));
	}
	let settings = builder
		.add_source(
			config::Environment::with_prefix("CDG")
				.prefix_separator("_")
				.separator("__")
				.try_parsing(true),
		)
		.build()
		.context("Failed to read repair settings")?;

	let tool: ToolConfig = settings.try_deserialize().context("Invalid repair settings")?;
	tool.rules.check_disjoint()?;
	log::debug!("repair settings: {tool:?}");
	Ok(tool)
}

fn open_stream(path: &Path) -> Result<PacketSequence> {
	PacketSequence::open(path).map_err(|e| {
		let context = if e.is_io() {
			format!("Failed to read {}", path.display())
		} else {
			format!("{} is not a usable CD+G stream", path.display())
		};
		anyhow::Error::new(e).context(context)
	})
}

fn format_duration(duration: Duration) -> String {
	let total = duration.as_secs_f64();
	let minutes = (total / 60.0).floor();
	format!("{:02}:{:06.3}", minutes as u64, total - minutes * 60.0)
}

fn run_info(args: InfoArgs) -> Result<()> {
	let sequence = open_stream(&args.input)?;

	let mut histogram: BTreeMap<Instruction, usize> = BTreeMap::new();
	for packet in &sequence {
		*histogram.entry(packet.instruction()).or_default() += 1;
	}

	println!("File:     {}", args.input.display());
	println!("Packets:  {}", sequence.len());
	println!("Duration: {}", format_duration(sequence.duration()));
	println!();
	println!("{:<22} {:>5} {:>10}", "Instruction", "Code", "Count");
	for (instruction, count) in &histogram {
		println!("{:<22} {:>5} {:>10}", instruction.to_string(), instruction.code(), count);
	}

	let mut renderer = Renderer::new();
	let rejected = renderer.apply_all(&sequence);
	if rejected > 0 {
		println!();
		println!("{rejected} tile blocks are out of range and would not be drawn");
	}

	Ok(())
}

fn run_dump(args: DumpArgs) -> Result<()> {
	let sequence = open_stream(&args.input)?;
	if args.start >= sequence.len() {
		bail!("Start packet {} is past the end of the stream ({} packets)", args.start, sequence.len());
	}

	let packets = sequence
		.iter()
		.skip(args.start)
		.filter(|packet| !args.skip_timing || packet.instruction() != Instruction::Timing)
		.take(args.count);

	for packet in packets {
		let index = packet.index().unwrap_or_default();
		println!(
			"{index:>8} {} {:<22} {}",
			format_duration(packet.position()),
			packet.instruction().to_string(),
			hex::encode(packet.raw())
		);
	}

	Ok(())
}

/// Converts a `--at` value, rejecting negative, non-finite and overflowing times.
fn playback_time(seconds: f64) -> Result<Duration> {
	match Duration::try_from_secs_f64(seconds) {
		Ok(time) => Ok(time),
		Err(_) => bail!("Invalid playback time {seconds}"),
	}
}

fn run_render(args: RenderArgs) -> Result<()> {
	let mut sequence = open_stream(&args.input)?;

	if args.repair {
		let tool = load_config(args.config.as_deref())?;
		let results = repair(&mut sequence, &tool.rules, &tool.repair);
		log::info!("repair produced {} diagnostics", results.len());
	}

	let end = match args.at {
		Some(seconds) => {
			sequence
				.packet_index_at(playback_time(seconds)?)
				.with_context(|| format!("{seconds}s is past the end of the stream"))?
				+ 1
		}
		None => sequence.len(),
	};

	let mut renderer = Renderer::new();
	for packet in sequence.iter().take(end) {
		renderer.apply(packet);
	}

	renderer
		.render()
		.to_rgb_image()
		.save(&args.output)
		.with_context(|| format!("Failed to save {}", args.output.display()))?;

	println!("✓ Rendered {} packets of {} -> {}", end, args.input.display(), args.output.display());
	Ok(())
}

fn run_repair(args: RepairArgs) -> Result<()> {
	let tool = load_config(args.config.as_deref())?;
	let mut sequence = open_stream(&args.input)?;
	let results = repair(&mut sequence, &tool.rules, &tool.repair);

	let count = |kind| results.iter().filter(|r| r.kind == kind).count();
	println!("Validated {} packets of {}", sequence.len(), args.input.display());
	println!("   Invalid:    {}", count(ValidationKind::Invalid));
	println!("   Repaired:   {}", count(ValidationKind::Repaired));
	println!("   Unresolved: {}", count(ValidationKind::Unresolved));

	for result in &results {
		if args.verbose || result.kind == ValidationKind::Unresolved {
			println!("   {result}");
		}
	}

	if let Some(json) = &args.json {
		fs::write(json, serde_json::to_string_pretty(&results)?)
			.with_context(|| format!("Failed to write {}", json.display()))?;
		println!("✓ Diagnostics written to {}", json.display());
	}

	if let Some(output) = &args.output {
		sequence.save(output).with_context(|| format!("Failed to save {}", output.display()))?;
		println!("✓ Repaired stream written to {}", output.display());
	}

	Ok(())
}

fn run_encode(args: EncodeArgs) -> Result<()> {
	let image = image::open(&args.input)
		.with_context(|| format!("Failed to open {}", args.input.display()))?
		.to_rgb8();

	let sequence = synthesize(&image, &PassthroughQuantizer)?;
	sequence.save(&args.output).with_context(|| format!("Failed to save {}", args.output.display()))?;
	println!(
		"✓ Encoded {} -> {} ({} packets, {})",
		args.input.display(),
		args.output.display(),
		sequence.len(),
		format_duration(sequence.duration())
	);

	if let Some(preview) = &args.preview {
		let mut renderer = Renderer::new();
		renderer.apply_all(&sequence);
		renderer.render().to_rgb_image().save(preview)?;
		println!("✓ Preview written to {}", preview.display());
	}

	Ok(())
}
