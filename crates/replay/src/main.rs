//! Vantage replay binary.
//!
//! Replays a recorded tracker trace through the artifact registrar and prints
//! the units registered in the project.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use vantage_registrar::RegistrarConfig;
use vantage_replay::{Replayer, Trace};

/// Replay command line arguments.
#[derive(Parser, Debug)]
#[command(name = "vantage-replay")]
#[command(about = "Replay a recorded resource/script trace through the artifact registrar")]
#[command(version)]
struct Args {
	/// Trace file (JSON)
	#[arg(value_name = "TRACE")]
	trace: PathBuf,

	/// Registrar configuration (TOML)
	#[arg(short, long, value_name = "PATH")]
	config: Option<PathBuf>,

	/// Print units as a JSON array
	#[arg(long)]
	json: bool,

	/// Verbose logging (repeat for more)
	#[arg(short, long, action = clap::ArgAction::Count)]
	verbose: u8,
}

fn main() -> anyhow::Result<()> {
	let args = Args::parse();

	setup_tracing(args.verbose);

	let config = match &args.config {
		Some(path) => RegistrarConfig::load(path)
			.with_context(|| format!("loading config {}", path.display()))?,
		None => RegistrarConfig::default(),
	};
	info!(?config, "registrar configuration");

	let trace = Trace::load(&args.trace)
		.with_context(|| format!("loading trace {}", args.trace.display()))?;

	let mut replayer = Replayer::new(config);
	replayer.replay(&trace).context("replaying trace")?;

	let units = replayer.units();
	if args.json {
		println!("{}", serde_json::to_string_pretty(&units)?);
	} else {
		for unit in &units {
			let mode = if unit.editable { "rw" } else { "ro" };
			println!("[{mode}] {}", unit.url);
		}
	}

	Ok(())
}

fn setup_tracing(verbose: u8) {
	use tracing_subscriber::EnvFilter;

	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match verbose {
		0 => EnvFilter::new("warn"),
		1 => EnvFilter::new("vantage_registrar=debug,info"),
		_ => EnvFilter::new("trace"),
	});

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.init();
}
