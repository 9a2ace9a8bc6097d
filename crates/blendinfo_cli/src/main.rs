#![allow(missing_docs)]

use blendinfo::blend::{BlendError, DEFAULT_PAYLOAD_LIMIT, ErrorKind};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod cmd;

#[derive(Parser)]
#[command(name = "blendinfo", about = "Blender .blend header and block directory inspection")]
struct Cli {
	/// Refuse to load block payloads larger than this many bytes.
	#[arg(long = "max-payload", global = true, default_value_t = DEFAULT_PAYLOAD_LIMIT)]
	max_payload: u64,
	#[command(subcommand)]
	command: Commands,
}

#[derive(Subcommand)]
enum Commands {
	/// Print header fields, block statistics and named records.
	Info(cmd::info::Args),
	/// List block headers in file order.
	Blocks(cmd::blocks::Args),
	/// Print render-info scene frame ranges.
	Scenes(cmd::scenes::Args),
}

fn main() {
	init_tracing();
	if let Err(err) = run() {
		tracing::debug!(kind = err.kind().as_str(), "command failed");
		eprintln!("error: {}", describe(&err));
		std::process::exit(1);
	}
}

fn run() -> blendinfo::blend::Result<()> {
	let cli = Cli::parse();
	let options = cmd::Options {
		max_payload: cli.max_payload,
	};

	match cli.command {
		Commands::Info(args) => cmd::info::run(args, &options),
		Commands::Blocks(args) => cmd::blocks::run(args, &options),
		Commands::Scenes(args) => cmd::scenes::run(args, &options),
	}
}

fn init_tracing() {
	// RUST_LOG=blendinfo=trace shows every block header.
	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

	let _ = tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_target(true)
		.compact()
		.try_init();
}

fn describe(err: &BlendError) -> String {
	if let BlendError::InvalidBlockCode { .. } = err {
		return err.to_string();
	}

	match err.kind() {
		ErrorKind::Format | ErrorKind::UnsupportedVariant => format!("unsupported file: {err}"),
		ErrorKind::Truncated | ErrorKind::Corrupt => format!("corrupt or incomplete file: {err}"),
		ErrorKind::Io => err.to_string(),
	}
}
