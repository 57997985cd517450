#![allow(missing_docs)]

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod cmd;

#[derive(Parser)]
#[command(name = "scenedoc", about = "Scene capture inspection and round-trip tools")]
struct Cli {
	#[command(subcommand)]
	command: Commands,
}

#[derive(Subcommand)]
enum Commands {
	/// Print header fields and object statistics.
	Info(cmd::info::Args),
	/// List objects in depth-first order.
	Walk(cmd::walk::Args),
	/// Print the decoded document as JSON.
	Dump(cmd::dump::Args),
	/// Decode and re-encode, reporting whether the bytes survive.
	Roundtrip(cmd::roundtrip::Args),
	/// Write the default one-folder capture.
	Template(cmd::template::Args),
}

/// Exit status for any decode, encode, or IO error.
const EXIT_ERROR: u8 = 1;
/// Exit status for a `roundtrip` whose output differs from its input.
const EXIT_MISMATCH: u8 = 2;

fn main() -> ExitCode {
	tracing_subscriber::fmt()
		.with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
		.with_writer(std::io::stderr)
		.init();

	match run() {
		Ok(code) => code,
		Err(err) => {
			eprintln!("error: {err}");
			ExitCode::from(EXIT_ERROR)
		}
	}
}

fn run() -> scenedoc::scene::Result<ExitCode> {
	let cli = Cli::parse();

	match cli.command {
		Commands::Info(args) => cmd::info::run(args).map(|()| ExitCode::SUCCESS),
		Commands::Walk(args) => cmd::walk::run(args).map(|()| ExitCode::SUCCESS),
		Commands::Dump(args) => cmd::dump::run(args).map(|()| ExitCode::SUCCESS),
		Commands::Roundtrip(args) => {
			let identical = cmd::roundtrip::run(args)?;
			Ok(if identical { ExitCode::SUCCESS } else { ExitCode::from(EXIT_MISMATCH) })
		}
		Commands::Template(args) => cmd::template::run(args).map(|()| ExitCode::SUCCESS),
	}
}
