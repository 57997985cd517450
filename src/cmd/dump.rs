use std::path::PathBuf;

use scenedoc::scene::Result;

use crate::cmd::util::{print_json, read_capture};

#[derive(clap::Args)]
pub struct Args {
	pub path: PathBuf,
}

/// Print the whole decoded document as JSON.
pub fn run(args: Args) -> Result<()> {
	let (_, document) = read_capture(&args.path)?;
	print_json(&document)
}
