use std::path::PathBuf;

use scenedoc::scene::{Registry, Result, encode_with};
use serde::Serialize;

use crate::cmd::util::{print_json, read_capture};

#[derive(clap::Args)]
pub struct Args {
	pub path: PathBuf,
	#[arg(long)]
	pub json: bool,
}

#[derive(Serialize)]
struct RoundtripJson {
	path: String,
	input_len: usize,
	output_len: usize,
	identical: bool,
	first_difference: Option<usize>,
}

/// Decode then re-encode; returns whether the bytes came back identical.
pub fn run(args: Args) -> Result<bool> {
	let Args { path, json } = args;
	let (input, document) = read_capture(&path)?;
	let output = encode_with(&document, &Registry::default())?;

	let first_difference = first_difference(&input, &output);
	let report = RoundtripJson {
		path: path.display().to_string(),
		input_len: input.len(),
		output_len: output.len(),
		identical: first_difference.is_none(),
		first_difference,
	};
	tracing::debug!(identical = report.identical, "roundtrip compared");

	if json {
		print_json(&report)?;
	} else {
		println!("path: {}", report.path);
		println!("input_len: {}", report.input_len);
		println!("output_len: {}", report.output_len);
		match report.first_difference {
			None => println!("identical: true"),
			Some(at) => {
				println!("identical: false");
				println!("first_difference: {at}");
			}
		}
	}

	Ok(report.identical)
}

fn first_difference(left: &[u8], right: &[u8]) -> Option<usize> {
	match left.iter().zip(right).position(|(a, b)| a != b) {
		Some(at) => Some(at),
		None if left.len() != right.len() => Some(left.len().min(right.len())),
		None => None,
	}
}
