use std::collections::BTreeMap;
use std::path::PathBuf;

use scenedoc::scene::{Result, WalkOptions, max_depth, tag, walk};
use serde::Serialize;

use crate::cmd::util::{print_json, read_capture};

#[derive(clap::Args)]
pub struct Args {
	pub path: PathBuf,
	#[arg(long)]
	pub json: bool,
}

#[derive(Serialize)]
struct InfoJson<'a> {
	path: String,
	file_len: usize,
	image_len: usize,
	version: Option<&'a str>,
	user_id: &'a str,
	data_id: &'a str,
	title: &'a str,
	top_level: usize,
	object_count: usize,
	max_depth: Option<usize>,
	tail_len: usize,
	kinds: BTreeMap<&'static str, usize>,
}

/// Print header fields and per-kind object counts.
pub fn run(args: Args) -> Result<()> {
	let Args { path, json } = args;
	let (bytes, document) = read_capture(&path)?;

	let mut kinds = BTreeMap::new();
	for entry in walk(&document, &WalkOptions::default()) {
		*kinds.entry(tag::label(entry.object.tag())).or_insert(0) += 1;
	}

	let info = InfoJson {
		path: path.display().to_string(),
		file_len: bytes.len(),
		image_len: document.image.len(),
		version: document.version.as_deref(),
		user_id: &document.user_id,
		data_id: &document.data_id,
		title: &document.title,
		top_level: document.objects.len(),
		object_count: kinds.values().sum(),
		max_depth: max_depth(&document),
		tail_len: document.tail.len(),
		kinds,
	};

	if json {
		return print_json(&info);
	}

	println!("path: {}", info.path);
	println!("file_len: {}", info.file_len);
	println!("image_len: {}", info.image_len);
	println!("version: {}", info.version.unwrap_or("-"));
	println!("user_id: {}", info.user_id);
	println!("data_id: {}", info.data_id);
	println!("title: {}", info.title);
	println!("top_level: {}", info.top_level);
	println!("object_count: {}", info.object_count);
	match info.max_depth {
		Some(depth) => println!("max_depth: {depth}"),
		None => println!("max_depth: -"),
	}
	println!("tail_len: {}", info.tail_len);
	println!("kinds:");
	for (kind, count) in &info.kinds {
		println!("  {kind}: {count}");
	}

	Ok(())
}
