use std::path::PathBuf;

use scenedoc::scene::{Object, Result, WalkOptions, tag, walk};
use serde::Serialize;

use crate::cmd::util::{parse_tag, print_json, read_capture};

#[derive(clap::Args)]
pub struct Args {
	pub path: PathBuf,
	/// Keep only this kind (number or label such as `folder`).
	#[arg(long = "type", value_parser = parse_tag)]
	pub type_filter: Option<i32>,
	#[arg(long)]
	pub json: bool,
}

#[derive(Serialize)]
struct WalkRow {
	key: i32,
	depth: usize,
	tag: i32,
	kind: &'static str,
	label: String,
}

#[derive(Serialize)]
struct WalkJson {
	path: String,
	type_filter: Option<i32>,
	rows: Vec<WalkRow>,
}

/// List visited objects in pre-order.
pub fn run(args: Args) -> Result<()> {
	let Args { path, type_filter, json } = args;
	let (_, document) = read_capture(&path)?;

	let options = WalkOptions {
		include_depth: true,
		type_filter,
	};
	let rows: Vec<_> = walk(&document, &options)
		.map(|entry| WalkRow {
			key: entry.key,
			depth: entry.depth.unwrap_or(0),
			tag: entry.object.tag(),
			kind: tag::label(entry.object.tag()),
			label: object_label(entry.object),
		})
		.collect();
	tracing::debug!(rows = rows.len(), "walk finished");

	if json {
		return print_json(&WalkJson {
			path: path.display().to_string(),
			type_filter,
			rows,
		});
	}

	println!("path: {}", path.display());
	println!("objects: {}", rows.len());
	println!("key\tdepth\tkind\tlabel");
	for row in &rows {
		println!("{}\t{}\t{}\t{}{}", row.key, row.depth, row.kind, "  ".repeat(row.depth), row.label);
	}

	Ok(())
}

fn object_label(object: &Object) -> String {
	match object {
		Object::Folder(folder) => folder.name.clone(),
		Object::Item(item) => format!("{}/{}/{}", item.group, item.category, item.no),
		Object::Opaque { raw, .. } => format!("{} bytes", raw.len()),
	}
}
