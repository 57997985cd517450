use std::path::Path;

use scenedoc::scene::{NoImage, PayloadSplitter, PngSplitter, Registry, Result, SceneDocument, decode_with, tag};
use serde::Serialize;

/// Read and decode a capture, with or without a leading PNG.
pub(crate) fn read_capture(path: &Path) -> Result<(Vec<u8>, SceneDocument)> {
	let bytes = std::fs::read(path)?;
	tracing::debug!(path = %path.display(), len = bytes.len(), "read capture");

	let document = decode_with(&bytes, &Registry::default(), splitter_for(&bytes))?;
	tracing::debug!(
		image_len = document.image.len(),
		version = document.version.as_deref().unwrap_or("-"),
		objects = document.objects.len(),
		"decoded capture"
	);
	Ok((bytes, document))
}

fn splitter_for(bytes: &[u8]) -> &'static dyn PayloadSplitter {
	if bytes.starts_with(&PngSplitter::SIGNATURE) {
		return &PngSplitter;
	}
	&NoImage
}

/// Pretty-print a serializable value to stdout.
pub(crate) fn print_json<T: Serialize>(value: &T) -> Result<()> {
	let text = serde_json::to_string_pretty(value).map_err(std::io::Error::from)?;
	println!("{text}");
	Ok(())
}

/// Parse a tag given as a number or a kind label (`folder`, `item`, ...).
pub(crate) fn parse_tag(value: &str) -> std::result::Result<i32, String> {
	if let Ok(number) = value.parse::<i32>() {
		return Ok(number);
	}

	[tag::CHARACTER, tag::ITEM, tag::LIGHT, tag::FOLDER, tag::ROUTE, tag::CAMERA]
		.into_iter()
		.find(|candidate| tag::label(*candidate) == value)
		.ok_or_else(|| format!("unknown object kind `{value}`"))
}
