use std::path::PathBuf;

use scenedoc::scene::{PngSplitter, Result, SceneDocument, SceneError, encode};

#[derive(clap::Args)]
pub struct Args {
	pub out: PathBuf,
	/// PNG written in front of the payload.
	#[arg(long)]
	pub image: Option<PathBuf>,
}

/// Write the default capture, optionally behind a preview image.
pub fn run(args: Args) -> Result<()> {
	let Args { out, image } = args;

	let mut document = SceneDocument::template();
	if let Some(image) = image {
		let bytes = std::fs::read(&image)?;
		if PngSplitter::image_len(&bytes)? != bytes.len() {
			return Err(SceneError::MissingImage);
		}
		document.image = bytes;
	}

	let bytes = encode(&document)?;
	std::fs::write(&out, &bytes)?;
	tracing::debug!(path = %out.display(), len = bytes.len(), "wrote template");

	println!("wrote: {}", out.display());
	println!("len: {}", bytes.len());
	Ok(())
}
