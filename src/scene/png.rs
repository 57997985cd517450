use crate::scene::{Result, SceneError};

/// Separates the leading preview image from the scene payload.
pub trait PayloadSplitter {
	/// Return `(image, payload)` slices of `bytes`.
	fn split<'a>(&self, bytes: &'a [u8]) -> Result<(&'a [u8], &'a [u8])>;
}

/// Splitter for captures without a leading image.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoImage;

impl PayloadSplitter for NoImage {
	fn split<'a>(&self, bytes: &'a [u8]) -> Result<(&'a [u8], &'a [u8])> {
		Ok((&[], bytes))
	}
}

/// Splits after the `IEND` chunk of a leading PNG stream.
#[derive(Debug, Clone, Copy, Default)]
pub struct PngSplitter;

impl PngSplitter {
	/// PNG file signature.
	pub const SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1a, b'\n'];

	/// Byte length of the PNG stream at the start of `bytes`, through `IEND`.
	pub fn image_len(bytes: &[u8]) -> Result<usize> {
		if !bytes.starts_with(&Self::SIGNATURE) {
			return Err(SceneError::MissingImage);
		}

		let mut pos = Self::SIGNATURE.len();
		loop {
			let header = bytes.get(pos..pos + 8).ok_or(SceneError::MissingImage)?;
			let len = u32::from_be_bytes([header[0], header[1], header[2], header[3]]) as usize;
			let kind = &header[4..8];

			// length + type + data + crc
			let end = pos
				.checked_add(12)
				.and_then(|value| value.checked_add(len))
				.ok_or(SceneError::MissingImage)?;
			if end > bytes.len() {
				return Err(SceneError::MissingImage);
			}
			pos = end;

			if kind == b"IEND" {
				return Ok(pos);
			}
		}
	}
}

impl PayloadSplitter for PngSplitter {
	fn split<'a>(&self, bytes: &'a [u8]) -> Result<(&'a [u8], &'a [u8])> {
		let len = Self::image_len(bytes)?;
		Ok(bytes.split_at(len))
	}
}
