use crate::scene::{Result, SceneError};

/// Width of a length prefix in front of a byte string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LenPrefix {
	/// One unsigned byte. Only the document version uses this form.
	U8,
	/// Four-byte little-endian count.
	U32,
}

impl LenPrefix {
	/// Prefix width in bytes.
	pub fn width(self) -> usize {
		match self {
			Self::U8 => 1,
			Self::U32 => 4,
		}
	}
}

/// Simple bounded cursor over an immutable byte slice.
pub struct Cursor<'a> {
	bytes: &'a [u8],
	pos: usize,
}

impl<'a> Cursor<'a> {
	/// Create a cursor at position 0.
	pub fn new(bytes: &'a [u8]) -> Self {
		Self { bytes, pos: 0 }
	}

	/// Return current byte offset.
	pub fn pos(&self) -> usize {
		self.pos
	}

	/// Return remaining unread bytes.
	pub fn remaining(&self) -> usize {
		self.bytes.len().saturating_sub(self.pos)
	}

	/// Borrow the unread tail without advancing.
	pub fn rest(&self) -> &'a [u8] {
		&self.bytes[self.pos.min(self.bytes.len())..]
	}

	/// Read exactly `n` bytes and advance cursor.
	pub fn read_exact(&mut self, n: usize) -> Result<&'a [u8]> {
		if n > self.remaining() {
			return Err(SceneError::MalformedInput {
				at: self.pos,
				need: n,
				rem: self.remaining(),
			});
		}

		let start = self.pos;
		self.pos += n;
		Ok(&self.bytes[start..self.pos])
	}

	/// Read a fixed-size opaque span.
	pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
		let raw = self.read_exact(N)?;
		let mut out = [0_u8; N];
		out.copy_from_slice(raw);
		Ok(out)
	}

	/// Consume every remaining byte.
	pub fn read_rest(&mut self) -> &'a [u8] {
		let rest = self.rest();
		self.pos = self.bytes.len();
		rest
	}

	/// Read a little-endian `i32`.
	pub fn read_i32_le(&mut self) -> Result<i32> {
		Ok(i32::from_le_bytes(self.read_array()?))
	}

	/// Read a little-endian IEEE-754 `f32`.
	pub fn read_f32_le(&mut self) -> Result<f32> {
		Ok(f32::from_le_bytes(self.read_array()?))
	}

	/// Read a one-byte boolean; any nonzero byte is `true`.
	pub fn read_bool(&mut self) -> Result<bool> {
		Ok(self.read_array::<1>()?[0] != 0)
	}

	/// Read a 4-byte count and reject negative values.
	pub fn read_count(&mut self) -> Result<usize> {
		let at = self.pos;
		let value = self.read_i32_le()?;
		usize::try_from(value).map_err(|_| SceneError::NegativeLength { at, value })
	}

	/// Read a byte string behind a length prefix.
	pub fn read_prefixed_bytes(&mut self, prefix: LenPrefix) -> Result<&'a [u8]> {
		let len = match prefix {
			LenPrefix::U8 => usize::from(self.read_array::<1>()?[0]),
			LenPrefix::U32 => self.read_count()?,
		};
		self.read_exact(len)
	}

	/// Read a length-prefixed UTF-8 string.
	pub fn read_utf8(&mut self, prefix: LenPrefix) -> Result<&'a str> {
		let raw = self.read_prefixed_bytes(prefix)?;
		let at = self.pos - raw.len();
		std::str::from_utf8(raw).map_err(|_| SceneError::Encoding { at })
	}

	/// Read a 4-byte-prefixed UTF-8 string into an owned value.
	pub fn read_string(&mut self) -> Result<String> {
		self.read_utf8(LenPrefix::U32).map(str::to_owned)
	}
}

/// Growable little-endian output buffer mirroring [`Cursor`].
#[derive(Debug, Default)]
pub struct Writer {
	buf: Vec<u8>,
}

impl Writer {
	/// Create an empty writer.
	pub fn new() -> Self {
		Self::default()
	}

	/// Number of bytes written so far.
	pub fn len(&self) -> usize {
		self.buf.len()
	}

	/// Return true when nothing has been written.
	pub fn is_empty(&self) -> bool {
		self.buf.is_empty()
	}

	/// Consume the writer and return its bytes.
	pub fn into_bytes(self) -> Vec<u8> {
		self.buf
	}

	/// Append raw bytes verbatim.
	pub fn write_bytes(&mut self, bytes: &[u8]) {
		self.buf.extend_from_slice(bytes);
	}

	/// Append a little-endian `i32`.
	pub fn write_i32_le(&mut self, value: i32) {
		self.buf.extend_from_slice(&value.to_le_bytes());
	}

	/// Append a little-endian IEEE-754 `f32`.
	pub fn write_f32_le(&mut self, value: f32) {
		self.buf.extend_from_slice(&value.to_le_bytes());
	}

	/// Append a canonical boolean byte (`0` or `1`).
	pub fn write_bool(&mut self, value: bool) {
		self.buf.push(u8::from(value));
	}

	/// Append a collection length as a 4-byte count.
	pub fn write_count(&mut self, len: usize) -> Result<()> {
		let value = i32::try_from(len).map_err(|_| SceneError::StringTooLong { len, width: 4 })?;
		self.write_i32_le(value);
		Ok(())
	}

	/// Append a byte string behind a length prefix.
	pub fn write_prefixed_bytes(&mut self, prefix: LenPrefix, bytes: &[u8]) -> Result<()> {
		match prefix {
			LenPrefix::U8 => {
				let len = u8::try_from(bytes.len()).map_err(|_| SceneError::StringTooLong {
					len: bytes.len(),
					width: prefix.width(),
				})?;
				self.buf.push(len);
			}
			LenPrefix::U32 => self.write_count(bytes.len())?,
		}
		self.write_bytes(bytes);
		Ok(())
	}

	/// Append a length-prefixed UTF-8 string.
	pub fn write_utf8(&mut self, prefix: LenPrefix, value: &str) -> Result<()> {
		self.write_prefixed_bytes(prefix, value.as_bytes())
	}

	/// Append a 4-byte-prefixed UTF-8 string.
	pub fn write_string(&mut self, value: &str) -> Result<()> {
		self.write_utf8(LenPrefix::U32, value)
	}
}
