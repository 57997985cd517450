use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::scene::bytes::{Cursor, Writer};
use crate::scene::{Result, SceneError};

/// RGBA color stored as a JSON object (`{"r":..,"g":..,"b":..,"a":..}`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
	/// Red channel.
	pub r: f32,
	/// Green channel.
	pub g: f32,
	/// Blue channel.
	pub b: f32,
	/// Alpha channel.
	pub a: f32,
}

impl Color {
	/// Opaque white, the engine default for unset color slots.
	pub const WHITE: Self = Self::rgba(1.0, 1.0, 1.0, 1.0);

	/// Build a color from channels.
	pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
		Self { r, g, b, a }
	}
}

/// Four-component vector stored as a JSON object (`{"x":..,"y":..,"z":..,"w":..}`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vec4 {
	/// X component.
	pub x: f32,
	/// Y component.
	pub y: f32,
	/// Z component.
	pub z: f32,
	/// W component.
	pub w: f32,
}

impl Vec4 {
	/// Full UV rect (`0,0,1,1`).
	pub const UNIT_RECT: Self = Self { x: 0.0, y: 0.0, z: 1.0, w: 1.0 };
}

/// Typed JSON sub-record that remembers the text it was decoded from.
///
/// The engine and serde_json do not format floats identically, so the
/// source text is re-emitted while `value` still matches it. Equality
/// ignores the source text.
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct JsonField<T> {
	/// Typed record value.
	pub value: T,
	#[serde(skip)]
	source: Option<Box<str>>,
}

impl<T> JsonField<T> {
	/// Wrap a value built in memory.
	pub fn new(value: T) -> Self {
		Self { value, source: None }
	}

	/// Source text seen at decode time, if any.
	pub fn source(&self) -> Option<&str> {
		self.source.as_deref()
	}
}

impl<T: PartialEq> PartialEq for JsonField<T> {
	fn eq(&self, other: &Self) -> bool {
		self.value == other.value
	}
}

impl<T> From<T> for JsonField<T> {
	fn from(value: T) -> Self {
		Self::new(value)
	}
}

impl<T: Serialize + DeserializeOwned + PartialEq> JsonField<T> {
	/// Parse a record from its JSON text.
	pub fn parse(text: &str, at: usize) -> Result<Self> {
		let value = serde_json::from_str(text).map_err(|source| SceneError::Json { at, source })?;
		Ok(Self {
			value,
			source: Some(text.into()),
		})
	}

	/// Read a 4-byte-prefixed JSON record.
	pub fn read(cursor: &mut Cursor<'_>) -> Result<Self> {
		let text = cursor.read_string()?;
		Self::parse(&text, cursor.pos() - text.len())
	}

	/// Render the JSON text to write, preferring unchanged source text.
	pub fn to_text(&self, at: usize) -> Result<String> {
		if let Some(source) = &self.source {
			let unchanged = serde_json::from_str::<T>(source).is_ok_and(|parsed| parsed == self.value);
			if unchanged {
				return Ok(source.to_string());
			}
		}
		serde_json::to_string(&self.value).map_err(|source| SceneError::Json { at, source })
	}

	/// Write the record as a 4-byte-prefixed JSON string.
	pub fn write(&self, writer: &mut Writer) -> Result<()> {
		let text = self.to_text(writer.len())?;
		writer.write_string(&text)
	}
}
