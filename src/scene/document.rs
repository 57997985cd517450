use indexmap::IndexMap;
use serde::Serialize;

use crate::scene::bytes::{Cursor, LenPrefix, Writer};
use crate::scene::{FolderData, ItemData, Object, PayloadSplitter, PngSplitter, Registry, Result, SchemaVersion, Transform, walk};

/// Size of the opaque span that follows the reserved header integers.
pub const HEADER_SPAN_LEN: usize = 32;

/// Decoded scene capture.
///
/// Objects nest at most [`MAX_DEPTH`](crate::scene::MAX_DEPTH) levels below
/// the top level; decode and encode reject deeper trees. `visit_mut` and the
/// derived impls still recurse once per level, so a much deeper tree built in
/// memory can exhaust the stack.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneDocument {
	/// Leading preview image, written back verbatim before the payload.
	#[serde(skip)]
	pub image: Vec<u8>,
	/// Stored schema version. `None` targets the latest schema.
	///
	/// A `None` version is written as [`SchemaVersion::LATEST`], so decoding
	/// the result yields `Some("1.1.1.0")` rather than `None`.
	pub version: Option<String>,
	/// First identifier string (user id).
	pub user_id: String,
	/// Second identifier string (data id).
	pub data_id: String,
	/// Scene title.
	pub title: String,
	/// First reserved header integer.
	pub reserved_a: i32,
	/// Second reserved header integer.
	pub reserved_b: i32,
	/// Opaque header span.
	pub header_span: [u8; HEADER_SPAN_LEN],
	/// Top-level objects by key, in stored order.
	pub objects: IndexMap<i32, Object>,
	/// Undecoded bytes after the object dictionary.
	#[serde(skip)]
	pub tail: Vec<u8>,
}

impl Default for SceneDocument {
	fn default() -> Self {
		Self {
			image: Vec::new(),
			version: None,
			user_id: String::new(),
			data_id: String::new(),
			title: String::new(),
			reserved_a: 0,
			reserved_b: 0,
			header_span: [0; HEADER_SPAN_LEN],
			objects: IndexMap::new(),
			tail: Vec::new(),
		}
	}
}

/// Header span carried by the engine's default capture.
const TEMPLATE_HEADER_SPAN: [u8; HEADER_SPAN_LEN] = *b"#\\d7\xf1l\xf3\xdb?v\xe0X\xf8\x1cJ\xae\xfc\x10I\x96\x15k*P\xbf*u\x91.Yr\xbe";

impl SceneDocument {
	/// Empty document without a stored version.
	pub fn new() -> Self {
		Self::default()
	}

	/// Version `1.0.0` document holding one folder with one plane item.
	pub fn template() -> Self {
		let plane = ItemData {
			transform: Transform {
				key: 1,
				tree_state: 1,
				..Transform::default()
			},
			..ItemData::catalog(0, 0, 215)
		};
		let folder = FolderData {
			transform: Transform {
				key: 0,
				tree_state: 1,
				..Transform::default()
			},
			..FolderData::new("フォルダー")
		}
		.with_child(plane);

		let mut objects = IndexMap::new();
		objects.insert(0, Object::Folder(folder));

		Self {
			version: Some("1.0.0".to_owned()),
			user_id: "deadbeef-dead-beef-dead-beefdeadbeef".to_owned(),
			data_id: "deadbeef-dead-beef-dead-beefdeadbeef".to_owned(),
			title: "テンプレート".to_owned(),
			reserved_a: 1,
			reserved_b: 32,
			header_span: TEMPLATE_HEADER_SPAN,
			objects,
			..Self::default()
		}
	}

	/// Parsed schema version driving every field gate.
	pub fn schema_version(&self) -> Result<SchemaVersion> {
		SchemaVersion::parse(self.version.as_deref())
	}

	/// Total number of objects in the tree, nested ones included.
	pub fn object_count(&self) -> usize {
		walk(self, &Default::default()).count()
	}

	/// Decode a payload that has already been separated from its image.
	pub fn decode_payload(payload: &[u8], registry: &Registry) -> Result<Self> {
		let mut cursor = Cursor::new(payload);

		let version = cursor.read_utf8(LenPrefix::U8)?.to_owned();
		let schema = SchemaVersion::parse(Some(&version))?;
		let user_id = cursor.read_string()?;
		let data_id = cursor.read_string()?;
		let title = cursor.read_string()?;
		let reserved_a = cursor.read_i32_le()?;
		let reserved_b = cursor.read_i32_le()?;
		let header_span = cursor.read_array()?;

		let count = cursor.read_count()?;
		let mut objects = IndexMap::with_capacity(count.min(cursor.remaining() / 8));
		for _ in 0..count {
			let key = cursor.read_i32_le()?;
			let tag = cursor.read_i32_le()?;
			let object = registry.decode_object(tag, &mut cursor, &schema, 0)?;
			objects.insert(key, object);
		}

		let tail = cursor.read_rest().to_vec();

		Ok(Self {
			image: Vec::new(),
			version: Some(version),
			user_id,
			data_id,
			title,
			reserved_a,
			reserved_b,
			header_span,
			objects,
			tail,
		})
	}

	/// Encode the payload without the leading image.
	pub fn encode_payload(&self, registry: &Registry) -> Result<Vec<u8>> {
		let schema = self.schema_version()?;
		let mut writer = Writer::new();

		let version = self.version.as_deref().unwrap_or(SchemaVersion::LATEST);
		writer.write_utf8(LenPrefix::U8, version)?;
		writer.write_string(&self.user_id)?;
		writer.write_string(&self.data_id)?;
		writer.write_string(&self.title)?;
		writer.write_i32_le(self.reserved_a);
		writer.write_i32_le(self.reserved_b);
		writer.write_bytes(&self.header_span);

		writer.write_count(self.objects.len())?;
		for (key, object) in &self.objects {
			writer.write_i32_le(*key);
			writer.write_i32_le(object.tag());
			registry.encode_object(object, &mut writer, &schema, 0)?;
		}

		writer.write_bytes(&self.tail);
		Ok(writer.into_bytes())
	}
}

/// Decode a full capture (image followed by payload) with the default registry.
pub fn decode(bytes: &[u8]) -> Result<SceneDocument> {
	decode_with(bytes, &Registry::default(), &PngSplitter)
}

/// Decode a full capture with a caller-supplied registry and splitter.
pub fn decode_with(bytes: &[u8], registry: &Registry, splitter: &dyn PayloadSplitter) -> Result<SceneDocument> {
	let (image, payload) = splitter.split(bytes)?;
	let mut document = SceneDocument::decode_payload(payload, registry)?;
	document.image = image.to_vec();
	Ok(document)
}

/// Encode a full capture with the default registry.
///
/// A document without a version is written as [`SchemaVersion::LATEST`];
/// decoding the output then reports that version instead of `None`.
pub fn encode(document: &SceneDocument) -> Result<Vec<u8>> {
	encode_with(document, &Registry::default())
}

/// Encode a full capture with a caller-supplied registry.
///
/// On error nothing is returned; the partially written buffer is dropped.
pub fn encode_with(document: &SceneDocument, registry: &Registry) -> Result<Vec<u8>> {
	let payload = document.encode_payload(registry)?;
	let mut out = Vec::with_capacity(document.image.len() + payload.len());
	out.extend_from_slice(&document.image);
	out.extend_from_slice(&payload);
	Ok(out)
}

#[cfg(test)]
mod tests;
