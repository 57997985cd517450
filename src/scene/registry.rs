use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::scene::bytes::{Cursor, Writer};
use crate::scene::object::tag;
use crate::scene::{FolderData, ItemData, Object, Result, SceneError, SchemaVersion};

/// Deepest nesting level accepted by decode and encode.
///
/// Top-level objects sit at depth 0. Real captures stay far below this; the
/// limit keeps hostile payloads from exhausting the stack.
pub const MAX_DEPTH: usize = 128;

/// Measures the payload of one object of an unmodeled kind.
///
/// Given the unread payload bytes that follow an object's tag, return how
/// many of them belong to that object. The registry copies exactly that
/// span into [`Object::Opaque`] and writes it back verbatim on encode.
pub trait OpaqueHandler: Send + Sync {
	/// Byte length of the object starting at `rest[0]`.
	fn span_len(&self, rest: &[u8], version: &SchemaVersion) -> Result<usize>;
}

impl<F> OpaqueHandler for F
where
	F: Fn(&[u8], &SchemaVersion) -> Result<usize> + Send + Sync,
{
	fn span_len(&self, rest: &[u8], version: &SchemaVersion) -> Result<usize> {
		self(rest, version)
	}
}

/// Opaque handler for kinds with a constant payload size.
#[derive(Debug, Clone, Copy)]
pub struct FixedSpan(pub usize);

impl OpaqueHandler for FixedSpan {
	fn span_len(&self, _rest: &[u8], _version: &SchemaVersion) -> Result<usize> {
		Ok(self.0)
	}
}

#[derive(Clone)]
enum Codec {
	Folder,
	Item,
	Opaque(Arc<dyn OpaqueHandler>),
}

/// Dispatch table from object tags to payload codecs.
///
/// The default registry knows folders and items. Other kinds decode only
/// once a collaborator registers an [`OpaqueHandler`] for their tag.
#[derive(Clone)]
pub struct Registry {
	codecs: BTreeMap<i32, Codec>,
}

impl Default for Registry {
	fn default() -> Self {
		let mut codecs = BTreeMap::new();
		codecs.insert(tag::FOLDER, Codec::Folder);
		codecs.insert(tag::ITEM, Codec::Item);
		Self { codecs }
	}
}

impl fmt::Debug for Registry {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_set().entries(self.codecs.keys()).finish()
	}
}

impl Registry {
	/// Registry with only the modeled folder and item codecs.
	pub fn new() -> Self {
		Self::default()
	}

	/// Register an opaque handler for `tag`.
	///
	/// Registering a modeled tag replaces its codec, so objects of that kind
	/// decode as [`Object::Opaque`] from then on.
	pub fn register_opaque(&mut self, tag: i32, handler: impl OpaqueHandler + 'static) -> &mut Self {
		self.codecs.insert(tag, Codec::Opaque(Arc::new(handler)));
		self
	}

	/// Return true when `tag` has a codec.
	pub fn contains(&self, tag: i32) -> bool {
		self.codecs.contains_key(&tag)
	}

	/// Registered tags in ascending order.
	pub fn tags(&self) -> impl Iterator<Item = i32> + '_ {
		self.codecs.keys().copied()
	}

	/// Decode the payload of one object whose tag has already been read.
	pub(crate) fn decode_object(&self, tag: i32, cursor: &mut Cursor<'_>, version: &SchemaVersion, depth: usize) -> Result<Object> {
		if depth > MAX_DEPTH {
			return Err(SceneError::NestingTooDeep {
				at: cursor.pos(),
				limit: MAX_DEPTH,
			});
		}

		match self.codecs.get(&tag).ok_or(SceneError::UnknownObjectType { tag })? {
			Codec::Folder => Ok(Object::Folder(FolderData::decode(cursor, self, version, depth)?)),
			Codec::Item => Ok(Object::Item(self.decode_item(cursor, version, depth)?)),
			Codec::Opaque(handler) => {
				let len = handler.span_len(cursor.rest(), version)?;
				let raw = cursor.read_exact(len)?.to_vec();
				Ok(Object::Opaque { tag, raw })
			}
		}
	}

	// Keeps the item record out of the folder decode frame.
	#[inline(never)]
	fn decode_item(&self, cursor: &mut Cursor<'_>, version: &SchemaVersion, depth: usize) -> Result<Box<ItemData>> {
		ItemData::decode(cursor, self, version, depth).map(Box::new)
	}

	/// Encode the payload of one object, without its tag.
	pub(crate) fn encode_object(&self, object: &Object, writer: &mut Writer, version: &SchemaVersion, depth: usize) -> Result<()> {
		if depth > MAX_DEPTH {
			return Err(SceneError::NestingTooDeep {
				at: writer.len(),
				limit: MAX_DEPTH,
			});
		}

		let tag = object.tag();
		if !self.contains(tag) {
			return Err(SceneError::UnknownObjectType { tag });
		}

		match object {
			Object::Folder(folder) => folder.encode(writer, self, version, depth),
			Object::Item(item) => item.encode(writer, self, version, depth),
			Object::Opaque { raw, .. } => {
				writer.write_bytes(raw);
				Ok(())
			}
		}
	}

	/// Decode a count-prefixed list of `(tag, payload)` children of an object at `depth`.
	pub(crate) fn decode_children(&self, cursor: &mut Cursor<'_>, version: &SchemaVersion, depth: usize) -> Result<Vec<Object>> {
		let count = cursor.read_count()?;
		let mut children = Vec::with_capacity(count.min(cursor.remaining() / 4));
		for _ in 0..count {
			let tag = cursor.read_i32_le()?;
			children.push(self.decode_object(tag, cursor, version, depth + 1)?);
		}
		Ok(children)
	}

	/// Encode a count-prefixed list of `(tag, payload)` children of an object at `depth`.
	pub(crate) fn encode_children(&self, children: &[Object], writer: &mut Writer, version: &SchemaVersion, depth: usize) -> Result<()> {
		writer.write_count(children.len())?;
		for child in children {
			writer.write_i32_le(child.tag());
			self.encode_object(child, writer, version, depth + 1)?;
		}
		Ok(())
	}
}
