use serde::Serialize;

use crate::scene::bytes::{Cursor, Writer};
use crate::scene::{Object, Registry, Result, SchemaVersion, Transform};

/// Folder payload: transform, display name, and ordered children.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct FolderData {
	/// Base transform block.
	pub transform: Transform,
	/// Display name shown in the workspace tree.
	pub name: String,
	/// Child objects in stored order.
	pub children: Vec<Object>,
}

impl FolderData {
	/// Empty folder with a default transform.
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			..Self::default()
		}
	}

	/// Append a child and return `self` for chaining.
	pub fn with_child(mut self, child: impl Into<Object>) -> Self {
		self.children.push(child.into());
		self
	}

	pub(crate) fn decode(cursor: &mut Cursor<'_>, registry: &Registry, version: &SchemaVersion, depth: usize) -> Result<Self> {
		let transform = Transform::read(cursor)?;
		let name = cursor.read_string()?;
		let children = registry.decode_children(cursor, version, depth)?;
		Ok(Self { transform, name, children })
	}

	pub(crate) fn encode(&self, writer: &mut Writer, registry: &Registry, version: &SchemaVersion, depth: usize) -> Result<()> {
		self.transform.write(writer);
		writer.write_string(&self.name)?;
		registry.encode_children(&self.children, writer, version, depth)
	}
}
