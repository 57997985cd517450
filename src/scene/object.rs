use serde::Serialize;

use crate::scene::bytes::{Cursor, Writer};
use crate::scene::{FolderData, ItemData, Result};

/// Object type tags used by the engine.
pub mod tag {
	/// Character (`OICharInfo`).
	pub const CHARACTER: i32 = 0;
	/// Renderable item (`OIItemInfo`).
	pub const ITEM: i32 = 1;
	/// Light (`OILightInfo`).
	pub const LIGHT: i32 = 2;
	/// Folder (`OIFolderInfo`).
	pub const FOLDER: i32 = 3;
	/// Route (`OIRouteInfo`).
	pub const ROUTE: i32 = 4;
	/// Camera (`OICameraInfo`).
	pub const CAMERA: i32 = 5;

	/// Stable lowercase label for a tag.
	pub fn label(tag: i32) -> &'static str {
		match tag {
			CHARACTER => "character",
			ITEM => "item",
			LIGHT => "light",
			FOLDER => "folder",
			ROUTE => "route",
			CAMERA => "camera",
			_ => "unknown",
		}
	}
}

/// Three-component float vector.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Vec3 {
	/// X component.
	pub x: f32,
	/// Y component.
	pub y: f32,
	/// Z component.
	pub z: f32,
}

impl Vec3 {
	/// All zeros.
	pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);
	/// All ones.
	pub const ONE: Self = Self::new(1.0, 1.0, 1.0);

	/// Build a vector from components.
	pub const fn new(x: f32, y: f32, z: f32) -> Self {
		Self { x, y, z }
	}

	pub(crate) fn read(cursor: &mut Cursor<'_>) -> Result<Self> {
		Ok(Self {
			x: cursor.read_f32_le()?,
			y: cursor.read_f32_le()?,
			z: cursor.read_f32_le()?,
		})
	}

	pub(crate) fn write(&self, writer: &mut Writer) {
		writer.write_f32_le(self.x);
		writer.write_f32_le(self.y);
		writer.write_f32_le(self.z);
	}
}

/// Base transform block shared by folders and items.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transform {
	/// Object dictionary key inside the engine.
	pub key: i32,
	/// Local position.
	pub position: Vec3,
	/// Local Euler rotation in degrees.
	pub rotation: Vec3,
	/// Local scale.
	pub scale: Vec3,
	/// Workspace tree expansion state.
	pub tree_state: i32,
	/// Visibility toggle.
	pub visible: bool,
}

impl Default for Transform {
	fn default() -> Self {
		Self {
			key: 0,
			position: Vec3::ZERO,
			rotation: Vec3::ZERO,
			scale: Vec3::ONE,
			tree_state: 0,
			visible: true,
		}
	}
}

impl Transform {
	pub(crate) fn read(cursor: &mut Cursor<'_>) -> Result<Self> {
		Ok(Self {
			key: cursor.read_i32_le()?,
			position: Vec3::read(cursor)?,
			rotation: Vec3::read(cursor)?,
			scale: Vec3::read(cursor)?,
			tree_state: cursor.read_i32_le()?,
			visible: cursor.read_bool()?,
		})
	}

	pub(crate) fn write(&self, writer: &mut Writer) {
		writer.write_i32_le(self.key);
		self.position.write(writer);
		self.rotation.write(writer);
		self.scale.write(writer);
		writer.write_i32_le(self.tree_state);
		writer.write_bool(self.visible);
	}
}

/// One scene object.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Object {
	/// Nestable folder.
	Folder(FolderData),
	/// Renderable primitive item.
	Item(Box<ItemData>),
	/// Unmodeled object kind carried as raw payload bytes.
	Opaque {
		/// Object type tag.
		tag: i32,
		/// Payload bytes following the tag, preserved verbatim.
		raw: Vec<u8>,
	},
}

impl Object {
	/// Integer type tag written before the payload.
	pub fn tag(&self) -> i32 {
		match self {
			Self::Folder(_) => tag::FOLDER,
			Self::Item(_) => tag::ITEM,
			Self::Opaque { tag, .. } => *tag,
		}
	}

	/// Child objects, empty for opaque payloads.
	pub fn children(&self) -> &[Object] {
		match self {
			Self::Folder(folder) => &folder.children,
			Self::Item(item) => &item.children,
			Self::Opaque { .. } => &[],
		}
	}

	/// Mutable child list for modeled kinds.
	pub fn children_mut(&mut self) -> Option<&mut Vec<Object>> {
		match self {
			Self::Folder(folder) => Some(&mut folder.children),
			Self::Item(item) => Some(&mut item.children),
			Self::Opaque { .. } => None,
		}
	}

	/// Base transform for modeled kinds.
	pub fn transform(&self) -> Option<&Transform> {
		match self {
			Self::Folder(folder) => Some(&folder.transform),
			Self::Item(item) => Some(&item.transform),
			Self::Opaque { .. } => None,
		}
	}

	/// Folder payload, if this is a folder.
	pub fn as_folder(&self) -> Option<&FolderData> {
		match self {
			Self::Folder(folder) => Some(folder),
			_ => None,
		}
	}

	/// Item payload, if this is an item.
	pub fn as_item(&self) -> Option<&ItemData> {
		match self {
			Self::Item(item) => Some(item),
			_ => None,
		}
	}

	/// Mutable item payload, if this is an item.
	pub fn as_item_mut(&mut self) -> Option<&mut ItemData> {
		match self {
			Self::Item(item) => Some(item),
			_ => None,
		}
	}
}

impl From<FolderData> for Object {
	fn from(folder: FolderData) -> Self {
		Self::Folder(folder)
	}
}

impl From<ItemData> for Object {
	fn from(item: ItemData) -> Self {
		Self::Item(Box::new(item))
	}
}
