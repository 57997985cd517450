use indexmap::IndexMap;
use serde::Serialize;

use crate::scene::bytes::{Cursor, Writer};
use crate::scene::{Color, JsonField, Object, Registry, Result, SchemaVersion, Transform, Vec3, Vec4};

/// Number of color slots kept in memory for every item.
pub const COLOR_SLOTS: usize = 8;
/// Number of color slots stored by schemas older than [`SchemaVersion::EIGHT_COLORS`].
pub const LEGACY_COLOR_SLOTS: usize = 7;
/// Number of pattern records stored for every item.
pub const PATTERN_SLOTS: usize = 3;

/// Outline color assumed when the schema predates [`SchemaVersion::LINE_STYLE`].
pub const LEGACY_LINE_COLOR: Color = Color::rgba(128.0 / 255.0, 128.0 / 255.0, 128.0 / 255.0, 1.0);

/// One color slot. `None` is an empty JSON string on disk.
pub type ColorSlot = Option<JsonField<Color>>;

/// Texture pattern slot of an item.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PatternRecord {
	/// Leading float of undocumented meaning.
	pub reserved_value: f32,
	/// Pattern texture key.
	pub key: i32,
	/// Clamp sampling instead of repeating.
	pub clamp: bool,
	/// Trailing flag of undocumented meaning.
	pub reserved_flag: bool,
	/// UV rect as `{x,y,z,w}` JSON.
	pub uv: JsonField<Vec4>,
}

impl Default for PatternRecord {
	fn default() -> Self {
		Self {
			reserved_value: 0.0,
			key: 0,
			clamp: false,
			reserved_flag: false,
			uv: JsonField::new(Vec4::UNIT_RECT),
		}
	}
}

impl PatternRecord {
	fn read(cursor: &mut Cursor<'_>) -> Result<Self> {
		Ok(Self {
			reserved_value: cursor.read_f32_le()?,
			key: cursor.read_i32_le()?,
			clamp: cursor.read_bool()?,
			reserved_flag: cursor.read_bool()?,
			uv: JsonField::read(cursor)?,
		})
	}

	fn write(&self, writer: &mut Writer) -> Result<()> {
		writer.write_f32_le(self.reserved_value);
		writer.write_i32_le(self.key);
		writer.write_bool(self.clamp);
		writer.write_bool(self.reserved_flag);
		self.uv.write(writer)
	}
}

/// FK bone adjustment attached to an item.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoneRecord {
	/// Bone dictionary key inside the engine.
	pub key: i32,
	/// Position delta.
	pub position: Vec3,
	/// Rotation delta.
	pub rotation: Vec3,
	/// Scale delta.
	pub scale: Vec3,
}

impl Default for BoneRecord {
	fn default() -> Self {
		Self {
			key: 0,
			position: Vec3::ZERO,
			rotation: Vec3::ZERO,
			scale: Vec3::ONE,
		}
	}
}

impl BoneRecord {
	fn read(cursor: &mut Cursor<'_>) -> Result<Self> {
		Ok(Self {
			key: cursor.read_i32_le()?,
			position: Vec3::read(cursor)?,
			rotation: Vec3::read(cursor)?,
			scale: Vec3::read(cursor)?,
		})
	}

	fn write(&self, writer: &mut Writer) {
		writer.write_i32_le(self.key);
		self.position.write(writer);
		self.rotation.write(writer);
		self.scale.write(writer);
	}
}

/// Item payload in stored field order.
///
/// Gated fields always exist in memory; on schemas that predate their gate
/// they hold the engine default and are skipped on encode.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemData {
	/// Base transform block.
	pub transform: Transform,
	/// First reserved integer.
	pub reserved_a: i32,
	/// Second reserved integer.
	pub reserved_b: i32,
	/// Catalog group.
	pub group: i32,
	/// Catalog category. Stored from [`SchemaVersion::CATEGORY`] on, else 0.
	pub category: i32,
	/// Catalog serial number.
	pub no: i32,
	/// Opaque span before the color list.
	pub pre_color_span: [u8; 8],
	/// Color slots; the eighth is synthesized on legacy schemas.
	pub colors: [ColorSlot; COLOR_SLOTS],
	/// Reserved integer after the colors.
	pub reserved_c: i32,
	/// Reserved flag after the colors.
	pub reserved_flag: bool,
	/// Texture pattern slots.
	pub patterns: [PatternRecord; PATTERN_SLOTS],
	/// Opaque span before `alpha`.
	pub pre_alpha_span: [u8; 4],
	/// Overall alpha.
	pub alpha: f32,
	/// Outline color. Stored from [`SchemaVersion::LINE_STYLE`] on.
	pub line_color: JsonField<Color>,
	/// Outline width. Stored from [`SchemaVersion::LINE_STYLE`] on.
	pub line_width: f32,
	/// Emission color. Stored from [`SchemaVersion::EMISSION`] on.
	pub emission_color: JsonField<Color>,
	/// Emission strength. Stored from [`SchemaVersion::EMISSION`] on.
	pub emission_power: f32,
	/// Light cancel amount. Stored from [`SchemaVersion::EMISSION`] on.
	pub light_cancel: f32,
	/// Opaque span after the emission block.
	pub post_emission_span: [u8; 6],
	/// Opaque JSON string, kept verbatim.
	pub extra_json: String,
	/// Opaque span before `enable_fk`.
	pub pre_fk_span: [u8; 4],
	/// FK enabled.
	pub enable_fk: bool,
	/// FK bone adjustments by bone name, in stored order.
	pub bones: IndexMap<String, BoneRecord>,
	/// Dynamic bones enabled. Stored from [`SchemaVersion::DYNAMIC_BONE`] on, else `true`.
	pub enable_dynamic_bone: bool,
	/// Reserved flag before the animation time.
	pub trailing_flag: bool,
	/// Normalized animation time.
	pub anime_normalized_time: f32,
	/// Child objects in stored order.
	pub children: Vec<Object>,
}

impl Default for ItemData {
	fn default() -> Self {
		Self {
			transform: Transform::default(),
			reserved_a: 0,
			reserved_b: 0,
			group: 0,
			category: 0,
			no: 0,
			pre_color_span: [0, 0, 0, 0, 0, 0, 0x80, 0x3f],
			colors: std::array::from_fn(|_| Some(JsonField::new(Color::WHITE))),
			reserved_c: -1,
			reserved_flag: false,
			patterns: [
				PatternRecord {
					reserved_value: 1.0,
					..PatternRecord::default()
				},
				PatternRecord::default(),
				PatternRecord::default(),
			],
			pre_alpha_span: [0; 4],
			alpha: 1.0,
			line_color: JsonField::new(Color::rgba(0.0, 0.0, 0.0, 1.0)),
			line_width: 1.0,
			emission_color: JsonField::new(Color::WHITE),
			emission_power: 0.0,
			light_cancel: 0.0,
			post_emission_span: [0; 6],
			extra_json: r#"{"x":0.0,"y":0.0,"z":1.0,"w":1.0}"#.to_owned(),
			pre_fk_span: [0; 4],
			enable_fk: false,
			bones: IndexMap::new(),
			enable_dynamic_bone: true,
			trailing_flag: true,
			anime_normalized_time: 0.0,
			children: Vec::new(),
		}
	}
}

impl ItemData {
	/// Default item for catalog entry `(group, category, no)`.
	pub fn catalog(group: i32, category: i32, no: i32) -> Self {
		Self {
			group,
			category,
			no,
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
		let reserved_a = cursor.read_i32_le()?;
		let reserved_b = cursor.read_i32_le()?;
		let group = cursor.read_i32_le()?;
		let category = if version.at_least(SchemaVersion::CATEGORY) {
			cursor.read_i32_le()?
		} else {
			0
		};
		let no = cursor.read_i32_le()?;
		let pre_color_span = cursor.read_array()?;

		let stored = stored_color_slots(version);
		let mut colors: [ColorSlot; COLOR_SLOTS] = Default::default();
		for slot in colors.iter_mut().take(stored) {
			*slot = read_color_slot(cursor)?;
		}
		for slot in colors.iter_mut().skip(stored) {
			*slot = Some(JsonField::new(Color::WHITE));
		}

		let reserved_c = cursor.read_i32_le()?;
		let reserved_flag = cursor.read_bool()?;
		let patterns = [PatternRecord::read(cursor)?, PatternRecord::read(cursor)?, PatternRecord::read(cursor)?];
		let pre_alpha_span = cursor.read_array()?;
		let alpha = cursor.read_f32_le()?;

		let (line_color, line_width) = if version.at_least(SchemaVersion::LINE_STYLE) {
			(JsonField::read(cursor)?, cursor.read_f32_le()?)
		} else {
			(JsonField::new(LEGACY_LINE_COLOR), 1.0)
		};

		let (emission_color, emission_power, light_cancel) = if version.at_least(SchemaVersion::EMISSION) {
			(JsonField::read(cursor)?, cursor.read_f32_le()?, cursor.read_f32_le()?)
		} else {
			(JsonField::new(Color::WHITE), 0.0, 0.0)
		};

		let post_emission_span = cursor.read_array()?;
		let extra_json = cursor.read_string()?;
		let pre_fk_span = cursor.read_array()?;
		let enable_fk = cursor.read_bool()?;

		let bone_count = cursor.read_count()?;
		let mut bones = IndexMap::with_capacity(bone_count.min(cursor.remaining() / 4));
		for _ in 0..bone_count {
			let name = cursor.read_string()?;
			bones.insert(name, BoneRecord::read(cursor)?);
		}

		let enable_dynamic_bone = if version.at_least(SchemaVersion::DYNAMIC_BONE) {
			cursor.read_bool()?
		} else {
			true
		};
		let trailing_flag = cursor.read_bool()?;
		let anime_normalized_time = cursor.read_f32_le()?;
		let children = registry.decode_children(cursor, version, depth)?;

		Ok(Self {
			transform,
			reserved_a,
			reserved_b,
			group,
			category,
			no,
			pre_color_span,
			colors,
			reserved_c,
			reserved_flag,
			patterns,
			pre_alpha_span,
			alpha,
			line_color,
			line_width,
			emission_color,
			emission_power,
			light_cancel,
			post_emission_span,
			extra_json,
			pre_fk_span,
			enable_fk,
			bones,
			enable_dynamic_bone,
			trailing_flag,
			anime_normalized_time,
			children,
		})
	}

	pub(crate) fn encode(&self, writer: &mut Writer, registry: &Registry, version: &SchemaVersion, depth: usize) -> Result<()> {
		self.transform.write(writer);
		writer.write_i32_le(self.reserved_a);
		writer.write_i32_le(self.reserved_b);
		writer.write_i32_le(self.group);
		if version.at_least(SchemaVersion::CATEGORY) {
			writer.write_i32_le(self.category);
		}
		writer.write_i32_le(self.no);
		writer.write_bytes(&self.pre_color_span);

		for slot in self.colors.iter().take(stored_color_slots(version)) {
			match slot {
				Some(color) => color.write(writer)?,
				None => writer.write_string("")?,
			}
		}

		writer.write_i32_le(self.reserved_c);
		writer.write_bool(self.reserved_flag);
		for pattern in &self.patterns {
			pattern.write(writer)?;
		}
		writer.write_bytes(&self.pre_alpha_span);
		writer.write_f32_le(self.alpha);

		if version.at_least(SchemaVersion::LINE_STYLE) {
			self.line_color.write(writer)?;
			writer.write_f32_le(self.line_width);
		}

		if version.at_least(SchemaVersion::EMISSION) {
			self.emission_color.write(writer)?;
			writer.write_f32_le(self.emission_power);
			writer.write_f32_le(self.light_cancel);
		}

		writer.write_bytes(&self.post_emission_span);
		writer.write_string(&self.extra_json)?;
		writer.write_bytes(&self.pre_fk_span);
		writer.write_bool(self.enable_fk);

		writer.write_count(self.bones.len())?;
		for (name, bone) in &self.bones {
			writer.write_string(name)?;
			bone.write(writer);
		}

		if version.at_least(SchemaVersion::DYNAMIC_BONE) {
			writer.write_bool(self.enable_dynamic_bone);
		}
		writer.write_bool(self.trailing_flag);
		writer.write_f32_le(self.anime_normalized_time);
		registry.encode_children(&self.children, writer, version, depth)
	}
}

fn stored_color_slots(version: &SchemaVersion) -> usize {
	if version.at_least(SchemaVersion::EIGHT_COLORS) {
		COLOR_SLOTS
	} else {
		LEGACY_COLOR_SLOTS
	}
}

fn read_color_slot(cursor: &mut Cursor<'_>) -> Result<ColorSlot> {
	let text = cursor.read_string()?;
	if text.is_empty() {
		return Ok(None);
	}
	JsonField::parse(&text, cursor.pos() - text.len()).map(Some)
}
