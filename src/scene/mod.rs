mod bytes;
mod document;
mod error;
mod folder;
mod item;
mod json;
mod object;
mod png;
mod registry;
mod version;
mod walk;

/// Bounded byte cursor, writer, and length prefix widths.
pub use bytes::{Cursor, LenPrefix, Writer};
/// Document model and whole-capture entry points.
pub use document::{HEADER_SPAN_LEN, SceneDocument, decode, decode_with, encode, encode_with};
/// Error and result aliases.
pub use error::{Result, SceneError};
/// Folder payload.
pub use folder::FolderData;
/// Item payload and its sub-records.
pub use item::{BoneRecord, COLOR_SLOTS, ColorSlot, ItemData, LEGACY_COLOR_SLOTS, LEGACY_LINE_COLOR, PATTERN_SLOTS, PatternRecord};
/// JSON sub-record types.
pub use json::{Color, JsonField, Vec4};
/// Object variants, shared transform block, and tag constants.
pub use object::{Object, Transform, Vec3, tag};
/// Image/payload splitting seam and the PNG implementation.
pub use png::{NoImage, PayloadSplitter, PngSplitter};
/// Tag dispatch table and opaque handler seam.
pub use registry::{FixedSpan, MAX_DEPTH, OpaqueHandler, Registry};
/// Version comparison and schema gates.
pub use version::{SchemaVersion, compare_versions};
/// Depth-first traversal types and entry points.
pub use walk::{Walk, WalkEntry, WalkOptions, max_depth, visit_mut, walk};
