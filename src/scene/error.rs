use thiserror::Error;

/// Crate-local result type.
pub type Result<T> = std::result::Result<T, SceneError>;

/// Errors produced while decoding, encoding, and inspecting scene data.
#[derive(Debug, Error)]
pub enum SceneError {
	/// Filesystem or stream IO failure.
	#[error("io: {0}")]
	Io(#[from] std::io::Error),
	/// Not enough bytes remained for a requested read.
	#[error("malformed input at offset {at}: need {need} bytes, remaining {rem}")]
	MalformedInput {
		/// Cursor offset where the read started.
		at: usize,
		/// Requested byte count.
		need: usize,
		/// Bytes left in the cursor.
		rem: usize,
	},
	/// A 4-byte length or count prefix was negative.
	#[error("malformed input at offset {at}: negative length prefix {value}")]
	NegativeLength {
		/// Cursor offset of the prefix.
		at: usize,
		/// Raw prefix value.
		value: i32,
	},
	/// A string or byte span does not fit its length prefix.
	#[error("value of {len} bytes does not fit a {width}-byte length prefix")]
	StringTooLong {
		/// Byte length of the value.
		len: usize,
		/// Width of the prefix in bytes.
		width: usize,
	},
	/// Version string is not a dot-separated list of unsigned integers.
	#[error("unsupported version string {version:?}")]
	UnsupportedVersion {
		/// Offending version text.
		version: String,
	},
	/// No codec is registered for an object tag.
	#[error("unknown object type tag {tag}")]
	UnknownObjectType {
		/// Object type tag.
		tag: i32,
	},
	/// Objects nest deeper than [`MAX_DEPTH`](crate::scene::MAX_DEPTH).
	#[error("object nesting exceeds {limit} levels at offset {at}")]
	NestingTooDeep {
		/// Cursor or writer offset where the too-deep object starts.
		at: usize,
		/// Accepted nesting depth.
		limit: usize,
	},
	/// A string field did not hold valid UTF-8.
	#[error("invalid utf-8 in string at offset {at}")]
	Encoding {
		/// Cursor offset of the string payload.
		at: usize,
	},
	/// A JSON sub-record could not be parsed into its record shape.
	#[error("invalid json record at offset {at}: {source}")]
	Json {
		/// Cursor offset of the JSON text.
		at: usize,
		/// Parser error.
		#[source]
		source: serde_json::Error,
	},
	/// Leading image boundary could not be located.
	#[error("no preview image found before payload")]
	MissingImage,
}
