use std::cmp::Ordering;
use std::fmt;

use crate::scene::{Result, SceneError};

/// Parsed dot-separated schema version.
///
/// `Latest` stands in for documents built in memory that never carried a
/// version string; it compares greater than or equal to every gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaVersion {
	/// Version parsed from a document.
	Parts(Vec<u32>),
	/// No stored version; every gate is open.
	Latest,
}

impl SchemaVersion {
	/// Item `category` field.
	pub const CATEGORY: &'static str = "1.1.1.0";
	/// Eighth item color slot.
	pub const EIGHT_COLORS: &'static str = "0.0.3";
	/// Item outline color and width.
	pub const LINE_STYLE: &'static str = "0.0.4";
	/// Item emission color, power, and light cancel.
	pub const EMISSION: &'static str = "0.0.7";
	/// Item dynamic bone toggle.
	pub const DYNAMIC_BONE: &'static str = "1.0.1";

	/// Version string written for documents without one.
	pub const LATEST: &'static str = Self::CATEGORY;

	/// Parse an optional stored version.
	pub fn parse(version: Option<&str>) -> Result<Self> {
		match version {
			Some(text) => parse_parts(text).map(Self::Parts),
			None => Ok(Self::Latest),
		}
	}

	/// Compare against a gate threshold.
	pub fn cmp_gate(&self, gate: &str) -> Result<Ordering> {
		let want = parse_parts(gate)?;
		Ok(match self {
			Self::Parts(have) => cmp_padded(have, &want),
			Self::Latest => Ordering::Greater,
		})
	}

	/// Return true when this version is at or above `gate`.
	///
	/// Gate strings are crate constants, so a parse failure here only
	/// happens for caller-supplied gates and is treated as closed.
	pub fn at_least(&self, gate: &str) -> bool {
		self.cmp_gate(gate).is_ok_and(Ordering::is_ge)
	}
}

impl fmt::Display for SchemaVersion {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Parts(parts) => {
				for (idx, part) in parts.iter().enumerate() {
					if idx > 0 {
						f.write_str(".")?;
					}
					write!(f, "{part}")?;
				}
				Ok(())
			}
			Self::Latest => f.write_str("latest"),
		}
	}
}

/// Compare a stored version against a wanted threshold.
///
/// Components are compared left to right after right-padding the shorter
/// list with zeros. `None` compares greater than any threshold.
pub fn compare_versions(have: Option<&str>, want: &str) -> Result<Ordering> {
	SchemaVersion::parse(have)?.cmp_gate(want)
}

fn parse_parts(text: &str) -> Result<Vec<u32>> {
	text.split('.')
		.map(|part| part.parse::<u32>())
		.collect::<std::result::Result<Vec<_>, _>>()
		.map_err(|_| SceneError::UnsupportedVersion { version: text.to_owned() })
}

fn cmp_padded(have: &[u32], want: &[u32]) -> Ordering {
	let len = have.len().max(want.len());
	for idx in 0..len {
		let left = have.get(idx).copied().unwrap_or(0);
		let right = want.get(idx).copied().unwrap_or(0);
		match left.cmp(&right) {
			Ordering::Equal => continue,
			other => return other,
		}
	}
	Ordering::Equal
}
