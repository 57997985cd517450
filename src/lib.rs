//! Codec for Digital Craft / Honey Come scene captures.
//!
//! A capture is a preview PNG followed by a payload holding a versioned
//! header and a tree of typed objects. [`scene::decode`] and
//! [`scene::encode`] round-trip unmodified captures byte for byte, and
//! [`scene::walk`] traverses the decoded tree.

/// Scene payload decoding, encoding, and traversal.
pub mod scene;
