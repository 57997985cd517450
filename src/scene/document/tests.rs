use crate::scene::bytes::{LenPrefix, Writer};
use crate::scene::object::tag;
use crate::scene::{
	Color, FixedSpan, FolderData, HEADER_SPAN_LEN, ItemData, MAX_DEPTH, NoImage, Object, PngSplitter, Registry, SceneDocument, SceneError, SchemaVersion, Transform, decode,
	decode_with, encode, encode_with, max_depth,
};

/// Smallest chunk walk the splitter accepts: signature plus an empty `IEND`.
fn tiny_png() -> Vec<u8> {
	let mut png = PngSplitter::SIGNATURE.to_vec();
	png.extend_from_slice(&0_u32.to_be_bytes());
	png.extend_from_slice(b"IEND");
	png.extend_from_slice(&[0xae, 0x42, 0x60, 0x82]);
	png
}

fn minimal_document() -> SceneDocument {
	let mut document = SceneDocument {
		image: tiny_png(),
		version: Some("1.0.0".to_owned()),
		user_id: "user".to_owned(),
		data_id: "data".to_owned(),
		title: "minimal".to_owned(),
		..SceneDocument::default()
	};
	let root = FolderData::new("Root").with_child(ItemData::catalog(0, 0, 215));
	document.objects.insert(0, Object::Folder(root));
	document
}

/// Replace one 4-byte-prefixed string inside an encoded payload.
fn replace_prefixed(bytes: &[u8], old: &str, new: &str) -> Vec<u8> {
	let mut needle = (old.len() as i32).to_le_bytes().to_vec();
	needle.extend_from_slice(old.as_bytes());
	let at = bytes
		.windows(needle.len())
		.position(|window| window == needle.as_slice())
		.expect("string present in payload");

	let mut out = bytes[..at].to_vec();
	out.extend_from_slice(&(new.len() as i32).to_le_bytes());
	out.extend_from_slice(new.as_bytes());
	out.extend_from_slice(&bytes[at + needle.len()..]);
	out
}

/// Payload with one top-level entry opening a chain of `levels` nested folders.
fn folder_chain_payload(levels: usize) -> Vec<u8> {
	let mut w = Writer::new();
	w.write_utf8(LenPrefix::U8, "1.0.0").expect("version");
	for text in ["user", "data", "deep"] {
		w.write_string(text).expect("header string");
	}
	w.write_i32_le(0);
	w.write_i32_le(0);
	w.write_bytes(&[0; HEADER_SPAN_LEN]);
	w.write_count(1).expect("object count");
	w.write_i32_le(0);
	w.write_i32_le(tag::FOLDER);
	for level in 0..levels {
		Transform::default().write(&mut w);
		w.write_string("").expect("folder name");
		if level + 1 < levels {
			w.write_count(1).expect("child count");
			w.write_i32_le(tag::FOLDER);
		} else {
			w.write_count(0).expect("child count");
		}
	}
	w.into_bytes()
}

fn folder_chain(levels: usize) -> FolderData {
	let mut folder = FolderData::new("leaf");
	for _ in 1..levels {
		folder = FolderData::new("link").with_child(folder);
	}
	folder
}

#[test]
fn minimal_document_round_trips() {
	let document = minimal_document();
	let bytes = encode(&document).expect("encode");
	assert!(bytes.starts_with(&PngSplitter::SIGNATURE));

	let back = decode(&bytes).expect("decode");
	assert_eq!(back, document);
	assert_eq!(back.image, tiny_png());

	let item = back.objects[&0].children()[0].as_item().expect("item child");
	assert_eq!((item.group, item.category, item.no), (0, 0, 215));
	assert!(item.colors.iter().all(|slot| slot.as_ref().is_some_and(|color| color.value == Color::WHITE)));
	assert_eq!(item.alpha, 1.0);
	assert!(item.bones.is_empty());
	assert!(item.children.is_empty());

	assert_eq!(encode(&back).expect("re-encode"), bytes);
}

#[test]
fn template_round_trips() {
	let template = SceneDocument::template();
	assert_eq!(template.version.as_deref(), Some("1.0.0"));
	assert_eq!(template.object_count(), 2);
	assert_eq!(max_depth(&template), Some(1));

	let folder = template.objects[&0].as_folder().expect("folder root");
	assert_eq!(folder.name, "フォルダー");
	assert_eq!(folder.children[0].as_item().map(|item| item.no), Some(215));

	let payload = template.encode_payload(&Registry::default()).expect("encode");
	let back = SceneDocument::decode_payload(&payload, &Registry::default()).expect("decode");
	assert_eq!(back, template);
	assert_eq!(back.header_span.len(), HEADER_SPAN_LEN);
}

#[test]
fn unmodified_payload_is_byte_exact() {
	let registry = Registry::default();
	let payload = minimal_document().encode_payload(&registry).expect("encode");

	let canonical = serde_json::to_string(&Color::WHITE).expect("white json");
	let mut captured = replace_prefixed(&payload, &canonical, r#"{ "r": 1, "g": 1, "b": 1, "a": 1.000 }"#);
	captured.extend_from_slice(b"trailing engine data");

	let document = SceneDocument::decode_payload(&captured, &registry).expect("decode");
	assert_eq!(document.tail, b"trailing engine data");
	assert_eq!(document.encode_payload(&registry).expect("re-encode"), captured);
}

#[test]
fn edited_json_field_is_serialized_fresh() {
	let registry = Registry::default();
	let payload = minimal_document().encode_payload(&registry).expect("encode");
	let canonical = serde_json::to_string(&Color::WHITE).expect("white json");
	let captured = replace_prefixed(&payload, &canonical, r#"{"r":1,"g":1,"b":1,"a":1}"#);

	let mut document = SceneDocument::decode_payload(&captured, &registry).expect("decode");
	let item = document
		.objects
		.get_mut(&0)
		.and_then(|root| root.children_mut())
		.and_then(|children| children[0].as_item_mut())
		.expect("item child");
	let slot = item.colors[0].as_mut().expect("first color");
	slot.value = Color::rgba(1.0, 0.0, 0.0, 1.0);

	let reencoded = document.encode_payload(&registry).expect("re-encode");
	let red = serde_json::to_string(&Color::rgba(1.0, 0.0, 0.0, 1.0)).expect("red json");
	assert_eq!(reencoded, replace_prefixed(&captured, r#"{"r":1,"g":1,"b":1,"a":1}"#, &red));
}

#[test]
fn unknown_type_fails_encode() {
	let mut document = minimal_document();
	document.objects.insert(
		9,
		Object::Opaque {
			tag: tag::LIGHT,
			raw: vec![0; 4],
		},
	);

	let err = encode(&document).expect_err("light is not registered");
	assert!(matches!(err, SceneError::UnknownObjectType { tag: 2 }));

	let mut registry = Registry::default();
	registry.register_opaque(tag::LIGHT, FixedSpan(4));
	let bytes = encode_with(&document, &registry).expect("registered light encodes");
	let back = decode_with(&bytes, &registry, &PngSplitter).expect("registered light decodes");
	assert_eq!(back, document);
}

#[test]
fn unknown_type_fails_decode() {
	let mut document = minimal_document();
	document.objects.insert(4, Object::Opaque { tag: tag::CAMERA, raw: vec![] });
	let mut registry = Registry::default();
	registry.register_opaque(tag::CAMERA, FixedSpan(0));
	let bytes = encode_with(&document, &registry).expect("encode");

	let err = decode(&bytes).expect_err("camera is not registered");
	assert!(matches!(err, SceneError::UnknownObjectType { tag: 5 }));
}

#[test]
fn every_truncation_is_malformed() {
	let payload = SceneDocument::template().encode_payload(&Registry::default()).expect("encode");
	for len in 0..payload.len() {
		let err = SceneDocument::decode_payload(&payload[..len], &Registry::default()).expect_err("truncated payload");
		assert!(matches!(err, SceneError::MalformedInput { .. }), "len {len}: {err}");
	}
}

#[test]
fn unparseable_version_is_unsupported() {
	let mut writer = Writer::new();
	writer.write_utf8(LenPrefix::U8, "1.x").expect("version");
	let err = SceneDocument::decode_payload(&writer.into_bytes(), &Registry::default()).expect_err("bad version");
	assert!(matches!(err, SceneError::UnsupportedVersion { version } if version == "1.x"));
}

#[test]
fn missing_version_writes_latest_schema() {
	let mut document = minimal_document();
	document.version = None;
	let item = document
		.objects
		.get_mut(&0)
		.and_then(|root| root.children_mut())
		.and_then(|children| children[0].as_item_mut())
		.expect("item child");
	item.category = 4;

	let payload = document.encode_payload(&Registry::default()).expect("encode");
	assert_eq!(payload[0] as usize, SchemaVersion::LATEST.len());
	assert_eq!(&payload[1..1 + SchemaVersion::LATEST.len()], SchemaVersion::LATEST.as_bytes());

	let back = SceneDocument::decode_payload(&payload, &Registry::default()).expect("decode");
	assert_eq!(back.version.as_deref(), Some(SchemaVersion::LATEST));
	let item = back.objects[&0].children()[0].as_item().expect("item child");
	assert_eq!(item.category, 4);
}

#[test]
fn nested_tree_round_trips() {
	let leaf = ItemData::catalog(1, 2, 3);
	let item = ItemData::catalog(0, 0, 215).with_child(leaf);
	let inner = FolderData::new("inner").with_child(item);
	let outer = FolderData::new("outer").with_child(inner).with_child(FolderData::new("empty"));

	let mut document = SceneDocument::new();
	document.version = Some("1.1.1.0".to_owned());
	document.objects.insert(3, Object::Folder(outer));
	document.objects.insert(1, Object::from(ItemData::catalog(0, 0, 1)));

	let payload = document.encode_payload(&Registry::default()).expect("encode");
	let back = SceneDocument::decode_payload(&payload, &Registry::default()).expect("decode");
	assert_eq!(back, document);
	assert_eq!(back.objects.keys().copied().collect::<Vec<_>>(), vec![3, 1]);
	assert_eq!(max_depth(&back), Some(3));
	assert_eq!(back.object_count(), 6);
}

#[test]
fn capture_without_image_needs_no_image_splitter() {
	let mut document = minimal_document();
	document.image.clear();
	let bytes = encode(&document).expect("encode");

	assert!(matches!(decode(&bytes), Err(SceneError::MissingImage)));
	let back = decode_with(&bytes, &Registry::default(), &NoImage).expect("decode");
	assert_eq!(back, document);
}

#[test]
fn nesting_up_to_limit_decodes() {
	let payload = folder_chain_payload(MAX_DEPTH + 1);
	let document = decode_with(&payload, &Registry::default(), &NoImage).expect("chain at the limit decodes");
	assert_eq!(max_depth(&document), Some(MAX_DEPTH));
	assert_eq!(document.encode_payload(&Registry::default()).expect("re-encode"), payload);
}

#[test]
fn nesting_past_limit_is_an_error() {
	for levels in [MAX_DEPTH + 2, 4 * MAX_DEPTH] {
		let payload = folder_chain_payload(levels);
		let err = decode_with(&payload, &Registry::default(), &NoImage).expect_err("chain past the limit");
		assert!(matches!(err, SceneError::NestingTooDeep { limit: MAX_DEPTH, .. }), "levels {levels}: {err}");
	}
}

#[test]
fn nested_items_past_limit_are_an_error() {
	let mut item = ItemData::catalog(0, 0, 215);
	for _ in 0..MAX_DEPTH + 1 {
		item = ItemData::catalog(0, 0, 215).with_child(item);
	}
	let mut document = SceneDocument::template();
	document.objects.insert(1, Object::from(item));

	let err = document.encode_payload(&Registry::default()).expect_err("tree past the limit");
	assert!(matches!(err, SceneError::NestingTooDeep { limit: MAX_DEPTH, .. }));
}

#[test]
fn too_deep_tree_is_not_encoded() {
	let mut document = SceneDocument::new();
	document.objects.insert(0, Object::from(folder_chain(MAX_DEPTH + 2)));
	assert!(matches!(encode(&document), Err(SceneError::NestingTooDeep { .. })));

	document.objects.insert(0, Object::from(folder_chain(MAX_DEPTH + 1)));
	let bytes = document.encode_payload(&Registry::default()).expect("chain at the limit encodes");
	let back = SceneDocument::decode_payload(&bytes, &Registry::default()).expect("decode");
	assert_eq!(max_depth(&back), Some(MAX_DEPTH));
}
