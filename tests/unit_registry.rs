#![allow(missing_docs)]

use scenedoc::scene::{FixedSpan, FolderData, NoImage, Object, Registry, Result, SceneDocument, SceneError, SchemaVersion, decode_with, encode_with, tag};

fn document_with_light() -> SceneDocument {
	let folder = FolderData::new("lights").with_child(Object::Opaque {
		tag: tag::LIGHT,
		raw: vec![1, 0, 0, 0, 0xff],
	});
	let mut document = SceneDocument {
		version: Some("1.1.1.0".to_owned()),
		..SceneDocument::default()
	};
	document.objects.insert(0, Object::from(folder));
	document
}

#[test]
fn opaque_kinds_need_a_registered_handler() {
	let document = document_with_light();
	let err = encode_with(&document, &Registry::default()).expect_err("light not registered");
	assert!(matches!(err, SceneError::UnknownObjectType { tag: 2 }));

	let mut registry = Registry::new();
	registry.register_opaque(tag::LIGHT, FixedSpan(5));
	let bytes = encode_with(&document, &registry).expect("encode");

	let err = decode_with(&bytes, &Registry::default(), &NoImage).expect_err("light not registered");
	assert!(matches!(err, SceneError::UnknownObjectType { tag: 2 }));

	let back = decode_with(&bytes, &registry, &NoImage).expect("decode");
	assert_eq!(back, document);
}

#[test]
fn closure_handler_can_consult_the_version() {
	let mut registry = Registry::new();
	registry.register_opaque(tag::LIGHT, |_rest: &[u8], version: &SchemaVersion| -> Result<usize> {
		Ok(if version.at_least(SchemaVersion::CATEGORY) { 5 } else { 4 })
	});

	let document = document_with_light();
	let bytes = encode_with(&document, &registry).expect("encode");
	let back = decode_with(&bytes, &registry, &NoImage).expect("decode");
	assert_eq!(back.objects[&0].children()[0], document.objects[&0].children()[0]);
}
