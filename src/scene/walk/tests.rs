use crate::scene::object::tag;
use crate::scene::{FolderData, ItemData, Object, SceneDocument, WalkOptions, max_depth, visit_mut, walk};

fn nested_document() -> SceneDocument {
	let inner = FolderData::new("inner").with_child(ItemData::catalog(0, 0, 215));
	let outer = FolderData::new("outer").with_child(inner);

	let mut document = SceneDocument::new();
	document.objects.insert(7, Object::Folder(outer));
	document.objects.insert(2, Object::from(ItemData::catalog(0, 0, 1).with_child(ItemData::catalog(0, 0, 2))));
	document
}

fn label(object: &Object) -> String {
	match object {
		Object::Folder(folder) => folder.name.clone(),
		Object::Item(item) => format!("item:{}", item.no),
		Object::Opaque { tag, .. } => format!("opaque:{tag}"),
	}
}

#[test]
fn visits_in_pre_order_with_depth() {
	let document = nested_document();
	let visited: Vec<_> = walk(&document, &WalkOptions::with_depth())
		.map(|entry| (entry.key, label(entry.object), entry.depth))
		.collect();

	assert_eq!(
		visited,
		vec![
			(7, "outer".to_owned(), Some(0)),
			(7, "inner".to_owned(), Some(1)),
			(7, "item:215".to_owned(), Some(2)),
			(2, "item:1".to_owned(), Some(0)),
			(2, "item:2".to_owned(), Some(1)),
		]
	);
}

#[test]
fn depth_is_omitted_unless_requested() {
	let document = nested_document();
	assert!(walk(&document, &WalkOptions::default()).all(|entry| entry.depth.is_none()));
}

#[test]
fn type_filter_descends_through_other_kinds() {
	let document = nested_document();
	let items: Vec<_> = walk(&document, &WalkOptions::of_type(tag::ITEM)).map(|entry| label(entry.object)).collect();
	assert_eq!(items, vec!["item:215", "item:1", "item:2"]);

	let folders = walk(&document, &WalkOptions::of_type(tag::FOLDER)).count();
	assert_eq!(folders, 2);
}

#[test]
fn each_call_restarts_traversal() {
	let document = nested_document();
	let first: Vec<_> = walk(&document, &WalkOptions::default()).map(|entry| label(entry.object)).collect();
	let second: Vec<_> = walk(&document, &WalkOptions::default()).map(|entry| label(entry.object)).collect();
	assert_eq!(first, second);
	assert_eq!(document.object_count(), 5);
}

#[test]
fn opaque_objects_are_leaves() {
	let mut document = SceneDocument::new();
	document.objects.insert(
		0,
		Object::Opaque {
			tag: tag::CAMERA,
			raw: vec![1, 2, 3],
		},
	);
	let entries: Vec<_> = walk(&document, &WalkOptions::with_depth()).collect();
	assert_eq!(entries.len(), 1);
	assert_eq!(entries[0].object.tag(), tag::CAMERA);
	assert_eq!(max_depth(&document), Some(0));
}

#[test]
fn empty_document_yields_nothing() {
	let document = SceneDocument::new();
	assert_eq!(walk(&document, &WalkOptions::default()).count(), 0);
	assert_eq!(max_depth(&document), None);
}

#[test]
fn visit_mut_edits_items_in_place() {
	let mut document = nested_document();
	let mut seen = Vec::new();
	visit_mut(&mut document, &WalkOptions::of_type(tag::ITEM), |key, object, depth| {
		seen.push((key, depth));
		if let Some(item) = object.as_item_mut() {
			item.alpha = 0.25;
		}
	});

	assert_eq!(seen, vec![(7, 2), (2, 0), (2, 1)]);
	assert!(
		walk(&document, &WalkOptions::of_type(tag::ITEM))
			.filter_map(|entry| entry.object.as_item())
			.all(|item| item.alpha == 0.25)
	);
	assert_eq!(max_depth(&document), Some(2));
}
