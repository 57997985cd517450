use std::slice;

use crate::scene::{Object, SceneDocument};

/// Tree traversal options.
#[derive(Debug, Clone, Copy, Default)]
pub struct WalkOptions {
	/// Report nesting depth with each entry (`0` for top-level objects).
	pub include_depth: bool,
	/// Yield only objects with this tag. Traversal still descends through
	/// objects that do not match.
	pub type_filter: Option<i32>,
}

impl WalkOptions {
	/// Options that report depth.
	pub fn with_depth() -> Self {
		Self {
			include_depth: true,
			type_filter: None,
		}
	}

	/// Options that keep only objects tagged `tag`.
	pub fn of_type(tag: i32) -> Self {
		Self {
			include_depth: false,
			type_filter: Some(tag),
		}
	}

	fn accepts(&self, object: &Object) -> bool {
		self.type_filter.is_none_or(|tag| object.tag() == tag)
	}
}

/// One visited object.
#[derive(Debug, Clone, Copy)]
pub struct WalkEntry<'a> {
	/// Top-level dictionary key of the subtree containing the object.
	pub key: i32,
	/// Visited object.
	pub object: &'a Object,
	/// Nesting depth, when requested.
	pub depth: Option<usize>,
}

/// Lazy depth-first pre-order traversal over a document.
pub struct Walk<'a> {
	roots: indexmap::map::Iter<'a, i32, Object>,
	stack: Vec<(i32, usize, slice::Iter<'a, Object>)>,
	options: WalkOptions,
}

impl<'a> Iterator for Walk<'a> {
	type Item = WalkEntry<'a>;

	fn next(&mut self) -> Option<Self::Item> {
		loop {
			let (key, depth, object) = match self.stack.last_mut() {
				Some((key, depth, siblings)) => match siblings.next() {
					Some(object) => (*key, *depth, object),
					None => {
						self.stack.pop();
						continue;
					}
				},
				None => {
					let (key, object) = self.roots.next()?;
					(*key, 0, object)
				}
			};

			let children = object.children();
			if !children.is_empty() {
				self.stack.push((key, depth + 1, children.iter()));
			}

			if self.options.accepts(object) {
				return Some(WalkEntry {
					key,
					object,
					depth: self.options.include_depth.then_some(depth),
				});
			}
		}
	}
}

/// Walk every object in stored order, parents before children.
///
/// Each call starts a fresh traversal and never mutates the document.
pub fn walk<'a>(document: &'a SceneDocument, options: &WalkOptions) -> Walk<'a> {
	Walk {
		roots: document.objects.iter(),
		stack: Vec::new(),
		options: *options,
	}
}

/// Visit every object mutably in the same order as [`walk`].
///
/// The callback receives the subtree key, the object, and its depth. Child
/// lists are visited after the callback returns, so edits to a parent's
/// children are observed by the traversal.
pub fn visit_mut<F>(document: &mut SceneDocument, options: &WalkOptions, mut visit: F)
where
	F: FnMut(i32, &mut Object, usize),
{
	for (key, object) in document.objects.iter_mut() {
		visit_object(*key, object, 0, options, &mut visit);
	}
}

fn visit_object<F>(key: i32, object: &mut Object, depth: usize, options: &WalkOptions, visit: &mut F)
where
	F: FnMut(i32, &mut Object, usize),
{
	if options.accepts(object) {
		visit(key, object, depth);
	}
	if let Some(children) = object.children_mut() {
		for child in children.iter_mut() {
			visit_object(key, child, depth + 1, options, visit);
		}
	}
}

/// Deepest nesting level in the document, `None` when it has no objects.
pub fn max_depth(document: &SceneDocument) -> Option<usize> {
	walk(document, &WalkOptions::with_depth()).filter_map(|entry| entry.depth).max()
}

#[cfg(test)]
mod tests;
