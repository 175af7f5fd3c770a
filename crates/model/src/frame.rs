//! Arena-backed frame hierarchy.
//!
//! Frames live in a flat table indexed by [`FrameId`]; parent and child links
//! are ids into that table. The main frame always occupies [`FrameId::MAIN`].
//! Traversals use an explicit worklist, so deeply nested frame chains never
//! grow the call stack.

use std::fmt;
use std::sync::Arc;

use crate::artifact::Resource;

/// Index of a frame inside a [`FrameTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameId(pub u32);

impl FrameId {
	/// The main (root) frame.
	pub const MAIN: FrameId = FrameId(0);

	fn index(self) -> usize {
		self.0 as usize
	}
}

impl fmt::Display for FrameId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "frame#{}", self.0)
	}
}

/// A single frame and the resources loaded into it.
#[derive(Debug, Clone)]
pub struct Frame {
	pub id: FrameId,
	pub parent: Option<FrameId>,
	pub url: String,
	children: Vec<FrameId>,
	resources: Vec<Arc<Resource>>,
}

impl Frame {
	/// Child frames in attachment order.
	pub fn child_frames(&self) -> &[FrameId] {
		&self.children
	}

	/// Resources in load order.
	pub fn resources(&self) -> &[Arc<Resource>] {
		&self.resources
	}
}

/// The frame hierarchy of a page.
#[derive(Debug, Clone)]
pub struct FrameTree {
	frames: Vec<Frame>,
}

impl FrameTree {
	/// Creates a tree holding only the main frame.
	pub fn new(main_url: impl Into<String>) -> Self {
		Self {
			frames: vec![Frame {
				id: FrameId::MAIN,
				parent: None,
				url: main_url.into(),
				children: Vec::new(),
				resources: Vec::new(),
			}],
		}
	}

	/// Returns the main frame.
	pub fn main_frame(&self) -> &Frame {
		&self.frames[FrameId::MAIN.index()]
	}

	pub fn get(&self, id: FrameId) -> Option<&Frame> {
		self.frames.get(id.index())
	}

	/// Number of frames, including the main frame.
	pub fn len(&self) -> usize {
		self.frames.len()
	}

	/// A tree always holds its main frame.
	pub fn is_empty(&self) -> bool {
		false
	}

	/// Attaches a new child frame under `parent`.
	///
	/// Returns `None` if `parent` is not part of this tree.
	pub fn add_frame(&mut self, parent: FrameId, url: impl Into<String>) -> Option<FrameId> {
		self.frames.get(parent.index())?;
		let id = FrameId(u32::try_from(self.frames.len()).ok()?);
		self.frames.push(Frame {
			id,
			parent: Some(parent),
			url: url.into(),
			children: Vec::new(),
			resources: Vec::new(),
		});
		self.frames[parent.index()].children.push(id);
		Some(id)
	}

	/// Attaches `resource` to `frame`.
	///
	/// A frame holds one resource per URL; a later resource replaces the
	/// earlier one in place. Returns false if `frame` is not part of this tree.
	pub fn add_resource(&mut self, frame: FrameId, resource: Arc<Resource>) -> bool {
		let Some(frame) = self.frames.get_mut(frame.index()) else {
			return false;
		};
		match frame.resources.iter_mut().find(|existing| existing.url == resource.url) {
			Some(existing) => *existing = resource,
			None => frame.resources.push(resource),
		}
		true
	}

	/// Sets the URL shown by `frame`. Returns false if `frame` is unknown.
	pub fn set_frame_url(&mut self, frame: FrameId, url: impl Into<String>) -> bool {
		match self.frames.get_mut(frame.index()) {
			Some(frame) => {
				frame.url = url.into();
				true
			}
			None => false,
		}
	}

	/// Finds the resource with `url`, checking each frame before its children.
	pub fn resource_for_url(&self, url: &str) -> Option<&Arc<Resource>> {
		let mut stack = vec![FrameId::MAIN];
		while let Some(id) = stack.pop() {
			let Some(frame) = self.get(id) else {
				continue;
			};
			if let Some(resource) = frame.resources.iter().find(|resource| resource.url == url) {
				return Some(resource);
			}
			stack.extend(frame.children.iter().rev().copied());
		}
		None
	}

	/// Returns frame ids with every frame's children ahead of the frame itself.
	///
	/// Each frame reachable from the main frame appears exactly once.
	pub fn children_first(&self) -> Vec<FrameId> {
		let mut order = Vec::with_capacity(self.frames.len());
		let mut stack = vec![(FrameId::MAIN, false)];
		while let Some((id, expanded)) = stack.pop() {
			if expanded {
				order.push(id);
				continue;
			}
			let Some(frame) = self.get(id) else {
				continue;
			};
			stack.push((id, true));
			for &child in frame.children.iter().rev() {
				stack.push((child, false));
			}
		}
		order
	}

	/// Iterates every resource in the tree, children's resources first.
	pub fn resources_children_first(&self) -> impl Iterator<Item = &Arc<Resource>> + '_ {
		self.children_first()
			.into_iter()
			.filter_map(|id| self.get(id))
			.flat_map(|frame| frame.resources.iter())
	}
}

#[cfg(test)]
mod tests;
