//! In-memory resource and script trackers.
//!
//! These back the [`ResourceSource`] and [`ScriptSource`] capabilities for
//! embedders without a live page, and for tests and trace replay.

use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, trace};

use crate::artifact::{Resource, ResourceType, Script};
use crate::event::{EventEmitter, Listener, Subscription};
use crate::frame::{FrameId, FrameTree};
use crate::source::{ResourceSource, ScriptSource};

/// A request observed by the network layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkRequest {
	pub url: String,
	pub finished: bool,
}

/// Ordered log of network requests.
#[derive(Debug, Default, Clone)]
pub struct NetworkLog {
	requests: Vec<NetworkRequest>,
}

impl NetworkLog {
	pub fn new() -> Self {
		Self::default()
	}

	/// Records a request.
	pub fn record(&mut self, url: impl Into<String>, finished: bool) {
		self.requests.push(NetworkRequest {
			url: url.into(),
			finished,
		});
	}

	/// Returns the most recent request for `url`.
	pub fn request_for_url(&self, url: &str) -> Option<&NetworkRequest> {
		self.requests.iter().rev().find(|request| request.url == url)
	}

	pub fn len(&self) -> usize {
		self.requests.len()
	}

	pub fn is_empty(&self) -> bool {
		self.requests.is_empty()
	}

	pub fn clear(&mut self) {
		self.requests.clear();
	}
}

struct PageState {
	frames: FrameTree,
	network: NetworkLog,
}

/// Tracks the frame tree, its resources, and the network log of one page.
pub struct ResourceTracker {
	state: RwLock<PageState>,
	resource_added: EventEmitter<Arc<Resource>>,
}

impl ResourceTracker {
	/// Creates a tracker whose main frame shows `main_url`.
	pub fn new(main_url: impl Into<String>) -> Self {
		Self {
			state: RwLock::new(PageState {
				frames: FrameTree::new(main_url),
				network: NetworkLog::new(),
			}),
			resource_added: EventEmitter::new(),
		}
	}

	/// Attaches a child frame. Returns `None` if `parent` is unknown.
	pub fn add_frame(&self, parent: FrameId, url: impl Into<String>) -> Option<FrameId> {
		let url = url.into();
		let id = self.state.write().frames.add_frame(parent, url.clone())?;
		debug!(frame = %id, parent = %parent, url = %url, "frame attached");
		Some(id)
	}

	/// Points `frame` at a new URL. Returns false if `frame` is unknown.
	pub fn set_frame_url(&self, frame: FrameId, url: impl Into<String>) -> bool {
		let url = url.into();
		if !self.state.write().frames.set_frame_url(frame, url.clone()) {
			return false;
		}
		debug!(frame = %frame, url = %url, "frame navigated");
		true
	}

	/// Attaches a resource to `frame` and notifies subscribers.
	///
	/// Returns `None` without notifying anyone if `frame` is unknown.
	pub fn add_resource(
		&self,
		frame: FrameId,
		url: impl Into<String>,
		resource_type: ResourceType,
	) -> Option<Arc<Resource>> {
		let resource = Arc::new(Resource::new(url, resource_type, frame));
		if !self.state.write().frames.add_resource(frame, resource.clone()) {
			return None;
		}
		trace!(frame = %frame, url = %resource.url, kind = %resource_type, "resource added");
		self.resource_added.emit(&resource);
		Some(resource)
	}

	/// Records a network request.
	pub fn record_request(&self, url: impl Into<String>, finished: bool) {
		self.state.write().network.record(url, finished);
	}

	/// Drops all frames, resources, and requests, keeping subscribers.
	pub fn clear(&self, main_url: impl Into<String>) {
		let mut state = self.state.write();
		state.frames = FrameTree::new(main_url);
		state.network.clear();
	}
}

impl ResourceSource for ResourceTracker {
	fn subscribe_resource_added(&self, listener: Listener<Arc<Resource>>) -> Subscription {
		self.resource_added.subscribe_shared(listener)
	}

	fn resource_for_url(&self, url: &str) -> Option<Arc<Resource>> {
		self.state.read().frames.resource_for_url(url).cloned()
	}

	fn has_request_for_url(&self, url: &str) -> bool {
		self.state.read().network.request_for_url(url).is_some()
	}

	fn frame_tree(&self) -> FrameTree {
		self.state.read().frames.clone()
	}
}

/// Relays scripts reported by the script engine.
#[derive(Default)]
pub struct ScriptTracker {
	script_parsed: EventEmitter<Arc<Script>>,
}

impl ScriptTracker {
	pub fn new() -> Self {
		Self::default()
	}

	/// Announces a parsed script to subscribers.
	pub fn parse_script(&self, script: Script) -> Arc<Script> {
		let script = Arc::new(script);
		trace!(id = %script.id, url = %script.source_url, "script parsed");
		self.script_parsed.emit(&script);
		script
	}
}

impl ScriptSource for ScriptTracker {
	fn subscribe_script_parsed(&self, listener: Listener<Arc<Script>>) -> Subscription {
		self.script_parsed.subscribe_shared(listener)
	}
}
