//! Capability interfaces of the artifact producers.
//!
//! Consumers depend on these traits instead of concrete trackers so hosts can
//! plug in their own event sources. [`crate::tracker`] provides in-memory
//! implementations.

use std::sync::Arc;

use crate::artifact::{Resource, Script};
use crate::event::{Listener, Subscription};
use crate::frame::FrameTree;

/// Producer of network resources.
pub trait ResourceSource: Send + Sync {
	/// Subscribes to resources as they are attached to a frame.
	fn subscribe_resource_added(&self, listener: Listener<Arc<Resource>>) -> Subscription;

	/// Looks up a tracked resource by canonical URL.
	fn resource_for_url(&self, url: &str) -> Option<Arc<Resource>>;

	/// Returns true if the network log holds a request for `url`, finished or not.
	fn has_request_for_url(&self, url: &str) -> bool;

	/// Returns a snapshot of the current frame hierarchy.
	fn frame_tree(&self) -> FrameTree;
}

/// Producer of parsed scripts.
pub trait ScriptSource: Send + Sync {
	/// Subscribes to scripts as the engine finishes parsing them.
	fn subscribe_script_parsed(&self, listener: Listener<Arc<Script>>) -> Subscription;
}
