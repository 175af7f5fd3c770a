//! Workspace owning the active project and its reset lifecycle.

use std::sync::Arc;

use tracing::info;
use vantage_model::{EventEmitter, Listener, Subscription};

use crate::project::Project;

/// Lifecycle notification emitted around a project reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkspaceEvent {
	/// The project is about to drop its units.
	ProjectWillReset,
	/// The project finished resetting and is empty.
	ProjectDidReset,
}

/// Capability surface of a workspace as seen by unit providers.
pub trait WorkspaceHandle: Send + Sync {
	/// Subscribes to reset lifecycle events.
	fn subscribe(&self, listener: Listener<WorkspaceEvent>) -> Subscription;

	/// Returns the active project.
	fn project(&self) -> Arc<Project>;
}

/// Workspace with a single project.
#[derive(Default)]
pub struct Workspace {
	project: Arc<Project>,
	events: EventEmitter<WorkspaceEvent>,
}

impl Workspace {
	pub fn new() -> Self {
		Self::default()
	}

	/// Resets the project.
	///
	/// [`WorkspaceEvent::ProjectWillReset`] is delivered to every listener
	/// before the project drops its units, and
	/// [`WorkspaceEvent::ProjectDidReset`] only after the project is empty.
	pub fn reset(&self) {
		info!(units = self.project.len(), "resetting workspace project");
		self.events.emit(&WorkspaceEvent::ProjectWillReset);
		self.project.reset();
		self.events.emit(&WorkspaceEvent::ProjectDidReset);
	}
}

impl WorkspaceHandle for Workspace {
	fn subscribe(&self, listener: Listener<WorkspaceEvent>) -> Subscription {
		self.events.subscribe_shared(listener)
	}

	fn project(&self) -> Arc<Project> {
		self.project.clone()
	}
}
