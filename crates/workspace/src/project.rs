//! Append-only store of source units.

use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashMap as HashMap;
use tracing::debug;
use vantage_model::{EventEmitter, Listener, Subscription};

use crate::ui_source_code::{UiSourceCode, UnitId};

/// Change notification emitted by a [`Project`].
#[derive(Debug, Clone)]
pub enum ProjectEvent {
	/// A unit was appended.
	UiSourceCodeAdded(Arc<UiSourceCode>),
	/// All units were removed.
	Reset,
}

#[derive(Default)]
struct ProjectState {
	/// Units in insertion order.
	units: Vec<Arc<UiSourceCode>>,
	/// Latest unit per display URL.
	by_url: HashMap<String, Arc<UiSourceCode>>,
	/// Reverse index for lookup by ID.
	by_id: HashMap<UnitId, Arc<UiSourceCode>>,
}

/// The set of units the UI can navigate to.
///
/// Units are only ever appended; removal happens wholesale through
/// [`Project::reset`].
#[derive(Default)]
pub struct Project {
	state: RwLock<ProjectState>,
	events: EventEmitter<ProjectEvent>,
}

impl Project {
	pub fn new() -> Self {
		Self::default()
	}

	/// Appends `unit` and notifies subscribers.
	pub fn add_ui_source_code(&self, unit: Arc<UiSourceCode>) {
		{
			let mut state = self.state.write();
			state.units.push(unit.clone());
			state.by_url.insert(unit.url().to_owned(), unit.clone());
			state.by_id.insert(unit.id(), unit.clone());
		}
		debug!(id = %unit.id(), url = unit.url(), editable = unit.is_editable(), "unit added to project");
		self.events.emit(&ProjectEvent::UiSourceCodeAdded(unit));
	}

	/// Removes every unit and notifies subscribers.
	pub fn reset(&self) {
		let removed = {
			let mut state = self.state.write();
			let removed = state.units.len();
			*state = ProjectState::default();
			removed
		};
		debug!(removed, "project reset");
		self.events.emit(&ProjectEvent::Reset);
	}

	/// Returns the most recently added unit with display `url`.
	pub fn ui_source_code(&self, url: &str) -> Option<Arc<UiSourceCode>> {
		self.state.read().by_url.get(url).cloned()
	}

	pub fn ui_source_code_by_id(&self, id: UnitId) -> Option<Arc<UiSourceCode>> {
		self.state.read().by_id.get(&id).cloned()
	}

	/// Returns all units in insertion order.
	pub fn ui_source_codes(&self) -> Vec<Arc<UiSourceCode>> {
		self.state.read().units.clone()
	}

	pub fn len(&self) -> usize {
		self.state.read().units.len()
	}

	pub fn is_empty(&self) -> bool {
		self.state.read().units.is_empty()
	}

	/// Subscribes to project changes.
	pub fn subscribe(&self, listener: Listener<ProjectEvent>) -> Subscription {
		self.events.subscribe_shared(listener)
	}
}
