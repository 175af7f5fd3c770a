//! Resource and script registration.
//!
//! [`ArtifactRegistrar`] listens to the resource tracker, the script tracker,
//! and the workspace, and keeps exactly one [`UiSourceCode`] per canonical URL
//! in the active project.
//!
//! # Identity
//!
//! The identity index maps a canonical URL to the unit registered for it; the
//! first registration for a URL wins. Dynamic anonymous scripts (scripts with
//! no URL of their own, attributed to the document that created them) are the
//! exception: every one gets a fresh unit whose display URL carries a
//! per-URL sequence suffix, `"<url> (1)"`, `"<url> (2)"`, and so on.
//!
//! # Locking
//!
//! The index lock is released before a unit is handed to the project, so
//! project listeners may call back into the registrar.

use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use rustc_hash::FxHashMap as HashMap;
use tracing::{debug, trace};
use vantage_model::parsed_url;
use vantage_model::{
	ArtifactRef, Resource, ResourceSource, ResourceType, Script, ScriptSource, Subscription,
};
use vantage_workspace::{UiSourceCode, WorkspaceEvent, WorkspaceHandle};

use crate::config::RegistrarConfig;
use crate::outcome::{Registration, SkipReason};

/// How an eligible script is keyed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScriptIdentity {
	/// Keyed by its URL, first registration wins.
	Canonical,
	/// Always registered under a fresh suffixed display URL.
	DynamicAnonymous,
}

/// Registrar-owned identity state. Cleared wholesale on project reset.
#[derive(Default)]
struct IdentityIndex {
	/// Unit currently registered per canonical URL.
	units: HashMap<String, Arc<UiSourceCode>>,
	/// Last suffix issued per base URL for dynamic anonymous scripts.
	dynamic_script_index: HashMap<String, u32>,
}

impl IdentityIndex {
	/// Increments and returns the next suffix for `url`.
	fn next_dynamic_index(&mut self, url: &str) -> u32 {
		let index = self.dynamic_script_index.get(url).copied().unwrap_or(0) + 1;
		self.dynamic_script_index.insert(url.to_owned(), index);
		index
	}
}

struct Shared {
	config: RegistrarConfig,
	workspace: Arc<dyn WorkspaceHandle>,
	resources: Arc<dyn ResourceSource>,
	index: Mutex<IdentityIndex>,
}

impl Shared {
	fn resource_added(&self, resource: &Arc<Resource>) -> Registration {
		let unit = {
			let mut index = self.index.lock();
			if index.units.contains_key(&resource.url) {
				return Registration::Skipped(SkipReason::AlreadyRegistered);
			}
			let editable = match resource.resource_type {
				ResourceType::Stylesheet | ResourceType::Script => true,
				ResourceType::Document => self.config.editable_documents,
				other => return Registration::Skipped(SkipReason::UnsupportedType(other)),
			};
			let unit = Arc::new(UiSourceCode::new(
				resource.url.clone(),
				ArtifactRef::Resource(resource.clone()),
				editable,
			));
			index.units.insert(resource.url.clone(), unit.clone());
			unit
		};

		debug!(url = %resource.url, kind = %resource.resource_type, editable = unit.is_editable(), "registered resource");
		self.workspace.project().add_ui_source_code(unit.clone());
		Registration::Registered(unit)
	}

	fn script_parsed(&self, script: &Arc<Script>) -> Registration {
		let identity = match self.classify_script(script) {
			Ok(identity) => identity,
			Err(reason) => {
				trace!(id = %script.id, url = %script.source_url, ?reason, "script skipped");
				return Registration::Skipped(reason);
			}
		};

		let unit = {
			let mut index = self.index.lock();
			let url = &script.source_url;
			let display_url = match identity {
				ScriptIdentity::Canonical if index.units.contains_key(url) => {
					return Registration::Skipped(SkipReason::AlreadyRegistered);
				}
				ScriptIdentity::Canonical => url.clone(),
				ScriptIdentity::DynamicAnonymous => {
					format!("{url} ({})", index.next_dynamic_index(url))
				}
			};
			let unit = Arc::new(UiSourceCode::new(
				display_url,
				ArtifactRef::Script(script.clone()),
				true,
			));
			index.units.insert(url.clone(), unit.clone());
			unit
		};

		debug!(id = %script.id, url = unit.url(), ?identity, "registered script");
		self.workspace.project().add_ui_source_code(unit.clone());
		Registration::Registered(unit)
	}

	/// Applies the script eligibility filters in order.
	fn classify_script(&self, script: &Script) -> Result<ScriptIdentity, SkipReason> {
		if !script.has_url() {
			return Err(SkipReason::NoUrl);
		}
		if script.is_inline_script() {
			return Err(SkipReason::InlineScript);
		}

		let url = script.source_url.as_str();
		let mut identity = ScriptIdentity::Canonical;
		if !script.has_source_url && !script.is_content_script {
			match self.resources.resource_for_url(url) {
				Some(resource) if resource.resource_type == ResourceType::Document => {
					identity = ScriptIdentity::DynamicAnonymous;
				}
				Some(_) => return Err(SkipReason::TrackedAsResource),
				None if self.resources.has_request_for_url(url) => {
					return Err(SkipReason::TrackedAsResource);
				}
				None => {}
			}
		}

		if script.is_content_script
			&& !script.has_source_url
			&& self.config.filter_embedder_content_scripts
			&& !parsed_url::has_host(url)
		{
			return Err(SkipReason::EmbedderContentScript);
		}

		Ok(identity)
	}

	fn project_will_reset(&self) {
		let mut index = self.index.lock();
		debug!(units = index.units.len(), "flushing identity index");
		*index = IdentityIndex::default();
	}

	fn project_did_reset(&self) -> usize {
		if !self.config.repopulate_on_reset {
			return 0;
		}
		let tree = self.resources.frame_tree();
		let mut registered = 0;
		for resource in tree.resources_children_first() {
			if self.resource_added(resource).is_registered() {
				registered += 1;
			}
		}
		debug!(frames = tree.len(), registered, "repopulated project from frame tree");
		registered
	}
}

/// Keeps the workspace project in sync with tracked resources and scripts.
///
/// Built with [`ArtifactRegistrar::attach`], which subscribes to every
/// producer. The subscriptions live as long as the registrar; dropping it or
/// calling [`ArtifactRegistrar::detach`] stops all further registration.
pub struct ArtifactRegistrar {
	shared: Arc<Shared>,
	subscriptions: Vec<Subscription>,
}

impl ArtifactRegistrar {
	/// Creates a registrar that is not subscribed to anything.
	///
	/// Events must be delivered through the handler methods.
	pub fn new(
		config: RegistrarConfig,
		workspace: Arc<dyn WorkspaceHandle>,
		resources: Arc<dyn ResourceSource>,
	) -> Self {
		Self {
			shared: Arc::new(Shared {
				config,
				workspace,
				resources,
				index: Mutex::new(IdentityIndex::default()),
			}),
			subscriptions: Vec::new(),
		}
	}

	/// Creates a registrar subscribed to the workspace lifecycle, resource
	/// additions, and parsed scripts.
	pub fn attach(
		config: RegistrarConfig,
		workspace: Arc<dyn WorkspaceHandle>,
		resources: Arc<dyn ResourceSource>,
		scripts: &dyn ScriptSource,
	) -> Self {
		let mut registrar = Self::new(config, workspace.clone(), resources.clone());
		let weak = Arc::downgrade(&registrar.shared);

		registrar.subscriptions = vec![
			workspace.subscribe(Arc::new({
				let weak = weak.clone();
				move |event: &WorkspaceEvent| {
					with_shared(&weak, |shared| match event {
						WorkspaceEvent::ProjectWillReset => shared.project_will_reset(),
						WorkspaceEvent::ProjectDidReset => {
							shared.project_did_reset();
						}
					});
				}
			})),
			resources.subscribe_resource_added(Arc::new({
				let weak = weak.clone();
				move |resource: &Arc<Resource>| {
					with_shared(&weak, |shared| {
						shared.resource_added(resource);
					});
				}
			})),
			scripts.subscribe_script_parsed(Arc::new(move |script: &Arc<Script>| {
				with_shared(&weak, |shared| {
					shared.script_parsed(script);
				});
			})),
		];
		debug!("registrar attached");
		registrar
	}

	/// Cancels every subscription. Direct handler calls keep working.
	pub fn detach(&mut self) {
		self.subscriptions.clear();
	}

	/// Returns true while subscribed to the producers.
	pub fn is_attached(&self) -> bool {
		!self.subscriptions.is_empty()
	}

	/// Handles a resource attached to a frame.
	pub fn resource_added(&self, resource: &Arc<Resource>) -> Registration {
		self.shared.resource_added(resource)
	}

	/// Handles a script reported by the script engine.
	pub fn script_parsed(&self, script: &Arc<Script>) -> Registration {
		self.shared.script_parsed(script)
	}

	/// Forgets every identity and sequence number.
	pub fn project_will_reset(&self) {
		self.shared.project_will_reset();
	}

	/// Registers every resource in the current frame tree.
	///
	/// Returns the number of units registered.
	pub fn project_did_reset(&self) -> usize {
		self.shared.project_did_reset()
	}

	/// Returns the unit registered under canonical `url`.
	///
	/// For dynamic anonymous scripts this is the most recent one.
	pub fn unit_for_url(&self, url: &str) -> Option<Arc<UiSourceCode>> {
		self.shared.index.lock().units.get(url).cloned()
	}

	/// Number of canonical URLs in the identity index.
	pub fn len(&self) -> usize {
		self.shared.index.lock().units.len()
	}

	pub fn is_empty(&self) -> bool {
		self.shared.index.lock().units.is_empty()
	}

	pub fn config(&self) -> &RegistrarConfig {
		&self.shared.config
	}
}

fn with_shared(weak: &Weak<Shared>, f: impl FnOnce(&Shared)) {
	if let Some(shared) = weak.upgrade() {
		f(&shared);
	}
}
