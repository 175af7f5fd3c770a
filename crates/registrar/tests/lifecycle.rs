//! End-to-end behavior of an attached registrar driven by tracker events.

use std::sync::Arc;

use parking_lot::Mutex;
use pretty_assertions::assert_eq;
use vantage_model::{FrameId, ResourceTracker, ResourceType, Script, ScriptTracker};
use vantage_registrar::{ArtifactRegistrar, RegistrarConfig};
use vantage_workspace::{ProjectEvent, Workspace, WorkspaceHandle};

const PAGE: &str = "http://example.com/index.html";

struct Harness {
	workspace: Arc<Workspace>,
	resources: Arc<ResourceTracker>,
	scripts: Arc<ScriptTracker>,
	registrar: ArtifactRegistrar,
}

fn harness() -> Harness {
	let _ = tracing_subscriber::fmt::try_init();
	let workspace = Arc::new(Workspace::new());
	let resources = Arc::new(ResourceTracker::new(PAGE));
	let scripts = Arc::new(ScriptTracker::new());
	let registrar = ArtifactRegistrar::attach(
		RegistrarConfig::default(),
		workspace.clone(),
		resources.clone(),
		scripts.as_ref(),
	);
	Harness {
		workspace,
		resources,
		scripts,
		registrar,
	}
}

fn project_urls(workspace: &Workspace) -> Vec<String> {
	workspace
		.project()
		.ui_source_codes()
		.iter()
		.map(|unit| unit.url().to_owned())
		.collect()
}

#[test]
fn tracker_events_reach_the_project() {
	let h = harness();
	assert!(h.registrar.is_attached());

	h.resources.add_resource(FrameId::MAIN, PAGE, ResourceType::Document);
	h.resources
		.add_resource(FrameId::MAIN, "http://example.com/site.css", ResourceType::Stylesheet);
	h.resources
		.add_resource(FrameId::MAIN, "http://example.com/site.css", ResourceType::Stylesheet);
	h.scripts.parse_script(Script::new(PAGE));
	h.scripts.parse_script(Script::new(PAGE).at(3, 8));
	h.scripts.parse_script(Script::new("http://example.com/site.css"));

	assert_eq!(
		project_urls(&h.workspace),
		vec![
			PAGE.to_owned(),
			"http://example.com/site.css".to_owned(),
			"http://example.com/index.html (1)".to_owned(),
		]
	);
}

#[test]
fn workspace_reset_rebuilds_from_frame_tree() {
	let h = harness();
	let child = h.resources.add_frame(FrameId::MAIN, "http://ads.example.com/").unwrap();
	h.resources.add_resource(FrameId::MAIN, PAGE, ResourceType::Document);
	h.resources
		.add_resource(child, "http://ads.example.com/ad.js", ResourceType::Script);
	h.scripts.parse_script(Script::new(PAGE));
	h.scripts
		.parse_script(Script::new("http://example.com/generated.js").with_source_url_annotation());
	assert_eq!(h.workspace.project().len(), 4);

	h.workspace.reset();

	assert_eq!(
		project_urls(&h.workspace),
		vec!["http://ads.example.com/ad.js".to_owned(), PAGE.to_owned()]
	);
	assert_eq!(h.registrar.len(), 2);

	h.scripts.parse_script(Script::new(PAGE));
	assert_eq!(
		h.workspace.project().ui_source_codes().last().unwrap().url(),
		"http://example.com/index.html (1)"
	);
}

#[test]
fn reset_with_cleared_page_leaves_project_empty() {
	let h = harness();
	h.resources.add_resource(FrameId::MAIN, PAGE, ResourceType::Document);

	h.resources.clear("http://example.com/next.html");
	h.workspace.reset();

	assert!(h.workspace.project().is_empty());
	assert!(h.registrar.is_empty());
}

#[test]
fn dropping_registrar_stops_registration() {
	let h = harness();
	let Harness {
		workspace,
		resources,
		scripts,
		registrar,
	} = h;
	drop(registrar);

	resources.add_resource(FrameId::MAIN, PAGE, ResourceType::Document);
	scripts.parse_script(Script::new("http://example.com/a.js"));

	assert!(workspace.project().is_empty());
}

#[test]
fn detach_cancels_subscriptions() {
	let mut h = harness();
	h.registrar.detach();
	assert!(!h.registrar.is_attached());

	h.resources.add_resource(FrameId::MAIN, PAGE, ResourceType::Document);

	assert!(h.workspace.project().is_empty());
}

#[test]
fn project_listener_may_query_registrar() {
	let h = harness();
	let registrar = Arc::new(h.registrar);
	let seen = Arc::new(Mutex::new(Vec::new()));
	let _sub = {
		let registrar = registrar.clone();
		let seen = seen.clone();
		h.workspace.project().subscribe(Arc::new(move |event: &ProjectEvent| {
			if let ProjectEvent::UiSourceCodeAdded(unit) = event {
				seen.lock().push(registrar.unit_for_url(unit.canonical_url()).is_some());
			}
		}))
	};

	h.resources
		.add_resource(FrameId::MAIN, "http://example.com/a.js", ResourceType::Script);

	assert_eq!(*seen.lock(), vec![true]);
}
