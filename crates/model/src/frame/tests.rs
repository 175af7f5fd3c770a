use pretty_assertions::assert_eq;

use super::*;
use crate::artifact::ResourceType;

fn resource(url: &str, frame: FrameId) -> Arc<Resource> {
	typed(url, ResourceType::Script, frame)
}

fn typed(url: &str, resource_type: ResourceType, frame: FrameId) -> Arc<Resource> {
	Arc::new(Resource::new(url, resource_type, frame))
}

#[test]
fn main_frame_exists_from_construction() {
	let tree = FrameTree::new("http://example.com/");
	assert_eq!(tree.len(), 1);
	assert_eq!(tree.main_frame().id, FrameId::MAIN);
	assert!(tree.main_frame().parent.is_none());
}

#[test]
fn add_frame_rejects_unknown_parent() {
	let mut tree = FrameTree::new("http://example.com/");
	assert!(tree.add_frame(FrameId(9), "http://example.com/child").is_none());
	assert!(!tree.add_resource(FrameId(9), resource("a.js", FrameId(9))));
}

#[test]
fn children_first_visits_every_frame_once() {
	let mut tree = FrameTree::new("main");
	let a = tree.add_frame(FrameId::MAIN, "a").unwrap();
	let b = tree.add_frame(FrameId::MAIN, "b").unwrap();
	let a1 = tree.add_frame(a, "a1").unwrap();
	let a1x = tree.add_frame(a1, "a1x").unwrap();

	let order = tree.children_first();

	assert_eq!(order, vec![a1x, a1, a, b, FrameId::MAIN]);
}

#[test]
fn deep_nesting_does_not_recurse() {
	let mut tree = FrameTree::new("main");
	let mut parent = FrameId::MAIN;
	for depth in 0..50_000 {
		parent = tree.add_frame(parent, format!("frame-{depth}")).unwrap();
	}

	let order = tree.children_first();

	assert_eq!(order.len(), 50_001);
	assert_eq!(order.first(), Some(&parent));
	assert_eq!(order.last(), Some(&FrameId::MAIN));
}

#[test]
fn resources_are_listed_children_first() {
	let mut tree = FrameTree::new("main");
	let child = tree.add_frame(FrameId::MAIN, "child").unwrap();
	tree.add_resource(FrameId::MAIN, resource("main.js", FrameId::MAIN));
	tree.add_resource(child, resource("child.js", child));
	tree.add_resource(child, resource("child2.js", child));

	let urls: Vec<&str> = tree
		.resources_children_first()
		.map(|r| r.url.as_str())
		.collect();

	assert_eq!(urls, vec!["child.js", "child2.js", "main.js"]);
}

#[test]
fn resource_lookup_by_url() {
	let mut tree = FrameTree::new("main");
	let child = tree.add_frame(FrameId::MAIN, "child").unwrap();
	tree.add_resource(child, resource("child.js", child));

	assert_eq!(tree.resource_for_url("child.js").map(|r| r.frame_id), Some(child));
	assert!(tree.resource_for_url("missing.js").is_none());
}

#[test]
fn later_resource_replaces_same_url_in_frame() {
	let mut tree = FrameTree::new("main");
	tree.add_resource(FrameId::MAIN, typed("page.html", ResourceType::Xhr, FrameId::MAIN));
	tree.add_resource(FrameId::MAIN, resource("app.js", FrameId::MAIN));
	tree.add_resource(FrameId::MAIN, typed("page.html", ResourceType::Document, FrameId::MAIN));

	let resources: Vec<(&str, ResourceType)> = tree
		.main_frame()
		.resources()
		.iter()
		.map(|r| (r.url.as_str(), r.resource_type))
		.collect();

	assert_eq!(
		resources,
		vec![("page.html", ResourceType::Document), ("app.js", ResourceType::Script)]
	);
	assert_eq!(
		tree.resource_for_url("page.html").map(|r| r.resource_type),
		Some(ResourceType::Document)
	);
}

#[test]
fn lookup_prefers_frame_over_its_children() {
	let mut tree = FrameTree::new("main");
	let a = tree.add_frame(FrameId::MAIN, "a").unwrap();
	let a1 = tree.add_frame(a, "a1").unwrap();
	let b = tree.add_frame(FrameId::MAIN, "b").unwrap();
	tree.add_resource(a1, typed("shared", ResourceType::Xhr, a1));
	tree.add_resource(b, typed("shared", ResourceType::Image, b));
	tree.add_resource(a, typed("shared", ResourceType::Document, a));

	assert_eq!(tree.resource_for_url("shared").map(|r| r.frame_id), Some(a));

	tree.add_resource(FrameId::MAIN, typed("shared", ResourceType::Stylesheet, FrameId::MAIN));
	assert_eq!(tree.resource_for_url("shared").map(|r| r.frame_id), Some(FrameId::MAIN));
}

#[test]
fn frame_url_can_be_updated() {
	let mut tree = FrameTree::new("about:blank");
	assert!(tree.set_frame_url(FrameId::MAIN, "http://example.com/"));
	assert_eq!(tree.main_frame().url, "http://example.com/");
	assert!(!tree.set_frame_url(FrameId(4), "x"));
}
