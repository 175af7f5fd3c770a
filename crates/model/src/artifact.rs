//! Artifacts produced by the resource and script trackers.
//!
//! Artifacts are owned by the trackers and shared read-only through [`Arc`].
//! Nothing in this module mutates an artifact after construction.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

use crate::frame::FrameId;

/// Counter for generating unique script IDs.
static NEXT_SCRIPT_ID: AtomicU64 = AtomicU64::new(1);

/// Content type of a tracked resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResourceType {
	Document,
	Stylesheet,
	Image,
	Font,
	Script,
	Xhr,
	Media,
	WebSocket,
	Other,
}

impl ResourceType {
	/// Returns the lowercase name used in traces and logs.
	pub const fn name(self) -> &'static str {
		match self {
			Self::Document => "document",
			Self::Stylesheet => "stylesheet",
			Self::Image => "image",
			Self::Font => "font",
			Self::Script => "script",
			Self::Xhr => "xhr",
			Self::Media => "media",
			Self::WebSocket => "web-socket",
			Self::Other => "other",
		}
	}
}

impl fmt::Display for ResourceType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}

/// A network resource attached to a frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resource {
	/// Canonical URL of the resource.
	pub url: String,
	/// Content type reported by the network layer.
	pub resource_type: ResourceType,
	/// Frame the resource was loaded into.
	pub frame_id: FrameId,
}

impl Resource {
	pub fn new(url: impl Into<String>, resource_type: ResourceType, frame_id: FrameId) -> Self {
		Self {
			url: url.into(),
			resource_type,
			frame_id,
		}
	}
}

/// Unique identifier for a parsed script.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScriptId(pub u64);

impl ScriptId {
	/// Generates a new unique script ID.
	pub fn next() -> Self {
		Self(NEXT_SCRIPT_ID.fetch_add(1, Ordering::Relaxed))
	}
}

impl fmt::Display for ScriptId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "script#{}", self.0)
	}
}

/// A script reported by the script tracker after parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Script {
	pub id: ScriptId,
	/// URL the script was attributed to. Empty when the engine reported none.
	pub source_url: String,
	/// Whether the URL comes from an explicit `sourceURL` annotation.
	pub has_source_url: bool,
	/// Whether the script was injected by an extension or the embedder.
	pub is_content_script: bool,
	/// Zero-based line of the script's first character within its resource.
	pub start_line: u32,
	/// Zero-based column of the script's first character within its resource.
	pub start_column: u32,
}

impl Script {
	/// Creates a standalone script starting at the beginning of its resource.
	pub fn new(source_url: impl Into<String>) -> Self {
		Self {
			id: ScriptId::next(),
			source_url: source_url.into(),
			has_source_url: false,
			is_content_script: false,
			start_line: 0,
			start_column: 0,
		}
	}

	/// Marks the URL as coming from a `sourceURL` annotation.
	pub fn with_source_url_annotation(mut self) -> Self {
		self.has_source_url = true;
		self
	}

	/// Marks the script as injected content.
	pub fn content_script(mut self) -> Self {
		self.is_content_script = true;
		self
	}

	/// Places the script at an offset inside its resource.
	pub fn at(mut self, line: u32, column: u32) -> Self {
		self.start_line = line;
		self.start_column = column;
		self
	}

	/// Returns true when the script has a URL to attribute it to.
	pub fn has_url(&self) -> bool {
		!self.source_url.is_empty()
	}

	/// Returns true for a script embedded at an offset inside its owning document.
	///
	/// Such scripts are surfaced through the document itself. A script carrying
	/// an explicit `sourceURL` annotation is never inline.
	pub fn is_inline_script(&self) -> bool {
		!self.has_source_url && (self.start_line != 0 || self.start_column != 0)
	}
}

/// The artifact backing a registered unit.
#[derive(Debug, Clone)]
pub enum ArtifactRef {
	Resource(Arc<Resource>),
	Script(Arc<Script>),
}

impl ArtifactRef {
	/// Returns the canonical URL of the underlying artifact.
	pub fn url(&self) -> &str {
		match self {
			Self::Resource(resource) => &resource.url,
			Self::Script(script) => &script.source_url,
		}
	}

	/// Returns the resource type, treating parsed scripts as [`ResourceType::Script`].
	pub fn resource_type(&self) -> ResourceType {
		match self {
			Self::Resource(resource) => resource.resource_type,
			Self::Script(_) => ResourceType::Script,
		}
	}
}

impl From<Arc<Resource>> for ArtifactRef {
	fn from(resource: Arc<Resource>) -> Self {
		Self::Resource(resource)
	}
}

impl From<Arc<Script>> for ArtifactRef {
	fn from(script: Arc<Script>) -> Self {
		Self::Script(script)
	}
}
