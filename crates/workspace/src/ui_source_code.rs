//! Addressable source units.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use vantage_model::{ArtifactRef, ResourceType};

/// Counter for generating unique unit IDs.
static NEXT_UNIT_ID: AtomicU64 = AtomicU64::new(1);

/// Unique identifier for a [`UiSourceCode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UnitId(pub u64);

impl UnitId {
	/// Generates a new unique unit ID.
	pub fn next() -> Self {
		Self(NEXT_UNIT_ID.fetch_add(1, Ordering::Relaxed))
	}
}

impl fmt::Display for UnitId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "unit#{}", self.0)
	}
}

/// A document, script, or stylesheet as the UI addresses it.
///
/// Units are immutable once built. The display URL may carry a ` (n)` suffix
/// distinguishing anonymous scripts that share a base URL; the backing
/// artifact always keeps the canonical URL.
#[derive(Debug, Clone)]
pub struct UiSourceCode {
	id: UnitId,
	url: String,
	artifact: ArtifactRef,
	editable: bool,
}

impl UiSourceCode {
	pub fn new(url: impl Into<String>, artifact: impl Into<ArtifactRef>, editable: bool) -> Self {
		Self {
			id: UnitId::next(),
			url: url.into(),
			artifact: artifact.into(),
			editable,
		}
	}

	pub fn id(&self) -> UnitId {
		self.id
	}

	/// Display key, possibly suffixed.
	pub fn url(&self) -> &str {
		&self.url
	}

	/// URL of the backing artifact, never suffixed.
	pub fn canonical_url(&self) -> &str {
		self.artifact.url()
	}

	pub fn content_type(&self) -> ResourceType {
		self.artifact.resource_type()
	}

	/// Whether the user may edit this unit's content in the workspace.
	pub fn is_editable(&self) -> bool {
		self.editable
	}
}
