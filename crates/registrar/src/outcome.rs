//! Per-event registration outcomes.

use std::sync::Arc;

use vantage_model::ResourceType;
use vantage_workspace::UiSourceCode;

/// Why an event did not produce a unit.
///
/// Skips are expected, silent no-ops, not failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
	/// A unit already exists for the canonical URL.
	AlreadyRegistered,
	/// The resource type has no unit representation.
	UnsupportedType(ResourceType),
	/// The script has no URL.
	NoUrl,
	/// The script is embedded in a document and shown through it.
	InlineScript,
	/// A resource or network request already covers the script's URL.
	TrackedAsResource,
	/// A content script without a host, injected by the embedder.
	EmbedderContentScript,
}

/// Result of handling one resource or script event.
#[derive(Debug, Clone)]
pub enum Registration {
	/// A new unit was added to the project.
	Registered(Arc<UiSourceCode>),
	/// Nothing was added.
	Skipped(SkipReason),
}

impl Registration {
	pub fn is_registered(&self) -> bool {
		matches!(self, Self::Registered(_))
	}

	/// Returns the new unit, if any.
	pub fn unit(&self) -> Option<&Arc<UiSourceCode>> {
		match self {
			Self::Registered(unit) => Some(unit),
			Self::Skipped(_) => None,
		}
	}

	pub fn skip_reason(&self) -> Option<SkipReason> {
		match self {
			Self::Registered(_) => None,
			Self::Skipped(reason) => Some(*reason),
		}
	}
}
