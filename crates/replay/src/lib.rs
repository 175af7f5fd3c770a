//! Trace replay for the artifact registrar.
//!
//! Feeds a recorded sequence of frame, resource, request, script, and reset
//! events through in-memory trackers wired to an attached
//! [`ArtifactRegistrar`](vantage_registrar::ArtifactRegistrar), then reports
//! the units that ended up in the project.

pub mod trace;

pub use trace::{Replayer, Trace, TraceError, TraceEvent, UnitSummary};
