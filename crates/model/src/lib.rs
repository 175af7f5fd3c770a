//! Artifact model for source tracking.
//!
//! This crate defines what the trackers produce and how consumers hear about
//! it:
//! - [`artifact`]: resources, parsed scripts, and the [`ArtifactRef`] handle.
//! - [`frame`]: the arena-indexed frame hierarchy resources attach to.
//! - [`event`]: synchronous emitters with scoped [`Subscription`] guards.
//! - [`source`]: capability traits consumers are written against.
//! - [`tracker`]: in-memory implementations of those capabilities.

pub mod artifact;
pub mod event;
pub mod frame;
pub mod parsed_url;
pub mod source;
pub mod tracker;

pub use artifact::{ArtifactRef, Resource, ResourceType, Script, ScriptId};
pub use event::{EventEmitter, Listener, Subscription};
pub use frame::{Frame, FrameId, FrameTree};
pub use source::{ResourceSource, ScriptSource};
pub use tracker::{NetworkLog, NetworkRequest, ResourceTracker, ScriptTracker};
