//! Recorded tracker traces and their replay.
//!
//! A trace is a JSON document listing tracker and workspace events in the
//! order they were observed:
//!
//! ```json
//! { "events": [
//!     { "kind": "frame", "name": "main", "url": "http://example.com/" },
//!     { "kind": "resource", "frame": "main", "url": "http://example.com/", "type": "document" },
//!     { "kind": "script", "url": "http://example.com/" },
//!     { "kind": "reset" }
//! ] }
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;

use rustc_hash::FxHashMap as HashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};
use vantage_model::{FrameId, ResourceTracker, ResourceType, Script, ScriptTracker};
use vantage_registrar::{ArtifactRegistrar, RegistrarConfig};
use vantage_workspace::{Workspace, WorkspaceHandle};

/// Errors that can occur when loading or replaying a trace.
#[derive(Debug, Error)]
pub enum TraceError {
	/// Error reading the trace file.
	#[error("I/O error reading {path}: {error}")]
	Io {
		/// Path to the file that failed to read.
		path: PathBuf,
		/// The underlying I/O error.
		error: std::io::Error,
	},

	/// The trace is not valid JSON or has an unknown event shape.
	#[error("invalid trace: {0}")]
	Json(#[from] serde_json::Error),

	/// An event names a frame that was never declared.
	#[error("event {index}: unknown frame '{name}'")]
	UnknownFrame { index: usize, name: String },

	/// A frame name was declared twice.
	#[error("event {index}: frame '{name}' declared twice")]
	DuplicateFrame { index: usize, name: String },

	/// A second parentless frame was declared.
	#[error("event {index}: main frame already declared")]
	DuplicateMainFrame { index: usize },
}

/// One recorded event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum TraceEvent {
	/// A frame was attached. Without a parent it names the main frame.
	Frame {
		name: String,
		#[serde(default)]
		parent: Option<String>,
		url: String,
	},
	/// A resource finished loading into a frame.
	Resource {
		frame: String,
		url: String,
		#[serde(rename = "type")]
		resource_type: ResourceType,
	},
	/// A network request was observed.
	Request {
		url: String,
		#[serde(default)]
		finished: bool,
	},
	/// The script engine parsed a script.
	Script {
		#[serde(default)]
		url: String,
		#[serde(default)]
		has_source_url: bool,
		#[serde(default)]
		is_content_script: bool,
		#[serde(default)]
		line: u32,
		#[serde(default)]
		column: u32,
	},
	/// The workspace project was reset.
	Reset,
}

/// A recorded event sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trace {
	pub events: Vec<TraceEvent>,
}

impl Trace {
	/// Parses a trace from JSON text.
	pub fn from_json_str(input: &str) -> Result<Self, TraceError> {
		Ok(serde_json::from_str(input)?)
	}

	/// Loads a trace from a JSON file.
	pub fn load(path: impl AsRef<Path>) -> Result<Self, TraceError> {
		let path = path.as_ref();
		let content = std::fs::read_to_string(path).map_err(|error| TraceError::Io {
			path: path.to_path_buf(),
			error,
		})?;
		Self::from_json_str(&content)
	}
}

/// A registered unit as reported after replay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnitSummary {
	pub url: String,
	pub editable: bool,
	#[serde(rename = "type")]
	pub resource_type: ResourceType,
}

/// Live collaborators wired to an attached registrar.
pub struct Replayer {
	workspace: Arc<Workspace>,
	resources: Arc<ResourceTracker>,
	scripts: Arc<ScriptTracker>,
	registrar: ArtifactRegistrar,
	frames: HashMap<String, FrameId>,
	main_declared: bool,
}

impl Replayer {
	pub fn new(config: RegistrarConfig) -> Self {
		let workspace = Arc::new(Workspace::new());
		let resources = Arc::new(ResourceTracker::new("about:blank"));
		let scripts = Arc::new(ScriptTracker::new());
		let registrar = ArtifactRegistrar::attach(config, workspace.clone(), resources.clone(), scripts.as_ref());
		Self {
			workspace,
			resources,
			scripts,
			registrar,
			frames: HashMap::default(),
			main_declared: false,
		}
	}

	/// Applies every event of `trace` in order.
	///
	/// Stops at the first malformed event; earlier events stay applied.
	pub fn replay(&mut self, trace: &Trace) -> Result<(), TraceError> {
		for (index, event) in trace.events.iter().enumerate() {
			self.apply(index, event)?;
		}
		info!(events = trace.events.len(), units = self.workspace.project().len(), "trace replayed");
		Ok(())
	}

	fn apply(&mut self, index: usize, event: &TraceEvent) -> Result<(), TraceError> {
		debug!(index, ?event, "applying trace event");
		match event {
			TraceEvent::Frame { name, parent, url } => {
				if self.frames.contains_key(name) {
					return Err(TraceError::DuplicateFrame {
						index,
						name: name.clone(),
					});
				}
				let id = match parent {
					None if self.main_declared => return Err(TraceError::DuplicateMainFrame { index }),
					None => {
						self.main_declared = true;
						self.resources.set_frame_url(FrameId::MAIN, url.clone());
						FrameId::MAIN
					}
					Some(parent) => {
						let parent = self.frame(index, parent)?;
						self.resources
							.add_frame(parent, url.clone())
							.ok_or_else(|| TraceError::UnknownFrame {
								index,
								name: name.clone(),
							})?
					}
				};
				self.frames.insert(name.clone(), id);
			}
			TraceEvent::Resource {
				frame,
				url,
				resource_type,
			} => {
				let frame = self.frame(index, frame)?;
				self.resources.add_resource(frame, url.clone(), *resource_type);
			}
			TraceEvent::Request { url, finished } => {
				self.resources.record_request(url.clone(), *finished);
			}
			TraceEvent::Script {
				url,
				has_source_url,
				is_content_script,
				line,
				column,
			} => {
				let mut script = Script::new(url.clone()).at(*line, *column);
				script.has_source_url = *has_source_url;
				script.is_content_script = *is_content_script;
				self.scripts.parse_script(script);
			}
			TraceEvent::Reset => self.workspace.reset(),
		}
		Ok(())
	}

	fn frame(&self, index: usize, name: &str) -> Result<FrameId, TraceError> {
		self.frames
			.get(name)
			.copied()
			.ok_or_else(|| TraceError::UnknownFrame {
				index,
				name: name.to_owned(),
			})
	}

	/// Units in the project, in registration order.
	pub fn units(&self) -> Vec<UnitSummary> {
		self.workspace
			.project()
			.ui_source_codes()
			.iter()
			.map(|unit| UnitSummary {
				url: unit.url().to_owned(),
				editable: unit.is_editable(),
				resource_type: unit.content_type(),
			})
			.collect()
	}

	pub fn registrar(&self) -> &ArtifactRegistrar {
		&self.registrar
	}
}
