//! Registration of tracked artifacts as workspace source units.
//!
//! [`ArtifactRegistrar`] turns resource-added and script-parsed notifications
//! into [`UiSourceCode`](vantage_workspace::UiSourceCode) units in the
//! workspace's active project, deduplicating by canonical URL and naming
//! dynamic anonymous scripts with a per-URL sequence suffix. After a project
//! reset it rebuilds the project from the current frame tree.
//!
//! ```ignore
//! let registrar = ArtifactRegistrar::attach(
//!     RegistrarConfig::default(),
//!     workspace.clone(),
//!     resources.clone(),
//!     scripts.as_ref(),
//! );
//! resources.add_resource(FrameId::MAIN, "http://example.com/app.js", ResourceType::Script);
//! assert!(registrar.unit_for_url("http://example.com/app.js").is_some());
//! ```

pub mod config;
mod outcome;
mod registrar;

pub use config::{ConfigError, RegistrarConfig};
pub use outcome::{Registration, SkipReason};
pub use registrar::ArtifactRegistrar;
