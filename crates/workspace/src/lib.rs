//! Project workspace for addressable source units.
//!
//! A [`Workspace`] owns one [`Project`], the append-only set of
//! [`UiSourceCode`] units an editor-like UI lists and opens. Providers feed
//! the project and listen to [`WorkspaceEvent`]s to rebuild after a reset.

pub mod project;
pub mod ui_source_code;
pub mod workspace;

pub use project::{Project, ProjectEvent};
pub use ui_source_code::{UiSourceCode, UnitId};
pub use workspace::{Workspace, WorkspaceEvent, WorkspaceHandle};
