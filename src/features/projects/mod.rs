//! Project file browser and discussion board.
//!
//! Files live only in memory; uploads are truncated on the way in.

pub mod project;
pub mod workspace;

pub use project::{language_for, Comment, FileKind, Project, ProjectFile};
pub use workspace::{Workspace, DEFAULT_UPLOAD_LIMIT};
