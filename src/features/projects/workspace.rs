//! The in-memory project workspace.
//!
//! New files, folders and uploads always land in the first project, the
//! default workspace.

use chrono::{DateTime, Duration, Utc};

use super::project::{Comment, Project, ProjectFile};
use crate::core::IdSource;
use crate::error::StaffdeskError;

/// Default number of characters kept from an uploaded file.
pub const DEFAULT_UPLOAD_LIMIT: usize = 500;

/// All projects visible to the user.
#[derive(Debug)]
pub struct Workspace {
    projects: Vec<Project>,
    upload_limit: usize,
    ids: IdSource,
}

impl Workspace {
    /// Create a workspace over `projects`.
    #[must_use]
    pub fn new(projects: Vec<Project>, upload_limit: usize) -> Self {
        Self {
            projects,
            upload_limit,
            ids: IdSource::new(),
        }
    }

    /// A workspace with one sample project.
    #[must_use]
    pub fn seeded(upload_limit: usize, now: DateTime<Utc>) -> Self {
        let project = Project {
            id: "p1".to_string(),
            name: "Alpha Protocol".to_string(),
            description: "Core system architecture for the new platform.".to_string(),
            files: vec![
                ProjectFile::file(
                    "f1".to_string(),
                    "main.py",
                    "def init_system():\n    print(\"System Online\")\n".to_string(),
                ),
                ProjectFile::folder("f2".to_string(), "docs"),
            ],
            comments: vec![Comment {
                id: "c1".to_string(),
                author: "Admin".to_string(),
                text: "Please review the security module.".to_string(),
                timestamp: now - Duration::seconds(100),
            }],
        };
        Self::new(vec![project], upload_limit)
    }

    /// All projects.
    #[must_use]
    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    /// The default project.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the workspace has no projects.
    pub fn default_project(&self) -> Result<&Project, StaffdeskError> {
        self.projects
            .first()
            .ok_or_else(|| StaffdeskError::NotFound("no project in workspace".to_string()))
    }

    fn default_project_mut(&mut self) -> Result<&mut Project, StaffdeskError> {
        self.projects
            .first_mut()
            .ok_or_else(|| StaffdeskError::NotFound("no project in workspace".to_string()))
    }

    /// Add an empty file to the default project.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a blank name.
    pub fn create_file(
        &mut self,
        name: &str,
        now: DateTime<Utc>,
    ) -> Result<&ProjectFile, StaffdeskError> {
        let name = entry_name(name)?;
        let file = ProjectFile::file(self.ids.next(now), &name, String::new());
        self.push(file)
    }

    /// Add a folder to the default project.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a blank name.
    pub fn create_folder(
        &mut self,
        name: &str,
        now: DateTime<Utc>,
    ) -> Result<&ProjectFile, StaffdeskError> {
        let name = entry_name(name)?;
        let folder = ProjectFile::folder(self.ids.next(now), &name);
        self.push(folder)
    }

    /// Add an uploaded file, keeping only the first `upload_limit` characters.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a blank name.
    pub fn upload(
        &mut self,
        name: &str,
        content: &str,
        now: DateTime<Utc>,
    ) -> Result<&ProjectFile, StaffdeskError> {
        let name = entry_name(name)?;
        let kept: String = content.chars().take(self.upload_limit).collect();
        let file = ProjectFile::file(self.ids.next(now), &name, kept);
        self.push(file)
    }

    /// Replace a file's content.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown id or a validation error for a folder.
    pub fn save_file(
        &mut self,
        file_id: &str,
        content: &str,
    ) -> Result<&ProjectFile, StaffdeskError> {
        let project = self.default_project_mut()?;
        let file = project
            .files
            .iter_mut()
            .find(|f| f.id == file_id)
            .ok_or_else(|| StaffdeskError::NotFound(format!("file '{file_id}'")))?;
        if file.is_folder() {
            return Err(StaffdeskError::validation(format!(
                "'{}' is a folder and has no content",
                file.name
            )));
        }
        file.content = Some(content.to_string());
        Ok(&*file)
    }

    /// Post to the default project's discussion board.
    ///
    /// # Errors
    ///
    /// Returns a validation error for blank text.
    pub fn post_comment(
        &mut self,
        author: &str,
        text: &str,
        now: DateTime<Utc>,
    ) -> Result<&Comment, StaffdeskError> {
        if text.trim().is_empty() {
            return Err(StaffdeskError::validation("comment is empty"));
        }
        let comment = Comment {
            id: self.ids.next(now),
            author: author.to_string(),
            text: text.to_string(),
            timestamp: now,
        };
        let project = self.default_project_mut()?;
        project.comments.push(comment);
        project
            .comments
            .last()
            .ok_or_else(|| StaffdeskError::NotFound("posted comment".to_string()))
    }

    /// Replace the project that has the same id.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no project has that id.
    pub fn update_project(&mut self, updated: Project) -> Result<(), StaffdeskError> {
        let slot = self
            .projects
            .iter_mut()
            .find(|p| p.id == updated.id)
            .ok_or_else(|| StaffdeskError::NotFound(format!("project '{}'", updated.id)))?;
        *slot = updated;
        Ok(())
    }

    /// `mailto:` link asking `approver` to sign off on the default project.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the workspace has no projects.
    pub fn approval_link(&self, approver: &str) -> Result<String, StaffdeskError> {
        let project = self.default_project()?;
        let subject = format!("Approval Request: {}", project.name);
        Ok(format!(
            "mailto:{approver}?subject={}",
            urlencoding::encode(&subject)
        ))
    }

    fn push(&mut self, entry: ProjectFile) -> Result<&ProjectFile, StaffdeskError> {
        let project = self.default_project_mut()?;
        project.files.push(entry);
        project
            .files
            .last()
            .ok_or_else(|| StaffdeskError::NotFound("new entry".to_string()))
    }
}

fn entry_name(name: &str) -> Result<String, StaffdeskError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        Err(StaffdeskError::validation("name is required"))
    } else {
        Ok(trimmed.to_string())
    }
}
