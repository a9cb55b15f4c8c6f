//! Project, file and comment types.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Whether an entry is a file or a folder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    /// Editable text file.
    File,
    /// Grouping entry with no content.
    Folder,
}

/// An entry in a project's file list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectFile {
    /// Timestamp-derived id.
    pub id: String,
    /// File or folder name.
    pub name: String,
    /// File or folder.
    pub kind: FileKind,
    /// Text content, files only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Language inferred from the extension.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    /// Containing folder.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
}

impl ProjectFile {
    /// A text file.
    #[must_use]
    pub fn file(id: String, name: &str, content: String) -> Self {
        Self {
            id,
            name: name.to_string(),
            kind: FileKind::File,
            content: Some(content),
            language: language_for(name).map(str::to_string),
            parent_id: None,
        }
    }

    /// A folder.
    #[must_use]
    pub fn folder(id: String, name: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            kind: FileKind::Folder,
            content: None,
            language: None,
            parent_id: None,
        }
    }

    /// Whether this entry is a folder.
    #[must_use]
    pub fn is_folder(&self) -> bool {
        self.kind == FileKind::Folder
    }
}

/// A discussion-board comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    /// Timestamp-derived id.
    pub id: String,
    /// Username of the poster.
    pub author: String,
    /// Comment body.
    pub text: String,
    /// When it was posted.
    pub timestamp: DateTime<Utc>,
}

/// A project with its files and discussion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// Project id.
    pub id: String,
    /// Project name.
    pub name: String,
    /// One-line summary.
    pub description: String,
    /// Flat list of files and folders.
    pub files: Vec<ProjectFile>,
    /// Discussion board, oldest first.
    pub comments: Vec<Comment>,
}

impl Project {
    /// Find a file or folder by id.
    #[must_use]
    pub fn file(&self, file_id: &str) -> Option<&ProjectFile> {
        self.files.iter().find(|f| f.id == file_id)
    }
}

/// Guess a language name from a file extension.
#[must_use]
pub fn language_for(name: &str) -> Option<&'static str> {
    let ext = Path::new(name).extension()?.to_str()?.to_lowercase();
    let lang = match ext.as_str() {
        "rs" => "rust",
        "py" => "python",
        "js" | "mjs" | "cjs" => "javascript",
        "ts" | "tsx" => "typescript",
        "css" => "css",
        "html" | "htm" => "html",
        "json" => "json",
        "md" => "markdown",
        "toml" => "toml",
        "yaml" | "yml" => "yaml",
        "sh" => "shell",
        "go" => "go",
        "java" => "java",
        "c" | "h" => "c",
        "cpp" | "cc" | "hpp" => "cpp",
        "txt" => "text",
        _ => return None,
    };
    Some(lang)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_for() {
        assert_eq!(language_for("main.py"), Some("python"));
        assert_eq!(language_for("style.CSS"), Some("css"));
        assert_eq!(language_for("Makefile"), None);
        assert_eq!(language_for("archive.zzz"), None);
    }

    #[test]
    fn test_file_and_folder_constructors() {
        let file = ProjectFile::file("1".to_string(), "lib.rs", String::new());
        assert_eq!(file.language.as_deref(), Some("rust"));
        assert!(!file.is_folder());

        let folder = ProjectFile::folder("2".to_string(), "docs");
        assert!(folder.is_folder());
        assert!(folder.content.is_none());
    }
}
