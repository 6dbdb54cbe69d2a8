//! Template files backing each page, one `<page>.html` per page in the theme directory.

use pagewright_schema::archived_template_file_name;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct ThemeStore {
    root: PathBuf,
}

impl ThemeStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn file_path(&self, template_file: &str) -> PathBuf {
        self.root.join(template_file)
    }

    pub async fn ensure_root(&self) -> std::io::Result<()> {
        fs::create_dir_all(&self.root).await
    }

    pub async fn read(&self, template_file: &str) -> std::io::Result<String> {
        fs::read_to_string(self.file_path(template_file)).await
    }

    /// Creates or truncates the template file.
    pub async fn write(&self, template_file: &str, body: &str) -> std::io::Result<()> {
        let path = self.file_path(template_file);
        fs::write(&path, body).await?;
        debug!(path = %path.display(), bytes = body.len(), "template written");
        Ok(())
    }

    /// Renames `<file>` to `<file>.old`, replacing an earlier archive.
    /// A missing source file is not an error.
    pub async fn archive(&self, template_file: &str) -> std::io::Result<()> {
        let from = self.file_path(template_file);
        let to = self.file_path(&archived_template_file_name(template_file));
        match fs::rename(&from, &to).await {
            Ok(()) => {
                debug!(from = %from.display(), to = %to.display(), "template archived");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e),
        }
    }

    /// Deletes the template file; a missing file is not an error.
    pub async fn remove(&self, template_file: &str) -> std::io::Result<()> {
        let path = self.file_path(template_file);
        match fs::remove_file(&path).await {
            Ok(()) => {
                debug!(path = %path.display(), "template removed");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e),
        }
    }
}
