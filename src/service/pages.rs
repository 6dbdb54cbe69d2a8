//! Page operations that keep the `page` row and its template file in step.

use crate::db::{DbActorHandle, DbPage, PageCreate, PagePatch};
use crate::error::PagewrightError;
use crate::theme::ThemeStore;
use pagewright_schema::{ValidPage, is_valid_page_name, template_file_name};
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    Created(String),
    AlreadyExists(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOutcome {
    Edited(String),
    /// The new title maps onto the path of a different page.
    Conflict(String),
}

#[derive(Clone)]
pub struct PageService {
    db: DbActorHandle,
    theme: ThemeStore,
}

impl PageService {
    pub fn new(db: DbActorHandle, theme: ThemeStore) -> Self {
        Self { db, theme }
    }

    pub fn theme(&self) -> &ThemeStore {
        &self.theme
    }

    pub async fn list(&self) -> Result<Vec<DbPage>, PagewrightError> {
        self.db.list_pages().await
    }

    /// Inserts the row first, then writes the template file.
    pub async fn add(&self, page: ValidPage) -> Result<AddOutcome, PagewrightError> {
        let ValidPage {
            title,
            body,
            page_name,
            template_file,
        } = page;

        if self.db.find_page_by_path(&page_name).await?.is_some() {
            debug!(page = %page_name, "add rejected: page already exists");
            return Ok(AddOutcome::AlreadyExists(page_name));
        }

        let id = self
            .db
            .create_page(PageCreate {
                page_name: page_name.clone(),
                path: page_name.clone(),
                template_file: template_file.clone(),
                title: Some(title),
            })
            .await?;

        self.theme.write(&template_file, &body).await?;

        info!(id, page = %page_name, template = %template_file, "page added");
        Ok(AddOutcome::Created(page_name))
    }

    /// Returns the row and the raw template contents for the edit form.
    pub async fn load_for_edit(&self, path: &str) -> Result<(DbPage, String), PagewrightError> {
        let page = self.require_page(path).await?;
        let content = self.theme.read(&page.template_file).await?;
        Ok((page, content))
    }

    /// On a rename the old template is archived to `<file>.old` before the new one is written.
    pub async fn edit(&self, path: &str, page: ValidPage) -> Result<EditOutcome, PagewrightError> {
        let existing = self.require_page(path).await?;
        let ValidPage {
            title,
            body,
            page_name,
            template_file,
        } = page;

        let renamed = existing.path != page_name;
        if renamed {
            if let Some(other) = self.db.find_page_by_path(&page_name).await? {
                debug!(
                    page = %existing.path,
                    target = %page_name,
                    other_id = other.id,
                    "edit rejected: target path taken"
                );
                return Ok(EditOutcome::Conflict(page_name));
            }
            self.theme.archive(&template_file_name(&existing.path)).await?;
        }

        self.theme.write(&template_file, &body).await?;

        let patch = PagePatch {
            page_name: renamed.then(|| page_name.clone()),
            path: renamed.then(|| page_name.clone()),
            template_file: Some(template_file.clone()),
            title: Some(title),
        };
        debug!(id = existing.id, patch = ?patch, "applying page patch");
        self.db.patch_page(existing.id, patch).await?;

        info!(
            id = existing.id,
            from = %existing.path,
            to = %page_name,
            renamed,
            "page edited"
        );
        Ok(EditOutcome::Edited(page_name))
    }

    /// Removes `<path>.html` (absence is fine), then the row.
    ///
    /// Files without a row are left alone.
    pub async fn delete(&self, path: &str) -> Result<(), PagewrightError> {
        let page = self.require_page(path).await?;

        self.theme.remove(&template_file_name(&page.path)).await?;

        if !self.db.delete_page_by_path(&page.path).await? {
            return Err(PagewrightError::PageNotFound(page.path));
        }

        info!(id = page.id, page = %page.path, "page deleted");
        Ok(())
    }

    async fn require_page(&self, path: &str) -> Result<DbPage, PagewrightError> {
        if !is_valid_page_name(path) {
            return Err(PagewrightError::InvalidPageName(path.to_string()));
        }
        self.db
            .find_page_by_path(path)
            .await?
            .ok_or_else(|| PagewrightError::PageNotFound(path.to_string()))
    }
}
