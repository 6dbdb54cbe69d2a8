use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::error::PagewrightError;

/// Abstraction for applying a patch payload to the database.
#[async_trait]
pub trait DbPatchable {
    async fn apply_patch(&self, pool: &SqlitePool) -> Result<(), PagewrightError>;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageCreate {
    pub page_name: String,
    pub path: String,
    pub template_file: String,
    pub title: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PagePatch {
    /// `None` => do not change; `Some(v)` => update
    pub page_name: Option<String>,
    pub path: Option<String>,
    pub template_file: Option<String>,
    /// `None` => do not change; `Some(v)` => update
    pub title: Option<String>,
}

/// Patch envelope addressed by row id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PagePatchById {
    pub id: i64,
    pub patch: PagePatch,
}
