//! PagePatchById -> DbPatchable implementation.
//!
//! This sits in the `db` module because it contains SQL/table knowledge.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::db::patch::{DbPatchable, PagePatch, PagePatchById};
use crate::error::PagewrightError;

#[async_trait]
impl DbPatchable for PagePatchById {
    async fn apply_patch(&self, pool: &SqlitePool) -> Result<(), PagewrightError> {
        let id = self.id;
        let PagePatch {
            page_name,
            path,
            template_file,
            title,
        } = self.patch.clone();

        let page_name_set = page_name.is_some();
        let path_set = path.is_some();
        let template_file_set = template_file.is_some();
        let title_set = title.is_some();
        let updated_at = Utc::now();

        let res = sqlx::query(
            r#"
            UPDATE page
            SET
                page_name = COALESCE(?, page_name),
                path = COALESCE(?, path),
                template_file = COALESCE(?, template_file),
                title = COALESCE(?, title),
                updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(page_name)
        .bind(path)
        .bind(template_file)
        .bind(title)
        .bind(updated_at)
        .bind(id)
        .execute(pool)
        .await?;

        let affected = res.rows_affected();
        debug!(
            id,
            affected,
            updated_at = %updated_at,
            page_name_set,
            path_set,
            template_file_set,
            title_set,
            "db patch applied"
        );

        if affected == 0 {
            return Err(PagewrightError::PageNotFound(format!("id={id}")));
        }

        Ok(())
    }
}
