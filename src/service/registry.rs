use crate::db::DbPage;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Snapshot of published pages, keyed by path.
///
/// Only swapped on reload, so pages added or edited since the last reload are not served yet.
#[derive(Clone, Default)]
pub struct PageRegistry {
    inner: Arc<RwLock<HashMap<String, String>>>,
}

impl PageRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the snapshot and returns the number of published pages.
    pub async fn rebuild(&self, pages: &[DbPage]) -> usize {
        let next: HashMap<String, String> = pages
            .iter()
            .map(|p| (p.path.clone(), p.template_file.clone()))
            .collect();
        let count = next.len();
        *self.inner.write().await = next;
        count
    }

    /// Template file for a published path.
    pub async fn resolve(&self, path: &str) -> Option<String> {
        self.inner.read().await.get(path).cloned()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn page(id: i64, path: &str) -> DbPage {
        DbPage {
            id,
            page_name: path.to_string(),
            path: path.to_string(),
            template_file: format!("{path}.html"),
            title: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn rebuild_replaces_snapshot() {
        let registry = PageRegistry::new();
        assert!(registry.is_empty().await);

        let count = registry.rebuild(&[page(1, "About"), page(2, "Faq")]).await;
        assert_eq!(count, 2);
        assert_eq!(registry.resolve("Faq").await.as_deref(), Some("Faq.html"));

        registry.rebuild(&[page(1, "About")]).await;
        assert_eq!(registry.len().await, 1);
        assert!(registry.resolve("Faq").await.is_none());
    }
}
