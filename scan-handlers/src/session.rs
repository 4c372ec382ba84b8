//! Per-user memory of the last scan's findings.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

/// Last detected tumor names per user id. In-memory; cleared on restart.
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    inner: Arc<RwLock<HashMap<i64, Vec<String>>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores findings for `user_id`; `None` clears them.
    pub async fn set_last_findings(&self, user_id: i64, findings: Option<Vec<String>>) {
        let mut map = self.inner.write().await;
        match findings {
            Some(names) => {
                map.insert(user_id, names);
            }
            None => {
                map.remove(&user_id);
            }
        }
    }

    pub async fn last_findings(&self, user_id: i64) -> Option<Vec<String>> {
        self.inner.read().await.get(&user_id).cloned()
    }
}
