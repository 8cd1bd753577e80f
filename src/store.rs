use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::types::FileEntry;

/// The slice of the directory-listing state the rename form needs
///
/// Each call is expected to be atomic with respect to other callers.
#[async_trait]
pub trait DirectoryStore: Send + Sync {
    /// Directory the listing is anchored at
    async fn current_directory(&self) -> String;

    /// Replace the entry whose key is `key` with `entry`, appending it when
    /// no entry matches
    async fn replace(&self, key: &str, entry: FileEntry);

    /// Remove every entry carrying identifier `id`
    async fn remove_by_id(&self, id: &str);
}

struct Listing {
    directory: String,
    entries: Vec<FileEntry>,
}

/// In-memory directory listing
#[derive(Clone)]
pub struct MemoryDirectoryStore {
    state: Arc<RwLock<Listing>>,
}

impl MemoryDirectoryStore {
    pub fn new(directory: impl Into<String>, entries: Vec<FileEntry>) -> Self {
        Self {
            state: Arc::new(RwLock::new(Listing {
                directory: directory.into(),
                entries,
            })),
        }
    }

    /// Snapshot of the current entries, in listing order
    pub async fn entries(&self) -> Vec<FileEntry> {
        self.state.read().await.entries.clone()
    }

    /// Look up an entry by key (uuid, or name for id-less entries)
    pub async fn get(&self, key: &str) -> Option<FileEntry> {
        let state = self.state.read().await;
        state.entries.iter().find(|e| e.key() == key).cloned()
    }

    /// Point the listing at another directory, replacing its contents
    pub async fn set_directory(&self, directory: impl Into<String>, entries: Vec<FileEntry>) {
        let mut state = self.state.write().await;
        state.directory = directory.into();
        state.entries = entries;
    }
}

impl Default for MemoryDirectoryStore {
    fn default() -> Self {
        Self::new("/", Vec::new())
    }
}

#[async_trait]
impl DirectoryStore for MemoryDirectoryStore {
    async fn current_directory(&self) -> String {
        self.state.read().await.directory.clone()
    }

    async fn replace(&self, key: &str, entry: FileEntry) {
        let mut state = self.state.write().await;
        match state.entries.iter_mut().find(|e| e.key() == key) {
            Some(existing) => *existing = entry,
            None => state.entries.push(entry),
        }
    }

    async fn remove_by_id(&self, id: &str) {
        if id.is_empty() {
            return;
        }
        let mut state = self.state.write().await;
        state.entries.retain(|e| e.uuid != id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_store() {
        let store = MemoryDirectoryStore::new(
            "/home",
            vec![FileEntry::new("1", "a.txt"), FileEntry::new("", "plugins")],
        );

        assert_eq!(store.current_directory().await, "/home");

        // Replace by uuid keeps position
        store.replace("1", FileEntry::new("1", "b.txt")).await;
        assert_eq!(store.entries().await[0].name, "b.txt");

        // Id-less entries are found by their old name
        store.replace("plugins", FileEntry::new("", "mods")).await;
        assert!(store.get("plugins").await.is_none());
        assert!(store.get("mods").await.is_some());
        assert_eq!(store.entries().await.len(), 2);

        // Unknown key appends
        store.replace("2", FileEntry::new("2", "c.txt")).await;
        assert_eq!(store.entries().await.len(), 3);

        // Remove
        store.remove_by_id("1").await;
        assert!(store.get("1").await.is_none());

        // Empty ids never match id-less entries
        store.remove_by_id("").await;
        assert_eq!(store.entries().await.len(), 2);

        store.set_directory("/other", Vec::new()).await;
        assert_eq!(store.current_directory().await, "/other");
        assert!(store.entries().await.is_empty());
    }
}
