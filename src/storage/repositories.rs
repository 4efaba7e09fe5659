//! Story repositories: where persisted documents live
//!
//! The trait abstracts over the backing store so front ends and tests can
//! swap the filesystem for memory without touching playback code.

use crate::graph::StoryGraph;
use crate::storage::{self, StorageError};
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::PathBuf;

/// Abstraction over story document storage.
#[async_trait]
pub trait StoryRepository: Send + Sync {
    /// Load a story by name.
    async fn load_story(&self, name: &str) -> Result<StoryGraph, StorageError>;

    /// Persist a story under a name.
    async fn save_story(&self, name: &str, story: &StoryGraph) -> Result<(), StorageError>;

    /// Check whether a story exists.
    async fn story_exists(&self, name: &str) -> Result<bool, StorageError>;
}

/// Stores one story per `<name>.json` under a base directory.
pub struct FileSystemStoryRepository {
    base_path: PathBuf,
}

impl FileSystemStoryRepository {
    pub fn new<P: Into<PathBuf>>(base_path: P) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    fn story_path(&self, name: &str) -> PathBuf {
        self.base_path.join(format!("{name}.json"))
    }
}

#[async_trait]
impl StoryRepository for FileSystemStoryRepository {
    async fn load_story(&self, name: &str) -> Result<StoryGraph, StorageError> {
        let path = self.story_path(name);

        if !path.exists() {
            return Err(StorageError::NotFound {
                path: path.display().to_string(),
            });
        }

        let bytes = tokio::fs::read(&path).await?;
        storage::load(&bytes)
    }

    async fn save_story(&self, name: &str, story: &StoryGraph) -> Result<(), StorageError> {
        let path = self.story_path(name);

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let bytes = storage::save(story)?;
        tokio::fs::write(&path, bytes).await?;
        Ok(())
    }

    async fn story_exists(&self, name: &str) -> Result<bool, StorageError> {
        Ok(self.story_path(name).exists())
    }
}

/// In-memory implementation for tests and demos. Read-only once populated.
pub struct InMemoryStoryRepository {
    stories: HashMap<String, StoryGraph>,
}

impl InMemoryStoryRepository {
    pub fn new() -> Self {
        Self {
            stories: HashMap::new(),
        }
    }

    pub fn add_story(&mut self, name: impl Into<String>, story: StoryGraph) {
        self.stories.insert(name.into(), story);
    }
}

impl Default for InMemoryStoryRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StoryRepository for InMemoryStoryRepository {
    async fn load_story(&self, name: &str) -> Result<StoryGraph, StorageError> {
        self.stories
            .get(name)
            .cloned()
            .ok_or_else(|| StorageError::NotFound {
                path: name.to_string(),
            })
    }

    async fn save_story(&self, _name: &str, _story: &StoryGraph) -> Result<(), StorageError> {
        Err(StorageError::Unavailable {
            reason: "in-memory repository is read-only".to_string(),
        })
    }

    async fn story_exists(&self, name: &str) -> Result<bool, StorageError> {
        Ok(self.stories.contains_key(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::node::Node;

    fn tiny_story() -> StoryGraph {
        let mut story = StoryGraph::new();
        story.add_node(Node::new("start", "Narrator", "Once upon a time."));
        story
    }

    #[tokio::test]
    async fn in_memory_load_and_exists() {
        let mut repo = InMemoryStoryRepository::new();
        repo.add_story("fable", tiny_story());

        assert!(repo.story_exists("fable").await.unwrap());
        let story = repo.load_story("fable").await.unwrap();
        assert_eq!(story.first_node_id(), Some("start"));

        assert!(!repo.story_exists("other").await.unwrap());
        assert!(matches!(
            repo.load_story("other").await,
            Err(StorageError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn filesystem_round_trip() {
        let dir = std::env::temp_dir().join(format!("narranode-repo-{}", std::process::id()));
        let repo = FileSystemStoryRepository::new(&dir);

        assert!(matches!(
            repo.load_story("missing").await,
            Err(StorageError::NotFound { .. })
        ));

        let story = tiny_story();
        repo.save_story("fable", &story).await.unwrap();
        assert!(repo.story_exists("fable").await.unwrap());

        let restored = repo.load_story("fable").await.unwrap();
        assert_eq!(restored, story);

        tokio::fs::remove_dir_all(&dir).await.unwrap();
    }

    #[tokio::test]
    async fn filesystem_malformed_document() {
        let dir = std::env::temp_dir().join(format!("narranode-bad-{}", std::process::id()));
        tokio::fs::create_dir_all(&dir).await.unwrap();
        tokio::fs::write(dir.join("broken.json"), b"{ not json")
            .await
            .unwrap();

        let repo = FileSystemStoryRepository::new(&dir);
        assert!(matches!(
            repo.load_story("broken").await,
            Err(StorageError::Malformed(_))
        ));

        tokio::fs::remove_dir_all(&dir).await.unwrap();
    }
}
