//! Proof photo storage

use crate::config::StoreConfig;
use crate::error::StoreError;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tracing::debug;
use triptales_domain::{ItineraryId, ProofImage};

/// A photo file found in the proof directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredProof {
    /// File name, e.g. `<id>.jpg`
    pub name: String,
    /// Size on disk in bytes
    pub size_bytes: u64,
    /// Last modification time
    pub modified: SystemTime,
}

/// Writes proof photos to a directory served under a public URL prefix
#[derive(Debug, Clone)]
pub struct ProofStorage {
    dir: PathBuf,
    public_prefix: String,
}

impl ProofStorage {
    /// Create storage rooted at `dir`, served under `public_prefix`
    pub fn new(dir: impl Into<PathBuf>, public_prefix: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            public_prefix: public_prefix.into().trim_end_matches('/').to_string(),
        }
    }

    /// Storage described by a [`StoreConfig`]
    pub fn from_config(config: &StoreConfig) -> Self {
        Self::new(&config.proof_dir, &config.public_proof_prefix)
    }

    /// Directory photos are written to
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File name used for an itinerary's photo
    pub fn file_name(id: ItineraryId, image: &ProofImage) -> String {
        format!("{}.{}", id, image.mime.extension())
    }

    /// Write the photo and return its public URL
    ///
    /// The directory is created on demand. The id is unique, so an existing
    /// file is never overwritten in practice.
    pub async fn save(&self, id: ItineraryId, image: &ProofImage) -> Result<String, StoreError> {
        tokio::fs::create_dir_all(&self.dir).await?;

        let name = Self::file_name(id, image);
        tokio::fs::write(self.dir.join(&name), &image.bytes).await?;
        debug!(file = %name, bytes = image.bytes.len(), "Stored proof photo");

        Ok(format!("{}/{}", self.public_prefix, name))
    }

    /// List regular files in the proof directory
    ///
    /// A missing directory means no photos have been stored yet.
    pub async fn list_files(&self) -> Result<Vec<StoredProof>, StoreError> {
        let mut entries = match tokio::fs::read_dir(&self.dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut files = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let metadata = entry.metadata().await?;
            if !metadata.is_file() {
                continue;
            }
            let Ok(name) = entry.file_name().into_string() else {
                continue;
            };
            files.push(StoredProof {
                name,
                size_bytes: metadata.len(),
                modified: metadata.modified()?,
            });
        }

        files.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(files)
    }

    /// Delete one photo by file name
    pub async fn remove(&self, name: &str) -> Result<(), StoreError> {
        if name.contains('/') || name.contains('\\') || name == ".." {
            return Err(StoreError::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("refusing to remove path outside proof directory: {}", name),
            )));
        }
        tokio::fs::remove_file(self.dir.join(name)).await?;
        debug!(file = %name, "Removed proof photo");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use triptales_domain::ImageMime;

    fn image(mime: ImageMime) -> ProofImage {
        ProofImage {
            mime,
            bytes: vec![1, 2, 3, 4],
        }
    }

    #[tokio::test]
    async fn test_save_returns_public_url() {
        let dir = TempDir::new().unwrap();
        let storage = ProofStorage::new(dir.path().join("proofs"), "/uploads/itinerary-proofs/");
        let id = ItineraryId::new();

        let url = storage.save(id, &image(ImageMime::Webp)).await.unwrap();
        assert_eq!(url, format!("/uploads/itinerary-proofs/{}.webp", id));

        let written = std::fs::read(dir.path().join("proofs").join(format!("{}.webp", id))).unwrap();
        assert_eq!(written, vec![1, 2, 3, 4]);
    }

    #[tokio::test]
    async fn test_list_and_remove() {
        let dir = TempDir::new().unwrap();
        let storage = ProofStorage::new(dir.path(), "/p");
        assert!(storage.list_files().await.unwrap().is_empty());

        let id = ItineraryId::new();
        storage.save(id, &image(ImageMime::Png)).await.unwrap();
        std::fs::create_dir(dir.path().join("nested")).unwrap();

        let files = storage.list_files().await.unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].name, format!("{}.png", id));
        assert_eq!(files[0].size_bytes, 4);

        storage.remove(&files[0].name).await.unwrap();
        assert!(storage.list_files().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_missing_directory_lists_nothing() {
        let dir = TempDir::new().unwrap();
        let storage = ProofStorage::new(dir.path().join("never-created"), "/p");
        assert!(storage.list_files().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_remove_rejects_paths() {
        let dir = TempDir::new().unwrap();
        let storage = ProofStorage::new(dir.path(), "/p");
        assert!(storage.remove("../etc/passwd").await.is_err());
    }
}
