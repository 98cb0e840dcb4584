use std::path::{Path, PathBuf};

use derive_setters::Setters;
use tracing::debug;

use crate::entry::{kind_of, prepare_transfer};
use crate::error::Operation;
use crate::{Config, Entry, Error, Kind, Result};

/// One child of a listed directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    pub name: String,
    pub path: PathBuf,
    pub kind: Kind,
}

impl DirEntry {
    pub fn entry(&self) -> Entry {
        Entry::new(self.path.clone())
    }
}

/// A handle to a directory.
#[derive(Debug, Clone, PartialEq, Eq, Setters)]
pub struct Dir {
    #[setters(skip)]
    path: PathBuf,
    config: Config,
}

impl Dir {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), config: Config::default() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn kind(&self) -> Result<Kind> {
        kind_of(&self.path).await
    }

    pub async fn exists(&self) -> Result<bool> {
        Ok(self.kind().await? != Kind::Missing)
    }

    /// Creates the directory and any missing parents. Succeeds if it already
    /// exists.
    pub async fn create(&self) -> Result<()> {
        debug!(path = %self.path.display(), "Creating directory");
        tokio::fs::create_dir_all(&self.path)
            .await
            .map_err(|e| Error::io(Operation::CreateDir, &self.path, e))
    }

    /// Lists the immediate children, sorted by name.
    pub async fn list(&self) -> Result<Vec<DirEntry>> {
        debug!(path = %self.path.display(), "Listing directory");
        let read_err = |e| Error::io(Operation::ReadDir, &self.path, e);
        let mut dir = tokio::fs::read_dir(&self.path).await.map_err(read_err)?;

        let mut entries = Vec::new();
        while let Some(entry) = dir.next_entry().await.map_err(read_err)? {
            let path = entry.path();
            let kind = kind_of(&path).await?;
            entries.push(DirEntry {
                name: entry.file_name().to_string_lossy().into_owned(),
                path,
                kind,
            });
        }

        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }

    /// Removes the directory and everything under it. Fails if it does not
    /// exist.
    pub async fn delete(&self) -> Result<()> {
        debug!(path = %self.path.display(), "Removing directory");
        tokio::fs::remove_dir_all(&self.path)
            .await
            .map_err(|e| Error::io(Operation::RemoveDir, &self.path, e))
    }

    /// Renames the directory to `dest` and returns a handle to the new
    /// location.
    pub async fn move_to(&self, dest: impl Into<PathBuf>) -> Result<Dir> {
        let dest = dest.into();
        prepare_transfer(Operation::Rename, &self.path, &dest, self.config.create_parents).await?;

        debug!(from = %self.path.display(), to = %dest.display(), "Moving directory");
        tokio::fs::rename(&self.path, &dest).await.map_err(|source| Error::Transfer {
            op: Operation::Rename,
            from: self.path.clone(),
            to: dest.clone(),
            source,
        })?;
        Ok(Dir::new(dest).config(self.config))
    }
}
