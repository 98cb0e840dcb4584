use std::path::{Path, PathBuf};

use derive_setters::Setters;
use tracing::debug;

use crate::error::Operation;
use crate::{Config, Dir, Error, File, Result};

/// What a path currently points at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    File,
    Dir,
    /// Exists, but is neither a regular file nor a directory (a socket or a
    /// device, for instance)
    Other,
    Missing,
}

/// Stats `path`, following symlinks. Only "not found" maps to
/// [`Kind::Missing`]; every other failure is surfaced.
pub(crate) async fn kind_of(path: &Path) -> Result<Kind> {
    debug!(path = %path.display(), "Checking path kind");
    match tokio::fs::metadata(path).await {
        Ok(meta) if meta.is_file() => Ok(Kind::File),
        Ok(meta) if meta.is_dir() => Ok(Kind::Dir),
        Ok(_) => Ok(Kind::Other),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Kind::Missing),
        Err(e) => Err(Error::io(Operation::Stat, path, e)),
    }
}

/// Checks that `from` exists and, when `create_parents` is set, creates the
/// parent directories of `to`. Runs before a move or copy so a missing
/// source leaves nothing behind at the destination.
pub(crate) async fn prepare_transfer(
    op: Operation,
    from: &Path,
    to: &Path,
    create_parents: bool,
) -> Result<()> {
    let transfer_err = |source| Error::Transfer {
        op,
        from: from.to_path_buf(),
        to: to.to_path_buf(),
        source,
    };

    if kind_of(from).await? == Kind::Missing {
        return Err(transfer_err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "source does not exist",
        )));
    }

    if !create_parents {
        return Ok(());
    }
    match to.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => tokio::fs::create_dir_all(parent)
            .await
            .map_err(transfer_err),
        _ => Ok(()),
    }
}

/// A path whose type is not yet known.
#[derive(Debug, Clone, PartialEq, Eq, Setters)]
pub struct Entry {
    #[setters(skip)]
    path: PathBuf,
    config: Config,
}

impl Entry {
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

    pub async fn is_file(&self) -> Result<bool> {
        Ok(self.kind().await? == Kind::File)
    }

    pub async fn is_dir(&self) -> Result<bool> {
        Ok(self.kind().await? == Kind::Dir)
    }

    pub fn into_file(self) -> File {
        File::new(self.path).config(self.config)
    }

    pub fn into_dir(self) -> Dir {
        Dir::new(self.path).config(self.config)
    }
}
