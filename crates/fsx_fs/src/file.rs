use std::path::{Path, PathBuf};

use derive_setters::Setters;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::io::AsyncWriteExt;
use tracing::debug;

use crate::entry::{kind_of, prepare_transfer};
use crate::error::Operation;
use crate::{Config, Error, Kind, Lines, Result};

/// A handle to a regular file.
///
/// The handle only remembers the path. Every operation opens the file, does
/// its work and closes it again before returning; [`File::lines`] keeps the
/// file open for as long as the returned stream lives.
#[derive(Debug, Clone, PartialEq, Eq, Setters)]
pub struct File {
    #[setters(skip)]
    path: PathBuf,
    config: Config,
}

impl File {
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

    /// Gets file size without reading the file
    pub async fn size(&self) -> Result<u64> {
        debug!(path = %self.path.display(), "Reading file size");
        let meta = tokio::fs::metadata(&self.path)
            .await
            .map_err(|e| Error::io(Operation::Stat, &self.path, e))?;
        Ok(meta.len())
    }

    pub async fn read_bytes(&self) -> Result<Vec<u8>> {
        debug!(path = %self.path.display(), "Reading file");
        tokio::fs::read(&self.path)
            .await
            .map_err(|e| Error::io(Operation::Read, &self.path, e))
    }

    /// Reads the whole file as UTF-8. Invalid UTF-8 is a decode error, not
    /// replaced lossily.
    pub async fn read_text(&self) -> Result<String> {
        let bytes = self.read_bytes().await?;
        String::from_utf8(bytes).map_err(|source| Error::Utf8 { path: self.path.clone(), source })
    }

    /// Reads and deserializes JSON. The read happens first, so a missing
    /// file is always reported as an I/O error.
    pub async fn read_json<T: DeserializeOwned>(&self) -> Result<T> {
        let bytes = self.read_bytes().await?;
        serde_json::from_slice(&bytes)
            .map_err(|source| Error::Json { path: self.path.clone(), source })
    }

    /// Opens the file and streams it line by line.
    pub async fn lines(&self) -> Result<Lines> {
        debug!(path = %self.path.display(), "Opening file for line streaming");
        let file = tokio::fs::File::open(&self.path)
            .await
            .map_err(|e| Error::io(Operation::Open, &self.path, e))?;
        Ok(Lines::new(file, self.path.clone(), &self.config))
    }

    /// Creates or truncates the file and writes `contents`.
    pub async fn write_bytes(&self, contents: impl AsRef<[u8]>) -> Result<()> {
        self.ensure_parent(&self.path).await?;
        debug!(path = %self.path.display(), "Writing file");
        tokio::fs::write(&self.path, contents)
            .await
            .map_err(|e| Error::io(Operation::Write, &self.path, e))
    }

    pub async fn write_text(&self, contents: impl AsRef<str>) -> Result<()> {
        self.write_bytes(contents.as_ref().as_bytes()).await
    }

    pub async fn write_json<T: Serialize + ?Sized>(&self, value: &T) -> Result<()> {
        let encoded = if self.config.pretty_json {
            serde_json::to_vec_pretty(value)
        } else {
            serde_json::to_vec(value)
        }
        .map_err(|source| Error::Encode { path: self.path.clone(), source })?;

        self.write_bytes(encoded).await
    }

    /// Appends to the file, creating it if absent.
    pub async fn append_text(&self, contents: impl AsRef<str>) -> Result<()> {
        self.ensure_parent(&self.path).await?;
        debug!(path = %self.path.display(), "Appending to file");
        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .map_err(|e| Error::io(Operation::Append, &self.path, e))?;

        file.write_all(contents.as_ref().as_bytes())
            .await
            .map_err(|e| Error::io(Operation::Append, &self.path, e))?;
        file.flush()
            .await
            .map_err(|e| Error::io(Operation::Append, &self.path, e))
    }

    /// Removes the file. Fails if it does not exist.
    pub async fn delete(&self) -> Result<()> {
        debug!(path = %self.path.display(), "Removing file");
        tokio::fs::remove_file(&self.path)
            .await
            .map_err(|e| Error::io(Operation::RemoveFile, &self.path, e))
    }

    /// Renames the file to `dest` and returns a handle to the new location.
    pub async fn move_to(&self, dest: impl Into<PathBuf>) -> Result<File> {
        let dest = dest.into();
        prepare_transfer(Operation::Rename, &self.path, &dest, self.config.create_parents).await?;
        debug!(from = %self.path.display(), to = %dest.display(), "Moving file");
        tokio::fs::rename(&self.path, &dest)
            .await
            .map_err(|source| self.transfer_error(Operation::Rename, &dest, source))?;
        Ok(File::new(dest).config(self.config))
    }

    /// Copies the contents to `dest` and returns a handle to the copy.
    pub async fn copy_to(&self, dest: impl Into<PathBuf>) -> Result<File> {
        let dest = dest.into();
        prepare_transfer(Operation::Copy, &self.path, &dest, self.config.create_parents).await?;
        debug!(from = %self.path.display(), to = %dest.display(), "Copying file");
        tokio::fs::copy(&self.path, &dest)
            .await
            .map_err(|source| self.transfer_error(Operation::Copy, &dest, source))?;
        Ok(File::new(dest).config(self.config))
    }

    fn transfer_error(&self, op: Operation, dest: &Path, source: std::io::Error) -> Error {
        Error::Transfer { op, from: self.path.clone(), to: dest.to_path_buf(), source }
    }

    async fn ensure_parent(&self, path: &Path) -> Result<()> {
        if !self.config.create_parents {
            return Ok(());
        }
        match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| Error::io(Operation::CreateDir, parent, e)),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use anyhow::Result;
    use pretty_assertions::assert_eq;
    use serde::Deserialize;
    use serde_json::json;

    use super::*;
    use crate::ErrorKind;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Settings {
        name: String,
        retries: u32,
        tags: Vec<String>,
    }

    #[tokio::test]
    async fn test_write_then_read_text() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let file = File::new(temp.path().join("hello.txt"));

        file.write_text("Hello, world!").await?;

        assert_eq!(file.read_text().await?, "Hello, world!");
        assert_eq!(file.size().await?, 13);
        assert_eq!(file.kind().await?, Kind::File);
        Ok(())
    }

    #[tokio::test]
    async fn test_write_truncates_existing_content() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let file = File::new(temp.path().join("note.txt"));

        file.write_text("a much longer first version").await?;
        file.write_text("short").await?;

        assert_eq!(file.read_text().await?, "short");
        Ok(())
    }

    #[tokio::test]
    async fn test_json_round_trip() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let file = File::new(temp.path().join("settings.json"));
        let expected = Settings {
            name: "primary".to_string(),
            retries: 3,
            tags: vec!["a".to_string(), "b".to_string()],
        };

        file.write_json(&expected).await?;
        let actual: Settings = file.read_json().await?;

        assert_eq!(actual, expected);
        Ok(())
    }

    #[tokio::test]
    async fn test_pretty_json() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let file =
            File::new(temp.path().join("pretty.json")).config(Config::default().pretty_json(true));
        let mut value = BTreeMap::new();
        value.insert("a", 1);

        file.write_json(&value).await?;

        assert_eq!(file.read_text().await?, "{\n  \"a\": 1\n}");
        Ok(())
    }

    #[tokio::test]
    async fn test_read_json_malformed_is_decode_error() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let file = File::new(temp.path().join("broken.json"));
        file.write_text("{\"a\": ").await?;

        let error = file.read_json::<serde_json::Value>().await.unwrap_err();

        assert_eq!(error.kind(), ErrorKind::Decode);
        Ok(())
    }

    #[tokio::test]
    async fn test_read_json_missing_is_io_error() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let file = File::new(temp.path().join("missing.json"));

        let error = file.read_json::<serde_json::Value>().await.unwrap_err();

        assert_eq!(error.kind(), ErrorKind::Io);
        assert!(error.is_not_found());
        Ok(())
    }

    #[tokio::test]
    async fn test_read_text_invalid_utf8_is_decode_error() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let file = File::new(temp.path().join("binary.bin"));
        file.write_bytes([0xffu8, 0xfe, 0x00]).await?;

        let error = file.read_text().await.unwrap_err();

        assert_eq!(error.kind(), ErrorKind::Decode);
        Ok(())
    }

    #[tokio::test]
    async fn test_write_creates_parent_directories() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let file = File::new(temp.path().join("a").join("b").join("c.json"));

        file.write_json(&json!({"nested": true})).await?;

        assert_eq!(
            file.read_json::<serde_json::Value>().await?,
            json!({"nested": true})
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_write_without_parents_fails() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let file = File::new(temp.path().join("absent").join("c.txt"))
            .config(Config::default().create_parents(false));

        let error = file.write_text("x").await.unwrap_err();

        assert_eq!(error.kind(), ErrorKind::Io);
        Ok(())
    }

    #[tokio::test]
    async fn test_append_creates_then_appends() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let file = File::new(temp.path().join("log.txt"));

        file.append_text("one\n").await?;
        file.append_text("two\n").await?;

        assert_eq!(file.read_text().await?, "one\ntwo\n");
        Ok(())
    }

    #[tokio::test]
    async fn test_delete() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let file = File::new(temp.path().join("gone.txt"));
        file.write_text("bye").await?;

        file.delete().await?;

        assert_eq!(file.kind().await?, Kind::Missing);
        let error = file.delete().await.unwrap_err();
        assert!(error.is_not_found());
        Ok(())
    }

    #[tokio::test]
    async fn test_move_to() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let source = File::new(temp.path().join("from.txt"));
        source.write_text("payload").await?;

        let moved = source.move_to(temp.path().join("sub").join("to.txt")).await?;

        assert!(!source.exists().await?);
        assert_eq!(moved.read_text().await?, "payload");
        Ok(())
    }

    #[tokio::test]
    async fn test_move_missing_source_fails() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let source = File::new(temp.path().join("nothing.txt"));

        let dest = temp.path().join("created").join("dest.txt");

        let error = source.move_to(&dest).await.unwrap_err();

        assert_eq!(error.kind(), ErrorKind::Io);
        assert!(error.is_not_found());
        assert!(error.to_string().contains(&dest.display().to_string()));
        assert!(!temp.path().join("created").exists());
        Ok(())
    }

    #[tokio::test]
    async fn test_copy_missing_source_leaves_no_directories() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let source = File::new(temp.path().join("nothing.txt"));
        let dest = temp.path().join("copies").join("dest.txt");

        let error = source.copy_to(&dest).await.unwrap_err();

        assert!(error.is_not_found());
        assert!(!temp.path().join("copies").exists());
        Ok(())
    }

    #[tokio::test]
    async fn test_copy_to() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let source = File::new(temp.path().join("orig.txt"));
        source.write_text("same").await?;

        let copy = source.copy_to(temp.path().join("copy.txt")).await?;

        assert_eq!(source.read_text().await?, "same");
        assert_eq!(copy.read_text().await?, "same");
        Ok(())
    }
}
