use std::env::VarError;
use std::path::PathBuf;

use tracing::debug;

use crate::{Error, PathBuilder, Result};

/// Builder rooted at the current working directory.
pub fn cwd() -> Result<PathBuilder> {
    std::env::current_dir()
        .map(PathBuilder::new)
        .map_err(Error::CurrentDir)
}

/// Builder rooted at the directory holding the running executable.
pub fn script_dir() -> Result<PathBuilder> {
    let exe = std::env::current_exe().map_err(Error::CurrentExe)?;
    let dir = exe.parent().map(PathBuf::from).unwrap_or(exe);
    Ok(PathBuilder::new(dir))
}

/// Builder rooted at the user's home directory.
pub fn home() -> Result<PathBuilder> {
    dirs::home_dir()
        .map(PathBuilder::new)
        .ok_or(Error::HomeDirUnavailable)
}

/// Builder rooted at the OS temp directory.
pub fn temp() -> PathBuilder {
    PathBuilder::new(std::env::temp_dir())
}

/// Builder rooted at the value of the environment variable `name`.
///
/// An unset or empty variable is an error rather than an implicit relative
/// root, so a missing `DATA_DIR` never silently resolves against the
/// working directory.
pub fn env(name: &str) -> Result<PathBuilder> {
    match std::env::var(name) {
        Ok(value) if value.is_empty() => Err(Error::EnvVarEmpty(name.to_string())),
        Ok(value) => {
            debug!(name, value = %value, "Resolved root from environment");
            Ok(PathBuilder::new(value))
        }
        Err(VarError::NotPresent) => Err(Error::EnvVarUnset(name.to_string())),
        Err(VarError::NotUnicode(_)) => Err(Error::EnvVarNotUnicode(name.to_string())),
    }
}

/// Builder rooted at an explicit path.
pub fn from(path: impl Into<PathBuf>) -> PathBuilder {
    PathBuilder::new(path)
}
