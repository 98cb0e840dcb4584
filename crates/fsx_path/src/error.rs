use thiserror::Error;

/// Error type for resolving a root path
#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to read the current working directory: {0}")]
    CurrentDir(#[source] std::io::Error),

    #[error("Failed to locate the running executable: {0}")]
    CurrentExe(#[source] std::io::Error),

    #[error("Home directory is not available on this platform")]
    HomeDirUnavailable,

    #[error("Environment variable {0} is not set")]
    EnvVarUnset(String),

    #[error("Environment variable {0} is set to an empty string")]
    EnvVarEmpty(String),

    #[error("Environment variable {0} is not valid unicode")]
    EnvVarNotUnicode(String),
}

pub type Result<A> = std::result::Result<A, Error>;
