use std::path::PathBuf;
use std::string::FromUtf8Error;

use derive_more::Display;
use thiserror::Error;

/// The filesystem call that failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Operation {
    #[display("stat")]
    Stat,
    #[display("open file")]
    Open,
    #[display("read file")]
    Read,
    #[display("write file")]
    Write,
    #[display("append to file")]
    Append,
    #[display("remove file")]
    RemoveFile,
    #[display("remove dir")]
    RemoveDir,
    #[display("create dir")]
    CreateDir,
    #[display("read directory")]
    ReadDir,
    #[display("move")]
    Rename,
    #[display("copy")]
    Copy,
}

/// Coarse classification of [`Error`], for callers that only need to tell
/// "could not read" apart from "could not interpret"
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Io,
    Decode,
    Encode,
    Config,
}

// NOTE: there is intentionally no `From<std::io::Error>`. Every I/O failure
// is wrapped where it happens so the operation and path are never lost.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to {op} {}: {source}", path.display())]
    Io {
        op: Operation,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to {op} {} to {}: {source}", from.display(), to.display())]
    Transfer {
        op: Operation,
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to decode {} as UTF-8: {source}", path.display())]
    Utf8 {
        path: PathBuf,
        #[source]
        source: FromUtf8Error,
    },

    #[error("Failed to parse JSON from {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to encode JSON for {}: {source}", path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid value {value:?} for configuration key {key}")]
    InvalidConfig { key: &'static str, value: String },
}

impl Error {
    pub(crate) fn io(op: Operation, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { op, path: path.into(), source }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Io { .. } | Error::Transfer { .. } => ErrorKind::Io,
            Error::Utf8 { .. } | Error::Json { .. } => ErrorKind::Decode,
            Error::Encode { .. } => ErrorKind::Encode,
            Error::InvalidConfig { .. } => ErrorKind::Config,
        }
    }

    /// True when the underlying I/O failure is "not found".
    pub fn is_not_found(&self) -> bool {
        match self {
            Error::Io { source, .. } | Error::Transfer { source, .. } => {
                source.kind() == std::io::ErrorKind::NotFound
            }
            _ => false,
        }
    }
}

pub type Result<A> = std::result::Result<A, Error>;
