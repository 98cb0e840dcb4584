//! # fsx_fs
//!
//! Async file and directory handles over `tokio::fs`.
//!
//! A handle wraps a path and nothing else: each call opens, acts and
//! releases the underlying resource. Failures carry the operation and the
//! path, and [`Error::kind`] separates I/O failures from decode failures so
//! callers can tell "file missing" apart from "invalid JSON".

mod config;
mod dir;
mod entry;
mod error;
mod ext;
mod file;
mod lines;

pub use config::*;
pub use dir::*;
pub use entry::{Entry, Kind};
pub use error::*;
pub use ext::*;
pub use file::*;
pub use lines::*;
