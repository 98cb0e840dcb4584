//! # fsx
//!
//! Build a path by chaining segments onto a root, then act on it.
//!
//! ```no_run
//! use fsx::prelude::*;
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let data = fsx::temp() / "testdir" / "data.json";
//! data.file().write_json(&serde_json::json!({ "a": 1 })).await?;
//! let _value: serde_json::Value = data.file().read_json().await?;
//! data.file().delete().await?;
//! # Ok(())
//! # }
//! ```
//!
//! Roots come from [`cwd`], [`script_dir`], [`home`], [`temp`], [`env`] or
//! an explicit [`from`]. Extending a builder never touches the filesystem;
//! only the handles returned by [`FsExt`] do.

pub use fsx_fs::{
    Config, Dir, DirEntry, Entry, Error, ErrorKind, File, FsExt, Kind, Lines, Operation, Result,
};
pub use fsx_path::{cwd, env, from, home, script_dir, temp, PathBuilder};

/// Errors raised while resolving a root
pub use fsx_path::Error as RootError;

pub mod prelude {
    pub use fsx_fs::FsExt;
    pub use fsx_path::PathBuilder;
}
