//! # fsx_path
//!
//! Builds filesystem paths by chaining segments onto a known root.
//!
//! A [`PathBuilder`] is an immutable value: [`PathBuilder::join`] returns a
//! new builder with one more segment, and [`PathBuilder::resolve`] produces
//! the joined path on demand. Resolution is purely lexical and never touches
//! the filesystem, so a builder can describe a path that does not exist yet.
//!
//! ```
//! let config = fsx_path::temp() / "app" / "config.json";
//! assert!(config.resolve().ends_with("app/config.json"));
//! ```

mod builder;
mod error;
mod normalize;
mod roots;

pub use builder::*;
pub use error::*;
pub use roots::*;
