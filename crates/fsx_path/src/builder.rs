use std::fmt;
use std::ops::Div;
use std::path::{Path, PathBuf};

use crate::normalize::normalize;

/// An immutable path under construction: a root plus an ordered list of
/// segments.
///
/// Extending a builder never changes it; every extension returns a new
/// value, so a builder can be shared and reused as a prefix.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PathBuilder {
    root: PathBuf,
    segments: Vec<String>,
}

impl PathBuilder {
    /// Creates a builder rooted at `root` with no segments.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into(), segments: Vec::new() }
    }

    /// Returns a new builder with `segment` appended.
    ///
    /// The segment is taken verbatim. Separators, `.` and `..` inside it are
    /// interpreted by [`PathBuilder::resolve`] the same way the platform join
    /// would interpret them.
    pub fn join(&self, segment: impl AsRef<str>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(segment.as_ref().to_string());
        Self { root: self.root.clone(), segments }
    }

    /// Returns a new builder with every segment of `segments` appended in
    /// order.
    pub fn join_all<I, S>(&self, segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut out = self.segments.clone();
        out.extend(segments.into_iter().map(|s| s.as_ref().to_string()));
        Self { root: self.root.clone(), segments: out }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Joins the root and all segments and normalizes the result.
    ///
    /// This is purely lexical: nothing is read from the filesystem and the
    /// same builder always resolves to the same path.
    pub fn resolve(&self) -> PathBuf {
        let joined = self
            .segments
            .iter()
            .fold(self.root.clone(), |path, segment| path.join(segment));
        normalize(&joined)
    }

    /// Same as [`PathBuilder::resolve`], rendered as a string. Non-unicode
    /// components are replaced lossily.
    pub fn resolve_string(&self) -> String {
        self.resolve().to_string_lossy().into_owned()
    }

    /// Final component of the resolved path, if it has one.
    pub fn file_name(&self) -> Option<String> {
        self.resolve()
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
    }

    /// Builder for the parent directory of the resolved path.
    pub fn parent(&self) -> Option<Self> {
        self.resolve().parent().map(Self::new)
    }
}

impl fmt::Display for PathBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.resolve().display())
    }
}

impl From<&PathBuilder> for PathBuf {
    fn from(builder: &PathBuilder) -> Self {
        builder.resolve()
    }
}

impl From<PathBuilder> for PathBuf {
    fn from(builder: PathBuilder) -> Self {
        builder.resolve()
    }
}

impl<S: AsRef<str>> Div<S> for PathBuilder {
    type Output = PathBuilder;

    fn div(self, segment: S) -> Self::Output {
        let mut segments = self.segments;
        segments.push(segment.as_ref().to_string());
        Self { root: self.root, segments }
    }
}

impl<S: AsRef<str>> Div<S> for &PathBuilder {
    type Output = PathBuilder;

    fn div(self, segment: S) -> Self::Output {
        self.join(segment)
    }
}
