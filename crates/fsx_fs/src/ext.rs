use fsx_path::PathBuilder;

use crate::{Dir, Entry, File};

/// Turns a resolved [`PathBuilder`] into a filesystem handle.
///
/// Segment extension stays on the builder and operations live on the
/// handles, so a segment named `delete` is just a segment.
pub trait FsExt {
    fn file(&self) -> File;
    fn dir(&self) -> Dir;
    fn entry(&self) -> Entry;
}

impl FsExt for PathBuilder {
    fn file(&self) -> File {
        File::new(self.resolve())
    }

    fn dir(&self) -> Dir {
        Dir::new(self.resolve())
    }

    fn entry(&self) -> Entry {
        Entry::new(self.resolve())
    }
}
