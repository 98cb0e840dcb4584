use std::path::{Component, Path, PathBuf};

/// Lexically removes `.` components and folds `..` into the preceding
/// normal component. Leading `..` components are kept on relative paths and
/// dropped directly under a root, since `/..` is `/`.
pub(crate) fn normalize(path: &Path) -> PathBuf {
    let mut out: Vec<Component<'_>> = Vec::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.last() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                Some(Component::ParentDir) | Some(Component::CurDir) | None => {
                    out.push(component);
                }
            },
            other => out.push(other),
        }
    }

    if out.is_empty() {
        return PathBuf::from(".");
    }

    out.iter().collect()
}
