use std::path::{Component, Path, PathBuf};

/// Lexically normalize a path: drop `.` components and fold `..` into the
/// preceding normal component where possible. Leading `..` components that
/// cannot be folded are kept; `..` directly under the root is dropped.
/// Never touches the filesystem.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out: Vec<Component> = Vec::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.last() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(component),
            },
            other => out.push(other),
        }
    }

    out.iter().map(|c| c.as_os_str()).collect()
}

/// Compute the lexical relative path from `from` to `to`.
///
/// Both paths must be in the same frame (both relative to the same root,
/// or both absolute). Returns `None` when the walk from `from` cannot be
/// inverted lexically (a `..` remains on the `from` side after stripping
/// the common prefix, or exactly one side is absolute).
pub fn relative(from: &Path, to: &Path) -> Option<PathBuf> {
    if from.is_absolute() != to.is_absolute() {
        return None;
    }

    let from = normalize(from);
    let to = normalize(to);

    let from_parts: Vec<Component> = from.components().collect();
    let to_parts: Vec<Component> = to.components().collect();

    let common = from_parts
        .iter()
        .zip(to_parts.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let mut out = PathBuf::new();
    for component in &from_parts[common..] {
        match component {
            Component::Normal(_) => out.push(".."),
            // Can't step back out of an unresolved `..`.
            _ => return None,
        }
    }
    for component in &to_parts[common..] {
        out.push(component.as_os_str());
    }

    Some(out)
}

/// Render a path with forward slashes, as module specifiers require on
/// every platform.
pub fn to_specifier(path: &Path) -> String {
    let rendered = path.to_string_lossy();
    if rendered.contains('\\') {
        rendered.replace('\\', "/")
    } else {
        rendered.into_owned()
    }
}

/// The directory portion of a file path. A bare file name lives in `.`.
pub fn dir_of(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}
