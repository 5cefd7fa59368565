//! Logical path helpers
//!
//! Logical paths are always `/`-separated regardless of platform.

use std::path::{Component, Path};

/// Lexically clean a filesystem root into its logical form.
///
/// `.` components are dropped, `..` folds into the preceding segment where
/// one exists, trailing separators disappear. Returns an empty string for
/// roots that clean to nothing (`""`, `"."`).
pub fn logical_root(root: &Path) -> String {
    let mut absolute = false;
    let mut prefix = String::new();
    let mut segments: Vec<String> = Vec::new();

    for component in root.components() {
        match component {
            Component::Prefix(p) => prefix = p.as_os_str().to_string_lossy().replace('\\', "/"),
            Component::RootDir => absolute = true,
            Component::CurDir => {}
            Component::ParentDir => match segments.last() {
                Some(last) if last != ".." => {
                    segments.pop();
                }
                _ if absolute => {}
                _ => segments.push("..".to_string()),
            },
            Component::Normal(name) => segments.push(name.to_string_lossy().into_owned()),
        }
    }

    let mut out = prefix;
    if absolute {
        out.push('/');
    }
    out.push_str(&segments.join("/"));
    out
}

/// Append one segment to a logical path.
pub fn join(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        return name.to_string();
    }
    if parent.ends_with('/') {
        format!("{parent}{name}")
    } else {
        format!("{parent}/{name}")
    }
}

/// Strip `prefix` when present and enforce a single leading `/`.
pub fn normalize(path: &str, prefix: Option<&str>) -> String {
    let stripped = match prefix {
        Some(p) if !p.is_empty() => path.strip_prefix(p).unwrap_or(path),
        _ => path,
    };
    format!("/{}", stripped.trim_start_matches('/'))
}
