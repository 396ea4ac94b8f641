//! POSIX-style path string normalization.
//!
//! Works purely on strings with `/` as the separator, independent of the host
//! platform, since resolved paths are reported back as JSON values.

pub const SEPARATOR: char = '/';

/// Collapse `.`, `..` and repeated separators.
///
/// `..` removes the preceding component when the path is absolute or the
/// preceding component is not itself `..`; at the root it is dropped. A
/// relative path with nothing left normalizes to `.`.
pub fn normalize(path: &str) -> String {
    let path = if path.is_empty() { "." } else { path };
    let absolute = path.starts_with(SEPARATOR);

    let collapsed = collapse_separators(path);

    let mut components: Vec<&str> = Vec::new();
    for component in collapsed.split(SEPARATOR) {
        match component {
            "." => continue,
            ".." if absolute || components.last().is_some_and(|last| *last != "..") => {
                components.pop();
            }
            _ => components.push(component),
        }
    }

    if !absolute {
        if components.is_empty() {
            components.push(".");
        } else if components == [""] {
            components.insert(0, ".");
        }
    }

    let mut normalized = components.join("/");
    if absolute && !normalized.starts_with(SEPARATOR) {
        normalized.insert(0, SEPARATOR);
    }
    normalized
}

fn collapse_separators(path: &str) -> String {
    let mut collapsed = String::with_capacity(path.len());
    let mut previous = None;
    for c in path.chars() {
        if c == SEPARATOR && previous == Some(SEPARATOR) {
            continue;
        }
        collapsed.push(c);
        previous = Some(c);
    }
    collapsed
}

/// Join segments with `/`, skipping empty ones, then normalize the result.
pub fn join<S: AsRef<str>>(segments: &[S]) -> String {
    let joined = segments
        .iter()
        .map(AsRef::as_ref)
        .filter(|segment| !segment.is_empty())
        .collect::<Vec<_>>()
        .join("/");
    normalize(&joined)
}

pub fn is_absolute(path: &str) -> bool {
    path.starts_with(SEPARATOR)
}

/// Resolve `path` against `cwd` unless it is already absolute.
pub fn resolve(path: &str, cwd: &str) -> String {
    if is_absolute(path) {
        path.to_string()
    } else {
        join(&[cwd, path])
    }
}
