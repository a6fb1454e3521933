//! Joinable paths handed back by the config handle.

use std::ffi::OsStr;
use std::fmt;
use std::path::{Component, Path, PathBuf};

/// A joinable file path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct ConfigPath(PathBuf);

impl ConfigPath {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self(path.into())
    }

    /// Join `parts` onto this path with the platform separator, in order.
    ///
    /// Accepts plain strings as well as other [`ConfigPath`]s. An absolute
    /// part is appended below this path rather than replacing it. Nothing is
    /// checked against the filesystem.
    pub fn join<I, S>(&self, parts: I) -> ConfigPath
    where
        I: IntoIterator<Item = S>,
        S: AsRef<Path>,
    {
        let mut joined = self.0.clone();
        for part in parts {
            push_relative(&mut joined, part.as_ref());
        }
        ConfigPath(joined)
    }

    /// Join a slice of [`ConfigPath`]s onto this path.
    pub fn join_paths(&self, parts: &[ConfigPath]) -> ConfigPath {
        let parts: Vec<&Path> = parts.iter().map(ConfigPath::as_path).collect();
        self.join(parts)
    }

    pub fn as_path(&self) -> &Path {
        &self.0
    }

    pub fn into_path_buf(self) -> PathBuf {
        self.0
    }
}

impl AsRef<Path> for ConfigPath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl AsRef<OsStr> for ConfigPath {
    fn as_ref(&self) -> &OsStr {
        self.0.as_os_str()
    }
}

impl From<PathBuf> for ConfigPath {
    fn from(path: PathBuf) -> Self {
        Self(path)
    }
}

impl From<&Path> for ConfigPath {
    fn from(path: &Path) -> Self {
        Self(path.to_path_buf())
    }
}

impl From<&str> for ConfigPath {
    fn from(path: &str) -> Self {
        Self(PathBuf::from(path))
    }
}

impl From<String> for ConfigPath {
    fn from(path: String) -> Self {
        Self(PathBuf::from(path))
    }
}

impl From<ConfigPath> for PathBuf {
    fn from(path: ConfigPath) -> Self {
        path.0
    }
}

impl fmt::Display for ConfigPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

/// Append `part` to `base` component by component. Root and prefix
/// components of `part` are dropped, so the result always starts with `base`.
pub fn push_relative(base: &mut PathBuf, part: &Path) {
    for component in part.components() {
        match component {
            Component::RootDir | Component::Prefix(_) | Component::CurDir => {}
            other => base.push(other),
        }
    }
}

/// [`push_relative`] on a copy of `base`.
pub fn join_relative(base: &Path, part: impl AsRef<Path>) -> PathBuf {
    let mut joined = base.to_path_buf();
    push_relative(&mut joined, part.as_ref());
    joined
}

/// Lexically clean `path`: drop `.` segments, fold `..` into the preceding
/// normal segment, collapse repeated separators. An empty result becomes `.`.
///
/// `..` at the start of a relative path is kept; `..` directly under the root
/// is dropped.
pub fn clean_path(path: &Path) -> PathBuf {
    let mut out: Vec<Component<'_>> = Vec::new();

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

    if out.is_empty() {
        return PathBuf::from(".");
    }
    out.iter().collect()
}
