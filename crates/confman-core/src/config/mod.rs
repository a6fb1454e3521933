//! The configuration directory handle.
//!
//! A [`Config`] is bound to one directory that is guaranteed to exist for as
//! long as the handle lives. Files inside it are reached by name through the
//! read, write and create accessor families; see [`read`], [`write`] and
//! [`create`] for those.
//!
//! Files that are read or written before they exist can be materialized from
//! a registered default:
//!
//! ```no_run
//! use confman_core::Config;
//!
//! let mut config = Config::open("myapp")?;
//! config.set_default_str("motd.txt", 0o644, "hello\n")?;
//! assert_eq!(config.read_string("motd.txt")?, "hello\n");
//! # Ok::<(), confman_core::ConfigError>(())
//! ```

mod create;
mod read;
mod tracked;
mod write;

use std::collections::HashMap;
use std::fmt;
use std::fs::{self, DirBuilder, File, Metadata, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use log::{debug, info, warn};

use crate::error::{ConfigError, Result};
use crate::format::ConfigFormat;
use crate::path::{clean_path, join_relative, ConfigPath};
use crate::platform::{
    resolve_config_root, ConfigDir, HomeDir, Platform, ReadEnv, SystemDirs, SystemEnv,
};

pub use tracked::TrackedFile;

/// Permission bits used when the config directory itself has to be created.
pub const DIR_PERM: u32 = 0o777;

/// Content generator for a default file. Receives the owning handle and the
/// freshly created, empty file.
pub type DefaultFn = Box<dyn Fn(&Config, &mut dyn Write) -> io::Result<()>>;

struct FileDefault {
    perm: u32,
    generate: DefaultFn,
}

/// Open flag combinations used by the accessor families.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenMode {
    /// Read only.
    Read,
    /// Write only, truncating existing content.
    WriteTruncate,
    /// Read and write, failing if the file already exists.
    CreateExclusive,
}

impl OpenMode {
    /// Build the [`OpenOptions`] for this mode. `perm` only matters when the
    /// open creates the file, and is ignored on non-Unix targets.
    pub fn options(self, perm: u32) -> OpenOptions {
        let mut options = OpenOptions::new();
        match self {
            OpenMode::Read => {
                options.read(true);
            }
            OpenMode::WriteTruncate => {
                options.write(true).truncate(true);
            }
            OpenMode::CreateExclusive => {
                options.read(true).write(true).create_new(true);
            }
        }
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(perm);
        }
        #[cfg(not(unix))]
        let _ = perm;
        options
    }

    fn operation(self) -> &'static str {
        match self {
            OpenMode::Read => "open_read",
            OpenMode::WriteTruncate => "open_write",
            OpenMode::CreateExclusive => "open_create",
        }
    }
}

/// A handle on one application configuration directory.
///
/// Not thread safe; share across threads by serializing access externally or
/// by opening separate handles.
pub struct Config {
    path: PathBuf,
    defaults: HashMap<String, FileDefault>,
    tracked: Vec<TrackedFile>,
}

impl Config {
    /// Open `name` inside the platform's default config directory.
    pub fn open(name: &str) -> Result<Self> {
        Self::open_with(name, Platform::current(), &SystemDirs, &SystemEnv)
    }

    /// [`Config::open`] with an explicit platform, directory provider and
    /// environment.
    ///
    /// Leading periods are stripped from `name`; exactly one is put back when
    /// the platform wants dot-prefixed names. The platform root itself must
    /// already exist.
    pub fn open_with<D, E>(name: &str, platform: Platform, dirs: &D, env: &E) -> Result<Self>
    where
        D: HomeDir + ConfigDir,
        E: ReadEnv,
    {
        let root = resolve_config_root(platform, dirs, env)?;
        fs::metadata(&root.path).map_err(|e| ConfigError::io(e, "stat", &root.path))?;

        let name = name.trim_start_matches('.');
        let dir_name = if root.leading_dot {
            format!(".{name}")
        } else {
            name.to_string()
        };

        Self::open_specific(join_relative(&root.path, dir_name))
    }

    /// Open `name` relative to the user's home directory, used verbatim.
    pub fn open_home(name: &str) -> Result<Self> {
        Self::open_home_with(name, &SystemDirs)
    }

    pub fn open_home_with<D: HomeDir>(name: &str, dirs: &D) -> Result<Self> {
        let home = dirs.home_dir().ok_or(ConfigError::HomeDirUnavailable)?;
        Self::open_specific(join_relative(&home, name))
    }

    /// Open the directory at exactly `path`, creating it if needed.
    ///
    /// The path is cleaned lexically first. Only the last component is
    /// created; a missing parent is an error. Opening an existing directory
    /// leaves it untouched.
    pub fn open_specific(path: impl AsRef<Path>) -> Result<Self> {
        let raw = path.as_ref();
        if raw.as_os_str().is_empty() {
            return Err(ConfigError::InvalidPath {
                path: raw.to_path_buf(),
                reason: "path cannot be empty".to_string(),
            });
        }

        let config = Config {
            path: clean_path(raw),
            defaults: HashMap::new(),
            tracked: Vec::new(),
        };
        config.create_root()?;
        Ok(config)
    }

    fn create_root(&self) -> Result<()> {
        match fs::metadata(&self.path) {
            Ok(meta) if meta.is_dir() => Ok(()),
            Ok(_) => Err(ConfigError::InvalidPath {
                path: self.path.clone(),
                reason: "not a directory".to_string(),
            }),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("Creating config directory {}", self.path.display());
                dir_builder(DIR_PERM)
                    .create(&self.path)
                    .map_err(|e| ConfigError::io(e, "create_dir", &self.path))
            }
            Err(e) => Err(ConfigError::io(e, "stat", &self.path)),
        }
    }

    /// The directory this handle is bound to.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn config_path(&self) -> ConfigPath {
        ConfigPath::from(self.path.as_path())
    }

    /// Absolute path of the entry `name` inside the directory. A leading
    /// separator in `name` does not escape it.
    pub fn child(&self, name: &str) -> PathBuf {
        join_relative(&self.path, name)
    }

    /// Register a generator for `name`, run the first time the file is read
    /// or written while absent. The file is created with `perm`.
    pub fn set_default_fn<F>(&mut self, name: impl Into<String>, perm: u32, f: F) -> Result<()>
    where
        F: Fn(&Config, &mut dyn Write) -> io::Result<()> + 'static,
    {
        let name = name.into();
        if self.defaults.contains_key(&name) {
            return Err(ConfigError::DuplicateDefault(name));
        }

        self.defaults.insert(
            name,
            FileDefault {
                perm,
                generate: Box::new(f),
            },
        );
        Ok(())
    }

    /// Register fixed bytes as the default content of `name`.
    pub fn set_default(&mut self, name: impl Into<String>, perm: u32, data: impl Into<Vec<u8>>) -> Result<()> {
        let data = data.into();
        self.set_default_fn(name, perm, move |_, w| w.write_all(&data))
    }

    /// Register fixed text as the default content of `name`.
    pub fn set_default_str(&mut self, name: impl Into<String>, perm: u32, text: impl Into<String>) -> Result<()> {
        self.set_default(name, perm, text.into().into_bytes())
    }

    pub fn has_default(&self, name: &str) -> bool {
        self.defaults.contains_key(name)
    }

    /// Metadata of the entry `name`.
    pub fn stat(&self, name: &str) -> Result<Metadata> {
        let path = self.child(name);
        fs::metadata(&path).map_err(|e| ConfigError::io(e, "stat", path))
    }

    /// Whether `name` exists. Only failures other than "not found" are errors.
    pub fn exists(&self, name: &str) -> Result<bool> {
        match self.stat(name) {
            Ok(_) => Ok(true),
            Err(e) if e.is_not_found() => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Sorted names of the entries directly inside the directory.
    pub fn list(&self) -> Result<Vec<String>> {
        let entries = fs::read_dir(&self.path).map_err(|e| ConfigError::io(e, "read_dir", &self.path))?;
        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| ConfigError::io(e, "read_dir_entry", &self.path))?;
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
        names.sort();
        Ok(names)
    }

    /// Create the subdirectory `name` with `perm` and return its path.
    pub fn mkdir(&self, name: &str, perm: u32) -> Result<ConfigPath> {
        let path = self.child(name);
        dir_builder(perm)
            .create(&path)
            .map_err(|e| ConfigError::io(e, "create_dir", &path))?;
        Ok(ConfigPath::from(path))
    }

    /// Create the subdirectory `name` and any missing parents with `perm`.
    /// Succeeds if it already is a directory.
    pub fn mkdir_all(&self, name: &str, perm: u32) -> Result<ConfigPath> {
        let path = self.child(name);
        dir_builder(perm)
            .recursive(true)
            .create(&path)
            .map_err(|e| ConfigError::io(e, "create_dir_all", &path))?;
        Ok(ConfigPath::from(path))
    }

    /// Open `name` with caller supplied options. No default handling.
    pub fn open_raw(&self, name: &str, options: &OpenOptions) -> Result<File> {
        let path = self.child(name);
        options.open(&path).map_err(|e| ConfigError::io(e, "open", path))
    }

    fn open_mode(&self, name: &str, mode: OpenMode, perm: u32) -> Result<File> {
        let path = self.child(name);
        debug!("{} {}", mode.operation(), path.display());
        mode.options(perm)
            .open(&path)
            .map_err(|e| ConfigError::io(e, mode.operation(), path))
    }

    /// Gate for the read and write families: `name` must exist, or be
    /// creatable from its registered default.
    fn ensure_exists_or_default(&self, name: &str) -> Result<()> {
        if self.exists(name)? {
            return Ok(());
        }

        let Some(default) = self.defaults.get(name) else {
            return Err(ConfigError::NotFound(name.to_string()));
        };

        info!("Creating '{}' from its default in {}", name, self.path.display());
        let mut file = self.open_mode(name, OpenMode::CreateExclusive, default.perm)?;
        if let Err(e) = (default.generate)(self, &mut file) {
            drop(file);
            let path = self.child(name);
            // a half-written default must not pass for a real file later
            if let Err(cleanup) = fs::remove_file(&path) {
                warn!("Failed to remove partial default {}: {}", path.display(), cleanup);
            }
            return Err(ConfigError::io(e, "write_default", path));
        }
        Ok(())
    }

    /// Gate for the create family.
    fn ensure_absent(&self, name: &str) -> Result<()> {
        if self.exists(name)? {
            return Err(ConfigError::AlreadyExists(name.to_string()));
        }
        Ok(())
    }

    fn format_for(&self, name: &str) -> Result<ConfigFormat> {
        ConfigFormat::from_path(Path::new(name)).ok_or_else(|| ConfigError::UnsupportedFormat(name.to_string()))
    }

    fn track(&mut self, name: &str, file: File, writable: bool) -> TrackedFile {
        let tracked = TrackedFile::new(self.child(name), file, writable);
        self.tracked.push(tracked.clone());
        tracked
    }

    /// Number of files currently registered for [`Config::close`].
    pub fn tracked_len(&self) -> usize {
        self.tracked.len()
    }

    /// Close every file opened through an `_auto` accessor.
    ///
    /// Every file is visited even when some fail; one error is returned per
    /// failure, including files the caller had already closed.
    pub fn close(&mut self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        for file in self.tracked.drain(..) {
            if let Err(e) = file.close() {
                warn!("Failed to close {}: {}", file.path().display(), e);
                errors.push(e);
            }
        }
        errors
    }

    /// Remove the whole directory and everything in it. Irreversible.
    ///
    /// Files still tracked are closed first; close failures are logged by
    /// [`Config::close`] and do not stop the removal.
    pub fn delete(mut self) -> Result<()> {
        let failed = self.close().len();
        if failed > 0 {
            warn!("{} tracked file(s) failed to close before deleting {}", failed, self.path.display());
        }
        debug!("Deleting config directory {}", self.path.display());
        fs::remove_dir_all(&self.path).map_err(|e| ConfigError::io(e, "remove_dir_all", &self.path))
    }

    /// Remove the single entry `name`; directories are removed recursively.
    pub fn delete_file(&self, name: &str) -> Result<()> {
        let path = self.child(name);
        let cleaned = clean_path(&path);
        if cleaned == self.path || !cleaned.starts_with(&self.path) {
            return Err(ConfigError::InvalidPath {
                path,
                reason: "not an entry inside the config directory".to_string(),
            });
        }

        let meta = fs::symlink_metadata(&path).map_err(|e| ConfigError::io(e, "stat", &path))?;
        debug!("Deleting {}", path.display());
        if meta.is_dir() {
            fs::remove_dir_all(&path).map_err(|e| ConfigError::io(e, "remove_dir_all", path))
        } else {
            fs::remove_file(&path).map_err(|e| ConfigError::io(e, "remove_file", path))
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut defaults: Vec<&String> = self.defaults.keys().collect();
        defaults.sort();
        f.debug_struct("Config")
            .field("path", &self.path)
            .field("defaults", &defaults)
            .field("tracked", &self.tracked.len())
            .finish()
    }
}

fn dir_builder(perm: u32) -> DirBuilder {
    #[allow(unused_mut)]
    let mut builder = DirBuilder::new();
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(perm);
    }
    #[cfg(not(unix))]
    let _ = perm;
    builder
}

#[cfg(test)]
mod tests;
