//! Platform config root resolution.
//!
//! The lookup is a pure function of the injected [`Platform`], directory
//! provider and environment, so every platform branch can be exercised from
//! tests on any host:
//!
//! ```
//! use confman_core::platform::{resolve_config_root, Platform, SystemDirs, SystemEnv};
//!
//! let root = resolve_config_root(Platform::current(), &SystemDirs, &SystemEnv);
//! # let _ = root;
//! ```

mod fixed;
mod system;

use std::env;
use std::fs::DirBuilder;
use std::path::PathBuf;

use log::debug;

use crate::error::{ConfigError, Result};

#[cfg(any(test, feature = "test-support"))]
pub use fixed::{FixedDirs, InMemoryEnv};
pub use system::{SystemDirs, SystemEnv};

/// Environment variable checked to detect the a-Shell app.
pub const APP_NAME_VAR: &str = "APPNAME";

/// Value of [`APP_NAME_VAR`] set by a-Shell.
pub const A_SHELL: &str = "a-Shell";

/// Subdirectory of the home directory used as the config root on platforms
/// without a native per-user config location.
pub const DOT_CONFIG: &str = ".config";

pub trait HomeDir {
    fn home_dir(&self) -> Option<PathBuf>;
}

pub trait ConfigDir {
    fn config_dir(&self) -> Option<PathBuf>;
}

pub trait ReadEnv {
    fn var(&self, key: &str) -> std::result::Result<String, env::VarError>;
}

/// Operating systems that get special treatment during resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    MacOs,
    Wasi,
    Other,
}

impl Platform {
    /// The platform this binary was compiled for.
    pub fn current() -> Self {
        Self::from_os(env::consts::OS)
    }

    /// Map an OS identifier as reported by `std::env::consts::OS`.
    pub fn from_os(os: &str) -> Self {
        match os {
            "macos" => Platform::MacOs,
            "wasi" => Platform::Wasi,
            _ => Platform::Other,
        }
    }

    fn uses_home_dot_config(self) -> bool {
        matches!(self, Platform::MacOs | Platform::Wasi)
    }
}

/// A resolved base configuration directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigRoot {
    pub path: PathBuf,
    /// Whether application directory names must start with a period.
    pub leading_dot: bool,
}

/// Resolve the base configuration directory for `platform`.
///
/// macOS and WASI use `$HOME/.config`; under a-Shell that directory is
/// created on the spot. Everything else defers to the host's per-user config
/// directory. May create a directory as a side effect.
pub fn resolve_config_root<D, E>(platform: Platform, dirs: &D, env: &E) -> Result<ConfigRoot>
where
    D: HomeDir + ConfigDir,
    E: ReadEnv,
{
    if platform.uses_home_dot_config() {
        let path = dirs
            .home_dir()
            .ok_or(ConfigError::HomeDirUnavailable)?
            .join(DOT_CONFIG);

        if env.var(APP_NAME_VAR).is_ok_and(|name| name == A_SHELL) {
            debug!("a-Shell detected, ensuring {} exists", path.display());
            create_dir_all_mode(&path)?;
        }

        return Ok(ConfigRoot { path, leading_dot: false });
    }

    let path = dirs.config_dir().ok_or(ConfigError::ConfigDirUnavailable)?;
    Ok(ConfigRoot { path, leading_dot: false })
}

/// [`resolve_config_root`] against the real host.
pub fn resolve_system_config_root() -> Result<ConfigRoot> {
    resolve_config_root(Platform::current(), &SystemDirs, &SystemEnv)
}

fn create_dir_all_mode(path: &std::path::Path) -> Result<()> {
    let mut builder = DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(0o777);
    }
    builder
        .create(path)
        .map_err(|e| ConfigError::io(e, "create_dir_all", path))
}
