use std::env;
use std::path::PathBuf;

use super::{ConfigDir, HomeDir, ReadEnv};

/// Zero-sized type, delegates to the `dirs` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemDirs;

impl HomeDir for SystemDirs {
    #[inline]
    fn home_dir(&self) -> Option<PathBuf> {
        dirs::home_dir()
    }
}

impl ConfigDir for SystemDirs {
    #[inline]
    fn config_dir(&self) -> Option<PathBuf> {
        dirs::config_dir()
    }
}

/// Zero-sized type, delegates to `std::env`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemEnv;

impl ReadEnv for SystemEnv {
    #[inline]
    fn var(&self, key: &str) -> Result<String, env::VarError> {
        env::var(key)
    }
}
