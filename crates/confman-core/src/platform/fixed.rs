#[cfg(any(test, feature = "test-support"))]
use std::cell::RefCell;
#[cfg(any(test, feature = "test-support"))]
use std::collections::HashMap;
#[cfg(any(test, feature = "test-support"))]
use std::env;
#[cfg(any(test, feature = "test-support"))]
use std::path::PathBuf;

#[cfg(any(test, feature = "test-support"))]
use super::{ConfigDir, HomeDir, ReadEnv};

/// Directory provider with explicitly set answers; unset lookups fail.
#[cfg(any(test, feature = "test-support"))]
#[derive(Debug, Clone, Default)]
pub struct FixedDirs {
    home: Option<PathBuf>,
    config: Option<PathBuf>,
}

#[cfg(any(test, feature = "test-support"))]
impl FixedDirs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_home(mut self, path: impl Into<PathBuf>) -> Self {
        self.home = Some(path.into());
        self
    }

    pub fn with_config(mut self, path: impl Into<PathBuf>) -> Self {
        self.config = Some(path.into());
        self
    }
}

#[cfg(any(test, feature = "test-support"))]
impl HomeDir for FixedDirs {
    fn home_dir(&self) -> Option<PathBuf> {
        self.home.clone()
    }
}

#[cfg(any(test, feature = "test-support"))]
impl ConfigDir for FixedDirs {
    fn config_dir(&self) -> Option<PathBuf> {
        self.config.clone()
    }
}

/// Won't touch the global process environment.
#[cfg(any(test, feature = "test-support"))]
#[derive(Debug, Default)]
pub struct InMemoryEnv {
    vars: RefCell<HashMap<String, String>>,
}

#[cfg(any(test, feature = "test-support"))]
impl InMemoryEnv {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, key: impl Into<String>, value: impl Into<String>) {
        self.vars.borrow_mut().insert(key.into(), value.into());
    }

    pub fn remove(&self, key: &str) {
        self.vars.borrow_mut().remove(key);
    }
}

#[cfg(any(test, feature = "test-support"))]
impl ReadEnv for InMemoryEnv {
    fn var(&self, key: &str) -> Result<String, env::VarError> {
        self.vars
            .borrow()
            .get(key)
            .cloned()
            .ok_or(env::VarError::NotPresent)
    }
}
