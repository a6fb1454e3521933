//! Create family: exclusive creation of files that must not exist yet.

use std::fs::File;
use std::io::Write;

use serde::Serialize;

use super::{Config, OpenMode, TrackedFile};
use crate::error::{ConfigError, Result};
use crate::format;

impl Config {
    /// Create `name` with `perm` and open it read-write.
    ///
    /// Fails with [`ConfigError::AlreadyExists`] if the file is present. The
    /// open itself is exclusive, so a file appearing between the check and
    /// the open is rejected too. Defaults are never consulted.
    pub fn open_create(&self, name: &str, perm: u32) -> Result<File> {
        self.ensure_absent(name)?;
        self.open_mode(name, OpenMode::CreateExclusive, perm)
    }

    /// Same as [`Config::open_create`], but the file is also closed by
    /// [`Config::close`].
    pub fn open_create_auto(&mut self, name: &str, perm: u32) -> Result<TrackedFile> {
        let file = self.open_create(name, perm)?;
        Ok(self.track(name, file, true))
    }

    /// Create `name` holding `data`. Returns the bytes written.
    pub fn create(&self, name: &str, data: &[u8], perm: u32) -> Result<usize> {
        let mut file = self.open_create(name, perm)?;
        file.write_all(data)
            .map_err(|e| ConfigError::io(e, "write", self.child(name)))?;
        Ok(data.len())
    }

    pub fn create_string(&self, name: &str, text: &str, perm: u32) -> Result<usize> {
        self.create(name, text.as_bytes(), perm)
    }

    pub fn create_json<T: Serialize + ?Sized>(&self, name: &str, value: &T, perm: u32) -> Result<()> {
        format::write_json(self.open_create(name, perm)?, value)
    }

    #[cfg(feature = "toml-config")]
    pub fn create_toml<T: Serialize + ?Sized>(&self, name: &str, value: &T, perm: u32) -> Result<()> {
        format::write_toml(self.open_create(name, perm)?, value)
    }

    #[cfg(feature = "csv-config")]
    pub fn create_csv<R, F>(&self, name: &str, records: &[R], perm: u32) -> Result<()>
    where
        R: AsRef<[F]>,
        F: AsRef<[u8]>,
    {
        format::write_csv(self.open_create(name, perm)?, records)
    }

    #[cfg(feature = "xml-config")]
    pub fn create_xml<T: Serialize + ?Sized>(&self, name: &str, value: &T, perm: u32) -> Result<()> {
        format::write_xml(self.open_create(name, perm)?, value)
    }
}
