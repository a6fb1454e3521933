//! Write family: truncating write-only opens gated on existence or a
//! registered default.

use std::fs::File;
use std::io::Write;

use serde::Serialize;

use super::{Config, OpenMode, TrackedFile};
use crate::error::{ConfigError, Result};
use crate::format;

impl Config {
    /// Open `name` write-only, truncating it.
    ///
    /// A missing file is created from its default first (and then
    /// truncated); without one the call fails with [`ConfigError::NotFound`].
    pub fn open_write(&self, name: &str) -> Result<File> {
        self.ensure_exists_or_default(name)?;
        self.open_mode(name, OpenMode::WriteTruncate, 0)
    }

    /// Same as [`Config::open_write`], but the file is also closed by
    /// [`Config::close`].
    pub fn open_write_auto(&mut self, name: &str) -> Result<TrackedFile> {
        let file = self.open_write(name)?;
        Ok(self.track(name, file, true))
    }

    /// Replace the contents of `name` with `data`. Returns the bytes written.
    pub fn write(&self, name: &str, data: &[u8]) -> Result<usize> {
        let mut file = self.open_write(name)?;
        file.write_all(data)
            .map_err(|e| ConfigError::io(e, "write", self.child(name)))?;
        Ok(data.len())
    }

    pub fn write_string(&self, name: &str, text: &str) -> Result<usize> {
        self.write(name, text.as_bytes())
    }

    pub fn write_json<T: Serialize + ?Sized>(&self, name: &str, value: &T) -> Result<()> {
        format::write_json(self.open_write(name)?, value)
    }

    #[cfg(feature = "toml-config")]
    pub fn write_toml<T: Serialize + ?Sized>(&self, name: &str, value: &T) -> Result<()> {
        format::write_toml(self.open_write(name)?, value)
    }

    #[cfg(feature = "csv-config")]
    pub fn write_csv<R, F>(&self, name: &str, records: &[R]) -> Result<()>
    where
        R: AsRef<[F]>,
        F: AsRef<[u8]>,
    {
        format::write_csv(self.open_write(name)?, records)
    }

    #[cfg(feature = "xml-config")]
    pub fn write_xml<T: Serialize + ?Sized>(&self, name: &str, value: &T) -> Result<()> {
        format::write_xml(self.open_write(name)?, value)
    }

    /// Encode `value` into `name` with the codec picked from its extension.
    pub fn write_as<T: Serialize + ?Sized>(&self, name: &str, value: &T) -> Result<()> {
        let format = self.format_for(name)?;
        format.encode(self.open_write(name)?, value)
    }
}
