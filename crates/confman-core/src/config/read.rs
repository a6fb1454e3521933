//! Read family: read-only opens gated on existence or a registered default.

use std::fs::File;
use std::io::Read;

use serde::de::DeserializeOwned;

use super::{Config, OpenMode, TrackedFile};
use crate::error::{ConfigError, Result};
use crate::format;

impl Config {
    /// Open `name` read-only.
    ///
    /// A missing file is created from its default first; without one the
    /// call fails with [`ConfigError::NotFound`].
    pub fn open_read(&self, name: &str) -> Result<File> {
        self.ensure_exists_or_default(name)?;
        self.open_mode(name, OpenMode::Read, 0)
    }

    /// Same as [`Config::open_read`], but the file is also closed by
    /// [`Config::close`].
    pub fn open_read_auto(&mut self, name: &str) -> Result<TrackedFile> {
        let file = self.open_read(name)?;
        Ok(self.track(name, file, false))
    }

    /// Whole contents of `name`.
    pub fn read(&self, name: &str) -> Result<Vec<u8>> {
        let mut file = self.open_read(name)?;
        let mut buf = Vec::new();
        file.read_to_end(&mut buf)
            .map_err(|e| ConfigError::io(e, "read", self.child(name)))?;
        Ok(buf)
    }

    /// Whole contents of `name` as UTF-8 text.
    pub fn read_string(&self, name: &str) -> Result<String> {
        let mut file = self.open_read(name)?;
        let mut text = String::new();
        file.read_to_string(&mut text)
            .map_err(|e| ConfigError::io(e, "read_string", self.child(name)))?;
        Ok(text)
    }

    pub fn read_json<T: DeserializeOwned>(&self, name: &str) -> Result<T> {
        format::read_json(self.open_read(name)?)
    }

    #[cfg(feature = "toml-config")]
    pub fn read_toml<T: DeserializeOwned>(&self, name: &str) -> Result<T> {
        format::read_toml(self.open_read(name)?)
    }

    /// All records of `name`, each a list of fields.
    #[cfg(feature = "csv-config")]
    pub fn read_csv(&self, name: &str) -> Result<Vec<Vec<String>>> {
        format::read_csv(self.open_read(name)?)
    }

    #[cfg(feature = "xml-config")]
    pub fn read_xml<T: DeserializeOwned>(&self, name: &str) -> Result<T> {
        format::read_xml(self.open_read(name)?)
    }

    /// Decode `name` with the codec picked from its extension.
    pub fn read_as<T: DeserializeOwned>(&self, name: &str) -> Result<T> {
        let format = self.format_for(name)?;
        format.decode(self.open_read(name)?)
    }
}
