//! Locate and manage a per-application configuration directory.
//!
//! [`Config`] binds one directory (found under the platform config root, the
//! home directory, or given explicitly) and offers read, write and create
//! helpers for the files inside it, including JSON, TOML, CSV and XML
//! codecs and per-file default content.
pub mod config;
pub mod error;
pub mod format;
pub mod path;
pub mod platform;

// Re-export key public types for easier use by the binary
pub use config::{Config, DefaultFn, OpenMode, TrackedFile};
pub use error::{ConfigError, Result};
pub use format::ConfigFormat;
pub use path::ConfigPath;
pub use platform::{resolve_config_root, resolve_system_config_root, ConfigRoot, Platform};
