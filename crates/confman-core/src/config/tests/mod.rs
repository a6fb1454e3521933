#[cfg(test)]
mod read_tests;

use tempfile::{tempdir, TempDir};

use crate::config::Config;

/// A handle on a fresh `app` directory inside a temp dir. Keep the `TempDir`
/// alive for as long as the handle is used.
pub(super) fn temp_config() -> (Config, TempDir) {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let config = Config::open_specific(temp_dir.path().join("app")).expect("Failed to open config");
    (config, temp_dir)
}

#[cfg(unix)]
pub(super) fn mode_of(path: &std::path::Path) -> u32 {
    use std::os::unix::fs::PermissionsExt;
    std::fs::metadata(path).expect("Failed to stat").permissions().mode() & 0o777
}
