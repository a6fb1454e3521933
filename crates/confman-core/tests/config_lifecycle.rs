use std::collections::BTreeMap;
use std::io::Write;

use confman_core::{Config, ConfigError, ConfigFormat, ConfigPath, Result};
use serde::{Deserialize, Serialize};
use tempfile::tempdir;

#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct Profile {
    user: String,
    editor: String,
}

#[test]
fn test_full_lifecycle() -> Result<()> {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let root = ConfigPath::new(temp_dir.path()).join(["myapp"]);

    let mut config = Config::open_specific(&root)?;
    config.set_default_str("sshkey.pub", 0o644, "[SSHKEY]")?;
    config.set_default_fn("profile.json", 0o600, |_, w| {
        serde_json::to_writer(&mut *w, &Profile { user: "zeus".into(), editor: "vi".into() })
            .map_err(std::io::Error::from)?;
        w.write_all(b"\n")
    })?;

    assert_eq!(config.read_string("sshkey.pub")?, "[SSHKEY]");

    let mut profile: Profile = config.read_as("profile.json")?;
    assert_eq!(profile.user, "zeus");
    profile.editor = "hx".to_string();
    config.write_as("profile.json", &profile)?;
    assert_eq!(config.read_json::<Profile>("profile.json")?, profile);

    config.create_toml("limits.toml", &BTreeMap::from([("max_users", 8)]), 0o644)?;
    let limits: BTreeMap<String, u32> = config.read_toml("limits.toml")?;
    assert_eq!(limits["max_users"], 8);

    let mut log = config.open_create_auto("session.log", 0o600)?;
    writeln!(log, "opened").unwrap();
    assert!(config.close().is_empty());

    assert_eq!(
        config.list()?,
        vec!["limits.toml", "profile.json", "session.log", "sshkey.pub"]
    );

    config.delete_file("session.log")?;
    assert!(!config.exists("session.log")?);

    config.delete()?;
    assert!(!root.as_path().exists());
    Ok(())
}

#[test]
fn test_reopen_keeps_files_but_not_defaults() -> Result<()> {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let dir = temp_dir.path().join("myapp");

    let mut first = Config::open_specific(&dir)?;
    first.set_default_str("motd", 0o644, "hi")?;
    first.read("motd")?;

    let second = Config::open_specific(&dir)?;
    assert!(!second.has_default("motd"));
    assert_eq!(second.read_string("motd")?, "hi");
    assert!(matches!(second.read("other"), Err(ConfigError::NotFound(_))));
    Ok(())
}

#[test]
fn test_format_detection() {
    assert_eq!(ConfigFormat::from_path("a/b.JSON".as_ref()), Some(ConfigFormat::Json));
    assert_eq!(ConfigFormat::from_path("a/b".as_ref()), None);
}
