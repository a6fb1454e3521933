use std::cell::Cell;
use std::fs;
use std::io::{self, Read, Write};
use std::rc::Rc;

use super::temp_config;
use crate::error::{ConfigError, Result};

#[test]
fn test_read_materializes_registered_default() -> Result<()> {
    let (mut config, _temp_dir) = temp_config();
    config.set_default_str("sshkey.pub", 0o644, "[SSHKEY]")?;

    assert!(!config.exists("sshkey.pub")?);
    assert_eq!(config.read_string("sshkey.pub")?, "[SSHKEY]");

    let on_disk = config.child("sshkey.pub");
    assert_eq!(fs::read_to_string(&on_disk).unwrap(), "[SSHKEY]");
    #[cfg(unix)]
    assert_eq!(super::mode_of(&on_disk), 0o644);
    Ok(())
}

#[test]
fn test_default_runs_only_while_missing() -> Result<()> {
    let (mut config, _temp_dir) = temp_config();
    let calls = Rc::new(Cell::new(0));
    let counter = Rc::clone(&calls);
    config.set_default_fn("counter.txt", 0o600, move |_, w| {
        counter.set(counter.get() + 1);
        w.write_all(b"initial")
    })?;

    assert_eq!(config.read("counter.txt")?, b"initial");
    fs::write(config.child("counter.txt"), "edited").unwrap();
    assert_eq!(config.read_string("counter.txt")?, "edited");

    assert_eq!(calls.get(), 1);
    Ok(())
}

#[test]
fn test_default_generator_sees_handle() -> Result<()> {
    let (mut config, _temp_dir) = temp_config();
    config.set_default_fn("where.txt", 0o644, |config, w| {
        write!(w, "{}", config.path().display())
    })?;

    let expected = config.path().display().to_string();
    assert_eq!(config.read_string("where.txt")?, expected);
    Ok(())
}

#[test]
fn test_default_generator_error_propagates() -> Result<()> {
    let (mut config, _temp_dir) = temp_config();
    config.set_default_fn("broken.txt", 0o644, |_, w| {
        w.write_all(b"par")?;
        Err(io::Error::new(io::ErrorKind::InvalidData, "generator failed"))
    })?;

    let err = config.read("broken.txt").unwrap_err();

    match err {
        ConfigError::Io { operation, source, .. } => {
            assert_eq!(operation, "write_default");
            assert_eq!(source.kind(), io::ErrorKind::InvalidData);
        }
        other => panic!("unexpected error: {other}"),
    }
    // the partial file is removed, so the next access runs the generator again
    assert!(!config.exists("broken.txt")?);
    assert!(config.read_string("broken.txt").is_err());
    assert!(!config.exists("broken.txt")?);
    Ok(())
}

#[test]
fn test_read_missing_without_default_fails_cleanly() -> Result<()> {
    let (config, _temp_dir) = temp_config();

    let err = config.read("absent.txt").unwrap_err();

    assert!(matches!(err, ConfigError::NotFound(ref name) if name == "absent.txt"));
    assert!(config.list()?.is_empty(), "no file should have been created");
    Ok(())
}

#[test]
fn test_open_read_streams_existing_file() -> Result<()> {
    let (config, _temp_dir) = temp_config();
    config.create_string("notes.txt", "line one\nline two\n", 0o644)?;

    let mut file = config.open_read("notes.txt")?;
    let mut text = String::new();
    file.read_to_string(&mut text).unwrap();

    assert_eq!(text, "line one\nline two\n");
    Ok(())
}

#[test]
fn test_read_string_rejects_invalid_utf8() -> Result<()> {
    let (config, _temp_dir) = temp_config();
    config.create("blob.bin", &[0xff, 0xfe, 0x00], 0o644)?;

    assert_eq!(config.read("blob.bin")?, vec![0xff, 0xfe, 0x00]);
    let err = config.read_string("blob.bin").unwrap_err();
    assert!(matches!(err, ConfigError::Io { ref source, .. } if source.kind() == io::ErrorKind::InvalidData));
    Ok(())
}

#[test]
fn test_read_json_default() -> Result<()> {
    let (mut config, _temp_dir) = temp_config();
    config.set_default_fn("users.json", 0o644, |_, w| {
        serde_json::to_writer(w, &["Zeus", "Socrates"]).map_err(io::Error::from)
    })?;

    let users: Vec<String> = config.read_json("users.json")?;

    assert_eq!(users, vec!["Zeus", "Socrates"]);
    Ok(())
}

#[test]
fn test_read_json_decode_error_passes_through() -> Result<()> {
    let (config, _temp_dir) = temp_config();
    config.create_string("bad.json", "{\"open\": ", 0o644)?;

    let result: Result<serde_json::Value> = config.read_json("bad.json");

    assert!(matches!(result, Err(ConfigError::Json(_))));
    Ok(())
}

#[test]
fn test_read_as_unknown_extension() -> Result<()> {
    let (config, _temp_dir) = temp_config();
    config.create_string("notes.txt", "hello", 0o644)?;

    let result: Result<String> = config.read_as("notes.txt");

    assert!(matches!(result, Err(ConfigError::UnsupportedFormat(_))));
    Ok(())
}

#[cfg(feature = "csv-config")]
#[test]
fn test_read_as_csv_records() -> Result<()> {
    let (config, _temp_dir) = temp_config();
    config.create_string("hosts.csv", "athena,10.0.0.2\nares,10.0.0.3\n", 0o644)?;

    let hosts: Vec<(String, String)> = config.read_as("hosts.csv")?;

    assert_eq!(hosts[1], ("ares".to_string(), "10.0.0.3".to_string()));
    Ok(())
}

#[cfg(feature = "toml-config")]
#[test]
fn test_read_toml_from_default() -> Result<()> {
    use std::collections::BTreeMap;

    let (mut config, _temp_dir) = temp_config();
    config.set_default_str("app.toml", 0o644, "theme = \"dark\"\nfont = \"mono\"\n")?;

    let values: BTreeMap<String, String> = config.read_toml("app.toml")?;

    assert_eq!(values.get("theme").map(String::as_str), Some("dark"));
    assert_eq!(values.len(), 2);
    Ok(())
}

#[cfg(feature = "csv-config")]
#[test]
fn test_read_csv_from_default() -> Result<()> {
    let (mut config, _temp_dir) = temp_config();
    config.set_default_str("hosts.csv", 0o644, "name,addr\nathena,10.0.0.2\n")?;

    let records = config.read_csv("hosts.csv")?;

    assert_eq!(records, vec![vec!["name", "addr"], vec!["athena", "10.0.0.2"]]);
    Ok(())
}
