//! Structured formats understood by the typed accessors.
//!
//! Every codec works against an already opened reader or writer; opening,
//! default handling and closing stay with [`crate::Config`].

use std::io::{BufReader, Read, Write};
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{ConfigError, Result};

/// Supported configuration file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// JSON format (.json)
    Json,
    /// TOML format (.toml) - requires "toml-config" feature
    #[cfg(feature = "toml-config")]
    Toml,
    /// CSV format (.csv) - requires "csv-config" feature
    #[cfg(feature = "csv-config")]
    Csv,
    /// XML format (.xml) - requires "xml-config" feature
    #[cfg(feature = "xml-config")]
    Xml,
}

impl ConfigFormat {
    /// Get the file extension for this format
    pub fn extension(&self) -> &'static str {
        match self {
            ConfigFormat::Json => "json",
            #[cfg(feature = "toml-config")]
            ConfigFormat::Toml => "toml",
            #[cfg(feature = "csv-config")]
            ConfigFormat::Csv => "csv",
            #[cfg(feature = "xml-config")]
            ConfigFormat::Xml => "xml",
        }
    }

    /// Determine format from file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| match ext.to_lowercase().as_str() {
                "json" => Some(ConfigFormat::Json),
                #[cfg(feature = "toml-config")]
                "toml" => Some(ConfigFormat::Toml),
                #[cfg(feature = "csv-config")]
                "csv" => Some(ConfigFormat::Csv),
                #[cfg(feature = "xml-config")]
                "xml" => Some(ConfigFormat::Xml),
                _ => None,
            })
    }

    /// Serialize `value` into `writer`.
    ///
    /// For CSV, `value` must serialize as a sequence of records; each record
    /// is a sequence of scalar fields (or a single scalar).
    pub fn encode<T, W>(&self, writer: W, value: &T) -> Result<()>
    where
        T: Serialize + ?Sized,
        W: Write,
    {
        match self {
            ConfigFormat::Json => write_json(writer, value),
            #[cfg(feature = "toml-config")]
            ConfigFormat::Toml => write_toml(writer, value),
            #[cfg(feature = "csv-config")]
            ConfigFormat::Csv => serialize_csv(writer, value),
            #[cfg(feature = "xml-config")]
            ConfigFormat::Xml => write_xml(writer, value),
        }
    }

    /// Deserialize a `T` from `reader`.
    ///
    /// For CSV, `T` is built from the records as a sequence of sequences of
    /// strings, so `Vec<Vec<String>>` and `Vec<(String, String)>` work while
    /// numeric fields do not.
    pub fn decode<T, R>(&self, reader: R) -> Result<T>
    where
        T: DeserializeOwned,
        R: Read,
    {
        match self {
            ConfigFormat::Json => read_json(reader),
            #[cfg(feature = "toml-config")]
            ConfigFormat::Toml => read_toml(reader),
            #[cfg(feature = "csv-config")]
            ConfigFormat::Csv => deserialize_csv(reader),
            #[cfg(feature = "xml-config")]
            ConfigFormat::Xml => read_xml(reader),
        }
    }
}

/// JSON output is newline terminated.
pub fn write_json<T, W>(mut writer: W, value: &T) -> Result<()>
where
    T: Serialize + ?Sized,
    W: Write,
{
    serde_json::to_writer(&mut writer, value)?;
    writer
        .write_all(b"\n")
        .map_err(ConfigError::stream("json"))
}

pub fn read_json<T, R>(reader: R) -> Result<T>
where
    T: DeserializeOwned,
    R: Read,
{
    Ok(serde_json::from_reader(BufReader::new(reader))?)
}

#[cfg(feature = "toml-config")]
pub fn write_toml<T, W>(mut writer: W, value: &T) -> Result<()>
where
    T: Serialize + ?Sized,
    W: Write,
{
    let text = toml::to_string(value)?;
    writer
        .write_all(text.as_bytes())
        .map_err(ConfigError::stream("toml"))
}

#[cfg(feature = "toml-config")]
pub fn read_toml<T, R>(mut reader: R) -> Result<T>
where
    T: DeserializeOwned,
    R: Read,
{
    let mut text = String::new();
    reader
        .read_to_string(&mut text)
        .map_err(ConfigError::stream("toml"))?;
    Ok(toml::from_str(&text)?)
}

/// Write all `records` as comma separated, `\n` terminated lines.
#[cfg(feature = "csv-config")]
pub fn write_csv<W, R, F>(writer: W, records: &[R]) -> Result<()>
where
    W: Write,
    R: AsRef<[F]>,
    F: AsRef<[u8]>,
{
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(writer);
    for record in records {
        csv_writer.write_record(record.as_ref())?;
    }
    csv_writer.flush().map_err(ConfigError::stream("csv"))
}

/// Read every record; all records must have the same number of fields.
#[cfg(feature = "csv-config")]
pub fn read_csv<R: Read>(reader: R) -> Result<Vec<Vec<String>>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_reader(reader);
    let mut records = Vec::new();
    for record in csv_reader.records() {
        let record = record?;
        records.push(record.iter().map(str::to_string).collect());
    }
    Ok(records)
}

/// Serde entry point for CSV: `value` is a sequence of records.
#[cfg(feature = "csv-config")]
fn serialize_csv<T, W>(writer: W, value: &T) -> Result<()>
where
    T: Serialize + ?Sized,
    W: Write,
{
    let serde_json::Value::Array(records) = serde_json::to_value(value)? else {
        return Err(ConfigError::UnsupportedFormat(
            "csv needs a sequence of records".to_string(),
        ));
    };

    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(writer);
    for record in &records {
        csv_writer.serialize(record)?;
    }
    csv_writer.flush().map_err(ConfigError::stream("csv"))
}

#[cfg(feature = "csv-config")]
fn deserialize_csv<T, R>(reader: R) -> Result<T>
where
    T: DeserializeOwned,
    R: Read,
{
    use serde::Deserialize;
    use serde::de::IntoDeserializer;
    use serde::de::value::{Error as ValueError, SeqDeserializer};

    let records = read_csv(reader)?;
    let deserializer: SeqDeserializer<_, ValueError> = records.into_deserializer();
    Ok(T::deserialize(deserializer)?)
}

#[cfg(feature = "xml-config")]
pub fn write_xml<T, W>(mut writer: W, value: &T) -> Result<()>
where
    T: Serialize + ?Sized,
    W: Write,
{
    let text = quick_xml::se::to_string(value)?;
    writer
        .write_all(text.as_bytes())
        .map_err(ConfigError::stream("xml"))
}

#[cfg(feature = "xml-config")]
pub fn read_xml<T, R>(reader: R) -> Result<T>
where
    T: DeserializeOwned,
    R: Read,
{
    Ok(quick_xml::de::from_reader(BufReader::new(reader))?)
}
