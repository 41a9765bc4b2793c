//! Structured export of product lists.
//!
//! JSON, YAML, and CSV. These bypass templates entirely.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SerializeError {
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML serialization failed: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("CSV serialization failed: {0}")]
    Csv(String),

    #[error("Unknown export format '{0}' (expected json, yaml or csv)")]
    UnknownFormat(String),
}

/// Export formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Json,
    Yaml,
    Csv,
}

impl OutputFormat {
    pub fn content_type(&self) -> &'static str {
        match self {
            OutputFormat::Json => "application/json",
            OutputFormat::Yaml => "application/yaml",
            OutputFormat::Csv => "text/csv; charset=utf-8",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Yaml => "yaml",
            OutputFormat::Csv => "csv",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = SerializeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "yaml" | "yml" => Ok(OutputFormat::Yaml),
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(SerializeError::UnknownFormat(s.to_string())),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Serializes `data` in the given format.
pub fn serialize_structured<T: Serialize>(
    data: &T,
    format: OutputFormat,
) -> Result<String, SerializeError> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(data)?),
        OutputFormat::Yaml => Ok(serde_yaml::to_string(data)?),
        OutputFormat::Csv => serialize_csv(data),
    }
}

/// Serializes `data` as CSV.
///
/// An array of objects becomes a header row (keys of the first object) plus
/// one row per object. Nested values are written as JSON text.
pub fn serialize_csv<T: Serialize>(data: &T) -> Result<String, SerializeError> {
    let json_value = serde_json::to_value(data)?;
    flatten_json_to_csv(&json_value)
}

fn flatten_json_to_csv(value: &serde_json::Value) -> Result<String, SerializeError> {
    use serde_json::Value;

    let csv_err = |e: csv::Error| SerializeError::Csv(e.to_string());
    let mut wtr = csv::Writer::from_writer(vec![]);

    match value {
        Value::Array(arr) if !arr.is_empty() => {
            if let Some(Value::Object(first)) = arr.first() {
                let headers: Vec<&str> = first.keys().map(|s| s.as_str()).collect();
                wtr.write_record(&headers).map_err(csv_err)?;

                for item in arr {
                    if let Value::Object(obj) = item {
                        let row: Vec<String> = headers
                            .iter()
                            .map(|h| obj.get(*h).map(value_to_string).unwrap_or_default())
                            .collect();
                        wtr.write_record(&row).map_err(csv_err)?;
                    }
                }
            } else {
                wtr.write_record(["value"]).map_err(csv_err)?;
                for item in arr {
                    wtr.write_record([value_to_string(item)]).map_err(csv_err)?;
                }
            }
        }
        // Nothing to export: no header, no rows.
        Value::Array(_) => {}
        Value::Object(obj) => {
            wtr.write_record(["key", "value"]).map_err(csv_err)?;
            for (k, v) in obj {
                wtr.write_record([k.as_str(), &value_to_string(v)])
                    .map_err(csv_err)?;
            }
        }
        _ => {
            wtr.write_record(["value"]).map_err(csv_err)?;
            wtr.write_record([value_to_string(value)]).map_err(csv_err)?;
        }
    }

    let bytes = wtr
        .into_inner()
        .map_err(|e| SerializeError::Csv(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| SerializeError::Csv(e.to_string()))
}

fn value_to_string(v: &serde_json::Value) -> String {
    match v {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    }
}
