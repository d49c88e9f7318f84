//! Flat YAML and JSON documents as sources.
//!
//! A document is a single mapping of option names to scalar values:
//!
//! ```yaml
//! host: db1.example.com
//! port: 3306
//! verbose: true
//! ignore-table: "'^_tmp'"
//! ```
//!
//! Numbers become their decimal text, `true`/`false` become `1` and the
//! empty string, and `null` becomes the empty string.

use tracing::debug;

use crate::error::{Result, SourceError};
use crate::source::{Origin, SimpleSource};

/// Parses a flat YAML mapping into a document-origin source.
///
/// # Errors
///
/// Returns [`SourceError::YamlError`] for malformed YAML,
/// [`SourceError::NotMapping`] if the root is not a mapping, and
/// [`SourceError::NotFlat`] for nested values.
///
/// # Examples
///
/// ```
/// use cascade_sources::{Source, document_from_yaml};
///
/// let source = document_from_yaml("overrides.yaml", "port: 3307\nverbose: true\n").unwrap();
/// assert_eq!(source.value("port"), Some("3307"));
/// assert_eq!(source.value("verbose"), Some("1"));
/// ```
pub fn document_from_yaml(name: &str, text: &str) -> Result<SimpleSource> {
    let root: serde_yaml::Value = serde_yaml::from_str(text)?;
    let mapping = match root {
        serde_yaml::Value::Mapping(mapping) => mapping,
        serde_yaml::Value::Null => serde_yaml::Mapping::new(),
        _ => return Err(SourceError::NotMapping(name.to_string())),
    };

    let mut values = Vec::with_capacity(mapping.len());
    for (key, value) in mapping {
        let key = yaml_scalar(&key).ok_or_else(|| SourceError::NotMapping(name.to_string()))?;
        let raw = yaml_scalar(&value).ok_or_else(|| SourceError::NotFlat {
            source_name: name.to_string(),
            key: key.clone(),
        })?;
        values.push((normalize_key(&key), raw));
    }

    debug!(source = %name, options = values.len(), "Parsed YAML document");
    Ok(SimpleSource::new(name, values).with_origin(Origin::Document))
}

/// Parses a flat JSON object into a document-origin source.
///
/// # Errors
///
/// Returns [`SourceError::JsonError`] for malformed JSON,
/// [`SourceError::NotMapping`] if the root is not an object, and
/// [`SourceError::NotFlat`] for nested values.
pub fn document_from_json(name: &str, text: &str) -> Result<SimpleSource> {
    let root: serde_json::Value = serde_json::from_str(text)?;
    let serde_json::Value::Object(object) = root else {
        return Err(SourceError::NotMapping(name.to_string()));
    };

    let mut values = Vec::with_capacity(object.len());
    for (key, value) in object {
        let raw = match value {
            serde_json::Value::String(s) => s,
            serde_json::Value::Number(n) => n.to_string(),
            serde_json::Value::Bool(b) => bool_raw(b),
            serde_json::Value::Null => String::new(),
            serde_json::Value::Array(_) | serde_json::Value::Object(_) => {
                return Err(SourceError::NotFlat {
                    source_name: name.to_string(),
                    key,
                });
            }
        };
        values.push((normalize_key(&key), raw));
    }

    debug!(source = %name, options = values.len(), "Parsed JSON document");
    Ok(SimpleSource::new(name, values).with_origin(Origin::Document))
}

fn yaml_scalar(value: &serde_yaml::Value) -> Option<String> {
    match value {
        serde_yaml::Value::String(s) => Some(s.clone()),
        serde_yaml::Value::Number(n) => Some(n.to_string()),
        serde_yaml::Value::Bool(b) => Some(bool_raw(*b)),
        serde_yaml::Value::Null => Some(String::new()),
        _ => None,
    }
}

fn bool_raw(b: bool) -> String {
    let raw = if b { "1" } else { "" };
    raw.to_string()
}

fn normalize_key(key: &str) -> String {
    key.trim().replace('_', "-")
}

#[cfg(test)]
mod tests {
    use crate::Source;

    use super::*;

    #[test]
    fn test_yaml_scalars() {
        let yaml = "host: db1\nport: 3306\nratio: 0.5\nverbose: false\nempty: ~\nlog_file: \"'x.log'\"\n";
        let source = document_from_yaml("doc.yaml", yaml).unwrap();
        assert_eq!(source.origin(), Origin::Document);
        assert_eq!(source.value("host"), Some("db1"));
        assert_eq!(source.value("port"), Some("3306"));
        assert_eq!(source.value("ratio"), Some("0.5"));
        assert_eq!(source.value("verbose"), Some(""));
        assert_eq!(source.value("empty"), Some(""));
        assert_eq!(source.value("log-file"), Some("'x.log'"));
    }

    #[test]
    fn test_yaml_rejects_nested_values() {
        let err = document_from_yaml("doc.yaml", "tables:\n  - a\n  - b\n").unwrap_err();
        assert_eq!(err.to_string(), "doc.yaml: value for tables must be a scalar");
        assert!(matches!(
            document_from_yaml("doc.yaml", "- a\n- b\n"),
            Err(SourceError::NotMapping(_))
        ));
        assert!(document_from_yaml("doc.yaml", "{}\n").unwrap().is_empty());
    }

    #[test]
    fn test_json_document() {
        let source =
            document_from_json("doc.json", r#"{"port": 3307, "debug": true, "user": "app"}"#)
                .unwrap();
        assert_eq!(source.value("port"), Some("3307"));
        assert_eq!(source.value("debug"), Some("1"));
        assert_eq!(source.value("user"), Some("app"));

        assert!(matches!(
            document_from_json("doc.json", r#"{"nested": {"a": 1}}"#),
            Err(SourceError::NotFlat { .. })
        ));
        assert!(matches!(
            document_from_json("doc.json", "{not json"),
            Err(SourceError::JsonError(_))
        ));
    }
}
