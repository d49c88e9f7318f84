//! The [`Source`] contract and its in-memory implementations.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Debug;

use serde::{Deserialize, Serialize};

/// Where a source's values came from.
///
/// Only [`Origin::Cli`] counts as command-line origin for provenance.
///
/// # Examples
///
/// ```
/// use cascade_sources::Origin;
///
/// assert!(Origin::Cli.is_cli());
/// assert!(!Origin::File.is_cli());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Origin {
    /// Parsed from process arguments.
    Cli,
    /// Parsed from option-file text.
    File,
    /// Parsed from a flat YAML or JSON document.
    Document,
    /// Supplied programmatically.
    Defaults,
}

impl Origin {
    /// Returns `true` for command-line origin.
    pub fn is_cli(self) -> bool {
        self == Origin::Cli
    }
}

/// A read-only provider of raw option values.
///
/// Implementations must not change what they report once handed to a
/// resolver; the resolver reads each source once, at construction.
pub trait Source: Debug + Send + Sync {
    /// Human-readable label, e.g. a file name.
    fn name(&self) -> &str;

    /// Origin kind of every value in this source.
    fn origin(&self) -> Origin;

    /// Raw value for `option`, if this source has one.
    fn value(&self, option: &str) -> Option<&str>;

    /// Whether `option` was explicitly switched off without a value entry
    /// (`--skip-name` on a command line).
    fn toggled_off(&self, _option: &str) -> bool {
        false
    }

    /// Whether `option` was given without any attached value. Only
    /// meaningful for value-optional string options.
    fn supplied_bare(&self, _option: &str) -> bool {
        false
    }
}

/// A plain map of option names to raw values.
///
/// # Examples
///
/// ```
/// use cascade_sources::{Origin, SimpleSource, Source};
///
/// let source = SimpleSource::new("overrides", [("port", "3307"), ("host", "db1")]);
/// assert_eq!(source.value("port"), Some("3307"));
/// assert_eq!(source.value("user"), None);
/// assert_eq!(source.origin(), Origin::Defaults);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimpleSource {
    name: String,
    origin: Origin,
    values: BTreeMap<String, String>,
}

impl SimpleSource {
    /// Creates a source of [`Origin::Defaults`] from name/value pairs.
    pub fn new<I, K, V>(name: &str, values: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            name: name.to_string(),
            origin: Origin::Defaults,
            values: values
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Changes the origin kind.
    pub fn with_origin(mut self, origin: Origin) -> Self {
        self.origin = origin;
        self
    }

    /// Number of values.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if the source has no values.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterates over name/value pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl Source for SimpleSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn origin(&self) -> Origin {
        self.origin
    }

    fn value(&self, option: &str) -> Option<&str> {
        self.values.get(option).map(String::as_str)
    }
}

/// Values collected from a command line.
///
/// Besides option and positional-argument values keyed by name, records
/// which boolean options were switched off with `--skip-name` and which
/// value-optional options were given bare.
///
/// # Examples
///
/// ```
/// use cascade_sources::{CliSource, Source};
///
/// let mut cli = CliSource::new("command line");
/// cli.set("host", "'db1'");
/// cli.toggle_off("verbose");
/// cli.set_bare("log", "");
///
/// assert_eq!(cli.value("host"), Some("'db1'"));
/// assert_eq!(cli.value("verbose"), None);
/// assert!(cli.toggled_off("verbose"));
/// assert!(cli.supplied_bare("log"));
/// assert_eq!(cli.value("log"), Some(""));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CliSource {
    name: String,
    values: BTreeMap<String, String>,
    toggled_off: BTreeSet<String>,
    bare: BTreeSet<String>,
}

impl CliSource {
    /// Creates an empty command-line source.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Default::default()
        }
    }

    /// Records a value. A later value for the same name replaces the earlier
    /// one and clears any off-toggle or bare marker.
    pub fn set(&mut self, option: &str, raw: &str) {
        self.toggled_off.remove(option);
        self.bare.remove(option);
        self.values.insert(option.to_string(), raw.to_string());
    }

    /// Records a value-optional option given without a value; `fallback` is
    /// the raw value it resolves to.
    pub fn set_bare(&mut self, option: &str, fallback: &str) {
        self.set(option, fallback);
        self.bare.insert(option.to_string());
    }

    /// Records an explicit off-toggle, replacing any earlier value.
    pub fn toggle_off(&mut self, option: &str) {
        self.values.remove(option);
        self.bare.remove(option);
        self.toggled_off.insert(option.to_string());
    }

    /// Names with a recorded value, in name order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }
}

impl Source for CliSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn origin(&self) -> Origin {
        Origin::Cli
    }

    fn value(&self, option: &str) -> Option<&str> {
        self.values.get(option).map(String::as_str)
    }

    fn toggled_off(&self, option: &str) -> bool {
        self.toggled_off.contains(option)
    }

    fn supplied_bare(&self, option: &str) -> bool {
        self.bare.contains(option)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_source_origin_override() {
        let source = SimpleSource::new("file", [("a", "1")]).with_origin(Origin::File);
        assert_eq!(source.origin(), Origin::File);
        assert!(!source.toggled_off("a"));
        assert_eq!(source.iter().collect::<Vec<_>>(), vec![("a", "1")]);
    }

    #[test]
    fn test_cli_source_last_write_wins() {
        let mut cli = CliSource::new("cli");
        cli.toggle_off("flag");
        cli.set("flag", "1");
        assert!(!cli.toggled_off("flag"));
        assert_eq!(cli.value("flag"), Some("1"));

        cli.toggle_off("flag");
        assert!(cli.toggled_off("flag"));
        assert_eq!(cli.value("flag"), None);

        cli.set_bare("opt", "default");
        cli.set("opt", "given");
        assert!(!cli.supplied_bare("opt"));
        assert_eq!(cli.names().collect::<Vec<_>>(), vec!["opt"]);
    }

    #[test]
    fn test_sources_are_object_safe() {
        let sources: Vec<Box<dyn Source>> = vec![
            Box::new(CliSource::new("cli")),
            Box::new(SimpleSource::new("defaults", [("x", "y")])),
        ];
        assert!(sources[0].origin().is_cli());
        assert_eq!(sources[1].value("x"), Some("y"));
    }
}
