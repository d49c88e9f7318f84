//! Resolution of options and arguments against a chain of sources.
//!
//! A [`Config`] is built once from a [`Scope`] and an ordered list of
//! sources (highest priority first). Every option and argument in the scope
//! is resolved at construction into a [`Resolved`] entry; afterwards the
//! config is an immutable snapshot that can be shared across threads.

use std::borrow::Cow;
use std::collections::HashMap;

use cascade_core::{OptionKind, Scope};
use cascade_sources::Source;
use cascade_values::{ValueError, coerce, split, unwrap};
use regex::Regex;
use serde::Serialize;
use tracing::{debug, trace};

use crate::error::ConfigError;

/// Raw value a `--skip-name` off-toggle resolves to.
pub const TOGGLED_OFF_RAW: &str = "0";

/// The outcome of resolving one option or argument.
///
/// `supplied`, `on_cli` and `changed` are independent facts: a value given
/// on the command line that equals the default is supplied and on the
/// command line, but not changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolved {
    /// Option or argument name.
    pub name: String,
    /// Semantic type; arguments are always strings.
    pub kind: OptionKind,
    /// Whether this entry is a positional argument.
    pub is_arg: bool,
    /// Winning raw value, or the default when no source supplied one.
    pub raw: String,
    /// Raw default from the declaration.
    pub default: String,
    /// Index of the winning source, `None` when the default was used.
    pub supplied_by: Option<usize>,
    /// Some source, not necessarily the winner, supplied a value.
    pub supplied: bool,
    /// Some command-line source supplied a value or off-toggle.
    pub on_cli: bool,
    /// The typed value differs from the typed default.
    pub changed: bool,
    /// Declared value-optional.
    pub value_optional: bool,
    /// A command-line source gave this option an attached value.
    pub with_value: bool,
}

/// Resolved configuration for one invocation.
///
/// # Examples
///
/// ```
/// use cascade_config::Config;
/// use cascade_core::{Command, OptionSpec};
/// use cascade_sources::{Origin, SimpleSource, Source};
///
/// let mut cmd = Command::new("tool", "", "");
/// cmd.add_option(OptionSpec::string("port", None, "3306", "")).unwrap();
/// cmd.add_option(OptionSpec::string("host", None, "localhost", "")).unwrap();
///
/// let file = SimpleSource::new("my.cnf", [("port", "'3307'")]).with_origin(Origin::File);
/// let cfg = Config::new(&cmd.scope(), vec![Box::new(file) as Box<dyn Source>]);
///
/// assert_eq!(cfg.get("port"), "3307");
/// assert!(cfg.changed("port") && cfg.supplied("port") && !cfg.on_cli("port"));
/// assert_eq!(cfg.get("host"), "localhost");
/// assert!(!cfg.supplied("host"));
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    command: String,
    source_names: Vec<String>,
    entries: Vec<Resolved>,
    index: HashMap<String, usize>,
}

impl Config {
    /// Resolves every option and argument of `scope` against `sources`.
    ///
    /// Sources are consulted in order; the first to supply a name wins.
    /// They are dropped once resolution is done.
    pub fn new(scope: &Scope<'_>, sources: Vec<Box<dyn Source>>) -> Self {
        let mut entries = Vec::new();

        for option in scope.options() {
            entries.push(resolve_entry(
                Declaration {
                    name: &option.name,
                    kind: option.kind,
                    default: &option.default,
                    value_optional: option.value_optional,
                    is_arg: false,
                },
                &sources,
            ));
        }
        for arg in scope.args() {
            entries.push(resolve_entry(
                Declaration {
                    name: &arg.name,
                    kind: OptionKind::String,
                    default: &arg.default,
                    value_optional: false,
                    is_arg: true,
                },
                &sources,
            ));
        }

        let index = entries
            .iter()
            .enumerate()
            .map(|(i, entry)| (entry.name.clone(), i))
            .collect();
        let command = scope.qualified_name();

        debug!(
            command = %command,
            entries = entries.len(),
            sources = sources.len(),
            "Resolved configuration"
        );

        Self {
            command,
            source_names: sources.iter().map(|s| s.name().to_string()).collect(),
            entries,
            index,
        }
    }

    /// Qualified name of the command this config was resolved for.
    pub fn command(&self) -> &str {
        &self.command
    }

    /// Label of the source at `index` in the resolution chain.
    pub fn source_name(&self, index: usize) -> Option<&str> {
        self.source_names.get(index).map(String::as_str)
    }

    /// All resolved entries: options in scope order, then arguments.
    pub fn entries(&self) -> &[Resolved] {
        &self.entries
    }

    /// Looks up a resolved entry.
    ///
    /// # Errors
    ///
    /// [`ConfigError::UnknownOption`] if the scope has no such option or
    /// argument.
    pub fn resolve(&self, name: &str) -> Result<&Resolved, ConfigError> {
        self.index
            .get(name)
            .map(|&i| &self.entries[i])
            .ok_or_else(|| ConfigError::UnknownOption(name.to_string()))
    }

    fn entry(&self, name: &str) -> &Resolved {
        match self.resolve(name) {
            Ok(entry) => entry,
            Err(err) => panic!("{err} (command {})", self.command),
        }
    }

    fn string_entry(&self, name: &str, getter: &str) -> &Resolved {
        let entry = self.entry(name);
        if entry.kind != OptionKind::String {
            panic!("{getter} called on boolean option {name}");
        }
        entry
    }

    /// Returns `true` if the typed value differs from the typed default.
    ///
    /// # Panics
    ///
    /// If `name` is unknown.
    pub fn changed(&self, name: &str) -> bool {
        self.entry(name).changed
    }

    /// Returns `true` if any source supplied a value.
    ///
    /// # Panics
    ///
    /// If `name` is unknown.
    pub fn supplied(&self, name: &str) -> bool {
        self.entry(name).supplied
    }

    /// Returns `true` if a command-line source supplied a value or toggle.
    ///
    /// # Panics
    ///
    /// If `name` is unknown.
    pub fn on_cli(&self, name: &str) -> bool {
        self.entry(name).on_cli
    }

    /// Returns `true` if a value-optional string option was given on the
    /// command line with an attached value (including an explicitly empty
    /// one such as `--name=`).
    ///
    /// # Panics
    ///
    /// If `name` is unknown, not a string option, or not value-optional.
    pub fn supplied_with_value(&self, name: &str) -> bool {
        let entry = self.string_entry(name, "supplied_with_value");
        if !entry.value_optional {
            panic!("supplied_with_value called on option {name}, which is not value-optional");
        }
        entry.with_value
    }

    /// Raw resolved value, quotes and escapes untouched.
    ///
    /// # Panics
    ///
    /// If `name` is unknown.
    pub fn get_raw(&self, name: &str) -> &str {
        &self.entry(name).raw
    }

    /// Resolved value with outer quotes removed and escapes resolved.
    ///
    /// # Panics
    ///
    /// If `name` is unknown.
    pub fn get(&self, name: &str) -> Cow<'_, str> {
        unwrap(self.get_raw(name))
    }

    /// Resolved value split on `delimiter`; see [`split`].
    ///
    /// # Panics
    ///
    /// If `name` is unknown or boolean.
    pub fn get_slice(&self, name: &str, delimiter: char, unwrap_full: bool) -> Vec<String> {
        split(
            &self.string_entry(name, "get_slice").raw,
            delimiter,
            unwrap_full,
        )
    }

    /// Resolved value as a boolean.
    ///
    /// # Errors
    ///
    /// [`ConfigError::InvalidValue`] for unrecognized spellings.
    ///
    /// # Panics
    ///
    /// If `name` is unknown or not a boolean option.
    pub fn get_bool(&self, name: &str) -> Result<bool, ConfigError> {
        let entry = self.entry(name);
        if entry.kind != OptionKind::Bool {
            panic!("get_bool called on non-boolean option {name}");
        }
        coerce::parse_bool(&entry.raw).map_err(|err| invalid(name, err))
    }

    /// Resolved value as a signed integer.
    ///
    /// # Errors
    ///
    /// [`ConfigError::InvalidValue`] for empty or non-numeric values.
    ///
    /// # Panics
    ///
    /// If `name` is unknown or boolean.
    pub fn get_int(&self, name: &str) -> Result<i64, ConfigError> {
        coerce::parse_int(&self.string_entry(name, "get_int").raw).map_err(|err| invalid(name, err))
    }

    /// Like [`get_int`](Config::get_int), but an empty resolved value falls
    /// back to the declared default.
    ///
    /// # Errors
    ///
    /// [`ConfigError::InvalidValue`] when neither the value nor the default
    /// is an integer.
    ///
    /// # Panics
    ///
    /// If `name` is unknown or boolean.
    pub fn get_int_or_default(&self, name: &str) -> Result<i64, ConfigError> {
        let entry = self.string_entry(name, "get_int_or_default");
        let raw = if unwrap(&entry.raw).is_empty() {
            &entry.default
        } else {
            &entry.raw
        };
        coerce::parse_int(raw).map_err(|err| invalid(name, err))
    }

    /// Resolved value as a byte count; see [`coerce::parse_bytes`].
    ///
    /// # Errors
    ///
    /// [`ConfigError::InvalidValue`] for malformed sizes.
    ///
    /// # Panics
    ///
    /// If `name` is unknown or boolean.
    pub fn get_bytes(&self, name: &str) -> Result<u64, ConfigError> {
        coerce::parse_bytes(&self.string_entry(name, "get_bytes").raw)
            .map_err(|err| invalid(name, err))
    }

    /// Resolved value matched against `allowed`; see [`coerce::parse_enum`].
    ///
    /// # Errors
    ///
    /// [`ConfigError::InvalidValue`] when a non-empty value matches nothing.
    ///
    /// # Panics
    ///
    /// If `name` is unknown or boolean.
    pub fn get_enum<S: AsRef<str>>(&self, name: &str, allowed: &[S]) -> Result<String, ConfigError> {
        coerce::parse_enum(&self.string_entry(name, "get_enum").raw, allowed)
            .map_err(|err| invalid(name, err))
    }

    /// Resolved value compiled as a regular expression; `None` when empty.
    ///
    /// # Errors
    ///
    /// [`ConfigError::InvalidValue`] when the pattern does not compile.
    ///
    /// # Panics
    ///
    /// If `name` is unknown or boolean.
    pub fn get_regex(&self, name: &str) -> Result<Option<Regex>, ConfigError> {
        coerce::parse_regex(&self.string_entry(name, "get_regex").raw)
            .map_err(|err| invalid(name, err))
    }
}

fn invalid(name: &str, source: ValueError) -> ConfigError {
    ConfigError::InvalidValue {
        option: name.to_string(),
        source,
    }
}

struct Declaration<'a> {
    name: &'a str,
    kind: OptionKind,
    default: &'a str,
    value_optional: bool,
    is_arg: bool,
}

// All provenance facts for one name are derived here and nowhere else.
fn resolve_entry(decl: Declaration<'_>, sources: &[Box<dyn Source>]) -> Resolved {
    let mut winner: Option<(usize, &str)> = None;
    let mut supplied = false;
    let mut on_cli = false;
    let mut with_value = false;

    for (idx, source) in sources.iter().enumerate() {
        let value = source.value(decl.name);
        let raw = match value {
            Some(raw) => raw,
            None if source.toggled_off(decl.name) => TOGGLED_OFF_RAW,
            None => continue,
        };
        supplied = true;
        if source.origin().is_cli() {
            on_cli = true;
            with_value |= value.is_some() && !source.supplied_bare(decl.name);
        }
        if winner.is_none() {
            winner = Some((idx, raw));
        }
    }

    let (supplied_by, raw) = match winner {
        Some((idx, raw)) => (Some(idx), raw),
        None => (None, decl.default),
    };
    let changed = supplied_by.is_some() && differs(decl.kind, raw, decl.default);

    trace!(
        option = %decl.name,
        supplied_by = ?supplied_by,
        supplied,
        on_cli,
        changed,
        "Resolved option"
    );

    Resolved {
        name: decl.name.to_string(),
        kind: decl.kind,
        is_arg: decl.is_arg,
        raw: raw.to_string(),
        default: decl.default.to_string(),
        supplied_by,
        supplied,
        on_cli,
        changed,
        value_optional: decl.value_optional,
        with_value,
    }
}

fn differs(kind: OptionKind, raw: &str, default: &str) -> bool {
    match kind {
        OptionKind::Bool => match (coerce::parse_bool(raw), coerce::parse_bool(default)) {
            (Ok(value), Ok(default)) => value != default,
            _ => true,
        },
        OptionKind::String => unwrap(raw) != unwrap(default),
    }
}

#[cfg(test)]
mod tests {
    use cascade_core::{ArgSpec, Command, OptionSpec};
    use cascade_sources::{CliSource, Origin, SimpleSource};

    use super::*;

    fn command() -> Command {
        let mut cmd = Command::new("mycommand", "summary", "description");
        cmd.add_option(OptionSpec::string("visible", None, "", "dummy"))
            .unwrap();
        cmd.add_option(OptionSpec::string("hidden", None, "somedefault", "dummy").hidden())
            .unwrap();
        cmd.add_option(OptionSpec::boolean("flag", Some('f'), false, "dummy"))
            .unwrap();
        cmd.add_option(OptionSpec::string("size", None, "1k", "dummy"))
            .unwrap();
        cmd.add_arg(ArgSpec::optional("optional", "hello")).unwrap();
        cmd
    }

    fn file(values: &[(&str, &str)]) -> Box<dyn Source> {
        Box::new(SimpleSource::new("file", values.iter().copied()).with_origin(Origin::File))
    }

    #[test]
    fn test_priority_order() {
        let cmd = command();
        let cfg = Config::new(
            &cmd.scope(),
            vec![file(&[("visible", "first")]), file(&[("visible", "second"), ("size", "2k")])],
        );
        assert_eq!(cfg.get("visible"), "first");
        assert_eq!(cfg.resolve("visible").unwrap().supplied_by, Some(0));
        assert_eq!(cfg.resolve("size").unwrap().supplied_by, Some(1));
        assert_eq!(cfg.source_name(1), Some("file"));
        assert_eq!(cfg.get_bytes("size").unwrap(), 2048);
    }

    #[test]
    fn test_unsupplied_entries_use_defaults() {
        let cmd = command();
        let cfg = Config::new(&cmd.scope(), Vec::new());
        for entry in cfg.entries() {
            assert!(!entry.supplied && !entry.changed && !entry.on_cli);
            assert_eq!(entry.raw, entry.default);
            assert_eq!(entry.supplied_by, None);
        }
        assert_eq!(cfg.get("optional"), "hello");
        assert_eq!(cfg.get_bool("flag"), Ok(false));
    }

    #[test]
    fn test_quoted_default_equivalence() {
        let cmd = command();
        let cfg = Config::new(&cmd.scope(), vec![file(&[("hidden", "'somedefault'")])]);
        assert!(!cfg.changed("hidden"));
        assert!(cfg.supplied("hidden"));
    }

    #[test]
    fn test_toggle_off_counts_as_cli_supplied() {
        let cmd = command();
        let mut cli = CliSource::new("cli");
        cli.toggle_off("flag");
        let sources = vec![Box::new(cli) as Box<dyn Source>, file(&[("flag", "1")])];
        let cfg = Config::new(&cmd.scope(), sources);
        assert_eq!(cfg.get_raw("flag"), TOGGLED_OFF_RAW);
        assert!(!cfg.changed("flag"));
        assert!(cfg.supplied("flag"));
        assert!(cfg.on_cli("flag"));
    }

    #[test]
    fn test_invalid_boolean_counts_as_changed() {
        let cmd = command();
        let cfg = Config::new(&cmd.scope(), vec![file(&[("flag", "sometimes")])]);
        assert!(cfg.changed("flag"));
        assert!(matches!(
            cfg.get_bool("flag"),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_resolve_unknown_option() {
        let cmd = command();
        let cfg = Config::new(&cmd.scope(), Vec::new());
        assert_eq!(
            cfg.resolve("nope"),
            Err(ConfigError::UnknownOption("nope".to_string()))
        );
    }

    #[test]
    #[should_panic(expected = "unknown option: nope")]
    fn test_getter_panics_on_unknown_option() {
        let cmd = command();
        Config::new(&cmd.scope(), Vec::new()).get_raw("nope");
    }

    #[test]
    #[should_panic(expected = "get_bool called on non-boolean option visible")]
    fn test_get_bool_panics_on_string_option() {
        let cmd = command();
        let _ = Config::new(&cmd.scope(), Vec::new()).get_bool("visible");
    }

    #[test]
    #[should_panic(expected = "get_bytes called on boolean option flag")]
    fn test_string_getter_panics_on_bool_option() {
        let cmd = command();
        let _ = Config::new(&cmd.scope(), Vec::new()).get_bytes("flag");
    }

    #[test]
    fn test_config_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Config>();
    }

    #[test]
    fn test_resolved_serializes() {
        let cmd = command();
        let cfg = Config::new(&cmd.scope(), vec![file(&[("visible", "x")])]);
        let json = serde_json::to_value(cfg.resolve("visible").unwrap()).unwrap();
        assert_eq!(json["raw"], "x");
        assert_eq!(json["kind"], "string");
        assert_eq!(json["supplied_by"], 0);
    }
}
