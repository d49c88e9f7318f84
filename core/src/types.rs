//! Registry type definitions for options, positional arguments and commands.
//!
//! The types are plain data with builder-style constructors. They derive
//! [`serde`] traits so a whole command tree can be loaded from YAML or JSON;
//! registries built that way should be checked with
//! [`validate_command`](crate::validate_command) because deserialization
//! bypasses the `add_*` checks below.

use serde::{Deserialize, Serialize};

use crate::scope::Scope;
use crate::validate::RegistryError;

/// Raw value used for a boolean option that is on.
pub const BOOL_TRUE: &str = "1";

/// Raw value used for a boolean option that is off.
pub const BOOL_FALSE: &str = "";

/// Semantic type of an option.
///
/// Determines how the resolver compares a resolved value against the default
/// and how the command-line tokenizer treats the flag.
///
/// # Examples
///
/// ```
/// use cascade_core::OptionKind;
///
/// assert_eq!(OptionKind::default(), OptionKind::String);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OptionKind {
    /// Free-form text value (the default).
    #[default]
    String,
    /// On/off switch.
    Bool,
}

/// Declaration of a named option.
///
/// Use [`string`](OptionSpec::string) or [`boolean`](OptionSpec::boolean) to
/// create one, then chain [`hidden`](OptionSpec::hidden) or
/// [`value_optional`](OptionSpec::value_optional) as needed.
///
/// # Examples
///
/// ```
/// use cascade_core::{OptionKind, OptionSpec};
///
/// let host = OptionSpec::string("host", Some('h'), "localhost", "Server host");
/// assert_eq!(host.kind, OptionKind::String);
/// assert_eq!(host.default, "localhost");
///
/// let debug = OptionSpec::boolean("debug", None, false, "Verbose output").hidden();
/// assert!(debug.is_bool());
/// assert!(debug.hidden);
/// assert_eq!(debug.default, "");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionSpec {
    /// Long name, used as `--name` and as the lookup key in every source.
    pub name: String,
    /// Optional one-letter alias, used as `-c`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shorthand: Option<char>,
    /// Semantic type.
    #[serde(default)]
    pub kind: OptionKind,
    /// Raw default value.
    #[serde(default)]
    pub default: String,
    /// Excluded from usage output; still resolvable.
    #[serde(default)]
    pub hidden: bool,
    /// String option that may be given on the command line without a value.
    #[serde(default)]
    pub value_optional: bool,
    /// Human-readable description for usage output.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl OptionSpec {
    /// Creates a string option.
    pub fn string(
        name: &str,
        shorthand: Option<char>,
        default: &str,
        description: &str,
    ) -> Self {
        Self {
            name: name.to_string(),
            shorthand,
            kind: OptionKind::String,
            default: default.to_string(),
            hidden: false,
            value_optional: false,
            description: non_empty(description),
        }
    }

    /// Creates a boolean option.
    ///
    /// The default is stored as [`BOOL_TRUE`] or [`BOOL_FALSE`].
    pub fn boolean(name: &str, shorthand: Option<char>, default: bool, description: &str) -> Self {
        Self {
            name: name.to_string(),
            shorthand,
            kind: OptionKind::Bool,
            default: if default { BOOL_TRUE } else { BOOL_FALSE }.to_string(),
            hidden: false,
            value_optional: false,
            description: non_empty(description),
        }
    }

    /// Hides the option from usage output.
    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    /// Allows the option to be supplied on the command line without a value.
    ///
    /// Only meaningful for string options; [`Command::add_option`] rejects it
    /// on booleans.
    pub fn value_optional(mut self) -> Self {
        self.value_optional = true;
        self
    }

    /// Returns `true` for boolean options.
    pub fn is_bool(&self) -> bool {
        self.kind == OptionKind::Bool
    }
}

/// Declaration of a positional argument.
///
/// # Examples
///
/// ```
/// use cascade_core::ArgSpec;
///
/// let schema = ArgSpec::required("schema");
/// assert!(schema.required);
///
/// let env = ArgSpec::optional("environment", "production");
/// assert!(!env.required);
/// assert_eq!(env.default, "production");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArgSpec {
    /// Name used as the lookup key when resolving.
    pub name: String,
    /// Raw default value.
    #[serde(default)]
    pub default: String,
    /// Whether the argument must be supplied.
    #[serde(default)]
    pub required: bool,
    /// Human-readable description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ArgSpec {
    /// Creates a required positional argument.
    pub fn required(name: &str) -> Self {
        Self {
            name: name.to_string(),
            default: String::new(),
            required: true,
            description: None,
        }
    }

    /// Creates an optional positional argument with a default.
    pub fn optional(name: &str, default: &str) -> Self {
        Self {
            name: name.to_string(),
            default: default.to_string(),
            required: false,
            description: None,
        }
    }

    /// Adds a description.
    pub fn with_description(mut self, desc: &str) -> Self {
        self.description = Some(desc.to_string());
        self
    }
}

/// A command: a named container of option and argument declarations.
///
/// A command with sub-commands acts as a suite. Sub-commands inherit the
/// suite's options through [`Scope`]; redeclaring an option by name in a
/// sub-command replaces the inherited declaration entirely.
///
/// # Examples
///
/// ```
/// use cascade_core::*;
///
/// let mut suite = Command::new("tool", "summary", "description");
/// suite.add_option(OptionSpec::string("host", Some('h'), "localhost", "")).unwrap();
///
/// let mut push = Command::new("push", "Push changes", "");
/// push.add_option(OptionSpec::string("host", None, "remote", "")).unwrap();
/// push.add_arg(ArgSpec::required("target")).unwrap();
/// suite.add_subcommand(push).unwrap();
///
/// let scope = suite.scope().child("push").unwrap();
/// assert_eq!(scope.option("host").unwrap().default, "remote");
/// assert!(suite.add_option(OptionSpec::boolean("host", None, false, "")).is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Command {
    /// Name as typed on the command line.
    pub name: String,
    /// One-line summary.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Longer description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Options declared directly on this command, in declaration order.
    #[serde(default)]
    pub options: Vec<OptionSpec>,
    /// Positional arguments, in order.
    #[serde(default)]
    pub args: Vec<ArgSpec>,
    /// Sub-commands.
    #[serde(default)]
    pub subcommands: Vec<Command>,
}

impl Command {
    /// Creates a command with no options or arguments.
    pub fn new(name: &str, summary: &str, description: &str) -> Self {
        Self {
            name: name.to_string(),
            summary: non_empty(summary),
            description: non_empty(description),
            ..Default::default()
        }
    }

    /// Declares an option on this command.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicateOption`] or
    /// [`RegistryError::DuplicateShorthand`] if the name or shorthand is
    /// already declared on this command, [`RegistryError::NameConflict`] if an
    /// argument already uses the name, and
    /// [`RegistryError::ValueOptionalBool`] for value-optional booleans.
    pub fn add_option(&mut self, option: OptionSpec) -> Result<(), RegistryError> {
        if option.name.trim().is_empty() {
            return Err(RegistryError::EmptyName);
        }
        if self.find_option(&option.name).is_some() {
            return Err(RegistryError::DuplicateOption(option.name));
        }
        if self.find_arg(&option.name).is_some()
            || self
                .subcommands
                .iter()
                .any(|sub| sub.shadowed_arg(&[option.name.as_str()]).is_some())
        {
            return Err(RegistryError::NameConflict(option.name));
        }
        if let Some(short) = option.shorthand {
            if self.find_shorthand(short).is_some() {
                return Err(RegistryError::DuplicateShorthand(short));
            }
        }
        if option.is_bool() && option.value_optional {
            return Err(RegistryError::ValueOptionalBool(option.name));
        }
        self.options.push(option);
        Ok(())
    }

    /// Declares the next positional argument.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::RequiredArgAfterOptional`] when a required
    /// argument follows an optional one, and [`RegistryError::DuplicateArg`]
    /// or [`RegistryError::NameConflict`] on name collisions.
    pub fn add_arg(&mut self, arg: ArgSpec) -> Result<(), RegistryError> {
        if arg.name.trim().is_empty() {
            return Err(RegistryError::EmptyName);
        }
        if self.find_arg(&arg.name).is_some() {
            return Err(RegistryError::DuplicateArg(arg.name));
        }
        if self.find_option(&arg.name).is_some() {
            return Err(RegistryError::NameConflict(arg.name));
        }
        if arg.required && self.args.iter().any(|a| !a.required) {
            return Err(RegistryError::RequiredArgAfterOptional(arg.name));
        }
        self.args.push(arg);
        Ok(())
    }

    /// Attaches a sub-command, turning this command into a suite.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicateSubcommand`] if a sub-command with
    /// the same name exists, and [`RegistryError::NameConflict`] if an
    /// argument anywhere below `sub` is named like one of this command's
    /// options.
    pub fn add_subcommand(&mut self, sub: Command) -> Result<(), RegistryError> {
        if self.find_subcommand(&sub.name).is_some() {
            return Err(RegistryError::DuplicateSubcommand(sub.name));
        }
        let options: Vec<&str> = self.options.iter().map(|o| o.name.as_str()).collect();
        if let Some(arg) = sub.shadowed_arg(&options) {
            return Err(RegistryError::NameConflict(arg.to_string()));
        }
        self.subcommands.push(sub);
        Ok(())
    }

    // First arg of this command or any descendant named in `options`.
    fn shadowed_arg(&self, options: &[&str]) -> Option<&str> {
        self.args
            .iter()
            .map(|arg| arg.name.as_str())
            .find(|name| options.contains(name))
            .or_else(|| {
                self.subcommands
                    .iter()
                    .find_map(|sub| sub.shadowed_arg(options))
            })
    }

    /// Finds an option declared directly on this command.
    pub fn find_option(&self, name: &str) -> Option<&OptionSpec> {
        self.options.iter().find(|o| o.name == name)
    }

    /// Finds an option declared directly on this command by shorthand.
    pub fn find_shorthand(&self, short: char) -> Option<&OptionSpec> {
        self.options.iter().find(|o| o.shorthand == Some(short))
    }

    /// Finds a positional argument by name.
    pub fn find_arg(&self, name: &str) -> Option<&ArgSpec> {
        self.args.iter().find(|a| a.name == name)
    }

    /// Finds a sub-command by name.
    pub fn find_subcommand(&self, name: &str) -> Option<&Command> {
        self.subcommands.iter().find(|s| s.name == name)
    }

    /// Returns `true` if this command has sub-commands.
    pub fn is_suite(&self) -> bool {
        !self.subcommands.is_empty()
    }

    /// Returns a scope rooted at this command.
    pub fn scope(&self) -> Scope<'_> {
        Scope::root(self)
    }
}

fn non_empty(s: &str) -> Option<String> {
    (!s.is_empty()).then(|| s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_command() -> Command {
        let mut cmd = Command::new("mycommand", "summary", "description");
        cmd.add_option(OptionSpec::string("visible", None, "", "dummy"))
            .unwrap();
        cmd.add_option(OptionSpec::string("hasshort", Some('s'), "", "dummy"))
            .unwrap();
        cmd.add_option(OptionSpec::boolean("bool1", Some('b'), false, "dummy"))
            .unwrap();
        cmd.add_arg(ArgSpec::required("required")).unwrap();
        cmd.add_arg(ArgSpec::optional("optional", "hello")).unwrap();
        cmd
    }

    #[test]
    fn test_boolean_defaults() {
        assert_eq!(OptionSpec::boolean("a", None, true, "").default, BOOL_TRUE);
        assert_eq!(OptionSpec::boolean("a", None, false, "").default, BOOL_FALSE);
    }

    #[test]
    fn test_add_option_rejects_duplicate_name() {
        let mut cmd = sample_command();
        let err = cmd
            .add_option(OptionSpec::boolean("visible", None, false, ""))
            .unwrap_err();
        assert_eq!(err, RegistryError::DuplicateOption("visible".to_string()));
    }

    #[test]
    fn test_add_option_rejects_duplicate_shorthand() {
        let mut cmd = sample_command();
        let err = cmd
            .add_option(OptionSpec::string("other", Some('s'), "", ""))
            .unwrap_err();
        assert_eq!(err, RegistryError::DuplicateShorthand('s'));
    }

    #[test]
    fn test_add_option_rejects_value_optional_bool() {
        let mut cmd = sample_command();
        let err = cmd
            .add_option(OptionSpec::boolean("flag", None, false, "").value_optional())
            .unwrap_err();
        assert_eq!(err, RegistryError::ValueOptionalBool("flag".to_string()));
    }

    #[test]
    fn test_add_arg_rejects_required_after_optional() {
        let mut cmd = sample_command();
        let err = cmd.add_arg(ArgSpec::required("late")).unwrap_err();
        assert_eq!(
            err,
            RegistryError::RequiredArgAfterOptional("late".to_string())
        );
        assert!(cmd.add_arg(ArgSpec::optional("another", "")).is_ok());
    }

    #[test]
    fn test_option_and_arg_names_share_namespace() {
        let mut cmd = sample_command();
        assert_eq!(
            cmd.add_option(OptionSpec::string("required", None, "", "")),
            Err(RegistryError::NameConflict("required".to_string()))
        );
        assert_eq!(
            cmd.add_arg(ArgSpec::optional("visible", "")),
            Err(RegistryError::NameConflict("visible".to_string()))
        );
    }

    #[test]
    fn test_subcommand_args_share_namespace_with_parent_options() {
        let mut suite = Command::new("tool", "", "");
        suite
            .add_option(OptionSpec::string("schema", None, "", ""))
            .unwrap();
        let mut dump = Command::new("dump", "", "");
        dump.add_arg(ArgSpec::required("schema")).unwrap();
        assert_eq!(
            suite.add_subcommand(dump),
            Err(RegistryError::NameConflict("schema".to_string()))
        );
        assert!(!suite.is_suite());

        let mut suite = Command::new("tool", "", "");
        let mut load = Command::new("load", "", "");
        let mut table = Command::new("table", "", "");
        table.add_arg(ArgSpec::optional("file", "")).unwrap();
        load.add_subcommand(table).unwrap();
        suite.add_subcommand(load).unwrap();
        assert_eq!(
            suite.add_option(OptionSpec::string("file", None, "", "")),
            Err(RegistryError::NameConflict("file".to_string()))
        );
        assert!(suite.add_option(OptionSpec::string("host", None, "", "")).is_ok());
    }

    #[test]
    fn test_add_subcommand_rejects_duplicate() {
        let mut suite = Command::new("suite", "", "");
        suite.add_subcommand(Command::new("one", "", "")).unwrap();
        assert!(suite.is_suite());
        assert_eq!(
            suite.add_subcommand(Command::new("one", "", "")),
            Err(RegistryError::DuplicateSubcommand("one".to_string()))
        );
    }

    #[test]
    fn test_deserialize_from_json() {
        let json = r#"{
            "name": "tool",
            "options": [
                {"name": "port", "shorthand": "p", "default": "3306"},
                {"name": "debug", "kind": "bool", "hidden": true}
            ],
            "args": [{"name": "schema", "required": true}]
        }"#;
        let cmd: Command = serde_json::from_str(json).unwrap();
        assert_eq!(cmd.find_shorthand('p').unwrap().name, "port");
        assert!(cmd.find_option("debug").unwrap().is_bool());
        assert!(cmd.find_arg("schema").unwrap().required);
        assert!(cmd.summary.is_none());
    }
}
