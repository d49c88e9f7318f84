//! Registry construction errors and whole-tree validation.
//!
//! [`Command::add_option`](crate::Command::add_option) and friends reject
//! bad declarations one at a time. Command trees loaded through serde skip
//! those checks, so [`validate_command`] re-applies them to a finished tree.
//!
//! # Examples
//!
//! ```
//! use cascade_core::*;
//!
//! let mut cmd = Command::new("tool", "", "");
//! cmd.add_option(OptionSpec::string("port", Some('p'), "3306", "")).unwrap();
//! assert!(validate_command(&cmd).is_empty());
//!
//! // Pushing directly bypasses the add_option checks
//! cmd.options.push(OptionSpec::string("other", Some('p'), "", ""));
//! assert_eq!(validate_command(&cmd), vec![RegistryError::DuplicateShorthand('p')]);
//! ```

use std::collections::HashSet;

use thiserror::Error;

use crate::{Command, OptionKind};

/// Registry declaration errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// Option, argument or command name is empty or whitespace-only.
    #[error("name cannot be empty")]
    EmptyName,
    /// Two options in the same command share a name.
    #[error("duplicate option: {0}")]
    DuplicateOption(String),
    /// Two options in the same command share a shorthand.
    #[error("duplicate shorthand: -{0}")]
    DuplicateShorthand(char),
    /// Two arguments in the same command share a name.
    #[error("duplicate arg: {0}")]
    DuplicateArg(String),
    /// An argument has the same name as an option in its scope, including
    /// options inherited from enclosing commands.
    #[error("option and arg share the name {0}")]
    NameConflict(String),
    /// A required argument was declared after an optional one.
    #[error("required arg {0} cannot follow an optional arg")]
    RequiredArgAfterOptional(String),
    /// A boolean option was marked value-optional.
    #[error("boolean option {0} cannot be value-optional")]
    ValueOptionalBool(String),
    /// A boolean option's default is not a recognized boolean spelling.
    #[error("boolean option {name} has non-boolean default {default:?}")]
    InvalidBoolDefault {
        /// Option name.
        name: String,
        /// Offending default.
        default: String,
    },
    /// Two sub-commands of the same command share a name.
    #[error("duplicate subcommand: {0}")]
    DuplicateSubcommand(String),
}

/// Validates a command tree.
///
/// Returns every problem found, in declaration order, walking sub-commands
/// depth-first after the command's own declarations.
pub fn validate_command(command: &Command) -> Vec<RegistryError> {
    let mut errors = Vec::new();
    validate_into(command, &HashSet::new(), &mut errors);
    errors
}

// `inherited` holds the option names of every enclosing command; args share
// one namespace with all options in scope.
fn validate_into<'a>(
    command: &'a Command,
    inherited: &HashSet<&'a str>,
    errors: &mut Vec<RegistryError>,
) {
    if command.name.trim().is_empty() {
        errors.push(RegistryError::EmptyName);
    }

    let mut names = HashSet::new();
    let mut shorthands = HashSet::new();
    for option in &command.options {
        if option.name.trim().is_empty() {
            errors.push(RegistryError::EmptyName);
            continue;
        }
        if !names.insert(option.name.as_str()) {
            errors.push(RegistryError::DuplicateOption(option.name.clone()));
        }
        if let Some(short) = option.shorthand {
            if !shorthands.insert(short) {
                errors.push(RegistryError::DuplicateShorthand(short));
            }
        }
        if option.kind == OptionKind::Bool {
            if option.value_optional {
                errors.push(RegistryError::ValueOptionalBool(option.name.clone()));
            }
            if !is_bool_literal(&option.default) {
                errors.push(RegistryError::InvalidBoolDefault {
                    name: option.name.clone(),
                    default: option.default.clone(),
                });
            }
        }
    }

    let mut arg_names = HashSet::new();
    let mut seen_optional = false;
    for arg in &command.args {
        if arg.name.trim().is_empty() {
            errors.push(RegistryError::EmptyName);
            continue;
        }
        if !arg_names.insert(arg.name.as_str()) {
            errors.push(RegistryError::DuplicateArg(arg.name.clone()));
        }
        if names.contains(arg.name.as_str()) || inherited.contains(arg.name.as_str()) {
            errors.push(RegistryError::NameConflict(arg.name.clone()));
        }
        if arg.required && seen_optional {
            errors.push(RegistryError::RequiredArgAfterOptional(arg.name.clone()));
        }
        seen_optional |= !arg.required;
    }

    let mut in_scope = inherited.clone();
    in_scope.extend(names);
    let mut sub_names = HashSet::new();
    for sub in &command.subcommands {
        if !sub_names.insert(sub.name.as_str()) {
            errors.push(RegistryError::DuplicateSubcommand(sub.name.clone()));
        }
        validate_into(sub, &in_scope, errors);
    }
}

// Registry defaults are checked against the same spellings the boolean
// getter accepts.
fn is_bool_literal(raw: &str) -> bool {
    matches!(
        raw.to_ascii_lowercase().as_str(),
        "" | "0" | "1" | "true" | "false" | "on" | "off" | "yes" | "no"
    )
}

/// Returns `true` for the boolean literals that mean "on".
pub(crate) fn is_bool_true(raw: &str) -> bool {
    matches!(
        raw.to_ascii_lowercase().as_str(),
        "1" | "true" | "on" | "yes"
    )
}

#[cfg(test)]
mod tests {
    use crate::{ArgSpec, OptionSpec};

    use super::*;

    #[test]
    fn test_validate_accepts_built_command() {
        let mut cmd = Command::new("tool", "", "");
        cmd.add_option(OptionSpec::boolean("debug", Some('d'), true, ""))
            .unwrap();
        cmd.add_arg(ArgSpec::required("target")).unwrap();
        cmd.add_subcommand(Command::new("sub", "", "")).unwrap();
        assert!(validate_command(&cmd).is_empty());
    }

    #[test]
    fn test_validate_reports_arg_shadowing_inherited_option() {
        let mut suite = Command::new("tool", "", "");
        suite
            .add_option(OptionSpec::string("schema", None, "", ""))
            .unwrap();
        let mut dump = Command::new("dump", "", "");
        dump.add_arg(ArgSpec::required("schema")).unwrap();
        suite.subcommands.push(dump);
        assert_eq!(
            validate_command(&suite),
            vec![RegistryError::NameConflict("schema".to_string())]
        );
    }

    #[test]
    fn test_bool_true_spellings() {
        for raw in ["1", "true", "ON", "yes"] {
            assert!(is_bool_true(raw), "{raw}");
        }
        for raw in ["", "0", "false", "off", "No"] {
            assert!(!is_bool_true(raw), "{raw}");
        }
    }

    #[test]
    fn test_validate_reports_arg_ordering() {
        let mut cmd = Command::new("tool", "", "");
        cmd.args.push(ArgSpec::optional("first", "x"));
        cmd.args.push(ArgSpec::required("second"));
        assert_eq!(
            validate_command(&cmd),
            vec![RegistryError::RequiredArgAfterOptional("second".to_string())]
        );
    }

    #[test]
    fn test_validate_reports_bad_bool_default() {
        let mut cmd = Command::new("tool", "", "");
        let mut flag = OptionSpec::boolean("flag", None, false, "");
        flag.default = "maybe".to_string();
        cmd.options.push(flag);
        assert_eq!(
            validate_command(&cmd),
            vec![RegistryError::InvalidBoolDefault {
                name: "flag".to_string(),
                default: "maybe".to_string(),
            }]
        );
    }

    #[test]
    fn test_validate_recurses_into_subcommands() {
        let mut sub = Command::new("sub", "", "");
        sub.options.push(OptionSpec::string("dup", None, "", ""));
        sub.options.push(OptionSpec::string("dup", None, "", ""));
        let mut cmd = Command::new("tool", "", "");
        cmd.subcommands.push(sub.clone());
        cmd.subcommands.push(Command::new("sub", "", ""));

        let errors = validate_command(&cmd);
        assert_eq!(
            errors,
            vec![
                RegistryError::DuplicateOption("dup".to_string()),
                RegistryError::DuplicateSubcommand("sub".to_string()),
            ]
        );
    }
}
