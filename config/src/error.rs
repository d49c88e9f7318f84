//! Error types for resolution and command-line tokenizing.

use cascade_values::ValueError;
use thiserror::Error;

/// Errors returned by [`Config`](crate::Config) lookups and typed getters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// No option or argument with this name exists in the scope.
    #[error("unknown option: {0}")]
    UnknownOption(String),

    /// The resolved value could not be interpreted as the requested type.
    #[error("option {option}: {source}")]
    InvalidValue {
        /// Option or argument name.
        option: String,
        /// Underlying coercion failure.
        #[source]
        source: ValueError,
    },
}

/// Errors produced while turning process arguments into a command line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CliError {
    /// `--name` does not match any option in scope.
    #[error("unknown option --{0}")]
    UnknownOption(String),

    /// `-c` does not match any shorthand in scope.
    #[error("unknown option -{0}")]
    UnknownShorthand(char),

    /// A string option that requires a value was last on the command line.
    #[error("option --{0} requires a value")]
    MissingValue(String),

    /// `--skip-name` was used on a non-boolean option.
    #[error("--skip-{0} is only valid for boolean options")]
    SkipNotBoolean(String),

    /// `--skip-name=value` carried something other than a boolean.
    #[error("invalid value for --skip-{option}: {source}")]
    InvalidSkipValue {
        /// Target option name.
        option: String,
        /// Underlying coercion failure.
        #[source]
        source: ValueError,
    },

    /// More positional arguments than the command declares.
    #[error("{command} accepts at most {max} arg(s), but {given} supplied")]
    TooManyArgs {
        /// Qualified command name.
        command: String,
        /// Declared argument count.
        max: usize,
        /// Supplied argument count.
        given: usize,
    },

    /// A required positional argument was not supplied.
    #[error("missing required arg <{0}>")]
    MissingArg(String),

    /// A suite was invoked with an unrecognized sub-command.
    #[error("unknown command {command:?} for {suite}")]
    UnknownCommand {
        /// Qualified suite name.
        suite: String,
        /// What was typed.
        command: String,
    },

    /// A suite was invoked without choosing a sub-command.
    #[error("{0} requires a command")]
    MissingCommand(String),
}
