//! Tokenizing process arguments into a command-line source.
//!
//! [`parse_cli`] walks the tokens once, selecting sub-commands as it meets
//! them and recording every option, off-toggle and positional argument in a
//! [`CliSource`]. Tokens are expected as a shell delivers them, with quotes
//! already removed.

use cascade_core::{Command, OptionSpec, Scope};
use cascade_sources::{CliSource, Source};
use cascade_values::coerce::parse_bool;
use tracing::{debug, trace};

use crate::error::CliError;
use crate::resolve::Config;

/// Label of the source produced by [`parse_cli`].
pub const CLI_SOURCE_NAME: &str = "command line";

/// Raw form of an explicitly empty value; unwraps to the empty string but
/// stays distinguishable from an absent one.
const EMPTY_RAW: &str = "''";

const SKIP_PREFIX: &str = "skip-";

/// A tokenized command line.
#[derive(Debug, Clone)]
pub struct CommandLine<'a> {
    scope: Scope<'a>,
    source: CliSource,
    positionals: Vec<String>,
}

impl<'a> CommandLine<'a> {
    /// The selected command and its enclosing commands.
    pub fn scope(&self) -> &Scope<'a> {
        &self.scope
    }

    /// Everything given on the command line, keyed by option or arg name.
    pub fn source(&self) -> &CliSource {
        &self.source
    }

    /// Positional tokens after sub-command selection, in order.
    pub fn positionals(&self) -> &[String] {
        &self.positionals
    }

    /// Resolves the selected scope with the command line as the highest
    /// priority source, followed by `others` in order.
    ///
    /// # Examples
    ///
    /// ```
    /// use cascade_config::parse_cli;
    /// use cascade_core::{Command, OptionSpec};
    /// use cascade_sources::{OptionFile, Source};
    ///
    /// let mut cmd = Command::new("tool", "", "");
    /// cmd.add_option(OptionSpec::string("host", Some('h'), "localhost", "")).unwrap();
    /// cmd.add_option(OptionSpec::string("port", None, "3306", "")).unwrap();
    ///
    /// let file = OptionFile::parse("my.cnf", "host=db1\nport=3307\n").unwrap();
    /// let cfg = parse_cli(&cmd, &["-h", "db2"])
    ///     .unwrap()
    ///     .into_config(vec![Box::new(file.source(&[])) as Box<dyn Source>]);
    ///
    /// assert_eq!(cfg.get("host"), "db2");
    /// assert_eq!(cfg.get("port"), "3307");
    /// assert!(cfg.on_cli("host") && !cfg.on_cli("port"));
    /// ```
    pub fn into_config(self, others: Vec<Box<dyn Source>>) -> Config {
        let mut sources: Vec<Box<dyn Source>> = Vec::with_capacity(others.len() + 1);
        sources.push(Box::new(self.source));
        sources.extend(others);
        Config::new(&self.scope, sources)
    }
}

/// Tokenizes `args` (without the program name) against `root`.
///
/// # Errors
///
/// Returns a [`CliError`] for unknown options or sub-commands, a missing
/// option value, `--skip-` on a non-boolean option, and too many or too few
/// positional arguments.
///
/// # Examples
///
/// ```
/// use cascade_config::parse_cli;
/// use cascade_core::{ArgSpec, Command, OptionSpec};
/// use cascade_sources::Source;
///
/// let mut cmd = Command::new("tool", "", "");
/// cmd.add_option(OptionSpec::boolean("verbose", Some('v'), false, "")).unwrap();
/// cmd.add_option(OptionSpec::string("name", Some('n'), "", "")).unwrap();
/// cmd.add_arg(ArgSpec::required("target")).unwrap();
///
/// let line = parse_cli(&cmd, &["-vnfoo", "--name=", "t1"]).unwrap();
/// assert_eq!(line.source().value("verbose"), Some("1"));
/// assert_eq!(line.source().value("name"), Some("''"));
/// assert_eq!(line.source().value("target"), Some("t1"));
/// ```
pub fn parse_cli<'a, S: AsRef<str>>(
    root: &'a Command,
    args: &[S],
) -> Result<CommandLine<'a>, CliError> {
    let mut parser = Parser {
        scope: root.scope(),
        source: CliSource::new(CLI_SOURCE_NAME),
        positionals: Vec::new(),
        tokens: args.iter().map(|arg| arg.as_ref()).collect::<Vec<_>>().into_iter(),
    };
    parser.run()?;
    parser.finish()
}

struct Parser<'a, 't> {
    scope: Scope<'a>,
    source: CliSource,
    positionals: Vec<String>,
    tokens: std::vec::IntoIter<&'t str>,
}

impl<'a> Parser<'a, '_> {
    fn run(&mut self) -> Result<(), CliError> {
        let mut options_done = false;
        while let Some(token) = self.tokens.next() {
            if options_done || token == "-" || !token.starts_with('-') {
                self.positional(token, options_done)?;
            } else if token == "--" {
                options_done = true;
            } else if let Some(long) = token.strip_prefix("--") {
                self.long(long)?;
            } else {
                self.short_cluster(&token[1..])?;
            }
        }
        Ok(())
    }

    fn long(&mut self, body: &str) -> Result<(), CliError> {
        let (name, attached) = match body.split_once('=') {
            Some((name, value)) => (name, Some(value)),
            None => (body, None),
        };

        if let Some(option) = self.scope.option(name) {
            return self.option(option, attached);
        }

        let target = name
            .strip_prefix(SKIP_PREFIX)
            .and_then(|target| self.scope.option(target))
            .ok_or_else(|| CliError::UnknownOption(name.to_string()))?;
        if !target.is_bool() {
            return Err(CliError::SkipNotBoolean(target.name.clone()));
        }
        let off = match attached {
            None => true,
            Some(value) => parse_bool(value).map_err(|source| CliError::InvalidSkipValue {
                option: target.name.clone(),
                source,
            })?,
        };
        trace!(option = %target.name, off, "Skip toggle");
        if off {
            self.source.toggle_off(&target.name);
        } else {
            self.source.set(&target.name, "1");
        }
        Ok(())
    }

    fn short_cluster(&mut self, cluster: &str) -> Result<(), CliError> {
        for (pos, short) in cluster.char_indices() {
            let option = self
                .scope
                .option_by_shorthand(short)
                .ok_or(CliError::UnknownShorthand(short))?;
            if option.is_bool() {
                self.source.set(&option.name, "1");
                continue;
            }

            let rest = &cluster[pos + short.len_utf8()..];
            let attached = match rest.strip_prefix('=') {
                Some(value) => Some(value),
                None if rest.is_empty() => None,
                None => Some(rest),
            };
            return self.option(option, attached);
        }
        Ok(())
    }

    fn option(&mut self, option: &OptionSpec, attached: Option<&str>) -> Result<(), CliError> {
        match attached {
            Some(value) => self.source.set(&option.name, explicit(value)),
            None if option.is_bool() => self.source.set(&option.name, "1"),
            None if option.value_optional => self.source.set_bare(&option.name, &option.default),
            None => {
                let value = self
                    .tokens
                    .next()
                    .ok_or_else(|| CliError::MissingValue(option.name.clone()))?;
                self.source.set(&option.name, explicit(value));
            }
        }
        trace!(option = %option.name, raw = ?self.source.value(&option.name), "Option");
        Ok(())
    }

    // Sub-commands are only selected before `--`; after it every token is an arg.
    fn positional(&mut self, token: &str, options_done: bool) -> Result<(), CliError> {
        let command = self.scope.command();
        if !options_done && self.positionals.is_empty() && command.is_suite() {
            if let Some(child) = self.scope.child(token) {
                trace!(command = %token, "Selected sub-command");
                self.scope = child;
                return Ok(());
            }
            if command.args.is_empty() {
                return Err(CliError::UnknownCommand {
                    suite: self.scope.qualified_name(),
                    command: token.to_string(),
                });
            }
        }
        self.positionals.push(token.to_string());
        Ok(())
    }

    fn finish(mut self) -> Result<CommandLine<'a>, CliError> {
        let command = self.scope.command();
        if command.is_suite() && command.args.is_empty() {
            return Err(CliError::MissingCommand(self.scope.qualified_name()));
        }

        let args = self.scope.args();
        if self.positionals.len() > args.len() {
            return Err(CliError::TooManyArgs {
                command: self.scope.qualified_name(),
                max: args.len(),
                given: self.positionals.len(),
            });
        }
        for (idx, arg) in args.iter().enumerate() {
            match self.positionals.get(idx) {
                Some(value) => self.source.set(&arg.name, explicit(value)),
                None if arg.required => return Err(CliError::MissingArg(arg.name.clone())),
                None => {}
            }
        }

        debug!(
            command = %self.scope.qualified_name(),
            supplied = self.source.names().count(),
            positionals = self.positionals.len(),
            "Parsed command line"
        );
        Ok(CommandLine {
            scope: self.scope,
            source: self.source,
            positionals: self.positionals,
        })
    }
}

fn explicit(value: &str) -> &str {
    if value.is_empty() { EMPTY_RAW } else { value }
}
