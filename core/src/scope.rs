//! Hierarchical option lookup across nested commands.
//!
//! A [`Scope`] is a borrowed chain from a selected command back to the root
//! command it was reached from. Each link holds only its own declarations;
//! lookups walk outward, so an option redeclared by a sub-command replaces
//! the inherited declaration of the same name without copying anything.
//!
//! # Example
//!
//! ```
//! use cascade_core::*;
//!
//! let mut suite = Command::new("tool", "", "");
//! suite.add_option(OptionSpec::string("hidden", None, "x", "").hidden()).unwrap();
//! suite.add_option(OptionSpec::string("format", Some('f'), "json", "")).unwrap();
//!
//! let mut one = Command::new("one", "", "");
//! one.add_option(OptionSpec::string("hidden", None, "x", "")).unwrap(); // no longer hidden
//! suite.add_subcommand(one).unwrap();
//!
//! let scope = suite.scope().child("one").unwrap();
//! assert!(!scope.option("hidden").unwrap().hidden);
//! assert_eq!(scope.option_by_shorthand('f').unwrap().name, "format");
//! assert_eq!(scope.visible_options().len(), 2);
//! ```

use crate::{ArgSpec, Command, OptionSpec};

/// A command together with the chain of commands enclosing it.
#[derive(Debug, Clone)]
pub struct Scope<'a> {
    command: &'a Command,
    parent: Option<Box<Scope<'a>>>,
}

impl<'a> Scope<'a> {
    /// Creates a scope for a top-level command.
    pub fn root(command: &'a Command) -> Self {
        Self {
            command,
            parent: None,
        }
    }

    /// Descends into the sub-command `name`, if the current command has one.
    pub fn child(&self, name: &str) -> Option<Scope<'a>> {
        let command = self.command.find_subcommand(name)?;
        Some(Scope {
            command,
            parent: Some(Box::new(self.clone())),
        })
    }

    /// The innermost command of this scope.
    pub fn command(&self) -> &'a Command {
        self.command
    }

    /// The enclosing scope, if any.
    pub fn parent(&self) -> Option<&Scope<'a>> {
        self.parent.as_deref()
    }

    /// Space-separated command names from the root, e.g. `"tool one"`.
    pub fn qualified_name(&self) -> String {
        match &self.parent {
            Some(parent) => format!("{} {}", parent.qualified_name(), self.command.name),
            None => self.command.name.clone(),
        }
    }

    /// Looks up the effective declaration of an option.
    pub fn option(&self, name: &str) -> Option<&'a OptionSpec> {
        self.command
            .find_option(name)
            .or_else(|| self.parent.as_ref()?.option(name))
    }

    /// Looks up an option by its one-letter shorthand.
    ///
    /// An inherited shorthand only applies while the inherited declaration
    /// is still the effective one.
    pub fn option_by_shorthand(&self, short: char) -> Option<&'a OptionSpec> {
        if let Some(option) = self.command.find_shorthand(short) {
            return Some(option);
        }
        self.parent
            .as_ref()?
            .option_by_shorthand(short)
            .filter(|inherited| self.command.find_option(&inherited.name).is_none())
    }

    /// All effective options: inherited ones first, in declaration order,
    /// with redeclarations replacing the inherited entry in place.
    pub fn options(&self) -> Vec<&'a OptionSpec> {
        let mut options = match &self.parent {
            Some(parent) => parent.options(),
            None => Vec::new(),
        };
        for own in &self.command.options {
            match options.iter_mut().find(|o| o.name == own.name) {
                Some(slot) => *slot = own,
                None => options.push(own),
            }
        }
        options
    }

    /// Effective options that are not hidden.
    pub fn visible_options(&self) -> Vec<&'a OptionSpec> {
        self.options().into_iter().filter(|o| !o.hidden).collect()
    }

    /// Positional arguments of the innermost command.
    pub fn args(&self) -> &'a [ArgSpec] {
        &self.command.args
    }
}
