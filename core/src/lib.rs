//! Option registry types for cascading configuration.
//!
//! This crate defines the declarations the resolver works from:
//!
//! - [`OptionSpec`]: a named option with optional shorthand, semantic
//!   [`OptionKind`], raw default, and hidden / value-optional flags.
//! - [`ArgSpec`]: a positional argument with a default and required flag.
//! - [`Command`]: a container of options, args and sub-commands.
//! - [`Scope`]: a command reached through its parents, providing inherited
//!   option lookup with override-by-name.
//!
//! Validation ([`validate_command`]) re-checks deserialized command trees and
//! [`render_usage`] produces usage text from the declarations.
//!
//! # Example
//!
//! ```
//! use cascade_core::*;
//!
//! let mut cmd = Command::new("mycommand", "summary", "description");
//! cmd.add_option(OptionSpec::string("hasshort", Some('s'), "", "")).unwrap();
//! cmd.add_option(OptionSpec::boolean("truthybool", None, true, "")).unwrap();
//! cmd.add_arg(ArgSpec::required("required")).unwrap();
//! cmd.add_arg(ArgSpec::optional("optional", "hello")).unwrap();
//!
//! let scope = cmd.scope();
//! assert_eq!(scope.option_by_shorthand('s').unwrap().name, "hasshort");
//! assert!(validate_command(&cmd).is_empty());
//! ```

mod scope;
mod types;
mod usage;
mod validate;

pub use scope::Scope;
pub use types::*;
pub use usage::render_usage;
pub use validate::{RegistryError, validate_command};
