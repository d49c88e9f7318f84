//! Usage text rendering from registry metadata.
//!
//! Only declarations are read; resolved values never influence the output.
//! Hidden options are left out.

use std::fmt::Write;

use crate::validate::is_bool_true;
use crate::{OptionKind, OptionSpec, Scope};

/// Renders usage text for a scope.
///
/// # Examples
///
/// ```
/// use cascade_core::*;
///
/// let mut cmd = Command::new("tool", "Does things", "");
/// cmd.add_option(OptionSpec::string("host", Some('h'), "localhost", "Server host")).unwrap();
/// cmd.add_option(OptionSpec::boolean("secret", None, false, "").hidden()).unwrap();
/// cmd.add_arg(ArgSpec::required("target")).unwrap();
///
/// let text = render_usage(&cmd.scope());
/// assert!(text.contains("Usage: tool [<options>] <target>"));
/// assert!(text.contains("--host, -h <value>"));
/// assert!(!text.contains("secret"));
/// ```
pub fn render_usage(scope: &Scope<'_>) -> String {
    let command = scope.command();
    let mut out = String::new();

    if let Some(summary) = &command.summary {
        let _ = writeln!(out, "{}: {summary}", scope.qualified_name());
        out.push('\n');
    }

    let mut usage_line = format!("Usage: {} [<options>]", scope.qualified_name());
    if command.is_suite() {
        usage_line.push_str(" <command>");
    }
    for arg in scope.args() {
        if arg.required {
            let _ = write!(usage_line, " <{}>", arg.name);
        } else {
            let _ = write!(usage_line, " [<{}>]", arg.name);
        }
    }
    out.push_str(&usage_line);
    out.push('\n');

    if let Some(description) = &command.description {
        out.push('\n');
        out.push_str(description);
        out.push('\n');
    }

    if command.is_suite() {
        out.push_str("\nCommands:\n");
        let width = command
            .subcommands
            .iter()
            .map(|s| s.name.len())
            .max()
            .unwrap_or(0);
        for sub in &command.subcommands {
            let summary = sub.summary.as_deref().unwrap_or_default();
            let _ = writeln!(out, "  {:<width$}  {summary}", sub.name);
        }
    }

    let options = scope.visible_options();
    if !options.is_empty() {
        out.push_str("\nOptions:\n");
        let rows: Vec<(String, String)> = options
            .iter()
            .map(|o| (option_label(o), option_help(o)))
            .collect();
        let width = rows.iter().map(|(label, _)| label.len()).max().unwrap_or(0);
        for (label, help) in rows {
            let line = format!("  {label:<width$}  {help}");
            out.push_str(line.trim_end());
            out.push('\n');
        }
    }

    out
}

fn option_label(option: &OptionSpec) -> String {
    let mut label = format!("--{}", option.name);
    if let Some(short) = option.shorthand {
        let _ = write!(label, ", -{short}");
    }
    if option.kind == OptionKind::String {
        if option.value_optional {
            label.push_str("[=<value>]");
        } else {
            label.push_str(" <value>");
        }
    }
    label
}

fn option_help(option: &OptionSpec) -> String {
    let mut help = option.description.clone().unwrap_or_default();
    match option.kind {
        OptionKind::String if !option.default.is_empty() => {
            let _ = write!(help, " (default {:?})", option.default);
        }
        OptionKind::Bool if is_bool_true(&option.default) => {
            help.push_str(" (enabled by default; disable with --skip-");
            help.push_str(&option.name);
            help.push(')');
        }
        _ => {}
    }
    help.trim_start().to_string()
}

#[cfg(test)]
mod tests {
    use crate::{ArgSpec, Command};

    use super::*;

    #[test]
    fn test_usage_lists_args_and_options() {
        let mut cmd = Command::new("mycommand", "summary", "description");
        cmd.add_option(OptionSpec::string("visible", None, "", "dummy description"))
            .unwrap();
        cmd.add_option(OptionSpec::string("hidden", None, "somedefault", "dummy").hidden())
            .unwrap();
        cmd.add_option(OptionSpec::boolean("truthybool", None, true, "dummy description"))
            .unwrap();
        cmd.add_option(OptionSpec::string("opt", Some('o'), "x", "dummy").value_optional())
            .unwrap();
        cmd.add_arg(ArgSpec::required("required")).unwrap();
        cmd.add_arg(ArgSpec::optional("optional", "hello")).unwrap();

        let text = render_usage(&cmd.scope());
        assert!(text.starts_with("mycommand: summary\n"));
        assert!(text.contains("Usage: mycommand [<options>] <required> [<optional>]\n"));
        assert!(text.contains("--visible <value>"));
        assert!(text.contains("--opt, -o[=<value>]"));
        assert!(text.contains("(default \"x\")"));
        assert!(text.contains("disable with --skip-truthybool"));
        assert!(!text.contains("--hidden"));
    }

    #[test]
    fn test_usage_false_spelled_bool_default_is_not_enabled() {
        let cmd: Command = serde_json::from_str(
            r#"{"name": "tool", "options": [
                {"name": "verbose", "kind": "bool", "default": "false", "description": "Chatty"},
                {"name": "color", "kind": "bool", "default": "on"}
            ]}"#,
        )
        .unwrap();
        assert!(crate::validate_command(&cmd).is_empty());

        let text = render_usage(&cmd.scope());
        let verbose = text.lines().find(|l| l.contains("--verbose")).unwrap();
        assert!(verbose.ends_with("Chatty"), "{verbose}");
        assert!(text.contains("disable with --skip-color"));
    }

    #[test]
    fn test_usage_for_suite_lists_commands() {
        let mut suite = Command::new("tool", "", "");
        suite
            .add_subcommand(Command::new("push", "Push things", ""))
            .unwrap();
        suite
            .add_subcommand(Command::new("diff", "Compare things", ""))
            .unwrap();

        let text = render_usage(&suite.scope());
        assert!(text.contains("Usage: tool [<options>] <command>"));
        assert!(text.contains("  push  Push things\n"));
        assert!(text.contains("  diff  Compare things\n"));
        assert!(!text.contains("Options:"));
    }
}
