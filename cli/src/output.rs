//! Rendering of resolved configurations.

use cascade_config::{Config, Resolved};
use serde::Serialize;

/// Output format for `cascade resolve`.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum OutputFormat {
    Json,
    Yaml,
    Table,
}

#[derive(Serialize)]
struct Report<'a> {
    command: &'a str,
    entries: Vec<Row<'a>>,
}

#[derive(Serialize)]
struct Row<'a> {
    #[serde(flatten)]
    entry: &'a Resolved,
    value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    source: Option<&'a str>,
}

fn rows(config: &Config) -> Vec<Row<'_>> {
    config
        .entries()
        .iter()
        .map(|entry| Row {
            entry,
            value: config.get(&entry.name).into_owned(),
            source: entry.supplied_by.and_then(|idx| config.source_name(idx)),
        })
        .collect()
}

/// Renders every resolved entry of `config` in the requested format.
pub fn format_config(config: &Config, format: OutputFormat) -> Result<String, String> {
    let report = Report {
        command: config.command(),
        entries: rows(config),
    };
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(&report)
            .map_err(|e| format!("Failed to serialize output: {e}")),
        OutputFormat::Yaml => {
            serde_yaml::to_string(&report).map_err(|e| format!("Failed to serialize output: {e}"))
        }
        OutputFormat::Table => Ok(report_to_table(&report)),
    }
}

fn flag(value: bool) -> &'static str {
    if value { "yes" } else { "no" }
}

fn report_to_table(report: &Report<'_>) -> String {
    let mut out = String::new();
    out.push_str(&format!("Command: {}\n\n", report.command));

    let max_name = report
        .entries
        .iter()
        .map(|row| row.entry.name.len())
        .max()
        .unwrap_or(4)
        .max(4);
    let max_value = report
        .entries
        .iter()
        .map(|row| row.value.len())
        .max()
        .unwrap_or(5)
        .max(5);

    out.push_str(&format!(
        "{:<name$}  {:<value$}  {:<7}  {:<8}  {:<6}  SOURCE\n",
        "NAME",
        "VALUE",
        "CHANGED",
        "SUPPLIED",
        "ON_CLI",
        name = max_name,
        value = max_value,
    ));
    for row in &report.entries {
        out.push_str(&format!(
            "{:<name$}  {:<value$}  {:<7}  {:<8}  {:<6}  {}\n",
            row.entry.name,
            row.value,
            flag(row.entry.changed),
            flag(row.entry.supplied),
            flag(row.entry.on_cli),
            row.source.unwrap_or("(default)"),
            name = max_name,
            value = max_value,
        ));
    }
    out
}
