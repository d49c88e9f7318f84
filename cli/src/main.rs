use std::fs;
use std::path::{Path, PathBuf};

use cascade_config::parse_cli;
use cascade_core::{Command as Registry, render_usage, validate_command};
use cascade_sources::{OptionFile, Source, document_from_json, document_from_yaml};
use clap::{Args, Parser, Subcommand};

mod output;

use output::{OutputFormat, format_config};

#[derive(Debug, Parser)]
#[command(name = "cascade")]
#[command(about = "Resolve options from command lines, option files and documents")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Resolve a command line against a registry and print every entry with provenance.
    Resolve(ResolveArgs),
    /// Split a value on a delimiter, honoring quotes and escapes.
    Split(SplitArgs),
    /// Strip one level of wrapping quotes from a value.
    Unwrap(UnwrapArgs),
    /// Print usage text for a command in a registry.
    Usage(UsageArgs),
    /// Check a registry file for declaration problems.
    Validate(ValidateArgs),
}

#[derive(Debug, Args)]
struct ResolveArgs {
    /// Registry definition (YAML, or JSON with a .json extension).
    #[arg(long)]
    registry: PathBuf,
    /// Option file consulted after the command line; repeatable, earlier files win.
    #[arg(long = "option-file")]
    option_files: Vec<PathBuf>,
    /// Option-file section to read in addition to the preamble; repeatable, later sections win.
    #[arg(long = "section")]
    sections: Vec<String>,
    /// Flat YAML or JSON document consulted after all option files; repeatable.
    #[arg(long = "document")]
    documents: Vec<PathBuf>,
    /// Output format.
    #[arg(long, default_value = "table")]
    format: OutputFormat,
    /// Arguments to resolve, given after `--`.
    #[arg(last = true)]
    argv: Vec<String>,
}

#[derive(Debug, Args)]
struct SplitArgs {
    /// Delimiter character.
    #[arg(long, default_value_t = ',')]
    delimiter: char,
    /// Unwrap the whole value before splitting.
    #[arg(long)]
    unwrap_full: bool,
    /// Raw value to split.
    #[arg(allow_hyphen_values = true)]
    value: String,
}

#[derive(Debug, Args)]
struct UnwrapArgs {
    /// Raw value to unwrap.
    #[arg(allow_hyphen_values = true)]
    value: String,
}

#[derive(Debug, Args)]
struct UsageArgs {
    /// Registry definition (YAML, or JSON with a .json extension).
    #[arg(long)]
    registry: PathBuf,
    /// Sub-command path below the root command.
    path: Vec<String>,
}

#[derive(Debug, Args)]
struct ValidateArgs {
    /// Registry definition (YAML, or JSON with a .json extension).
    #[arg(long)]
    registry: PathBuf,
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Resolve(args) => run_resolve(args),
        Command::Split(args) => run_split(args),
        Command::Unwrap(args) => run_unwrap(args),
        Command::Usage(args) => run_usage(args),
        Command::Validate(args) => run_validate(args),
    };

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn is_json(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

fn read(path: &Path) -> Result<String, String> {
    fs::read_to_string(path).map_err(|err| format!("Failed to read '{}': {err}", path.display()))
}

fn load_registry(path: &Path) -> Result<Registry, String> {
    let raw = read(path)?;
    if is_json(path) {
        serde_json::from_str(&raw)
            .map_err(|err| format!("Invalid registry '{}': {err}", path.display()))
    } else {
        serde_yaml::from_str(&raw)
            .map_err(|err| format!("Invalid registry '{}': {err}", path.display()))
    }
}

fn load_valid_registry(path: &Path) -> Result<Registry, String> {
    let registry = load_registry(path)?;
    let problems = validate_command(&registry);
    if let Some(first) = problems.first() {
        return Err(format!(
            "Registry '{}' has {} problem(s), first: {first}",
            path.display(),
            problems.len()
        ));
    }
    Ok(registry)
}

fn run_resolve(args: ResolveArgs) -> Result<(), String> {
    let registry = load_valid_registry(&args.registry)?;
    let sections: Vec<&str> = args.sections.iter().map(String::as_str).collect();

    let mut sources: Vec<Box<dyn Source>> = Vec::new();
    for path in &args.option_files {
        let label = path.display().to_string();
        let file = OptionFile::parse(&label, &read(path)?).map_err(|e| e.to_string())?;
        sources.push(Box::new(file.source(&sections)));
    }
    for path in &args.documents {
        let label = path.display().to_string();
        let raw = read(path)?;
        let doc = if is_json(path) {
            document_from_json(&label, &raw)
        } else {
            document_from_yaml(&label, &raw)
        }
        .map_err(|e| e.to_string())?;
        sources.push(Box::new(doc));
    }

    let config = parse_cli(&registry, args.argv.as_slice())
        .map_err(|e| e.to_string())?
        .into_config(sources);
    println!("{}", format_config(&config, args.format)?.trim_end());
    Ok(())
}

fn run_split(args: SplitArgs) -> Result<(), String> {
    for item in cascade_values::split(&args.value, args.delimiter, args.unwrap_full) {
        println!("{item}");
    }
    Ok(())
}

fn run_unwrap(args: UnwrapArgs) -> Result<(), String> {
    println!("{}", cascade_values::unwrap(&args.value));
    Ok(())
}

fn run_usage(args: UsageArgs) -> Result<(), String> {
    let registry = load_valid_registry(&args.registry)?;
    let mut scope = registry.scope();
    for name in &args.path {
        scope = scope
            .child(name)
            .ok_or_else(|| format!("Unknown command {name:?} for {}", scope.qualified_name()))?;
    }
    print!("{}", render_usage(&scope));
    Ok(())
}

fn run_validate(args: ValidateArgs) -> Result<(), String> {
    let registry = load_registry(&args.registry)?;
    let problems = validate_command(&registry);
    if problems.is_empty() {
        println!("Registry '{}' is valid.", args.registry.display());
        return Ok(());
    }
    for problem in &problems {
        println!("{problem}");
    }
    Err(format!("{} problem(s) found", problems.len()))
}
