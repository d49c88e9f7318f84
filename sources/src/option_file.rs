//! INI-style option file text.
//!
//! The format is a list of `name=value` lines grouped under optional
//! `[section]` headers:
//!
//! ```text
//! # connection defaults
//! host=db1.example.com
//! port = 3306
//!
//! [production]
//! password='s3cr=t'
//! skip-verbose
//! compress
//! ```
//!
//! Lines before the first header form the preamble, which every selected
//! source includes. A bare `name` stands for `name=1`; `skip-name` stands for
//! `name=0`. Underscores in names are read as dashes. Values are kept raw,
//! quotes included, so the resolver's getters see exactly what was written.

use std::collections::BTreeMap;

use cascade_values::coerce::parse_bool;
use tracing::debug;

use crate::error::{Result, SourceError};
use crate::source::{Origin, SimpleSource};

const SKIP_PREFIX: &str = "skip-";

/// A parsed option file.
///
/// # Examples
///
/// ```
/// use cascade_sources::{OptionFile, Source};
///
/// let file = OptionFile::parse("my.cnf", "host=db1\n[client]\nport=3307\n").unwrap();
/// let source = file.source(&["client"]);
/// assert_eq!(source.value("host"), Some("db1"));
/// assert_eq!(source.value("port"), Some("3307"));
/// assert_eq!(file.source(&[]).value("port"), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionFile {
    name: String,
    preamble: BTreeMap<String, String>,
    sections: Vec<(String, BTreeMap<String, String>)>,
}

impl OptionFile {
    /// Parses option-file text. `name` labels the resulting sources and
    /// error messages.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Syntax`] for an unterminated or empty section
    /// header, a line with no option name, or a `skip-` line whose value is
    /// not boolean.
    pub fn parse(name: &str, text: &str) -> Result<Self> {
        let mut file = Self {
            name: name.to_string(),
            preamble: BTreeMap::new(),
            sections: Vec::new(),
        };
        let mut current: Option<usize> = None;

        for (idx, raw_line) in text.lines().enumerate() {
            let line = raw_line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
                continue;
            }
            let syntax = |message: &str| SourceError::Syntax {
                source_name: name.to_string(),
                line: idx + 1,
                message: message.to_string(),
            };

            if let Some(header) = line.strip_prefix('[') {
                let section = header
                    .strip_suffix(']')
                    .ok_or_else(|| syntax("unterminated section header"))?
                    .trim();
                if section.is_empty() {
                    return Err(syntax("empty section name"));
                }
                current = Some(file.section_index(section));
                continue;
            }

            let (key, value) = match line.split_once('=') {
                Some((key, value)) => (key.trim(), Some(value.trim())),
                None => (line, None),
            };
            if key.is_empty() {
                return Err(syntax("missing option name"));
            }
            let key = key.replace('_', "-");

            let (key, value) = match key.strip_prefix(SKIP_PREFIX) {
                Some(target) if !target.is_empty() => {
                    let enabled = match value {
                        None => true,
                        Some(v) => parse_bool(v)
                            .map_err(|_| syntax("skip- option needs a boolean value"))?,
                    };
                    (target.to_string(), if enabled { "0" } else { "1" }.to_string())
                }
                _ => (key, value.unwrap_or("1").to_string()),
            };

            let values = match current {
                Some(i) => &mut file.sections[i].1,
                None => &mut file.preamble,
            };
            values.insert(key, value);
        }

        debug!(
            source = %file.name,
            sections = file.sections.len(),
            "Parsed option file"
        );
        Ok(file)
    }

    fn section_index(&mut self, section: &str) -> usize {
        match self.sections.iter().position(|(name, _)| name == section) {
            Some(i) => i,
            None => {
                self.sections.push((section.to_string(), BTreeMap::new()));
                self.sections.len() - 1
            }
        }
    }

    /// The label given at parse time.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Section names in order of first appearance.
    pub fn section_names(&self) -> impl Iterator<Item = &str> {
        self.sections.iter().map(|(name, _)| name.as_str())
    }

    /// Returns `true` if the file has a `[section]` header with this name.
    pub fn has_section(&self, section: &str) -> bool {
        self.sections.iter().any(|(name, _)| name == section)
    }

    /// Builds a file-origin source from the preamble plus the named
    /// sections. Later sections override earlier ones; unknown section
    /// names contribute nothing.
    pub fn source(&self, sections: &[&str]) -> SimpleSource {
        let mut merged = self.preamble.clone();
        for wanted in sections {
            if let Some((_, values)) = self.sections.iter().find(|(name, _)| name == wanted) {
                merged.extend(values.iter().map(|(k, v)| (k.clone(), v.clone())));
            }
        }
        let label = if sections.is_empty() {
            self.name.clone()
        } else {
            format!("{} [{}]", self.name, sections.join(", "))
        };
        SimpleSource::new(&label, merged).with_origin(Origin::File)
    }
}

#[cfg(test)]
mod tests {
    use crate::Source;

    use super::*;

    const SAMPLE: &str = "\
# leading comment
host = db1
user=root

[client]
port=3307
compress
skip-verbose
log_file='/var/log/x.log'

; another comment
[production]
host=db2
skip-compress=0
[client]
user = 'app user'
";

    #[test]
    fn test_parse_sections_and_preamble() {
        let file = OptionFile::parse("my.cnf", SAMPLE).unwrap();
        assert_eq!(
            file.section_names().collect::<Vec<_>>(),
            vec!["client", "production"]
        );
        assert!(file.has_section("client"));
        assert!(!file.has_section("missing"));

        let preamble = file.source(&[]);
        assert_eq!(preamble.value("host"), Some("db1"));
        assert_eq!(preamble.value("port"), None);
        assert_eq!(preamble.name(), "my.cnf");
        assert_eq!(preamble.origin(), Origin::File);
    }

    #[test]
    fn test_bare_skip_and_underscore_keys() {
        let file = OptionFile::parse("my.cnf", SAMPLE).unwrap();
        let client = file.source(&["client"]);
        assert_eq!(client.value("compress"), Some("1"));
        assert_eq!(client.value("verbose"), Some("0"));
        assert_eq!(client.value("log-file"), Some("'/var/log/x.log'"));
        // repeated section header merges into the first one
        assert_eq!(client.value("user"), Some("'app user'"));
    }

    #[test]
    fn test_later_sections_override() {
        let file = OptionFile::parse("my.cnf", SAMPLE).unwrap();
        let source = file.source(&["client", "production"]);
        assert_eq!(source.value("host"), Some("db2"));
        assert_eq!(source.value("compress"), Some("1"));
        assert_eq!(source.name(), "my.cnf [client, production]");
    }

    #[test]
    fn test_syntax_errors_report_line() {
        let err = OptionFile::parse("bad.cnf", "a=1\n[broken\n").unwrap_err();
        assert_eq!(err.to_string(), "bad.cnf line 2: unterminated section header");

        let err = OptionFile::parse("bad.cnf", "=value").unwrap_err();
        assert_eq!(err.to_string(), "bad.cnf line 1: missing option name");

        let err = OptionFile::parse("bad.cnf", "\n\nskip-x=perhaps").unwrap_err();
        assert!(matches!(err, SourceError::Syntax { line: 3, .. }));

        assert!(OptionFile::parse("bad.cnf", "[ ]").is_err());
    }
}
