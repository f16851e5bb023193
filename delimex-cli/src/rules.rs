//! Replacement rule files
//!
//! A rule file is TOML with a `[[rule]]` array. Each rule names either a
//! delimited `pattern` or a raw `regex` (plus optional `modifiers`), an
//! optional `extended` switch, and a `replacement` template:
//!
//! ```toml
//! [[rule]]
//! regex = "https?://[^/]+"
//! modifiers = "i"
//! replacement = "<link>"
//! ```
//!
//! Values come straight from the file, so their types are checked here. A
//! file with any bad rule is rejected as a whole.

use std::path::{Path, PathBuf};

use delimex::{ReplaceError, ReplacePairs, compile, regex_to_pattern, un_extended};
use serde::Deserialize;
use thiserror::Error;
use toml::{Table, Value};

const KNOWN_FIELDS: [&str; 5] = ["pattern", "regex", "modifiers", "extended", "replacement"];

/// Errors raised while loading a rule file
#[derive(Error, Debug)]
pub enum RulesError {
    /// The file could not be read
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        /// Path of the rule file
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// The file is not valid TOML or has no rule array
    #[error("invalid rule file: {0}")]
    Parse(#[from] toml::de::Error),

    /// Neither or both of `pattern` and `regex` were given
    #[error("rule {index}: exactly one of `pattern` or `regex` is required")]
    PatternSource {
        /// 1-based rule number
        index: usize,
    },

    /// The pattern is not a string
    #[error("rule {index}: `{field}` must be a string, found {found}")]
    PatternType {
        /// 1-based rule number
        index: usize,
        /// `pattern` or `regex`
        field: &'static str,
        /// TOML type that was found
        found: &'static str,
    },

    /// The pattern does not compile
    #[error("rule {index}: {source}")]
    InvalidPattern {
        /// 1-based rule number
        index: usize,
        /// Why the pattern was rejected
        source: ReplaceError,
    },

    /// The replacement is missing
    #[error("rule {index}: `replacement` is required")]
    MissingReplacement {
        /// 1-based rule number
        index: usize,
    },

    /// The replacement is not a string
    #[error("rule {index}: `replacement` must be a string, found {found}")]
    ReplacementType {
        /// 1-based rule number
        index: usize,
        /// TOML type that was found
        found: &'static str,
    },

    /// An optional field has the wrong type
    #[error("rule {index}: `{field}` must be a {expected}, found {found}")]
    FieldType {
        /// 1-based rule number
        index: usize,
        /// Field name
        field: &'static str,
        /// Expected TOML type
        expected: &'static str,
        /// TOML type that was found
        found: &'static str,
    },

    /// `modifiers` only applies to a raw `regex`
    #[error("rule {index}: `modifiers` can only be used with `regex`")]
    ModifiersWithPattern {
        /// 1-based rule number
        index: usize,
    },

    /// A field this format does not know
    #[error("rule {index}: unknown field `{field}`")]
    UnknownField {
        /// 1-based rule number
        index: usize,
        /// Field name as written
        field: String,
    },
}

#[derive(Debug, Deserialize)]
struct RuleFile {
    #[serde(default)]
    rule: Vec<Table>,
}

/// A rule after type checking
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    /// The delimited pattern literal to run
    pub pattern: String,
    /// The replacement template
    pub replacement: String,
}

impl Rule {
    fn from_table(index: usize, table: &Table) -> Result<Self, RulesError> {
        if let Some(field) = table.keys().find(|k| !KNOWN_FIELDS.contains(&k.as_str())) {
            return Err(RulesError::UnknownField {
                index,
                field: field.clone(),
            });
        }

        let modifiers = optional_str(index, table, "modifiers")?;
        let extended = match table.get("extended") {
            None => false,
            Some(Value::Boolean(b)) => *b,
            Some(other) => {
                return Err(RulesError::FieldType {
                    index,
                    field: "extended",
                    expected: "boolean",
                    found: other.type_str(),
                });
            }
        };

        let pattern = match (table.get("pattern"), table.get("regex")) {
            (Some(pattern), None) => {
                if modifiers.is_some() {
                    return Err(RulesError::ModifiersWithPattern { index });
                }
                pattern_str(index, "pattern", pattern)?.to_string()
            }
            (None, Some(regex)) => {
                let regex = pattern_str(index, "regex", regex)?;
                regex_to_pattern(regex, modifiers.unwrap_or(""))
            }
            _ => return Err(RulesError::PatternSource { index }),
        };
        let pattern = if extended {
            un_extended(&pattern)
        } else {
            pattern
        };
        if let Err(source) = compile(&pattern) {
            return Err(RulesError::InvalidPattern {
                index,
                source: ReplaceError::Pattern { pattern, source },
            });
        }

        let replacement = match table.get("replacement") {
            Some(Value::String(s)) => s.clone(),
            Some(other) => {
                return Err(RulesError::ReplacementType {
                    index,
                    found: other.type_str(),
                });
            }
            None => return Err(RulesError::MissingReplacement { index }),
        };

        Ok(Rule {
            pattern,
            replacement,
        })
    }
}

fn pattern_str<'a>(
    index: usize,
    field: &'static str,
    value: &'a Value,
) -> Result<&'a str, RulesError> {
    value.as_str().ok_or_else(|| RulesError::PatternType {
        index,
        field,
        found: value.type_str(),
    })
}

fn optional_str<'a>(
    index: usize,
    table: &'a Table,
    field: &'static str,
) -> Result<Option<&'a str>, RulesError> {
    match table.get(field) {
        None => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.as_str())),
        Some(other) => Err(RulesError::FieldType {
            index,
            field,
            expected: "string",
            found: other.type_str(),
        }),
    }
}

/// Parse rule file text, checking every rule before returning any
pub fn parse_rules(text: &str) -> Result<Vec<Rule>, RulesError> {
    let file: RuleFile = toml::from_str(text)?;
    file.rule
        .iter()
        .enumerate()
        .map(|(i, table)| Rule::from_table(i + 1, table))
        .collect()
}

/// Load a rule file into replacement pairs
pub fn load_rules(path: &Path) -> Result<ReplacePairs, RulesError> {
    let text = std::fs::read_to_string(path).map_err(|source| RulesError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let rules = parse_rules(&text)?;
    tracing::debug!(path = %path.display(), count = rules.len(), "loaded rules");
    Ok(rules
        .into_iter()
        .map(|rule| (rule.pattern, rule.replacement))
        .collect())
}
