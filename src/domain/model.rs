use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Make -> models, in first-seen order on both levels.
pub type MakeModelIndex = IndexMap<String, Vec<String>>;

/// One successfully parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord {
    pub line_number: usize,
    pub model: String,
    pub make: String,
    pub ignored_fields: usize,
}

/// A line that could not be turned into a `(model, make)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineDiagnostic {
    pub line_number: usize,
    pub content: String,
    pub reason: String,
}

impl LineDiagnostic {
    pub fn missing_make(line_number: usize, content: &str) -> Self {
        Self {
            line_number,
            content: content.to_string(),
            reason: "expected at least two comma-separated fields".to_string(),
        }
    }
}

/// Everything one pass over the input produced.
#[derive(Debug, Clone, Default)]
pub struct ParseReport {
    pub index: MakeModelIndex,
    pub records: usize,
    pub skipped_empty: usize,
    pub diagnostics: Vec<LineDiagnostic>,
}

impl ParseReport {
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "kebab-case")]
pub enum ParseMode {
    /// Abort on the first malformed line
    #[default]
    FailFast,
    /// Report every malformed line, then abort
    Collect,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// `{ "<make>": ["<model>", ...] }` with 4-space indentation
    #[default]
    Json,
    /// Flat `make,model` table with a header row
    Csv,
}

/// Vehicle recognised in a listing title.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TitleMatch {
    pub title: String,
    pub make: Option<String>,
    pub model: Option<String>,
    pub year: Option<i32>,
}

impl TitleMatch {
    /// A listing is only usable once both make and year are known.
    pub fn is_complete(&self) -> bool {
        self.make.is_some() && self.year.is_some()
    }
}
