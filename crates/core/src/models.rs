use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// How a filename pattern is compared against a file's basename.
///
/// `Contains` and `BeginsWith` are always literal; only `Regex` interprets
/// the pattern as a regular expression (unanchored search).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum PatternMode {
    #[default]
    Contains,
    BeginsWith,
    Regex,
}

impl PatternMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            PatternMode::Contains => "contains",
            PatternMode::BeginsWith => "beginswith",
            PatternMode::Regex => "regex",
        }
    }
}

impl fmt::Display for PatternMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Immutable parameters of one search run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub folder: PathBuf,
    pub pattern: String,
    pub include: Vec<String>,
    pub exclude: Vec<String>,
    pub include_mode: PatternMode,
    pub exclude_mode: PatternMode,
    pub case_sensitive: bool,
    pub verbose: bool,
}

impl SearchRequest {
    pub fn new(folder: impl Into<PathBuf>, pattern: impl Into<String>) -> Self {
        Self {
            folder: folder.into(),
            pattern: pattern.into(),
            include: Vec::new(),
            exclude: Vec::new(),
            include_mode: PatternMode::default(),
            exclude_mode: PatternMode::default(),
            case_sensitive: false,
            verbose: false,
        }
    }

    /// Every option that differs from its default, in a stable order.
    pub fn effective_arguments(&self) -> Vec<(&'static str, String)> {
        let mut arguments = vec![
            ("folder_path", self.folder.display().to_string()),
            ("regex_pattern", self.pattern.clone()),
        ];

        if !self.include.is_empty() {
            arguments.push(("include", format!("{:?}", self.include)));
        }
        if !self.exclude.is_empty() {
            arguments.push(("ignore", format!("{:?}", self.exclude)));
        }
        if self.include_mode != PatternMode::default() {
            arguments.push(("include_mode", self.include_mode.to_string()));
        }
        if self.exclude_mode != PatternMode::default() {
            arguments.push(("ignore_mode", self.exclude_mode.to_string()));
        }
        if self.case_sensitive {
            arguments.push(("case_sensitive", "true".to_string()));
        }
        if self.verbose {
            arguments.push(("verbose", "true".to_string()));
        }

        arguments
    }
}

/// A path whose file name ends in `.pdf` (any case).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CandidateFile(PathBuf);

impl CandidateFile {
    pub fn new(path: impl Into<PathBuf>) -> Option<Self> {
        let path = path.into();
        // name check, not extension: a bare `.pdf` file qualifies
        let is_pdf = path
            .file_name()
            .is_some_and(|name| name.to_string_lossy().to_lowercase().ends_with(".pdf"));

        is_pdf.then_some(Self(path))
    }

    pub fn path(&self) -> &Path {
        &self.0
    }

    pub fn file_name(&self) -> String {
        self.0
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

impl fmt::Display for CandidateFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

/// One regex hit: 1-based page and character offset into that page's text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MatchRecord {
    pub page: u32,
    pub offset: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    Matched(Vec<MatchRecord>),
    NoMatch,
    ExtractionError(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    Completed,
    CancelledByUser,
    NoCandidates,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub total_candidates: usize,
    pub processed: usize,
    pub matched_files: usize,
    pub failed_files: usize,
    pub outcome: RunOutcome,
}

impl RunSummary {
    pub fn empty(total_candidates: usize, outcome: RunOutcome) -> Self {
        Self {
            total_candidates,
            processed: 0,
            matched_files: 0,
            failed_files: 0,
            outcome,
        }
    }

    /// Files whose text was read, whether or not they matched.
    pub fn searched_files(&self) -> usize {
        self.processed - self.failed_files
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn candidate_requires_pdf_extension_in_any_case() {
        assert!(CandidateFile::new("/tmp/a.pdf").is_some());
        assert!(CandidateFile::new("/tmp/B.PDF").is_some());
        assert!(CandidateFile::new("/tmp/c.Pdf").is_some());
        assert!(CandidateFile::new("/tmp/notes.txt").is_none());
        assert!(CandidateFile::new("/tmp/.pdf").is_some());
        assert!(CandidateFile::new("/tmp/pdf").is_none());
        assert!(CandidateFile::new("/tmp/report.pdf.txt").is_none());
    }

    #[test]
    fn effective_arguments_skip_defaults() {
        let request = SearchRequest::new("/docs", "invoice");
        let keys: Vec<_> = request.effective_arguments().into_iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["folder_path", "regex_pattern"]);

        let request = SearchRequest {
            include: vec!["report".to_string()],
            exclude_mode: PatternMode::Regex,
            verbose: true,
            ..SearchRequest::new("/docs", "invoice")
        };
        let arguments = request.effective_arguments();
        assert!(arguments.contains(&("include", "[\"report\"]".to_string())));
        assert!(arguments.contains(&("ignore_mode", "regex".to_string())));
        assert!(arguments.contains(&("verbose", "true".to_string())));
        assert!(!arguments.iter().any(|(key, _)| *key == "case_sensitive"));
    }

    #[test]
    fn pattern_mode_serializes_lowercase() -> Result<(), Box<dyn std::error::Error>> {
        assert_eq!(serde_json::to_string(&PatternMode::BeginsWith)?, "\"beginswith\"");
        let mode: PatternMode = serde_json::from_str("\"regex\"")?;
        assert_eq!(mode, PatternMode::Regex);
        Ok(())
    }
}
