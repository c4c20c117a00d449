use crate::error::SearchError;
use crate::models::PatternMode;
use regex::{Regex, RegexBuilder};

/// A compiled list of filename patterns under one mode.
///
/// Literal modes fold case with `str::to_lowercase` when case-insensitive;
/// regex mode sets the case-insensitive flag on each compiled pattern.
#[derive(Debug, Clone)]
pub struct PatternSet {
    mode: PatternMode,
    case_sensitive: bool,
    literals: Vec<String>,
    regexes: Vec<Regex>,
}

impl PatternSet {
    pub fn new<S: AsRef<str>>(
        patterns: &[S],
        mode: PatternMode,
        case_sensitive: bool,
    ) -> Result<Self, SearchError> {
        let mut literals = Vec::new();
        let mut regexes = Vec::new();

        for pattern in patterns {
            let pattern = pattern.as_ref();
            match mode {
                PatternMode::Regex => {
                    let compiled = RegexBuilder::new(pattern)
                        .case_insensitive(!case_sensitive)
                        .build()
                        .map_err(|source| SearchError::InvalidFilterPattern {
                            pattern: pattern.to_string(),
                            source,
                        })?;
                    regexes.push(compiled);
                }
                PatternMode::Contains | PatternMode::BeginsWith => {
                    literals.push(fold(pattern, case_sensitive));
                }
            }
        }

        Ok(Self {
            mode,
            case_sensitive,
            literals,
            regexes,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.literals.is_empty() && self.regexes.is_empty()
    }

    pub fn mode(&self) -> PatternMode {
        self.mode
    }

    /// True when any pattern matches `filename`. An empty set never matches.
    pub fn is_match(&self, filename: &str) -> bool {
        match self.mode {
            PatternMode::Regex => self.regexes.iter().any(|re| re.is_match(filename)),
            PatternMode::Contains => {
                let candidate = fold(filename, self.case_sensitive);
                self.literals
                    .iter()
                    .any(|pattern| candidate.contains(pattern.as_str()))
            }
            PatternMode::BeginsWith => {
                let candidate = fold(filename, self.case_sensitive);
                self.literals
                    .iter()
                    .any(|pattern| candidate.starts_with(pattern.as_str()))
            }
        }
    }
}

fn fold(text: &str, case_sensitive: bool) -> String {
    if case_sensitive {
        text.to_string()
    } else {
        text.to_lowercase()
    }
}

/// One-shot form of [`PatternSet::is_match`].
pub fn matches<S: AsRef<str>>(
    filename: &str,
    patterns: &[S],
    mode: PatternMode,
    case_sensitive: bool,
) -> Result<bool, SearchError> {
    Ok(PatternSet::new(patterns, mode, case_sensitive)?.is_match(filename))
}
