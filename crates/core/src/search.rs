use crate::extractor::{PageText, PdfExtractor};
use crate::{CandidateFile, FileOutcome, MatchRecord, SearchError};
use regex::{Regex, RegexBuilder};
use tracing::debug;

/// Compiles the user pattern once per run with case sensitivity baked in.
pub fn compile_search_regex(pattern: &str, case_sensitive: bool) -> Result<Regex, SearchError> {
    RegexBuilder::new(pattern)
        .case_insensitive(!case_sensitive)
        .build()
        .map_err(|source| SearchError::InvalidRegex {
            pattern: pattern.to_string(),
            source,
        })
}

/// All non-overlapping matches, page ascending then offset ascending.
///
/// Offsets count characters, not bytes, from the start of the page text.
pub fn find_matches(pages: &[PageText], regex: &Regex) -> Vec<MatchRecord> {
    let mut records = Vec::new();

    for page in pages {
        let mut last_byte = 0;
        let mut chars_before = 0;

        for found in regex.find_iter(&page.text) {
            chars_before += page.text[last_byte..found.start()].chars().count();
            last_byte = found.start();
            records.push(MatchRecord {
                page: page.number,
                offset: chars_before,
            });
        }
    }

    records
}

/// Searches one candidate. Extraction failures become an outcome, not an error.
pub fn search_document<E>(extractor: &E, candidate: &CandidateFile, regex: &Regex) -> FileOutcome
where
    E: PdfExtractor + ?Sized,
{
    let pages = match extractor.extract_pages(candidate.path()) {
        Ok(pages) => pages,
        Err(error) => {
            debug!(path = %candidate, %error, "extraction failed");
            return FileOutcome::ExtractionError(error.to_string());
        }
    };

    let records = find_matches(&pages, regex);
    debug!(path = %candidate, pages = pages.len(), matches = records.len(), "document searched");

    if records.is_empty() {
        FileOutcome::NoMatch
    } else {
        FileOutcome::Matched(records)
    }
}
