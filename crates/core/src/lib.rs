pub mod config;
pub mod confirm;
pub mod discovery;
pub mod error;
pub mod extractor;
pub mod matcher;
pub mod models;
pub mod report;
pub mod runner;
pub mod search;
pub mod traits;

#[cfg(test)]
pub(crate) mod test_support;

pub use config::{
    merge, resolve_options, save_favorite, save_last_run, JsonConfigStore, MemoryConfigStore,
    OptionSource, SearchOptions, StoredConfig, DEFAULT_CONFIG_FILE,
};
pub use confirm::{is_affirmative, AlwaysConfirm, LineConfirmation};
pub use discovery::{discover, discover_filtered, discover_pdf_files, FileFilter};
pub use error::{ConfigError, ExtractError, SearchError};
pub use extractor::{extract_page_texts, LopdfExtractor, PageText, PdfExtractor};
pub use matcher::{matches, PatternSet};
pub use models::{
    CandidateFile, FileOutcome, MatchRecord, PatternMode, RunOutcome, RunSummary, SearchRequest,
};
pub use report::{ReportSink, SessionLog};
pub use runner::{SearchPlan, SearchRunner};
pub use search::{compile_search_regex, find_matches, search_document};
pub use traits::{ConfigRepository, Confirmation};
