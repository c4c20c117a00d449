use crate::discovery::{discover_filtered, FileFilter};
use crate::extractor::PdfExtractor;
use crate::report::{
    format_arguments, format_file_list, format_outcome, format_summary, render_progress, ReportSink,
    SessionLog,
};
use crate::search::{compile_search_regex, search_document};
use crate::traits::Confirmation;
use crate::{CandidateFile, FileOutcome, RunOutcome, RunSummary, SearchError, SearchRequest};
use chrono::{DateTime, Local};
use regex::Regex;
use std::io::Write;
use std::path::Path;
use tracing::{debug, info};

pub const CONFIRM_PROMPT: &str = "Do you want to continue with the search? (y/n): ";
pub const NO_MATCHES_NOTICE: &str = "No matches found in any files.\n";

/// Everything that can fail fatally, done before any output is produced.
#[derive(Debug, Clone)]
pub struct SearchPlan {
    pub request: SearchRequest,
    pub regex: Regex,
    pub candidates: Vec<CandidateFile>,
}

impl SearchPlan {
    pub fn prepare(request: SearchRequest) -> Result<Self, SearchError> {
        let regex = compile_search_regex(&request.pattern, request.case_sensitive)?;
        let filter = FileFilter::from_request(&request)?;
        let candidates = discover_filtered(&request.folder, &filter)?;

        info!(
            folder = %request.folder.display(),
            candidates = candidates.len(),
            "search plan prepared"
        );

        Ok(Self {
            request,
            regex,
            candidates,
        })
    }

    /// Prepares the plan, then opens the session log. A fatal error leaves no log behind.
    pub fn prepare_with_log(
        request: SearchRequest,
        log_dir: &Path,
        started_at: DateTime<Local>,
    ) -> Result<(Self, SessionLog), SearchError> {
        let plan = Self::prepare(request)?;
        let log = SessionLog::create(log_dir, started_at)?;
        Ok((plan, log))
    }
}

/// Drives the per-file loop, strictly one document at a time.
pub struct SearchRunner<E, C>
where
    E: PdfExtractor,
    C: Confirmation,
{
    extractor: E,
    confirmation: C,
}

impl<E, C> SearchRunner<E, C>
where
    E: PdfExtractor,
    C: Confirmation,
{
    pub fn new(extractor: E, confirmation: C) -> Self {
        Self {
            extractor,
            confirmation,
        }
    }

    pub fn run<W: Write, L: Write>(
        &mut self,
        request: SearchRequest,
        sink: &mut ReportSink<W, L>,
    ) -> Result<RunSummary, SearchError> {
        let plan = SearchPlan::prepare(request)?;
        self.execute(&plan, sink)
    }

    pub fn execute<W: Write, L: Write>(
        &mut self,
        plan: &SearchPlan,
        sink: &mut ReportSink<W, L>,
    ) -> Result<RunSummary, SearchError> {
        let request = &plan.request;
        let total = plan.candidates.len();

        sink.emit(&format_arguments(&request.effective_arguments()))?;
        sink.log_only(&format_file_list(&plan.candidates))?;
        sink.log_only("Search Results:\n")?;
        sink.console_only(&format!("Found {total} PDF files to search.\n"))?;
        if let Some(path) = sink.log_path() {
            let line = format!("Log file: {}\n", path.display());
            sink.console_only(&line)?;
        }

        if total == 0 {
            sink.emit(NO_MATCHES_NOTICE)?;
            return Ok(RunSummary::empty(0, RunOutcome::NoCandidates));
        }

        if !self.confirmation.confirm(CONFIRM_PROMPT)? {
            info!("search cancelled before processing");
            sink.console_only("Search cancelled by user.\n")?;
            sink.log_only("Search cancelled by user before processing files.\n")?;
            return Ok(RunSummary::empty(total, RunOutcome::CancelledByUser));
        }

        sink.emit("Starting search...\n")?;

        let mut summary = RunSummary::empty(total, RunOutcome::Completed);
        for (index, candidate) in plan.candidates.iter().enumerate() {
            let outcome = search_document(&self.extractor, candidate, &plan.regex);

            match &outcome {
                FileOutcome::Matched(_) => summary.matched_files += 1,
                FileOutcome::ExtractionError(_) => summary.failed_files += 1,
                FileOutcome::NoMatch => {}
            }
            summary.processed += 1;

            if let Some(block) = format_outcome(candidate, &outcome, request.verbose) {
                sink.emit(&block)?;
            }
            sink.console_only(&render_progress(index + 1, total))?;
        }
        sink.console_only("\n")?;

        if summary.matched_files == 0 {
            sink.emit(NO_MATCHES_NOTICE)?;
        }
        sink.emit(&format_summary(&summary))?;

        debug!(?summary, "search finished");
        Ok(summary)
    }
}
