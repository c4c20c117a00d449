use crate::{CandidateFile, FileOutcome, RunSummary};
use chrono::{DateTime, Local};
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

const PROGRESS_BAR_CELLS: usize = 50;

/// Append-only transcript file for one run.
#[derive(Debug)]
pub struct SessionLog {
    path: PathBuf,
    file: File,
}

impl SessionLog {
    /// Opens `pdf_search_log_<YYYYMMDD_HHMMSS>.txt` inside `dir`.
    pub fn create(dir: &Path, started_at: DateTime<Local>) -> io::Result<Self> {
        fs::create_dir_all(dir)?;
        let path = dir.join(format!(
            "pdf_search_log_{}.txt",
            started_at.format("%Y%m%d_%H%M%S")
        ));
        let mut file = OpenOptions::new().create(true).append(true).open(&path)?;
        writeln!(file, "Search started at {}", started_at.to_rfc3339())?;

        Ok(Self { path, file })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Write for SessionLog {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.file.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file.flush()?;
        self.file.sync_data()
    }
}

/// Console and log pair. The log is flushed after every write.
pub struct ReportSink<W: Write, L: Write> {
    console: W,
    log: L,
    log_path: Option<PathBuf>,
}

impl<W: Write, L: Write> ReportSink<W, L> {
    pub fn new(console: W, log: L) -> Self {
        Self {
            console,
            log,
            log_path: None,
        }
    }

    pub fn with_log_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.log_path = Some(path.into());
        self
    }

    pub fn log_path(&self) -> Option<&Path> {
        self.log_path.as_deref()
    }

    /// Writes `text` to both console and log.
    pub fn emit(&mut self, text: &str) -> io::Result<()> {
        self.console_only(text)?;
        self.log_only(text)
    }

    pub fn console_only(&mut self, text: &str) -> io::Result<()> {
        self.console.write_all(text.as_bytes())?;
        self.console.flush()
    }

    pub fn log_only(&mut self, text: &str) -> io::Result<()> {
        self.log.write_all(text.as_bytes())?;
        self.log.flush()
    }

    pub fn into_parts(self) -> (W, L) {
        (self.console, self.log)
    }
}

pub fn format_arguments(arguments: &[(&'static str, String)]) -> String {
    let mut text = String::from("Arguments used for the search:\n");
    for (key, value) in arguments {
        text.push_str(&format!("{key}: {value}\n"));
    }
    text.push('\n');
    text
}

pub fn format_file_list(files: &[CandidateFile]) -> String {
    let mut text = format!("Found {} PDF files to search:\n", files.len());
    for file in files {
        text.push_str(&format!("{file}\n"));
    }
    text.push('\n');
    text
}

/// The block printed for one file, or `None` when it is silent at this verbosity.
pub fn format_outcome(candidate: &CandidateFile, outcome: &FileOutcome, verbose: bool) -> Option<String> {
    match outcome {
        FileOutcome::Matched(records) => {
            let mut text = format!("\n{candidate}:\n");
            for (index, record) in records.iter().enumerate() {
                text.push_str(&format!(
                    "{}. Page {}, Position {}\n",
                    index + 1,
                    record.page,
                    record.offset
                ));
            }
            text.push('\n');
            Some(text)
        }
        FileOutcome::NoMatch if verbose => Some(format!("\nNo matches found in {candidate}\n")),
        FileOutcome::ExtractionError(message) if verbose => {
            Some(format!("\nError processing {candidate}: {message}\n"))
        }
        FileOutcome::NoMatch | FileOutcome::ExtractionError(_) => None,
    }
}

/// `\rProgress: |███---| 40% Complete`, redrawn in place.
pub fn render_progress(current: usize, total: usize) -> String {
    let total = total.max(1);
    let current = current.min(total);
    let percent = current * 100 / total;
    let filled = PROGRESS_BAR_CELLS * current / total;
    let bar = format!(
        "{}{}",
        "█".repeat(filled),
        "-".repeat(PROGRESS_BAR_CELLS - filled)
    );
    format!("\rProgress: |{bar}| {percent}% Complete")
}

pub fn format_summary(summary: &RunSummary) -> String {
    format!(
        "Searched {} files: {} with matches, {} unreadable.\n",
        summary.searched_files(),
        summary.matched_files,
        summary.failed_files
    )
}
