use crate::matcher::PatternSet;
use crate::{CandidateFile, PatternMode, SearchError, SearchRequest};
use std::path::Path;
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Include/exclude filter over candidate basenames.
///
/// An empty include set lets everything through; exclusion runs after
/// inclusion and always removes matches.
#[derive(Debug, Clone)]
pub struct FileFilter {
    include: PatternSet,
    exclude: PatternSet,
}

impl FileFilter {
    pub fn new(include: PatternSet, exclude: PatternSet) -> Self {
        Self { include, exclude }
    }

    pub fn from_request(request: &SearchRequest) -> Result<Self, SearchError> {
        Ok(Self::new(
            PatternSet::new(&request.include, request.include_mode, request.case_sensitive)?,
            PatternSet::new(&request.exclude, request.exclude_mode, request.case_sensitive)?,
        ))
    }

    pub fn accepts(&self, candidate: &CandidateFile) -> bool {
        let name = candidate.file_name();
        let included = self.include.is_empty() || self.include.is_match(&name);
        included && !self.exclude.is_match(&name)
    }

    pub fn apply(&self, files: Vec<CandidateFile>) -> Vec<CandidateFile> {
        files.into_iter().filter(|file| self.accepts(file)).collect()
    }
}

/// Every `.pdf` file under `root`, in lexicographic order per directory level.
pub fn discover_pdf_files(root: &Path) -> Result<Vec<CandidateFile>, SearchError> {
    if !root.is_dir() {
        return Err(SearchError::PathNotFound(root.to_path_buf()));
    }

    let mut files = Vec::new();

    for item in WalkDir::new(root).sort_by_file_name() {
        let entry = match item {
            Ok(entry) => entry,
            Err(error) => {
                warn!(%error, "skipping unreadable directory entry");
                continue;
            }
        };

        // symlinked files are followed to their target's metadata
        if !entry.path().is_file() {
            continue;
        }

        if let Some(candidate) = CandidateFile::new(entry.into_path()) {
            files.push(candidate);
        }
    }

    debug!(root = %root.display(), count = files.len(), "pdf files found");
    Ok(files)
}

pub fn discover_filtered(root: &Path, filter: &FileFilter) -> Result<Vec<CandidateFile>, SearchError> {
    let files = discover_pdf_files(root)?;
    let total = files.len();
    let kept = filter.apply(files);
    debug!(total, kept = kept.len(), "filename filters applied");
    Ok(kept)
}

/// Discovery with a single mode shared by the include and exclude lists.
pub fn discover<S: AsRef<str>>(
    root: &Path,
    include: &[S],
    exclude: &[S],
    mode: PatternMode,
    case_sensitive: bool,
) -> Result<Vec<CandidateFile>, SearchError> {
    let filter = FileFilter::new(
        PatternSet::new(include, mode, case_sensitive)?,
        PatternSet::new(exclude, mode, case_sensitive)?,
    );
    discover_filtered(root, &filter)
}
