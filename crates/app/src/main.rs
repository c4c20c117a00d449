use chrono::Local;
use clap::{CommandFactory, Parser, ValueEnum};
use pdf_regex_search_core::{
    resolve_options, save_favorite, save_last_run, AlwaysConfirm, Confirmation, JsonConfigStore,
    LineConfirmation, LopdfExtractor, OptionSource, PatternMode, ReportSink, RunOutcome,
    SearchOptions, SearchPlan, SearchRunner, SessionLog, DEFAULT_CONFIG_FILE,
};
use std::io;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const EXAMPLES: &str = "\
Examples:
  pdf-regex-search /path/to/pdfs \"confidential\" -i draft old --ignore-mode contains
    Search every PDF below /path/to/pdfs for \"confidential\", skipping files
    whose names contain \"draft\" or \"old\".

  pdf-regex-search /home/user/documents '\\d{3}-\\d{2}-\\d{4}' -I report --include-mode beginswith -v
    Search PDFs whose names begin with \"report\" for SSN-like numbers, with verbose output.";

#[derive(Parser)]
#[command(
    name = "pdf-regex-search",
    version,
    about = "Search for regex patterns in PDFs within a folder and its subfolders.",
    after_help = EXAMPLES
)]
struct Cli {
    /// Folder that contains PDFs recursively.
    folder_path: Option<PathBuf>,

    /// Regex pattern to search for in page text.
    regex_pattern: Option<String>,

    /// Patterns a filename must match to be searched.
    #[arg(short = 'I', long, num_args = 1..)]
    include: Vec<String>,

    /// Patterns that exclude a filename from the search.
    #[arg(short = 'i', long, visible_alias = "exclude", num_args = 1..)]
    ignore: Vec<String>,

    /// Mode for include patterns [default: contains]
    #[arg(long, value_enum)]
    include_mode: Option<ModeArg>,

    /// Mode for ignore patterns [default: contains]
    #[arg(long, value_enum)]
    ignore_mode: Option<ModeArg>,

    /// Match the regex and filename patterns case-sensitively.
    #[arg(short = 'c', long, default_value_t = false)]
    case_sensitive: bool,

    /// Also report files without matches and files that could not be read.
    #[arg(short = 'v', long, default_value_t = false)]
    verbose: bool,

    /// Fill unset options from the previous run.
    #[arg(short = 'p', long, default_value_t = false, conflicts_with = "use_favorite")]
    use_previous: bool,

    /// Fill unset options from a saved favorite.
    #[arg(short = 'f', long, value_name = "NAME")]
    use_favorite: Option<String>,

    /// Save the effective options as a favorite.
    #[arg(short = 's', long, value_name = "NAME")]
    save_favorite: Option<String>,

    /// Start searching without asking for confirmation.
    #[arg(short = 'y', long, default_value_t = false)]
    yes: bool,

    /// JSON file holding the last run and favorites.
    #[arg(long, env = "PDF_REGEX_SEARCH_CONFIG", default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Directory for per-run session logs.
    #[arg(long, env = "PDF_REGEX_SEARCH_LOG_DIR", default_value = ".")]
    log_dir: PathBuf,
}

#[derive(Clone, Copy, ValueEnum)]
enum ModeArg {
    Contains,
    Beginswith,
    Regex,
}

impl From<ModeArg> for PatternMode {
    fn from(value: ModeArg) -> Self {
        match value {
            ModeArg::Contains => PatternMode::Contains,
            ModeArg::Beginswith => PatternMode::BeginsWith,
            ModeArg::Regex => PatternMode::Regex,
        }
    }
}

impl Cli {
    fn explicit_options(&self) -> SearchOptions {
        SearchOptions {
            folder_path: self.folder_path.clone(),
            regex_pattern: self.regex_pattern.clone(),
            include: self.include.clone(),
            ignore: self.ignore.clone(),
            include_mode: self.include_mode.map(PatternMode::from),
            ignore_mode: self.ignore_mode.map(PatternMode::from),
            case_sensitive: self.case_sensitive,
            verbose: self.verbose,
        }
    }

    fn option_source(&self) -> OptionSource {
        match (&self.use_favorite, self.use_previous) {
            (Some(name), _) => OptionSource::Favorite(name.clone()),
            (None, true) => OptionSource::Previous,
            (None, false) => OptionSource::Explicit,
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();
    let mut store = JsonConfigStore::new(&cli.config);
    let source = cli.option_source();

    let explicit = cli.explicit_options();
    if explicit.is_empty() && source == OptionSource::Explicit && cli.save_favorite.is_none() {
        Cli::command().print_help()?;
        return Ok(());
    }

    let options = resolve_options(&store, explicit, &source)?;

    if let Some(name) = &cli.save_favorite {
        save_favorite(&mut store, name, &options)?;
        println!("Saved current arguments as favorite '{name}'");
    }

    let request = options.clone().into_request()?;
    let started_at = Local::now();
    let (plan, log) = SearchPlan::prepare_with_log(request, &cli.log_dir, started_at)?;
    let log_path = log.path().to_path_buf();
    let mut sink = ReportSink::new(io::stdout(), log).with_log_path(&log_path);

    let summary = if cli.yes {
        execute(&plan, AlwaysConfirm, &mut sink)?
    } else {
        execute(&plan, LineConfirmation::stdio(), &mut sink)?
    };

    save_last_run(&mut store, &options)?;

    info!(
        outcome = ?summary.outcome,
        candidates = summary.total_candidates,
        matched = summary.matched_files,
        unreadable = summary.failed_files,
        log = %log_path.display(),
        elapsed_ms = (Local::now() - started_at).num_milliseconds(),
        "pdf-regex-search finished"
    );

    if summary.outcome == RunOutcome::CancelledByUser {
        info!("run cancelled at confirmation prompt");
    }

    Ok(())
}

fn execute<C: Confirmation>(
    plan: &SearchPlan,
    confirmation: C,
    sink: &mut ReportSink<io::Stdout, SessionLog>,
) -> anyhow::Result<pdf_regex_search_core::RunSummary> {
    let mut runner = SearchRunner::new(LopdfExtractor, confirmation);
    Ok(runner.execute(plan, sink)?)
}
