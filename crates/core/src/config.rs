use crate::traits::ConfigRepository;
use crate::{ConfigError, PatternMode, SearchError, SearchRequest};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const DEFAULT_CONFIG_FILE: &str = "pdf_search_config.json";

/// Search options as given on the command line or stored in the config file.
///
/// Every field is optional so that explicit and stored sets can be merged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub folder_path: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub regex_pattern: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub include: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ignore: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_mode: Option<PatternMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ignore_mode: Option<PatternMode>,
    pub case_sensitive: bool,
    pub verbose: bool,
}

impl SearchOptions {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn into_request(self) -> Result<SearchRequest, SearchError> {
        let folder = self
            .folder_path
            .ok_or(SearchError::MissingArgument("folder_path"))?;
        let pattern = self
            .regex_pattern
            .ok_or(SearchError::MissingArgument("regex_pattern"))?;

        Ok(SearchRequest {
            folder,
            pattern,
            include: self.include,
            exclude: self.ignore,
            include_mode: self.include_mode.unwrap_or_default(),
            exclude_mode: self.ignore_mode.unwrap_or_default(),
            case_sensitive: self.case_sensitive,
            verbose: self.verbose,
        })
    }
}

/// Field-by-field merge: values set in `explicit` win, unset ones come from `fallback`.
pub fn merge(explicit: SearchOptions, fallback: SearchOptions) -> SearchOptions {
    fn list(explicit: Vec<String>, fallback: Vec<String>) -> Vec<String> {
        if explicit.is_empty() {
            fallback
        } else {
            explicit
        }
    }

    SearchOptions {
        folder_path: explicit.folder_path.or(fallback.folder_path),
        regex_pattern: explicit.regex_pattern.or(fallback.regex_pattern),
        include: list(explicit.include, fallback.include),
        ignore: list(explicit.ignore, fallback.ignore),
        include_mode: explicit.include_mode.or(fallback.include_mode),
        ignore_mode: explicit.ignore_mode.or(fallback.ignore_mode),
        case_sensitive: explicit.case_sensitive || fallback.case_sensitive,
        verbose: explicit.verbose || fallback.verbose,
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoredConfig {
    pub last_args: SearchOptions,
    pub favorites: BTreeMap<String, SearchOptions>,
}

/// Where stored options used to prefill the explicit ones come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionSource {
    Explicit,
    Previous,
    Favorite(String),
}

pub fn resolve_options<R: ConfigRepository + ?Sized>(
    repository: &R,
    explicit: SearchOptions,
    source: &OptionSource,
) -> Result<SearchOptions, ConfigError> {
    let fallback = match source {
        OptionSource::Explicit => return Ok(explicit),
        OptionSource::Previous => repository.load()?.last_args,
        OptionSource::Favorite(name) => repository
            .load()?
            .favorites
            .remove(name)
            .ok_or_else(|| ConfigError::UnknownFavorite(name.clone()))?,
    };

    Ok(merge(explicit, fallback))
}

pub fn save_last_run<R: ConfigRepository + ?Sized>(
    repository: &mut R,
    options: &SearchOptions,
) -> Result<(), ConfigError> {
    let mut config = repository.load()?;
    config.last_args = options.clone();
    repository.save(&config)
}

pub fn save_favorite<R: ConfigRepository + ?Sized>(
    repository: &mut R,
    name: &str,
    options: &SearchOptions,
) -> Result<(), ConfigError> {
    let mut config = repository.load()?;
    config.favorites.insert(name.to_string(), options.clone());
    repository.save(&config)
}

/// Pretty-printed JSON file. A missing file loads as an empty config.
#[derive(Debug, Clone)]
pub struct JsonConfigStore {
    path: PathBuf,
}

impl JsonConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ConfigRepository for JsonConfigStore {
    fn load(&self) -> Result<StoredConfig, ConfigError> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "no config file yet");
            return Ok(StoredConfig::default());
        }

        let raw = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    fn save(&mut self, config: &StoredConfig) -> Result<(), ConfigError> {
        let raw = serde_json::to_string_pretty(config)?;
        fs::write(&self.path, raw)?;
        debug!(path = %self.path.display(), "config saved");
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryConfigStore {
    pub config: StoredConfig,
}

impl ConfigRepository for MemoryConfigStore {
    fn load(&self) -> Result<StoredConfig, ConfigError> {
        Ok(self.config.clone())
    }

    fn save(&mut self, config: &StoredConfig) -> Result<(), ConfigError> {
        self.config = config.clone();
        Ok(())
    }
}
