use crate::{ConfigError, StoredConfig};
use std::io;

/// Asks the user a yes/no question before a run processes any file.
pub trait Confirmation {
    fn confirm(&mut self, prompt: &str) -> io::Result<bool>;
}

impl<C: Confirmation + ?Sized> Confirmation for Box<C> {
    fn confirm(&mut self, prompt: &str) -> io::Result<bool> {
        (**self).confirm(prompt)
    }
}

/// Storage for the last-run options and named favorites.
pub trait ConfigRepository {
    fn load(&self) -> Result<StoredConfig, ConfigError>;

    fn save(&mut self, config: &StoredConfig) -> Result<(), ConfigError>;
}
