//! Language type: validated language representation.

use crate::error::SyncError;
use crate::i18n::{LanguageConfig, LanguageRegistry};

/// A language that has been validated against the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Language {
    /// Language code (e.g., "en", "es")
    code: &'static str,
}

impl Language {
    pub const SPANISH: Language = Language { code: "es" };

    /// Create a synchronization target from a language code.
    ///
    /// Only registered, non-source languages are accepted. Anything else is
    /// reported as `SyncError::UnsupportedLanguage`.
    pub fn target_from_code(code: &str) -> Result<Language, SyncError> {
        let registry = LanguageRegistry::get();
        match registry.get_by_code(code) {
            Some(config) if registry.is_target(code) => Ok(Language { code: config.code }),
            _ => Err(SyncError::UnsupportedLanguage(code.to_string())),
        }
    }

    /// Get the source language every resource is translated from.
    pub fn source() -> Language {
        Language {
            code: LanguageRegistry::get().source().code,
        }
    }

    pub fn code(&self) -> &'static str {
        self.code
    }

    /// Get the full language configuration from the registry.
    ///
    /// # Panics
    /// Panics if the code is not registered, which cannot happen for values
    /// built through `target_from_code`, `source` or the constants.
    pub fn config(&self) -> &'static LanguageConfig {
        LanguageRegistry::get()
            .get_by_code(self.code)
            .expect("Language code should always be valid")
    }

    /// English name of the language (e.g., "Spanish").
    pub fn name(&self) -> &'static str {
        self.config().name
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name(), self.code)
    }
}
