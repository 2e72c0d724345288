//! Language registry: Single source of truth for all supported languages.
//!
//! Adding a language means adding a row to `default_languages`. Nothing else
//! branches on specific codes.

use std::sync::OnceLock;

/// Configuration for a supported language.
#[derive(Debug, Clone)]
pub struct LanguageConfig {
    /// Language code, also the resource file stem (e.g., "es" for `es.json`)
    pub code: &'static str,

    /// English name of the language, used in translation prompts
    pub name: &'static str,

    /// Whether this is the source-of-truth language (only one should be true)
    pub is_source: bool,
}

/// Global language registry singleton.
pub struct LanguageRegistry {
    languages: Vec<LanguageConfig>,
}

/// Global registry instance (initialized lazily)
static REGISTRY: OnceLock<LanguageRegistry> = OnceLock::new();

impl LanguageRegistry {
    /// Get the global language registry instance.
    pub fn get() -> &'static LanguageRegistry {
        REGISTRY.get_or_init(|| LanguageRegistry {
            languages: default_languages(),
        })
    }

    /// Get a language configuration by its code.
    pub fn get_by_code(&self, code: &str) -> Option<&LanguageConfig> {
        self.languages.iter().find(|lang| lang.code == code)
    }

    /// Get every language that can be synchronized (all but the source).
    pub fn list_targets(&self) -> Vec<&LanguageConfig> {
        self.languages.iter().filter(|lang| !lang.is_source).collect()
    }

    /// Get the source language configuration.
    ///
    /// # Panics
    /// Panics if the table does not define exactly one source language. The
    /// table is a compile-time constant, so this is a programming error.
    pub fn source(&self) -> &LanguageConfig {
        let sources: Vec<_> = self
            .languages
            .iter()
            .filter(|lang| lang.is_source)
            .collect();

        match sources.len() {
            0 => panic!("No source language found in registry"),
            1 => sources[0],
            _ => panic!("Multiple source languages found in registry"),
        }
    }

    /// Check whether a code names a language that can be synchronized.
    pub fn is_target(&self, code: &str) -> bool {
        self.get_by_code(code)
            .map(|lang| !lang.is_source)
            .unwrap_or(false)
    }
}

fn default_languages() -> Vec<LanguageConfig> {
    vec![
        LanguageConfig {
            code: "en",
            name: "English",
            is_source: true,
        },
        LanguageConfig {
            code: "es",
            name: "Spanish",
            is_source: false,
        },
        LanguageConfig {
            code: "de",
            name: "German",
            is_source: false,
        },
        LanguageConfig {
            code: "fr",
            name: "French",
            is_source: false,
        },
        LanguageConfig {
            code: "ja",
            name: "Japanese",
            is_source: false,
        },
        LanguageConfig {
            code: "nl",
            name: "Dutch",
            is_source: false,
        },
    ]
}
