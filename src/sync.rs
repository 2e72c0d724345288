//! Synchronization of one target-language resource file against the base
//! (source-language) file.
//!
//! A run validates the language, loads both mappings, translates every key
//! the target is missing and writes the target back once, at the end, only
//! if something was added.

use crate::error::{ProviderError, SyncError};
use crate::i18n::{Language, TranslationValidator};
use crate::openai::Translator;
use crate::resources::{self, ResourceMapping, ResourcePaths};
use futures::stream::{self, StreamExt, TryStreamExt};
use tracing::{debug, info, warn};

/// Knobs for a synchronization run.
///
/// The default is one request at a time with writes enabled.
#[derive(Debug, Clone)]
pub struct SyncOptions {
    /// Maximum number of translation requests in flight.
    pub concurrency: usize,
    /// Report missing keys without translating or writing anything.
    pub dry_run: bool,
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self {
            concurrency: 1,
            dry_run: false,
        }
    }
}

/// Outcome of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncReport {
    pub language: Language,
    /// Keys the target lacked when the run started, in base-file order.
    ///
    /// They were added to the file only when `written` is true. On a dry
    /// run they are reported but not added.
    pub missing_keys: Vec<String>,
    /// Whether the target file was written.
    pub written: bool,
    /// Number of advisory validation findings across all translations.
    pub warnings: usize,
}

/// Fills the keys one target-language file is missing, using a
/// [`Translator`] for the values.
///
/// The synchronizer owns its translator and resource layout, so a test can
/// build one with a fake translator and a temporary directory.
pub struct ResourceSynchronizer<T> {
    paths: ResourcePaths,
    translator: T,
    options: SyncOptions,
}

impl<T: Translator> ResourceSynchronizer<T> {
    pub fn new(paths: ResourcePaths, translator: T, options: SyncOptions) -> Self {
        Self {
            paths,
            translator,
            options,
        }
    }

    pub fn translator(&self) -> &T {
        &self.translator
    }

    /// Bring the resource file for `language_code` up to date with the base
    /// file.
    ///
    /// # Returns
    /// A `SyncReport` on success. On any error the target file is left as it
    /// was.
    pub async fn sync(&self, language_code: &str) -> Result<SyncReport, SyncError> {
        // Validate before touching the filesystem or the network
        let language = Language::target_from_code(language_code)?;

        let base_path = self.paths.base();
        let base = resources::load(&base_path).map_err(|source| {
            SyncError::MissingBaseResource {
                path: base_path.clone(),
                source,
            }
        })?;

        let target_path = self.paths.for_language(language);
        let mut target = resources::load_or_empty(&target_path).map_err(|source| {
            SyncError::MalformedTargetResource {
                path: target_path.clone(),
                source,
            }
        })?;

        let missing = missing_keys(&base, &target);
        let mut report = SyncReport {
            language,
            missing_keys: missing.iter().map(|(key, _)| key.to_string()).collect(),
            written: false,
            warnings: 0,
        };

        if missing.is_empty() {
            info!("{} is up to date ({} keys)", language, target.len());
            return Ok(report);
        }

        info!(
            "{} is missing {} of {} keys",
            language,
            missing.len(),
            base.len()
        );

        if self.options.dry_run {
            for (key, _) in &missing {
                info!("Would translate '{}'", key);
            }
            return Ok(report);
        }

        let translations = self.translate_all(language, &missing).await?;

        for ((key, source), translated) in missing.iter().zip(translations) {
            let validation = TranslationValidator::validate(source, &translated);
            if !validation.is_clean() {
                warn!(
                    "Translation validation warnings for '{}' in {}: {:?}",
                    key, language, validation.warnings
                );
                report.warnings += validation.warnings.len();
            }
            target.insert(key.to_string(), translated);
        }

        resources::save(&target_path, &target).map_err(|source| SyncError::Persist {
            path: target_path.clone(),
            source,
        })?;
        report.written = true;

        info!(
            "Wrote {} new keys to {}",
            missing.len(),
            target_path.display()
        );
        Ok(report)
    }

    /// Translate every missing value, returning results in input order.
    ///
    /// Stops at the first failure; nothing is returned for a partial run.
    async fn translate_all(
        &self,
        language: Language,
        missing: &[(&str, &str)],
    ) -> Result<Vec<String>, ProviderError> {
        stream::iter(missing.iter().map(|&(key, value)| async move {
            debug!("Translating '{}' to {}", key, language.name());
            let response = self
                .translator
                .translate(&build_prompt(language, value))
                .await?;
            Ok::<_, ProviderError>(strip_wrapping_quotes(&response).to_string())
        }))
        .buffered(self.options.concurrency.max(1))
        .try_collect()
        .await
    }
}

/// Keys present in `base` but absent from `target`, with their base values,
/// in base-file order.
pub fn missing_keys<'a>(
    base: &'a ResourceMapping,
    target: &ResourceMapping,
) -> Vec<(&'a str, &'a str)> {
    base.iter()
        .filter(|(key, _)| !target.contains_key(key.as_str()))
        .map(|(key, value)| (key.as_str(), value.as_str()))
        .collect()
}

/// Build the translation prompt for one source string.
pub fn build_prompt(language: Language, text: &str) -> String {
    format!(
        "You are an i18n-compatible translation service. Translate the English string on the next line to {}. Maintain whitespace. Do not modify or translate interpolated variables in any way.\n\"{}\"",
        language.name(),
        text
    )
}

/// Remove one leading and one trailing `"` if present.
///
/// The prompt wraps the source in quotes and the model usually echoes them.
/// Nothing else is trimmed.
pub fn strip_wrapping_quotes(text: &str) -> &str {
    let text = text.strip_prefix('"').unwrap_or(text);
    text.strip_suffix('"').unwrap_or(text)
}
