//! Translation quality validation module.
//!
//! The prompt asks the provider to keep whitespace and interpolated
//! variables intact. Nothing enforces that, so this module checks the
//! result afterwards and reports what it finds. Findings are advisory:
//! callers log them and keep the translation.

use regex::Regex;
use std::sync::OnceLock;

/// Validation report containing warnings about a translation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub warnings: Vec<String>,
}

impl ValidationReport {
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}

/// Validator for translation quality.
pub struct TranslationValidator;

// Matches `{{ name }}`, `{name}` and `:name` style placeholders
static PLACEHOLDER_REGEX: OnceLock<Regex> = OnceLock::new();

impl TranslationValidator {
    /// Validate that a translation preserves placeholders and surrounding
    /// whitespace of the original string.
    pub fn validate(original: &str, translated: &str) -> ValidationReport {
        let mut report = ValidationReport::default();

        let orig_placeholders = Self::extract_placeholders(original);
        let trans_placeholders = Self::extract_placeholders(translated);
        if orig_placeholders != trans_placeholders {
            report.warnings.push(format!(
                "Placeholder mismatch: original has {:?}, translation has {:?}",
                orig_placeholders, trans_placeholders
            ));
        }

        if leading_whitespace(original) != leading_whitespace(translated) {
            report.warnings.push(format!(
                "Leading whitespace changed: {:?} -> {:?}",
                leading_whitespace(original),
                leading_whitespace(translated)
            ));
        }

        if trailing_whitespace(original) != trailing_whitespace(translated) {
            report.warnings.push(format!(
                "Trailing whitespace changed: {:?} -> {:?}",
                trailing_whitespace(original),
                trailing_whitespace(translated)
            ));
        }

        report
    }

    /// Extract placeholders, sorted so reordering during translation is not
    /// reported.
    fn extract_placeholders(text: &str) -> Vec<String> {
        let regex = PLACEHOLDER_REGEX.get_or_init(|| {
            Regex::new(r"\{\{\s*[\w.]+\s*\}\}|\{[\w.]+\}|:[A-Za-z_]\w*").unwrap()
        });

        let mut placeholders: Vec<String> = regex
            .find_iter(text)
            .map(|m| m.as_str().to_string())
            .collect();
        placeholders.sort();
        placeholders
    }
}

fn leading_whitespace(text: &str) -> &str {
    &text[..text.len() - text.trim_start().len()]
}

fn trailing_whitespace(text: &str) -> &str {
    &text[text.trim_end().len()..]
}
