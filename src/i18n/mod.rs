//! Internationalization (i18n) module.
//!
//! # Architecture
//!
//! - `registry`: Single source of truth for all supported languages
//! - `language`: Type-safe Language handle validated against the registry
//! - `validator`: Advisory checks on translated strings
//!
//! # Example
//!
//! ```rust,ignore
//! use lang_sync::i18n::{Language, LanguageRegistry};
//!
//! let source = Language::source();
//! let spanish = Language::target_from_code("es")?;
//! let targets = LanguageRegistry::get().list_targets();
//! ```

mod language;
mod registry;
mod validator;

pub use language::Language;
pub use registry::{LanguageConfig, LanguageRegistry};
pub use validator::{TranslationValidator, ValidationReport};
