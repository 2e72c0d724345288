//! Loading and saving of per-language JSON resource files.
//!
//! A resource file is a flat JSON object mapping string keys to string
//! values. Key order is kept across a load/save cycle so diffs of the
//! generated files stay readable.

use crate::error::ResourceError;
use crate::i18n::Language;
use indexmap::IndexMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// One language's set of localized strings.
pub type ResourceMapping = IndexMap<String, String>;

/// Layout of the resource directory: `<lang_dir>/<code>.json`.
#[derive(Debug, Clone)]
pub struct ResourcePaths {
    lang_dir: PathBuf,
}

impl ResourcePaths {
    pub fn new(lang_dir: impl Into<PathBuf>) -> Self {
        Self {
            lang_dir: lang_dir.into(),
        }
    }

    /// Path of the resource file for a language.
    pub fn for_language(&self, language: Language) -> PathBuf {
        self.lang_dir.join(format!("{}.json", language.code()))
    }

    /// Path of the source-of-truth resource file.
    pub fn base(&self) -> PathBuf {
        self.for_language(Language::source())
    }
}

/// Read and parse a resource file.
pub fn load(path: &Path) -> Result<ResourceMapping, ResourceError> {
    let content = fs::read_to_string(path)?;
    let mapping = serde_json::from_str(&content)?;
    Ok(mapping)
}

/// Read a resource file, or return an empty mapping if it does not exist.
///
/// A file that exists but cannot be read or parsed is an error: treating it
/// as empty would overwrite whatever translations it holds.
pub fn load_or_empty(path: &Path) -> Result<ResourceMapping, ResourceError> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(serde_json::from_str(&content)?),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(ResourceMapping::new()),
        Err(e) => Err(e.into()),
    }
}

/// Render a mapping as pretty-printed JSON (2-space indent, non-ASCII kept
/// literal) with a trailing newline.
///
/// # Returns
/// The rendered document, or the serializer error. Nothing is substituted on
/// failure, so a caller never writes an empty file.
pub fn to_json(mapping: &ResourceMapping) -> serde_json::Result<String> {
    let mut json = serde_json::to_string_pretty(mapping)?;
    json.push('\n');
    Ok(json)
}

/// Write a mapping to `path`, replacing the file atomically.
///
/// The content goes to a sibling temporary file first and is then renamed
/// over the destination, so readers only ever see the old or the new file.
/// Serialization happens before any file is created, so a failure leaves
/// the destination untouched.
pub fn save(path: &Path, mapping: &ResourceMapping) -> io::Result<()> {
    let json = to_json(mapping)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let tmp_path = temp_path_for(path);
    let result = (|| {
        let mut file = fs::File::create(&tmp_path)?;
        file.write_all(json.as_bytes())?;
        file.sync_all()?;
        fs::rename(&tmp_path, path)
    })();

    if result.is_err() {
        let _ = fs::remove_file(&tmp_path);
    }
    result
}

fn temp_path_for(path: &Path) -> PathBuf {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!(".{}.tmp", file_name))
}
