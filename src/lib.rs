//! Keep localized JSON resource files in sync with the English source file
//! by translating missing keys through the OpenAI API.

pub mod config;
pub mod error;
pub mod i18n;
pub mod openai;
pub mod resources;
pub mod sync;
