//! Integration tests for lang-sync
//!
//! These drive the public library API end to end: resource files on disk,
//! the synchronizer, and either a deterministic translator or the OpenAI
//! client pointed at a mock server.

use proptest::prelude::*;
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use tempfile::TempDir;
use wiremock::{
    matchers::{body_string_contains, header, method, path},
    Mock, MockServer, ResponseTemplate,
};

use lang_sync::config::Config;
use lang_sync::error::{ProviderError, SyncError};
use lang_sync::openai::{OpenAiTranslator, Translator};
use lang_sync::resources::{self, ResourceMapping, ResourcePaths};
use lang_sync::sync::{strip_wrapping_quotes, ResourceSynchronizer, SyncOptions};

// ==================== Test Helpers ====================

/// Echoes the quoted source string back, marked, and counts calls.
#[derive(Default)]
struct EchoTranslator {
    calls: AtomicUsize,
}

impl Translator for EchoTranslator {
    async fn translate(&self, prompt: &str) -> Result<String, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let source = prompt.lines().last().unwrap_or_default();
        let source = strip_wrapping_quotes(source);
        Ok(format!("\"«{}»\"", source))
    }
}

fn create_test_config(api_url: &str, lang_dir: PathBuf) -> Config {
    Config {
        openai_api_key: "test-openai-key".to_string(),
        openai_organization: "org-test".to_string(),
        openai_model: "gpt-4".to_string(),
        openai_api_url: api_url.to_string(),
        openai_temperature: 0.3,
        openai_max_tokens: 500,
        lang_dir,
        concurrency: 1,
    }
}

fn create_openai_response(content: &str) -> serde_json::Value {
    serde_json::json!({
        "id": "chatcmpl-123",
        "object": "chat.completion",
        "choices": [
            {
                "index": 0,
                "message": {"role": "assistant", "content": content},
                "finish_reason": "stop"
            }
        ]
    })
}

fn to_mapping(map: &BTreeMap<String, String>) -> ResourceMapping {
    map.iter().map(|(k, v)| (k.clone(), v.clone())).collect()
}

fn echo_synchronizer(dir: &TempDir) -> ResourceSynchronizer<EchoTranslator> {
    ResourceSynchronizer::new(
        ResourcePaths::new(dir.path()),
        EchoTranslator::default(),
        SyncOptions::default(),
    )
}

fn run<F: std::future::Future>(future: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
        .block_on(future)
}

// ==================== OpenAI End-to-End Tests ====================

#[tokio::test]
async fn test_sync_with_openai_translator() {
    let mock_server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("en.json"),
        r#"{"greeting": "Hello {name}", "farewell": "Goodbye"}"#,
    )
    .unwrap();
    fs::write(dir.path().join("fr.json"), r#"{"farewell": "Au revoir"}"#).unwrap();

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("Authorization", "Bearer test-openai-key"))
        .and(header("OpenAI-Organization", "org-test"))
        .and(body_string_contains("French"))
        .and(body_string_contains("Hello {name}"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(create_openai_response("\"Bonjour {name}\"")),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let url = format!("{}/v1/chat/completions", mock_server.uri());
    let config = create_test_config(&url, dir.path().to_path_buf());
    let synchronizer = ResourceSynchronizer::new(
        ResourcePaths::new(&config.lang_dir),
        OpenAiTranslator::new(reqwest::Client::new(), &config),
        SyncOptions::default(),
    );

    let report = synchronizer.sync("fr").await.expect("Should succeed");

    assert!(report.written);
    assert_eq!(report.missing_keys, vec!["greeting"]);
    let written = resources::load(&dir.path().join("fr.json")).unwrap();
    assert_eq!(written["farewell"], "Au revoir");
    assert_eq!(written["greeting"], "Bonjour {name}");
}

#[tokio::test]
async fn test_sync_with_openai_server_error_leaves_target() {
    let mock_server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("en.json"), r#"{"a": "A", "b": "B"}"#).unwrap();
    fs::write(dir.path().join("es.json"), r#"{"a": "Á"}"#).unwrap();

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(503).set_body_string("Service Unavailable"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let url = format!("{}/v1/chat/completions", mock_server.uri());
    let config = create_test_config(&url, dir.path().to_path_buf());
    let synchronizer = ResourceSynchronizer::new(
        ResourcePaths::new(&config.lang_dir),
        OpenAiTranslator::new(reqwest::Client::new(), &config),
        SyncOptions::default(),
    );

    let err = synchronizer.sync("es").await.unwrap_err();

    assert!(matches!(
        err,
        SyncError::Provider(ProviderError::Status { .. })
    ));
    assert_eq!(
        fs::read_to_string(dir.path().join("es.json")).unwrap(),
        r#"{"a": "Á"}"#
    );
}

// ==================== Workflow Tests ====================

#[tokio::test]
async fn test_sync_every_target_language() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("en.json"), r#"{"ok": "OK"}"#).unwrap();

    let synchronizer = echo_synchronizer(&dir);
    for language in lang_sync::i18n::LanguageRegistry::get().list_targets() {
        let report = synchronizer.sync(language.code).await.expect("Should succeed");
        assert!(report.written);
        assert!(dir.path().join(format!("{}.json", language.code)).exists());
    }

    assert_eq!(synchronizer.translator().calls.load(Ordering::SeqCst), 5);
    assert!(!dir.path().join("xx.json").exists());
}

#[tokio::test]
async fn test_base_file_is_never_modified() {
    let dir = TempDir::new().unwrap();
    let base = "{\"b\": \"B\",\n\"a\": \"A\"}";
    fs::write(dir.path().join("en.json"), base).unwrap();

    echo_synchronizer(&dir).sync("nl").await.expect("Should succeed");

    assert_eq!(fs::read_to_string(dir.path().join("en.json")).unwrap(), base);
}

#[tokio::test]
async fn test_non_ascii_round_trip() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("en.json"),
        r#"{"snow": "Snow ☃", "tab": "a\tb", "quote": "Say \"hi\""}"#,
    )
    .unwrap();

    echo_synchronizer(&dir).sync("ja").await.expect("Should succeed");

    let content = fs::read_to_string(dir.path().join("ja.json")).unwrap();
    assert!(content.contains("«Snow ☃»"));
    assert!(!content.contains("\\u"));

    let loaded = resources::load(&dir.path().join("ja.json")).unwrap();
    assert_eq!(loaded["tab"], "«a\tb»");
    assert_eq!(loaded["quote"], "«Say \"hi\"»");
}

// ==================== Property Tests ====================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_sync_fills_exactly_missing_keys(
        base in prop::collection::btree_map("[a-z]{1,8}", "[ -~]{0,16}", 0..12),
        keep in prop::collection::vec(any::<bool>(), 12),
        existing_value in "[ -~]{0,8}",
    ) {
        let dir = TempDir::new().unwrap();
        let target: BTreeMap<String, String> = base
            .keys()
            .zip(&keep)
            .filter(|(_, keep)| **keep)
            .map(|(k, _)| (k.clone(), existing_value.clone()))
            .collect();

        resources::save(&dir.path().join("en.json"), &to_mapping(&base)).unwrap();
        resources::save(&dir.path().join("de.json"), &to_mapping(&target)).unwrap();

        let synchronizer = echo_synchronizer(&dir);
        let report = run(synchronizer.sync("de")).unwrap();
        let result = resources::load(&dir.path().join("de.json")).unwrap();

        // keys(result) == keys(base)
        let mut result_keys: Vec<_> = result.keys().cloned().collect();
        result_keys.sort();
        let base_keys: Vec<_> = base.keys().cloned().collect();
        prop_assert_eq!(result_keys, base_keys);

        // Pre-existing values unchanged
        for (key, value) in &target {
            prop_assert_eq!(&result[key], value);
        }

        // One request per missing key, none for present keys
        let missing = base.len() - target.len();
        prop_assert_eq!(report.missing_keys.len(), missing);
        prop_assert_eq!(synchronizer.translator().calls.load(Ordering::SeqCst), missing);
        prop_assert_eq!(report.written, missing > 0);

        // Idempotent: second run does nothing
        let again = run(synchronizer.sync("de")).unwrap();
        prop_assert!(!again.written);
        prop_assert_eq!(synchronizer.translator().calls.load(Ordering::SeqCst), missing);
    }

    #[test]
    fn prop_save_load_round_trip(
        map in prop::collection::btree_map("\\PC{1,8}", "\\PC{0,24}", 0..10),
    ) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("fr.json");
        let mapping = to_mapping(&map);

        resources::save(&path, &mapping).unwrap();
        prop_assert_eq!(resources::load(&path).unwrap(), mapping);
    }

    #[test]
    fn prop_strip_wrapping_quotes_keeps_interior(inner in "\\PC{0,32}") {
        let quoted = format!("\"{}\"", inner);
        prop_assert_eq!(strip_wrapping_quotes(&quoted), inner.as_str());
    }
}
