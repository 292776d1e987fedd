//! End-to-end tests: prompt → mocked Gemini → cleanup → .docx on disk.

use std::path::Path;

use lexidraft::docx::read_paragraphs_from_path;
use lexidraft::{
    FeatureDispatcher, FeatureKind, FeatureOutput, LexidraftConfig, PromptRequest, Result,
    FAILURE_MESSAGE,
};
use pretty_assertions::assert_eq;
use tempfile::tempdir;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const GENERATE_PATH: &str = "/v1beta/models/gemini-2.0-flash:generateContent";

fn gemini_response(text: &str) -> serde_json::Value {
    serde_json::json!({
        "candidates": [{ "content": { "parts": [{ "text": text }], "role": "model" } }]
    })
}

fn prompt_body(prompt: &str) -> serde_json::Value {
    serde_json::json!({ "contents": [{ "parts": [{ "text": prompt }] }] })
}

async fn run(config: LexidraftConfig, request: PromptRequest) -> Result<FeatureOutput> {
    tokio::task::spawn_blocking(move || {
        FeatureDispatcher::from_config(&config)?.run_request(&request)
    })
    .await
    .expect("blocking task should not panic")
}

fn config(server: &MockServer, output_dir: &Path) -> LexidraftConfig {
    LexidraftConfig::builder("test-key")
        .api_base_url(server.uri())
        .output_dir(output_dir)
        .build()
}

#[tokio::test]
async fn test_draft_affidavit_e2e() {
    let server = MockServer::start().await;
    let dir = tempdir().unwrap();

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .and(body_json(prompt_body(
            "Draft a Affidavit based on the following facts:\n\nX witnessed Y",
        )))
        .respond_with(ResponseTemplate::new(200).set_body_json(gemini_response(
            "**Affidavit of Fact**\n\nI, X... This is not legal advice.",
        )))
        .expect(1)
        .mount(&server)
        .await;

    let output = run(
        config(&server, dir.path()),
        PromptRequest::draft("Affidavit", "X witnessed Y"),
    )
    .await
    .unwrap();

    assert_eq!(output.text, "Affidavit of Fact\n\nI, X...");
    assert_eq!(output.path, dir.path().join("generated_draft.docx"));
    assert!(output.success);
    assert_eq!(
        read_paragraphs_from_path(&output.path).unwrap(),
        vec!["Affidavit of Fact\n\nI, X..."]
    );
}

#[tokio::test]
async fn test_case_brief_strips_catalogue() {
    let server = MockServer::start().await;
    let dir = tempdir().unwrap();

    let reply = "Okay, let's provide a legal opinion on this.\n\n\
                 **Issue:** Whether the contract was void.\n\n\n\n\
                 **Rule:** Section 12 of the Act.\n\
                 Disclaimer: I am an AI.\n\
                 Please consult a licensed attorney for advice.";

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(gemini_response(reply)))
        .mount(&server)
        .await;

    let output = run(
        config(&server, dir.path()),
        PromptRequest::case_brief("The respondent sued for breach..."),
    )
    .await
    .unwrap();

    assert_eq!(
        output.text,
        "Issue: Whether the contract was void.\n\nRule: Section 12 of the Act."
    );
    assert_eq!(output.path.file_name().unwrap(), "case_brief.docx");
}

#[tokio::test]
async fn test_upstream_failure_is_displayed_and_exported() {
    let server = MockServer::start().await;
    let dir = tempdir().unwrap();

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(429).set_body_string("quota exceeded"))
        .mount(&server)
        .await;

    let output = run(
        config(&server, dir.path()),
        PromptRequest::statute_citation("Tenancy dispute"),
    )
    .await
    .unwrap();

    assert!(!output.success);
    assert_eq!(output.text, FAILURE_MESSAGE);
    assert_eq!(
        read_paragraphs_from_path(&dir.path().join("statute_draft.docx")).unwrap(),
        vec![FAILURE_MESSAGE]
    );
}

#[tokio::test]
async fn test_strict_mode_surfaces_upstream_failure() {
    let server = MockServer::start().await;
    let dir = tempdir().unwrap();

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(429).set_body_string("quota exceeded"))
        .mount(&server)
        .await;

    let mut config = config(&server, dir.path());
    config.strict_errors = true;

    let err = run(config, PromptRequest::citation_format("A v B"))
        .await
        .unwrap_err();

    assert!(err.is_completion_failure());
    assert!(!dir.path().join("citation_result.docx").exists());
}

#[tokio::test]
async fn test_citation_prompt_uses_configured_style() {
    let server = MockServer::start().await;
    let dir = tempdir().unwrap();

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .and(body_json(prompt_body(
            "Generate the proper Ghanaian legal citation for: Tsatsu v Republic\nFormat it in GLR style.",
        )))
        .respond_with(ResponseTemplate::new(200).set_body_json(gemini_response("[2001-2002] 2 GLR 1")))
        .expect(1)
        .mount(&server)
        .await;

    let config = LexidraftConfig::builder("test-key")
        .api_base_url(server.uri())
        .output_dir(dir.path())
        .jurisdiction("Ghanaian")
        .citation_style("GLR")
        .build();

    let output = run(config, PromptRequest::citation_format("Tsatsu v Republic"))
        .await
        .unwrap();

    assert_eq!(output.kind, FeatureKind::CitationFormat);
    assert_eq!(output.text, "[2001-2002] 2 GLR 1");
}
