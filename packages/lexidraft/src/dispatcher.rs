//! One entry point for all five actions: prompt, complete, clean, export.

use std::path::PathBuf;

use serde::Serialize;

use crate::completion::{CompletionClient, CompletionResult, GeminiClient};
use crate::config::LexidraftConfig;
use crate::error::Result;
use crate::export::DocumentExporter;
use crate::feature::FeatureKind;
use crate::prompt::{Field, PromptBuilder, PromptRequest};
use crate::sanitize::clean;

/// What one action produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeatureOutput {
    pub kind: FeatureKind,
    /// Prompt sent upstream.
    pub prompt: String,
    /// Sanitized text shown to the user and written to the document.
    pub text: String,
    /// Exported document.
    pub path: PathBuf,
    /// Whether the completion succeeded. In compatibility mode a failure still
    /// produces `text` (the failure message) and a document.
    pub success: bool,
}

impl FeatureOutput {
    /// The `(displayText, filePath)` pair the adapters render.
    #[must_use]
    pub fn into_pair(self) -> (String, PathBuf) {
        (self.text, self.path)
    }
}

/// Runs feature actions against a completion backend.
pub struct FeatureDispatcher<C: CompletionClient> {
    prompts: PromptBuilder,
    client: C,
    exporter: DocumentExporter,
    strict_errors: bool,
}

impl FeatureDispatcher<GeminiClient> {
    /// Build a dispatcher backed by Gemini from configuration.
    pub fn from_config(config: &LexidraftConfig) -> Result<Self> {
        let client = GeminiClient::new(config)?;
        Self::with_client(config, client)
    }
}

impl<C: CompletionClient> FeatureDispatcher<C> {
    pub fn new(prompts: PromptBuilder, client: C, exporter: DocumentExporter) -> Self {
        Self {
            prompts,
            client,
            exporter,
            strict_errors: false,
        }
    }

    /// Build a dispatcher from configuration with a caller-supplied client.
    pub fn with_client(config: &LexidraftConfig, client: C) -> Result<Self> {
        let prompts = PromptBuilder::new(&config.jurisdiction, &config.citation_style);
        let exporter = DocumentExporter::new(&config.output_dir)?;
        Ok(Self::new(prompts, client, exporter).strict_errors(config.strict_errors))
    }

    /// Return typed completion errors instead of exporting the failure message.
    #[must_use]
    pub fn strict_errors(mut self, strict_errors: bool) -> Self {
        self.strict_errors = strict_errors;
        self
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub fn exporter(&self) -> &DocumentExporter {
        &self.exporter
    }

    /// Run one action.
    ///
    /// In compatibility mode only export can fail; a completion failure is
    /// carried through as ordinary text.
    #[tracing::instrument(skip(self, inputs), fields(feature = %kind))]
    pub fn run(&self, kind: FeatureKind, inputs: &[Field]) -> Result<FeatureOutput> {
        let prompt = self.prompts.build(kind, inputs);

        let completion = if self.strict_errors {
            CompletionResult::success(self.client.try_complete(&prompt)?)
        } else {
            self.client.complete(&prompt)
        };
        if !completion.success {
            tracing::warn!("completion unavailable, exporting failure message as the draft");
        }

        let text = clean(&completion.text);
        let path = self.exporter.export(&text, kind.export_filename())?;
        tracing::info!(path = %path.display(), success = completion.success, "feature completed");

        Ok(FeatureOutput {
            kind,
            prompt,
            text,
            path,
            success: completion.success,
        })
    }

    /// Run a prepared request.
    pub fn run_request(&self, request: &PromptRequest) -> Result<FeatureOutput> {
        self.run(request.kind, &request.fields)
    }
}
