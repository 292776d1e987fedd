//! Runtime configuration.
//!
//! Everything that used to be process-wide state (API key, endpoint, output
//! directory) is carried here and handed to constructors explicitly.

use std::path::PathBuf;

use crate::error::{LexidraftError, Result};
use crate::prompt::{DEFAULT_CITATION_STYLE, DEFAULT_JURISDICTION};

/// Default base URL of the Gemini API.
pub const DEFAULT_API_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Default Gemini model.
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

/// Default directory for exported documents.
pub const DEFAULT_OUTPUT_DIR: &str = "outputs";

/// Configuration for LexiDraft.
///
/// NOTE: `Debug` is implemented by hand so the API key is never printed.
#[derive(Clone)]
pub struct LexidraftConfig {
    pub api_key: String,
    pub api_base_url: String,
    pub model: String,
    /// Request timeout. `None` waits as long as the transport allows.
    pub timeout_secs: Option<u64>,
    pub output_dir: PathBuf,
    pub jurisdiction: String,
    pub citation_style: String,
    /// Return typed completion errors instead of exporting the failure sentinel.
    pub strict_errors: bool,
}

impl std::fmt::Debug for LexidraftConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LexidraftConfig")
            .field("api_key", &"<redacted>")
            .field("api_base_url", &self.api_base_url)
            .field("model", &self.model)
            .field("timeout_secs", &self.timeout_secs)
            .field("output_dir", &self.output_dir)
            .field("jurisdiction", &self.jurisdiction)
            .field("citation_style", &self.citation_style)
            .field("strict_errors", &self.strict_errors)
            .finish()
    }
}

impl LexidraftConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup("GEMINI_API_KEY")
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| LexidraftError::Config("GEMINI_API_KEY not set".into()))?;

        let api_base_url =
            lookup("GEMINI_API_BASE_URL").unwrap_or_else(|| DEFAULT_API_BASE_URL.into());

        let model = lookup("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.into());

        let timeout_secs = match lookup("LEXIDRAFT_TIMEOUT_SECS") {
            Some(v) => match v.trim().parse::<u64>() {
                Ok(0) => {
                    return Err(LexidraftError::Config(
                        "LEXIDRAFT_TIMEOUT_SECS must be at least 1 (unset it for no timeout)"
                            .into(),
                    ))
                }
                Ok(secs) => Some(secs),
                Err(_) => {
                    return Err(LexidraftError::Config(format!(
                        "LEXIDRAFT_TIMEOUT_SECS is not a number: '{v}'"
                    )))
                }
            },
            None => None,
        };

        let output_dir = lookup("LEXIDRAFT_OUTPUT_DIR")
            .unwrap_or_else(|| DEFAULT_OUTPUT_DIR.into())
            .into();

        let jurisdiction =
            lookup("LEXIDRAFT_JURISDICTION").unwrap_or_else(|| DEFAULT_JURISDICTION.into());

        let citation_style =
            lookup("LEXIDRAFT_CITATION_STYLE").unwrap_or_else(|| DEFAULT_CITATION_STYLE.into());

        let strict_errors = match lookup("LEXIDRAFT_STRICT_ERRORS") {
            Some(v) => parse_flag(&v).ok_or_else(|| {
                LexidraftError::Config(format!(
                    "LEXIDRAFT_STRICT_ERRORS must be true/false, yes/no, on/off or 1/0: '{v}'"
                ))
            })?,
            None => false,
        };

        Ok(Self {
            api_key,
            api_base_url,
            model,
            timeout_secs,
            output_dir,
            jurisdiction,
            citation_style,
            strict_errors,
        })
    }

    /// Create a config builder, mainly for tests.
    pub fn builder(api_key: impl Into<String>) -> LexidraftConfigBuilder {
        LexidraftConfigBuilder {
            api_key: api_key.into(),
            api_base_url: DEFAULT_API_BASE_URL.into(),
            model: DEFAULT_MODEL.into(),
            timeout_secs: None,
            output_dir: DEFAULT_OUTPUT_DIR.into(),
            jurisdiction: DEFAULT_JURISDICTION.into(),
            citation_style: DEFAULT_CITATION_STYLE.into(),
            strict_errors: false,
        }
    }
}

/// Case-insensitive boolean flag. Empty counts as false.
fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}

/// Builder for constructing `LexidraftConfig` in tests.
pub struct LexidraftConfigBuilder {
    api_key: String,
    api_base_url: String,
    model: String,
    timeout_secs: Option<u64>,
    output_dir: PathBuf,
    jurisdiction: String,
    citation_style: String,
    strict_errors: bool,
}

impl LexidraftConfigBuilder {
    pub fn api_base_url(mut self, api_base_url: impl Into<String>) -> Self {
        self.api_base_url = api_base_url.into();
        self
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = Some(timeout_secs);
        self
    }

    pub fn output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = output_dir.into();
        self
    }

    pub fn jurisdiction(mut self, jurisdiction: impl Into<String>) -> Self {
        self.jurisdiction = jurisdiction.into();
        self
    }

    pub fn citation_style(mut self, citation_style: impl Into<String>) -> Self {
        self.citation_style = citation_style.into();
        self
    }

    pub fn strict_errors(mut self, strict_errors: bool) -> Self {
        self.strict_errors = strict_errors;
        self
    }

    pub fn build(self) -> LexidraftConfig {
        LexidraftConfig {
            api_key: self.api_key,
            api_base_url: self.api_base_url,
            model: self.model,
            timeout_secs: self.timeout_secs,
            output_dir: self.output_dir,
            jurisdiction: self.jurisdiction,
            citation_style: self.citation_style,
            strict_errors: self.strict_errors,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = LexidraftConfig::from_lookup(lookup(&[("GEMINI_API_KEY", "k")])).unwrap();
        assert_eq!(config.api_key, "k");
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(config.model, "gemini-2.0-flash");
        assert_eq!(config.timeout_secs, None);
        assert_eq!(config.output_dir, PathBuf::from("outputs"));
        assert_eq!(config.jurisdiction, "Nigerian");
        assert_eq!(config.citation_style, "N.W.L.R. or All N.L.R.");
        assert!(!config.strict_errors);
    }

    #[test]
    fn test_missing_api_key() {
        let err = LexidraftConfig::from_lookup(lookup(&[])).unwrap_err();
        assert!(err.to_string().contains("GEMINI_API_KEY"));

        let err = LexidraftConfig::from_lookup(lookup(&[("GEMINI_API_KEY", "  ")])).unwrap_err();
        assert!(matches!(err, LexidraftError::Config(_)));
    }

    #[test]
    fn test_overrides() {
        let config = LexidraftConfig::from_lookup(lookup(&[
            ("GEMINI_API_KEY", "k"),
            ("GEMINI_MODEL", "gemini-1.5-pro"),
            ("LEXIDRAFT_TIMEOUT_SECS", "45"),
            ("LEXIDRAFT_OUTPUT_DIR", "/tmp/drafts"),
            ("LEXIDRAFT_JURISDICTION", "Kenyan"),
            ("LEXIDRAFT_STRICT_ERRORS", "1"),
        ]))
        .unwrap();
        assert_eq!(config.model, "gemini-1.5-pro");
        assert_eq!(config.timeout_secs, Some(45));
        assert_eq!(config.output_dir, PathBuf::from("/tmp/drafts"));
        assert_eq!(config.jurisdiction, "Kenyan");
        assert!(config.strict_errors);
    }

    #[test]
    fn test_strict_errors_flag_values() {
        for value in ["true", "TRUE", "1", "yes", "On"] {
            let config = LexidraftConfig::from_lookup(lookup(&[
                ("GEMINI_API_KEY", "k"),
                ("LEXIDRAFT_STRICT_ERRORS", value),
            ]))
            .unwrap();
            assert!(config.strict_errors, "{value:?} should enable strict mode");
        }
        for value in ["false", "False", "0", "no", "OFF", "", "  "] {
            let config = LexidraftConfig::from_lookup(lookup(&[
                ("GEMINI_API_KEY", "k"),
                ("LEXIDRAFT_STRICT_ERRORS", value),
            ]))
            .unwrap();
            assert!(!config.strict_errors, "{value:?} should leave strict mode off");
        }
    }

    #[test]
    fn test_invalid_strict_errors_flag() {
        let err = LexidraftConfig::from_lookup(lookup(&[
            ("GEMINI_API_KEY", "k"),
            ("LEXIDRAFT_STRICT_ERRORS", "maybe"),
        ]))
        .unwrap_err();
        assert!(matches!(err, LexidraftError::Config(_)));
        assert!(err.to_string().contains("maybe"));
    }

    #[test]
    fn test_zero_timeout_is_rejected() {
        let err = LexidraftConfig::from_lookup(lookup(&[
            ("GEMINI_API_KEY", "k"),
            ("LEXIDRAFT_TIMEOUT_SECS", "0"),
        ]))
        .unwrap_err();
        assert!(matches!(err, LexidraftError::Config(_)));
        assert!(err.to_string().contains("LEXIDRAFT_TIMEOUT_SECS"));
    }

    #[test]
    fn test_invalid_timeout() {
        let err = LexidraftConfig::from_lookup(lookup(&[
            ("GEMINI_API_KEY", "k"),
            ("LEXIDRAFT_TIMEOUT_SECS", "soon"),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("soon"));
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let config = LexidraftConfig::builder("super-secret").build();
        let debug = format!("{config:?}");
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("<redacted>"));
    }
}
