//! LexiDraft - AI legal drafting assistant.
//!
//! This crate turns a handful of free-text inputs into a prompt for a
//! generative-text service, cleans the reply of boilerplate disclaimers, and
//! exports the result as a single-paragraph `.docx` document.
//!
//! # Example
//!
//! ```
//! use lexidraft::prompt::{PromptBuilder, PromptRequest};
//! use lexidraft::sanitize::clean;
//!
//! let prompt = PromptBuilder::default().build_request(&PromptRequest::research("bail"));
//! assert_eq!(prompt, "What is the position of Nigerian law on: bail?");
//!
//! assert_eq!(clean("**Held**\n\n\n\nAs an AI language model, I..."), "Held");
//! ```
//!
//! # Architecture
//!
//! - [`feature`]: The five actions and their fixed export filenames
//! - [`prompt`]: Prompt templates
//! - [`sanitize`]: Disclaimer and markup cleanup
//! - [`completion`]: Completion client trait and Gemini implementation
//! - [`docx`]: Minimal `.docx` reading and writing
//! - [`export`]: Document export into the output directory
//! - [`dispatcher`]: Prompt → completion → cleanup → export
//! - [`config`]: Configuration from the environment
//! - [`error`]: Error types and Result alias
//! - [`cli`]: Command-line interface

pub mod cli;
pub mod completion;
pub mod config;
pub mod dispatcher;
pub mod docx;
pub mod error;
pub mod export;
pub mod feature;
pub mod prompt;
pub mod sanitize;

// Re-export commonly used items
pub use completion::{CompletionClient, CompletionResult, GeminiClient, FAILURE_MESSAGE};
pub use config::LexidraftConfig;
pub use dispatcher::{FeatureDispatcher, FeatureOutput};
pub use error::{LexidraftError, Result};
pub use export::DocumentExporter;
pub use feature::FeatureKind;
pub use prompt::{Field, PromptBuilder, PromptRequest};
pub use sanitize::{clean, ResponseSanitizer};
