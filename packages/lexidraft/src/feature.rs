//! The five drafting actions offered by LexiDraft.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

use crate::error::{LexidraftError, Result};

/// A drafting action. The set is closed: every adapter (CLI, HTTP) maps onto
/// exactly these five.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum FeatureKind {
    /// Draft a legal document from a document type and key facts.
    Draft,

    /// Ask for the position of the law on a research query.
    Research,

    /// Produce an IRAC case brief from a judgment summary.
    CaseBrief,

    /// Legal opinion that cites relevant statutes.
    StatuteCitation,

    /// Format a citation for a case title.
    CitationFormat,
}

impl FeatureKind {
    /// All kinds, in the order the actions are presented.
    pub fn all() -> impl Iterator<Item = Self> {
        Self::iter()
    }

    /// Parse a kebab-case identifier (e.g. `case-brief`).
    pub fn parse(name: &str) -> Result<Self> {
        Self::from_str(name).map_err(|_| LexidraftError::UnknownFeature(name.to_string()))
    }

    /// Names of the input fields this kind's prompt template reads, in order.
    #[must_use]
    pub fn field_names(&self) -> &'static [&'static str] {
        match self {
            Self::Draft => &["document_type", "facts"],
            Self::Research => &["query"],
            Self::CaseBrief => &["summary"],
            Self::StatuteCitation => &["context"],
            Self::CitationFormat => &["title"],
        }
    }

    /// Fixed export filename. Every request of a kind writes the same file.
    #[must_use]
    pub fn export_filename(&self) -> &'static str {
        match self {
            Self::Draft => "generated_draft.docx",
            Self::Research => "legal_research_result.docx",
            Self::CaseBrief => "case_brief.docx",
            Self::StatuteCitation => "statute_draft.docx",
            Self::CitationFormat => "citation_result.docx",
        }
    }

    /// Human-readable label.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Draft => "Legal Drafting",
            Self::Research => "Legal Research",
            Self::CaseBrief => "Case Brief Generator",
            Self::StatuteCitation => "Statute Integration",
            Self::CitationFormat => "Legal Citation Tool",
        }
    }
}
