//! Prompt templates for the five drafting actions.
//!
//! Every [`FeatureKind`] has one fixed template. Field values are inserted
//! verbatim: no escaping, no validation, no length cap.

use serde::{Deserialize, Serialize};

use crate::feature::FeatureKind;

/// Default jurisdiction adjective used in research, statute and citation prompts.
pub const DEFAULT_JURISDICTION: &str = "Nigerian";

/// Default law report style used in citation prompts.
pub const DEFAULT_CITATION_STYLE: &str = "N.W.L.R. or All N.L.R.";

/// A named user input, e.g. `facts = "X witnessed Y"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    pub value: String,
}

impl Field {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// One user invocation: a feature kind plus its inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptRequest {
    pub kind: FeatureKind,
    pub fields: Vec<Field>,
}

impl PromptRequest {
    pub fn new(kind: FeatureKind, fields: Vec<Field>) -> Self {
        Self { kind, fields }
    }

    pub fn draft(document_type: impl Into<String>, facts: impl Into<String>) -> Self {
        Self::new(
            FeatureKind::Draft,
            vec![
                Field::new("document_type", document_type),
                Field::new("facts", facts),
            ],
        )
    }

    pub fn research(query: impl Into<String>) -> Self {
        Self::new(FeatureKind::Research, vec![Field::new("query", query)])
    }

    pub fn case_brief(summary: impl Into<String>) -> Self {
        Self::new(FeatureKind::CaseBrief, vec![Field::new("summary", summary)])
    }

    pub fn statute_citation(context: impl Into<String>) -> Self {
        Self::new(
            FeatureKind::StatuteCitation,
            vec![Field::new("context", context)],
        )
    }

    pub fn citation_format(title: impl Into<String>) -> Self {
        Self::new(
            FeatureKind::CitationFormat,
            vec![Field::new("title", title)],
        )
    }

    /// Value of the first field with `name`, or `""` when absent.
    #[must_use]
    pub fn field(&self, name: &str) -> &str {
        field_value(&self.fields, name)
    }
}

/// Builds the instruction string sent to the completion service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptBuilder {
    jurisdiction: String,
    citation_style: String,
}

impl Default for PromptBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_JURISDICTION, DEFAULT_CITATION_STYLE)
    }
}

impl PromptBuilder {
    pub fn new(jurisdiction: impl Into<String>, citation_style: impl Into<String>) -> Self {
        Self {
            jurisdiction: jurisdiction.into(),
            citation_style: citation_style.into(),
        }
    }

    #[must_use]
    pub fn jurisdiction(&self) -> &str {
        &self.jurisdiction
    }

    #[must_use]
    pub fn citation_style(&self) -> &str {
        &self.citation_style
    }

    /// Fill the template for `kind` from `fields`.
    ///
    /// Missing fields are filled with the empty string.
    ///
    /// # Examples
    /// ```
    /// use lexidraft::prompt::{Field, PromptBuilder};
    /// use lexidraft::FeatureKind;
    ///
    /// let prompt = PromptBuilder::default().build(
    ///     FeatureKind::Draft,
    ///     &[Field::new("document_type", "Affidavit"), Field::new("facts", "X witnessed Y")],
    /// );
    /// assert_eq!(prompt, "Draft a Affidavit based on the following facts:\n\nX witnessed Y");
    /// ```
    #[must_use]
    pub fn build(&self, kind: FeatureKind, fields: &[Field]) -> String {
        for expected in kind.field_names() {
            if !fields.iter().any(|f| f.name == *expected) {
                tracing::debug!(feature = %kind, field = *expected, "field missing, using empty value");
            }
        }

        let get = |name: &str| field_value(fields, name);

        match kind {
            FeatureKind::Draft => format!(
                "Draft a {} based on the following facts:\n\n{}",
                get("document_type"),
                get("facts")
            ),
            FeatureKind::Research => format!(
                "What is the position of {} law on: {}?",
                self.jurisdiction,
                get("query")
            ),
            FeatureKind::CaseBrief => format!(
                "Using IRAC format, generate a case brief from the following judgment summary:\n\n{}",
                get("summary")
            ),
            FeatureKind::StatuteCitation => format!(
                "Provide a legal opinion on the following matter, and include relevant {} statutes:\n\n{}",
                self.jurisdiction,
                get("context")
            ),
            FeatureKind::CitationFormat => format!(
                "Generate the proper {} legal citation for: {}\nFormat it in {} style.",
                self.jurisdiction,
                get("title"),
                self.citation_style
            ),
        }
    }

    /// Convenience wrapper around [`PromptBuilder::build`].
    #[must_use]
    pub fn build_request(&self, request: &PromptRequest) -> String {
        self.build(request.kind, &request.fields)
    }
}

fn field_value<'a>(fields: &'a [Field], name: &str) -> &'a str {
    fields
        .iter()
        .find(|f| f.name == name)
        .map(|f| f.value.as_str())
        .unwrap_or("")
}
