//! Command-line interface for LexiDraft.

use std::io::Read;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::config::LexidraftConfig;
use crate::dispatcher::FeatureDispatcher;
use crate::docx::read_paragraphs_from_path;
use crate::error::Result;
use crate::prompt::PromptRequest;

/// LexiDraft - AI legal drafting assistant.
///
/// Text arguments may be given as `-` to read them from standard input.
#[derive(Parser)]
#[command(name = "lexidraft")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output directory for exported documents (default: $LEXIDRAFT_OUTPUT_DIR or outputs/)
    #[arg(short, long, global = true)]
    pub output: Option<PathBuf>,

    /// Fail on completion errors instead of exporting the error message
    #[arg(long, global = true)]
    pub strict: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Draft a legal document from key facts.
    Draft {
        /// Document type (e.g., Affidavit, Motion, Writ, Agreement)
        #[arg(short = 't', long)]
        document_type: String,

        /// Key facts
        #[arg(short, long)]
        facts: String,
    },

    /// Research the position of the law on a question.
    Research {
        /// Research query
        query: String,
    },

    /// Generate an IRAC case brief from a judgment summary.
    CaseBrief {
        /// Judgment summary
        summary: String,
    },

    /// Legal opinion with relevant statute references.
    StatuteCitation {
        /// Legal context
        context: String,
    },

    /// Format the legal citation for a case.
    CitationFormat {
        /// Case title or name
        title: String,
    },

    /// Print the paragraphs of an exported document.
    Show {
        /// Path to a .docx file
        file: PathBuf,
    },
}

impl Commands {
    /// The prompt request for a feature subcommand, `None` for utilities.
    pub fn into_request(self) -> Result<Option<PromptRequest>> {
        let request = match self {
            Self::Draft {
                document_type,
                facts,
            } => PromptRequest::draft(resolve_input(document_type)?, resolve_input(facts)?),
            Self::Research { query } => PromptRequest::research(resolve_input(query)?),
            Self::CaseBrief { summary } => PromptRequest::case_brief(resolve_input(summary)?),
            Self::StatuteCitation { context } => {
                PromptRequest::statute_citation(resolve_input(context)?)
            }
            Self::CitationFormat { title } => {
                PromptRequest::citation_format(resolve_input(title)?)
            }
            Self::Show { .. } => return Ok(None),
        };
        Ok(Some(request))
    }
}

/// `-` reads the value from standard input.
fn resolve_input(value: String) -> Result<String> {
    if value == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        Ok(buf)
    } else {
        Ok(value)
    }
}

/// Run the CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    if let Commands::Show { file } = &cli.command {
        return show_command(file);
    }

    let mut config = LexidraftConfig::from_env()?;
    if let Some(output) = cli.output {
        config.output_dir = output;
    }
    config.strict_errors |= cli.strict;

    match cli.command.into_request()? {
        Some(request) => feature_command(&config, &request),
        None => Ok(()),
    }
}

/// Execute one feature action and print the result.
fn feature_command(config: &LexidraftConfig, request: &PromptRequest) -> Result<()> {
    let dispatcher = FeatureDispatcher::from_config(config)?;

    let pb = ProgressBar::new_spinner();
    #[allow(clippy::expect_used)] // Static template string that is guaranteed to be valid
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .expect("valid template"),
    );
    pb.set_message(format!("{}...", request.kind.label()));
    pb.enable_steady_tick(std::time::Duration::from_millis(100));

    let output = match dispatcher.run_request(request) {
        Ok(output) => output,
        Err(e) => {
            pb.finish_and_clear();
            return Err(e);
        }
    };

    pb.finish_and_clear();

    if output.success {
        println!("{}", output.text);
    } else {
        println!("{}", style(&output.text).yellow());
    }
    println!();
    println!(
        "{} {}",
        style("Saved to:").green().bold(),
        output.path.display()
    );

    Ok(())
}

/// Print the paragraphs of an exported document.
fn show_command(file: &Path) -> Result<()> {
    for paragraph in read_paragraphs_from_path(file)? {
        println!("{paragraph}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feature::FeatureKind;

    #[test]
    fn test_cli_parse_draft() {
        let cli = Cli::parse_from([
            "lexidraft",
            "draft",
            "--document-type",
            "Affidavit",
            "--facts",
            "X witnessed Y",
        ]);

        let request = cli.command.into_request().unwrap().unwrap();
        assert_eq!(request, PromptRequest::draft("Affidavit", "X witnessed Y"));
        assert!(cli.output.is_none());
        assert!(!cli.strict);
    }

    #[test]
    fn test_cli_parse_kebab_subcommands() {
        let cases = [
            ("research", FeatureKind::Research),
            ("case-brief", FeatureKind::CaseBrief),
            ("statute-citation", FeatureKind::StatuteCitation),
            ("citation-format", FeatureKind::CitationFormat),
        ];
        for (name, kind) in cases {
            let cli = Cli::parse_from(["lexidraft", name, "text"]);
            let request = cli.command.into_request().unwrap().unwrap();
            assert_eq!(request.kind, kind);
            assert_eq!(request.fields[0].value, "text");
        }
    }

    #[test]
    fn test_cli_global_flags_after_subcommand() {
        let cli = Cli::parse_from([
            "lexidraft",
            "research",
            "bail",
            "--output",
            "/tmp/drafts",
            "--strict",
        ]);
        assert_eq!(cli.output, Some(PathBuf::from("/tmp/drafts")));
        assert!(cli.strict);
    }

    #[test]
    fn test_cli_show_has_no_request() {
        let cli = Cli::parse_from(["lexidraft", "show", "outputs/case_brief.docx"]);
        assert!(cli.command.into_request().unwrap().is_none());
    }

    #[test]
    fn test_cli_draft_requires_both_fields() {
        assert!(Cli::try_parse_from(["lexidraft", "draft", "--facts", "x"]).is_err());
    }
}
