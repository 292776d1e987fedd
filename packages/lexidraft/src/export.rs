//! Writes drafts to `.docx` files in the output directory.

use std::path::{Component, Path, PathBuf};

use crate::docx::write_paragraph;
use crate::error::{LexidraftError, Result};

/// Exports text as single-paragraph documents under one directory.
///
/// There is no locking. Two exports to the same filename race, and the
/// last rename wins.
#[derive(Debug, Clone)]
pub struct DocumentExporter {
    output_dir: PathBuf,
}

impl DocumentExporter {
    /// Create an exporter, creating `output_dir` if it does not exist.
    pub fn new(output_dir: impl Into<PathBuf>) -> Result<Self> {
        let output_dir = output_dir.into();
        std::fs::create_dir_all(&output_dir)?;
        Ok(Self { output_dir })
    }

    #[must_use]
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Write `text` as the only paragraph of `output_dir/filename`, replacing
    /// any existing file, and return the path written.
    pub fn export(&self, text: &str, filename: &str) -> Result<PathBuf> {
        validate_filename(filename)?;

        // The directory may have been removed since construction.
        std::fs::create_dir_all(&self.output_dir)?;
        let output_file = self.output_dir.join(filename);

        // Write to a temp file in the same directory, then rename into place.
        let mut temp = tempfile::Builder::new()
            .prefix(".")
            .suffix(".tmp")
            .tempfile_in(&self.output_dir)?;
        write_paragraph(temp.as_file_mut(), text)?;
        temp.as_file().sync_all()?;
        temp.persist(&output_file)
            .map_err(|e| LexidraftError::Io(e.error))?;

        tracing::debug!(path = %output_file.display(), bytes = text.len(), "exported document");
        Ok(output_file)
    }
}

/// Accept only a single normal path component such as `case_brief.docx`.
fn validate_filename(filename: &str) -> Result<()> {
    let mut components = Path::new(filename).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) if !filename.contains(['/', '\\']) => Ok(()),
        _ => Err(LexidraftError::InvalidFilename(filename.to_string())),
    }
}
