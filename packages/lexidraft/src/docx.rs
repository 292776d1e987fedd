//! Minimal WordprocessingML (`.docx`) reading and writing.
//!
//! Only what export needs: a package with one `word/document.xml` holding
//! plain-text paragraphs, no styles, no extra metadata. Inside a paragraph,
//! `\n` becomes `<w:br/>` and `\t` becomes `<w:tab/>`.

use std::io::{Read, Seek, Write};

use roxmltree::Document;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

use crate::error::{LexidraftError, Result};

/// WordprocessingML main namespace.
pub const W_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

const DOCUMENT_PART: &str = "word/document.xml";

const CONTENT_TYPES: &str = concat!(
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
    "\n",
    r#"<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">"#,
    r#"<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>"#,
    r#"<Default Extension="xml" ContentType="application/xml"/>"#,
    r#"<Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/>"#,
    r#"</Types>"#,
);

const PACKAGE_RELS: &str = concat!(
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
    "\n",
    r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
    r#"<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/>"#,
    r#"</Relationships>"#,
);

/// Write a document containing `paragraphs` to `writer`.
pub fn write_document<W: Write + Seek>(writer: W, paragraphs: &[&str]) -> Result<W> {
    let mut zip = ZipWriter::new(writer);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    zip.start_file("[Content_Types].xml", options)?;
    zip.write_all(CONTENT_TYPES.as_bytes())?;

    zip.start_file("_rels/.rels", options)?;
    zip.write_all(PACKAGE_RELS.as_bytes())?;

    zip.start_file(DOCUMENT_PART, options)?;
    zip.write_all(document_xml(paragraphs).as_bytes())?;

    Ok(zip.finish()?)
}

/// Write a document whose body is exactly one paragraph of `text`.
pub fn write_paragraph<W: Write + Seek>(writer: W, text: &str) -> Result<W> {
    write_document(writer, &[text])
}

/// Build the `word/document.xml` part.
#[must_use]
pub fn document_xml(paragraphs: &[&str]) -> String {
    let mut xml = String::new();
    xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
    xml.push('\n');
    xml.push_str(&format!(r#"<w:document xmlns:w="{W_NS}"><w:body>"#));
    for paragraph in paragraphs {
        push_paragraph(&mut xml, paragraph);
    }
    xml.push_str("<w:sectPr/></w:body></w:document>");
    xml
}

fn push_paragraph(xml: &mut String, text: &str) {
    if text.is_empty() {
        xml.push_str("<w:p/>");
        return;
    }

    xml.push_str("<w:p><w:r>");
    let mut segment = String::new();
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\r' | '\n' => {
                if c == '\r' && chars.peek() == Some(&'\n') {
                    chars.next();
                }
                flush_text(xml, &mut segment);
                xml.push_str("<w:br/>");
            }
            '\t' => {
                flush_text(xml, &mut segment);
                xml.push_str("<w:tab/>");
            }
            '&' => segment.push_str("&amp;"),
            '<' => segment.push_str("&lt;"),
            '>' => segment.push_str("&gt;"),
            '"' => segment.push_str("&quot;"),
            c if is_xml_char(c) => segment.push(c),
            // Not representable in XML 1.0.
            _ => {}
        }
    }
    flush_text(xml, &mut segment);
    xml.push_str("</w:r></w:p>");
}

fn flush_text(xml: &mut String, segment: &mut String) {
    if !segment.is_empty() {
        xml.push_str(r#"<w:t xml:space="preserve">"#);
        xml.push_str(segment);
        xml.push_str("</w:t>");
        segment.clear();
    }
}

fn is_xml_char(c: char) -> bool {
    matches!(c, '\u{20}'..='\u{D7FF}' | '\u{E000}'..='\u{FFFD}' | '\u{10000}'..='\u{10FFFF}')
}

/// Read the text of every body paragraph, line breaks as `\n`, tabs as `\t`.
pub fn read_paragraphs<R: Read + Seek>(reader: R) -> Result<Vec<String>> {
    let mut archive = ZipArchive::new(reader)?;
    let mut xml = String::new();
    {
        let mut part = archive.by_name(DOCUMENT_PART).map_err(|e| match e {
            zip::result::ZipError::FileNotFound => {
                LexidraftError::InvalidDocument(format!("missing {DOCUMENT_PART}"))
            }
            other => LexidraftError::Zip(other),
        })?;
        part.read_to_string(&mut xml)?;
    }
    paragraphs_from_xml(&xml)
}

/// Convenience wrapper: read paragraphs from a file on disk.
pub fn read_paragraphs_from_path(path: &std::path::Path) -> Result<Vec<String>> {
    let file = std::fs::File::open(path)?;
    read_paragraphs(std::io::BufReader::new(file))
}

fn paragraphs_from_xml(xml: &str) -> Result<Vec<String>> {
    let doc = Document::parse(xml)?;

    let body = doc
        .descendants()
        .find(|n| is_w(n, "body"))
        .ok_or_else(|| LexidraftError::InvalidDocument("document has no body".into()))?;

    let paragraphs = body
        .descendants()
        .filter(|n| is_w(n, "p"))
        .map(|p| {
            let mut text = String::new();
            for node in p.descendants() {
                if is_w(&node, "t") {
                    text.push_str(node.text().unwrap_or(""));
                } else if is_w(&node, "br") || is_w(&node, "cr") {
                    text.push('\n');
                } else if is_w(&node, "tab") {
                    text.push('\t');
                }
            }
            text
        })
        .collect();

    Ok(paragraphs)
}

fn is_w(node: &roxmltree::Node<'_, '_>, name: &str) -> bool {
    node.is_element() && node.tag_name().name() == name && node.tag_name().namespace() == Some(W_NS)
}
