//! Text extraction from PDF and DOCX documents

use crate::error::{Result, ResumeMatcherError};
use crate::input::file_detector::DocumentFormat;
use quick_xml::events::Event;
use quick_xml::Reader;
use std::any::Any;
use std::io::{Cursor, Read};

pub trait TextExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String>;
}

/// Extract plain text from raw document bytes with a declared format.
pub fn extract(bytes: &[u8], format: DocumentFormat) -> Result<String> {
    extract_with_limit(bytes, format, DEFAULT_MAX_INFLATED_BYTES)
}

/// Like [`extract`], with an explicit cap on decompressed DOCX XML.
pub fn extract_with_limit(bytes: &[u8], format: DocumentFormat, max_inflated_bytes: u64) -> Result<String> {
    match format {
        DocumentFormat::Pdf => PdfExtractor.extract(bytes),
        DocumentFormat::Docx => DocxExtractor::with_max_inflated_bytes(max_inflated_bytes).extract(bytes),
    }
}

/// Same as [`extract`] but takes the format as a free-form tag.
pub fn extract_tagged(bytes: &[u8], format_tag: &str) -> Result<String> {
    extract(bytes, DocumentFormat::from_tag(format_tag)?)
}

pub struct PdfExtractor;

impl TextExtractor for PdfExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String> {
        // The backend panics on some malformed page trees (e.g. no MediaBox).
        let outcome = std::panic::catch_unwind(|| pdf_extract::extract_text_from_mem(bytes));

        match outcome {
            Ok(Ok(text)) => Ok(text),
            Ok(Err(e)) => Err(ResumeMatcherError::CorruptDocument(format!(
                "Failed to extract text from PDF: {}",
                e
            ))),
            Err(payload) => Err(ResumeMatcherError::CorruptDocument(format!(
                "PDF parser failed: {}",
                panic_message(payload.as_ref())
            ))),
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&str>() {
        *message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.as_str()
    } else {
        "unknown panic"
    }
}

pub const DEFAULT_MAX_INFLATED_BYTES: u64 = 64 * 1024 * 1024;

pub struct DocxExtractor {
    max_inflated_bytes: u64,
}

const DOCUMENT_PART: &str = "word/document.xml";

impl TextExtractor for DocxExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String> {
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).map_err(|e| {
            ResumeMatcherError::CorruptDocument(format!("Failed to open DOCX container: {}", e))
        })?;

        let part = archive
            .by_name(DOCUMENT_PART)
            .map_err(|e| ResumeMatcherError::CorruptDocument(format!("Missing {}: {}", DOCUMENT_PART, e)))?;
        if part.size() > self.max_inflated_bytes {
            return Err(self.inflate_limit_error());
        }

        // The declared size is not trusted; stop reading one byte past the cap.
        let mut raw = Vec::new();
        part.take(self.max_inflated_bytes.saturating_add(1))
            .read_to_end(&mut raw)
            .map_err(|e| ResumeMatcherError::CorruptDocument(format!("Failed to read {}: {}", DOCUMENT_PART, e)))?;
        if raw.len() as u64 > self.max_inflated_bytes {
            return Err(self.inflate_limit_error());
        }
        let xml = String::from_utf8(raw).map_err(|e| {
            ResumeMatcherError::CorruptDocument(format!("{} is not valid UTF-8: {}", DOCUMENT_PART, e))
        })?;

        let paragraphs = self.body_paragraphs(&xml)?;
        Ok(paragraphs.join("\n"))
    }
}

impl DocxExtractor {
    pub fn with_max_inflated_bytes(max_inflated_bytes: u64) -> Self {
        Self { max_inflated_bytes }
    }

    fn inflate_limit_error(&self) -> ResumeMatcherError {
        ResumeMatcherError::InvalidInput(format!(
            "{} inflates beyond the {} byte limit",
            DOCUMENT_PART, self.max_inflated_bytes
        ))
    }

    /// Collect the text of each body-level `w:p`. Table cells and nested
    /// text boxes are not body paragraphs.
    fn body_paragraphs(&self, xml: &str) -> Result<Vec<String>> {
        let mut reader = Reader::from_str(xml);
        let mut paragraphs = Vec::new();
        let mut current = String::new();
        let mut para_depth = 0usize;
        let mut table_depth = 0usize;
        let mut in_text = false;

        loop {
            let event = reader.read_event().map_err(|e| {
                ResumeMatcherError::CorruptDocument(format!(
                    "Malformed document XML at byte {}: {}",
                    reader.buffer_position(),
                    e
                ))
            })?;

            let collecting = para_depth == 1 && table_depth == 0;

            match event {
                Event::Start(e) => match e.local_name().as_ref() {
                    b"p" => {
                        para_depth += 1;
                        if para_depth == 1 {
                            current.clear();
                        }
                    }
                    b"tbl" => table_depth += 1,
                    b"t" => in_text = true,
                    _ => {}
                },
                Event::Empty(e) => match e.local_name().as_ref() {
                    b"p" if para_depth == 0 && table_depth == 0 => paragraphs.push(String::new()),
                    b"tab" if collecting => current.push('\t'),
                    b"br" | b"cr" if collecting => current.push('\n'),
                    _ => {}
                },
                Event::Text(t) if in_text && collecting => {
                    let text = t.unescape().map_err(|e| {
                        ResumeMatcherError::CorruptDocument(format!("Invalid text run: {}", e))
                    })?;
                    current.push_str(&text);
                }
                Event::End(e) => match e.local_name().as_ref() {
                    b"p" => {
                        if para_depth == 1 && table_depth == 0 {
                            paragraphs.push(std::mem::take(&mut current));
                        }
                        para_depth = para_depth.saturating_sub(1);
                    }
                    b"tbl" => table_depth = table_depth.saturating_sub(1),
                    b"t" => in_text = false,
                    _ => {}
                },
                Event::Eof => break,
                _ => {}
            }
        }

        Ok(paragraphs)
    }
}
