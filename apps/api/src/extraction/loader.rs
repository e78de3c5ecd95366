//! Document Loader: validated byte input and byte-to-text decoding.
//!
//! Validation (allow-list + size bound) happens before any decode work so
//! oversized or mistyped uploads cost nothing. Binary formats delegate to
//! format-specific decoders; the business logic here is validation and
//! dispatch, not bespoke parsing.

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::extraction::docx;

/// Default upload bound. A résumé over 10 MiB is not a résumé.
pub const DEFAULT_MAX_DOCUMENT_BYTES: usize = 10 * 1024 * 1024;

/// Media types the loader accepts. Anything else is rejected up front.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Pdf,
    Docx,
    Doc,
    Txt,
}

impl MediaType {
    /// Resolves a media type from the uploaded filename's extension, falling
    /// back to the declared Content-Type of the multipart part.
    pub fn from_upload(filename: &str, content_type: Option<&str>) -> Option<Self> {
        if let Some(ext) = filename.rsplit('.').next().filter(|e| *e != filename) {
            if let Some(mt) = Self::from_extension(ext) {
                return Some(mt);
            }
        }
        content_type.and_then(Self::from_mime)
    }

    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "pdf" => Some(Self::Pdf),
            "docx" => Some(Self::Docx),
            "doc" => Some(Self::Doc),
            "txt" => Some(Self::Txt),
            _ => None,
        }
    }

    pub fn from_mime(mime: &str) -> Option<Self> {
        match mime {
            "application/pdf" => Some(Self::Pdf),
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document" => {
                Some(Self::Docx)
            }
            "application/msword" => Some(Self::Doc),
            "text/plain" => Some(Self::Txt),
            _ => None,
        }
    }
}

/// Loader failure taxonomy. All variants are terminal for the request: the
/// caller reports them to the end user and takes no further pipeline action.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("unsupported media type: {0}")]
    UnsupportedMediaType(String),

    #[error("document is {got} bytes, limit is {limit}")]
    TooLarge { got: usize, limit: usize },

    #[error("document could not be decoded: {0}")]
    CorruptDocument(String),
}

/// Immutable upload input: byte content plus a validated media type.
/// Constructed once per request and consumed by [`load`].
#[derive(Debug, Clone)]
pub struct RawDocument {
    content: Bytes,
    media_type: MediaType,
}

impl RawDocument {
    /// Validates the size bound at construction so no oversized document ever
    /// reaches a decoder.
    pub fn new(content: Bytes, media_type: MediaType, max_bytes: usize) -> Result<Self, LoadError> {
        if content.len() > max_bytes {
            return Err(LoadError::TooLarge {
                got: content.len(),
                limit: max_bytes,
            });
        }
        Ok(Self {
            content,
            media_type,
        })
    }

    pub fn media_type(&self) -> MediaType {
        self.media_type
    }

    pub fn len(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

/// Decodes the document to plain text, preserving line breaks between logical
/// paragraphs. An empty document decodes to an empty string, not an error.
pub fn load(raw: &RawDocument) -> Result<String, LoadError> {
    match raw.media_type {
        // Invalid UTF-8 sequences are replaced, not fatal.
        MediaType::Txt => Ok(String::from_utf8_lossy(&raw.content).into_owned()),
        MediaType::Pdf => {
            if raw.content.is_empty() {
                return Ok(String::new());
            }
            pdf_extract::extract_text_from_mem(&raw.content)
                .map_err(|e| LoadError::CorruptDocument(format!("pdf: {e}")))
        }
        MediaType::Docx => docx::extract_docx_text(&raw.content),
        // Legacy .doc uploads are usually mislabeled docx; try the ZIP path
        // first and fall back to a printable-run scan of the binary.
        MediaType::Doc => docx::extract_doc_text(&raw.content),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn txt(content: &[u8]) -> RawDocument {
        RawDocument::new(Bytes::copy_from_slice(content), MediaType::Txt, DEFAULT_MAX_DOCUMENT_BYTES)
            .unwrap()
    }

    #[test]
    fn test_txt_decodes_utf8() {
        assert_eq!(load(&txt(b"Jane Doe\n")).unwrap(), "Jane Doe\n");
    }

    #[test]
    fn test_txt_invalid_utf8_is_replaced_not_fatal() {
        let text = load(&txt(b"Jane\xff Doe")).unwrap();
        assert!(text.contains("Jane"));
        assert!(text.contains("Doe"));
        assert!(text.contains('\u{FFFD}'));
    }

    #[test]
    fn test_empty_txt_yields_empty_string() {
        assert_eq!(load(&txt(b"")).unwrap(), "");
    }

    #[test]
    fn test_empty_pdf_yields_empty_string() {
        let raw = RawDocument::new(Bytes::new(), MediaType::Pdf, DEFAULT_MAX_DOCUMENT_BYTES).unwrap();
        assert_eq!(load(&raw).unwrap(), "");
    }

    #[test]
    fn test_exactly_at_limit_is_accepted() {
        let content = Bytes::from(vec![b'a'; DEFAULT_MAX_DOCUMENT_BYTES]);
        assert!(RawDocument::new(content, MediaType::Txt, DEFAULT_MAX_DOCUMENT_BYTES).is_ok());
    }

    #[test]
    fn test_one_byte_over_limit_is_rejected() {
        let content = Bytes::from(vec![b'a'; DEFAULT_MAX_DOCUMENT_BYTES + 1]);
        let err = RawDocument::new(content, MediaType::Txt, DEFAULT_MAX_DOCUMENT_BYTES).unwrap_err();
        assert!(matches!(err, LoadError::TooLarge { .. }));
    }

    #[test]
    fn test_media_type_from_extension() {
        assert_eq!(MediaType::from_extension("PDF"), Some(MediaType::Pdf));
        assert_eq!(MediaType::from_extension("docx"), Some(MediaType::Docx));
        assert_eq!(MediaType::from_extension("doc"), Some(MediaType::Doc));
        assert_eq!(MediaType::from_extension("txt"), Some(MediaType::Txt));
        assert_eq!(MediaType::from_extension("png"), None);
    }

    #[test]
    fn test_media_type_from_upload_prefers_extension() {
        let mt = MediaType::from_upload("resume.pdf", Some("text/plain"));
        assert_eq!(mt, Some(MediaType::Pdf));
    }

    #[test]
    fn test_media_type_from_upload_falls_back_to_content_type() {
        let mt = MediaType::from_upload("resume", Some("application/pdf"));
        assert_eq!(mt, Some(MediaType::Pdf));
    }

    #[test]
    fn test_unsupported_upload_resolves_to_none() {
        assert_eq!(MediaType::from_upload("photo.png", Some("image/png")), None);
    }

    #[test]
    fn test_corrupt_pdf_is_a_typed_error() {
        let raw = RawDocument::new(
            Bytes::from_static(b"not a pdf at all"),
            MediaType::Pdf,
            DEFAULT_MAX_DOCUMENT_BYTES,
        )
        .unwrap();
        assert!(matches!(load(&raw), Err(LoadError::CorruptDocument(_))));
    }
}
