//! Word-processor text extraction.
//!
//! A .docx file is a ZIP archive; the visible text lives in
//! `word/document.xml` as `<w:t>` runs grouped into `<w:p>` paragraphs. We
//! walk the XML once and emit one output line per paragraph, which is all the
//! downstream heuristics need.

use quick_xml::events::Event;
use quick_xml::Reader;
use std::io::{Cursor, Read};
use zip::ZipArchive;

use crate::extraction::loader::LoadError;

/// Extracts visible text from a .docx byte stream.
pub fn extract_docx_text(bytes: &[u8]) -> Result<String, LoadError> {
    if bytes.is_empty() {
        return Ok(String::new());
    }
    let mut archive = ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| LoadError::CorruptDocument(format!("docx archive: {e}")))?;

    let mut xml = String::new();
    archive
        .by_name("word/document.xml")
        .map_err(|e| LoadError::CorruptDocument(format!("docx document.xml: {e}")))?
        .read_to_string(&mut xml)
        .map_err(|e| LoadError::CorruptDocument(format!("docx document.xml: {e}")))?;

    parse_document_xml(&xml)
}

/// Extracts text from a legacy .doc upload. Many ".doc" files in the wild are
/// actually docx archives with the wrong extension, so the ZIP path is tried
/// first; true OLE binaries get a printable-run scan instead of a full
/// compound-file parser.
pub fn extract_doc_text(bytes: &[u8]) -> Result<String, LoadError> {
    if bytes.is_empty() {
        return Ok(String::new());
    }
    if let Ok(text) = extract_docx_text(bytes) {
        return Ok(text);
    }
    let text = scan_printable_runs(bytes);
    if text.trim().is_empty() {
        return Err(LoadError::CorruptDocument(
            "doc: no extractable text in binary".to_string(),
        ));
    }
    Ok(text)
}

fn parse_document_xml(xml: &str) -> Result<String, LoadError> {
    let mut reader = Reader::from_reader(xml.as_bytes());
    let mut buf = Vec::new();
    let mut text = String::new();
    let mut in_text_run = false;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                if e.local_name().as_ref() == b"t" {
                    in_text_run = true;
                }
            }
            Ok(Event::Empty(ref e)) => match e.local_name().as_ref() {
                b"br" | b"cr" => text.push('\n'),
                b"tab" => text.push(' '),
                _ => {}
            },
            Ok(Event::Text(e)) if in_text_run => {
                let run = e
                    .unescape()
                    .map_err(|e| LoadError::CorruptDocument(format!("docx text run: {e}")))?;
                text.push_str(&run);
            }
            Ok(Event::End(ref e)) => match e.local_name().as_ref() {
                b"t" => in_text_run = false,
                b"p" => text.push('\n'),
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(LoadError::CorruptDocument(format!("docx xml: {e}")));
            }
            _ => {}
        }
        buf.clear();
    }

    Ok(text)
}

/// Best-effort fallback for legacy binaries: keeps runs of at least four
/// consecutive printable ASCII characters, one run per line. Noisy, but the
/// extractors degrade gracefully on noise.
fn scan_printable_runs(bytes: &[u8]) -> String {
    let mut out = String::new();
    let mut run = String::new();
    for &b in bytes {
        if (0x20..0x7f).contains(&b) {
            run.push(b as char);
        } else {
            if run.trim().len() >= 4 {
                out.push_str(run.trim());
                out.push('\n');
            }
            run.clear();
        }
    }
    if run.trim().len() >= 4 {
        out.push_str(run.trim());
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::SimpleFileOptions;
    use zip::ZipWriter;

    fn build_docx(document_xml: &str) -> Vec<u8> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        let options =
            SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored);
        writer.start_file("word/document.xml", options).unwrap();
        writer.write_all(document_xml.as_bytes()).unwrap();
        writer.finish().unwrap().into_inner()
    }

    const SIMPLE_DOC: &str = r#"<?xml version="1.0"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:body>
    <w:p><w:r><w:t>Jane Doe</w:t></w:r></w:p>
    <w:p><w:r><w:t>jane@example.com</w:t></w:r></w:p>
    <w:p><w:r><w:t>Senior </w:t></w:r><w:r><w:t>Engineer</w:t></w:r></w:p>
  </w:body>
</w:document>"#;

    #[test]
    fn test_docx_paragraphs_become_lines() {
        let bytes = build_docx(SIMPLE_DOC);
        let text = extract_docx_text(&bytes).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Jane Doe");
        assert_eq!(lines[1], "jane@example.com");
    }

    #[test]
    fn test_docx_runs_within_paragraph_are_joined() {
        let bytes = build_docx(SIMPLE_DOC);
        let text = extract_docx_text(&bytes).unwrap();
        assert!(text.contains("Senior Engineer"), "got: {text}");
    }

    #[test]
    fn test_not_a_zip_is_corrupt() {
        let err = extract_docx_text(b"garbage bytes").unwrap_err();
        assert!(matches!(err, LoadError::CorruptDocument(_)));
    }

    #[test]
    fn test_zip_without_document_xml_is_corrupt() {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        let options =
            SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored);
        writer.start_file("unrelated.txt", options).unwrap();
        writer.write_all(b"hi").unwrap();
        let bytes = writer.finish().unwrap().into_inner();
        assert!(matches!(
            extract_docx_text(&bytes),
            Err(LoadError::CorruptDocument(_))
        ));
    }

    #[test]
    fn test_doc_falls_back_to_printable_runs() {
        let mut bytes = vec![0xd0, 0xcf, 0x11, 0xe0, 0x00, 0x00];
        bytes.extend_from_slice(b"Jane Doe works here");
        bytes.extend_from_slice(&[0x00, 0x01]);
        let text = extract_doc_text(&bytes).unwrap();
        assert!(text.contains("Jane Doe works here"));
    }

    #[test]
    fn test_doc_with_no_text_is_corrupt() {
        let bytes = vec![0x00, 0x01, 0x02, 0x03];
        assert!(matches!(
            extract_doc_text(&bytes),
            Err(LoadError::CorruptDocument(_))
        ));
    }

    #[test]
    fn test_mislabeled_docx_as_doc_still_parses() {
        let bytes = build_docx(SIMPLE_DOC);
        let text = extract_doc_text(&bytes).unwrap();
        assert!(text.contains("Jane Doe"));
    }
}
