//! Content Assembler: turns user-supplied documents and pasted text into the
//! ordered segment sequence submitted to the model. Documents keep their
//! supplied order; pasted text always comes last.

use crate::error::{CustodyBuddyError, Result};
use crate::models::{ContentSegment, SourceDocument};

const PAGE_BREAK: &str = "\n\n--- Page Break ---\n\n";

/// Assemble content segments from documents and an optional pasted-text
/// block. A file that cannot be used is a hard error; nothing is silently
/// dropped.
pub fn assemble(files: &[SourceDocument], pasted_text: &str) -> Result<Vec<ContentSegment>> {
    let mut segments = Vec::new();

    for file in files {
        match file {
            SourceDocument::Image {
                name,
                mime_type,
                bytes,
            } => {
                if !mime_type.starts_with("image/") || bytes.is_empty() {
                    return Err(CustodyBuddyError::UnreadableFile(name.clone()));
                }
                segments.push(ContentSegment::Text(format!(
                    "--- START OF DOCUMENT: {name} ---"
                )));
                segments.push(ContentSegment::InlineBinary {
                    mime_type: mime_type.clone(),
                    data: bytes.clone(),
                });
                segments.push(ContentSegment::Text(format!(
                    "--- END OF DOCUMENT: {name} ---"
                )));
            }
            SourceDocument::Pdf { name, pages } => {
                if pages.is_empty() {
                    return Err(CustodyBuddyError::UnreadableFile(name.clone()));
                }
                let body = pages.join(PAGE_BREAK);
                segments.push(ContentSegment::Text(format!(
                    "--- START OF DOCUMENT: {name} ---\n{body}\n--- END OF DOCUMENT: {name} ---"
                )));
            }
        }
    }

    if !pasted_text.trim().is_empty() {
        segments.push(ContentSegment::Text(format!(
            "--- START OF PASTED TEXT ---\n{pasted_text}\n--- END OF PASTED TEXT ---"
        )));
    }

    Ok(segments)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(name: &str) -> SourceDocument {
        SourceDocument::Image {
            name: name.to_string(),
            mime_type: "image/jpeg".to_string(),
            bytes: vec![0xff, 0xd8, 0xff],
        }
    }

    #[test]
    fn pasted_text_alone_yields_one_wrapped_segment() {
        let pasted = "Per section 4, pickup is at 6 PM.";
        let segments = assemble(&[], pasted).expect("pasted text should assemble");

        assert_eq!(segments.len(), 1);
        let ContentSegment::Text(text) = &segments[0] else {
            panic!("expected a text segment");
        };
        assert!(text.starts_with("--- START OF PASTED TEXT ---"));
        assert!(text.ends_with("--- END OF PASTED TEXT ---"));
        assert!(text.contains(pasted));
    }

    #[test]
    fn blank_input_yields_an_empty_sequence() {
        assert!(assemble(&[], "").expect("empty input is valid").is_empty());
        assert!(assemble(&[], "   \n\t").expect("whitespace only").is_empty());
    }

    #[test]
    fn documents_precede_pasted_text_in_supplied_order() {
        let files = vec![
            SourceDocument::Pdf {
                name: "order.pdf".to_string(),
                pages: vec!["Page one.".to_string(), "Page two.".to_string()],
            },
            image("photo.jpg"),
        ];
        let segments = assemble(&files, "Some pasted notes.").expect("should assemble");

        // pdf text, image marker pair around the binary, then pasted text
        assert_eq!(segments.len(), 5);
        let ContentSegment::Text(pdf) = &segments[0] else {
            panic!("expected pdf text segment");
        };
        assert!(pdf.starts_with("--- START OF DOCUMENT: order.pdf ---"));
        assert!(pdf.contains("Page one.\n\n--- Page Break ---\n\nPage two."));
        assert!(pdf.ends_with("--- END OF DOCUMENT: order.pdf ---"));

        assert_eq!(
            segments[1],
            ContentSegment::Text("--- START OF DOCUMENT: photo.jpg ---".to_string())
        );
        assert!(matches!(&segments[2], ContentSegment::InlineBinary { mime_type, .. } if mime_type == "image/jpeg"));
        assert_eq!(
            segments[3],
            ContentSegment::Text("--- END OF DOCUMENT: photo.jpg ---".to_string())
        );
        assert!(matches!(&segments[4], ContentSegment::Text(t) if t.contains("PASTED TEXT")));
    }

    #[test]
    fn single_page_pdf_has_no_page_break() {
        let files = vec![SourceDocument::Pdf {
            name: "letter.pdf".to_string(),
            pages: vec!["Only page.".to_string()],
        }];
        let segments = assemble(&files, "").expect("should assemble");
        let ContentSegment::Text(text) = &segments[0] else {
            panic!("expected text segment");
        };
        assert!(!text.contains("Page Break"));
    }

    #[test]
    fn unsupported_or_empty_files_are_rejected_not_dropped() {
        let not_an_image = SourceDocument::Image {
            name: "notes.txt".to_string(),
            mime_type: "text/plain".to_string(),
            bytes: vec![1],
        };
        let err = assemble(&[not_an_image], "").expect_err("unsupported mime must fail");
        assert!(matches!(err, CustodyBuddyError::UnreadableFile(name) if name == "notes.txt"));

        let empty_pdf = SourceDocument::Pdf {
            name: "blank.pdf".to_string(),
            pages: vec![],
        };
        let err = assemble(&[empty_pdf], "text").expect_err("empty pdf must fail");
        assert!(matches!(err, CustodyBuddyError::UnreadableFile(name) if name == "blank.pdf"));
    }
}
