use crate::inspect::{DocumentInspector, Verdict};
use lopdf::Document;
use std::path::Path;

/// Structural inspector for PDF documents
///
/// Loads the file through lopdf and counts pages. The check is black-box:
/// it confirms the container parses and is non-empty, nothing about the
/// content itself.
pub struct PdfInspector;

impl DocumentInspector for PdfInspector {
    fn inspect(&self, path: &Path) -> Verdict {
        let document = match Document::load(path) {
            Ok(document) => document,
            Err(e) => {
                return Verdict::Invalid {
                    reason: format!("unreadable document: {}", e),
                }
            }
        };

        let content_units = document.get_pages().len();
        if content_units == 0 {
            Verdict::Invalid {
                reason: "document has zero pages".to_string(),
            }
        } else {
            Verdict::Valid { content_units }
        }
    }
}
