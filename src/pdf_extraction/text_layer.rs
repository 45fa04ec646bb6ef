// Text layer reader - pure Rust via lopdf
use lopdf::Document;
use tracing::debug;

/// Source of embedded (digital) PDF text.
pub trait TextLayer {
    /// Text of pages `1..=page_limit`, one page per line block.
    /// Unreadable input yields an empty string rather than an error.
    fn read_pages(&self, pdf: &[u8], page_limit: u32) -> String;
}

/// Reads the text layer with lopdf
#[derive(Debug, Default, Clone, Copy)]
pub struct LopdfTextLayer;

impl TextLayer for LopdfTextLayer {
    fn read_pages(&self, pdf: &[u8], page_limit: u32) -> String {
        let document = match Document::load_mem(pdf) {
            Ok(doc) => doc,
            Err(e) => {
                debug!("text layer unavailable: {}", e);
                return String::new();
            }
        };
        with_pages(&document, page_limit)
    }
}

fn with_pages(document: &Document, page_limit: u32) -> String {
    let page_numbers: Vec<u32> = document
        .get_pages()
        .keys()
        .copied()
        .take(page_limit as usize)
        .collect();

    let mut text = String::new();
    for page in page_numbers {
        match document.extract_text(&[page]) {
            Ok(page_text) => {
                text.push_str(&page_text);
                text.push('\n');
            }
            Err(e) => debug!("page {} has no readable text: {}", page, e),
        }
    }
    text
}
