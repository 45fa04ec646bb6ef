// tests/text_layer.rs - real PDFs built in memory with lopdf
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};

use parcel_auditor::pdf_extraction::{LopdfTextLayer, TextLayer};

fn page_count(pdf: &[u8]) -> usize {
    Document::load_mem(pdf)
        .map(|doc| doc.get_pages().len())
        .unwrap_or(0)
}

/// One page per entry, each drawing its string with Courier
fn build_pdf(pages: &[&str]) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
        },
    });

    let mut kids: Vec<Object> = Vec::new();
    for text in pages {
        let content = Content {
            operations: vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 12.into()]),
                Operation::new("Td", vec![72.into(), 720.into()]),
                Operation::new("Tj", vec![Object::string_literal(*text)]),
                Operation::new("ET", vec![]),
            ],
        };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).unwrap();
    bytes
}

#[test]
fn test_reads_embedded_text() {
    let pdf = build_pdf(&["Saldo devedor R$ 1.234,56"]);
    let text = LopdfTextLayer.read_pages(&pdf, 5);
    assert!(text.contains("Saldo devedor"), "got {:?}", text);
    assert!(text.contains("1.234,56"));
}

#[test]
fn test_page_limit_is_respected() {
    let pdf = build_pdf(&["FIRSTPAGE", "SECONDPAGE", "THIRDPAGE"]);
    assert_eq!(page_count(&pdf), 3);

    let text = LopdfTextLayer.read_pages(&pdf, 2);
    assert!(text.contains("FIRSTPAGE"));
    assert!(text.contains("SECONDPAGE"));
    assert!(!text.contains("THIRDPAGE"));
}

#[test]
fn test_pages_are_separated_by_line_breaks() {
    let pdf = build_pdf(&["ALPHA", "BETA"]);
    let text = LopdfTextLayer.read_pages(&pdf, 5);
    let alpha = text.find("ALPHA").unwrap();
    let beta = text.find("BETA").unwrap();
    assert!(alpha < beta);
    assert!(text[alpha..beta].contains('\n'));
}

#[test]
fn test_header_only_pdf_reads_as_empty() {
    // Broken files are handed to OCR, never surfaced as text errors
    let text = LopdfTextLayer.read_pages(b"%PDF-1.5\n%\xE2\xE3\xCF\xD3\n", 5);
    assert_eq!(text, "");
    assert_eq!(page_count(b"%PDF-1.5\n"), 0);
}
