// PDF extraction module
pub mod extraction_router;
pub mod ocr_engine;
pub mod page_renderer;
pub mod text_layer;

pub use extraction_router::{ExtractedText, ExtractionError, ExtractionRouter};
pub use ocr_engine::{OcrBackend, OcrError, TesseractOcr, ToolStatus};
pub use text_layer::{LopdfTextLayer, TextLayer};
