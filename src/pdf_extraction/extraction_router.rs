// Hybrid extraction: text layer first, OCR when the page is only an image
//
// The router reads the embedded text of the first pages. When that yields
// fewer characters than the configured threshold the document is treated as
// a scan and the OCR backend is consulted for the same page range.

use thiserror::Error;
use tracing::{debug, info};

use super::ocr_engine::{OcrBackend, OcrError, TesseractOcr};
use super::text_layer::{LopdfTextLayer, TextLayer};
use crate::classifier::Classifier;
use crate::config::AuditorConfig;
use crate::fields;
use crate::types::{ExtractionMethod, ExtractionRecord, UploadedDocument};

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("OCR failed: {0}")]
    Ocr(#[from] OcrError),
    #[error("could not read upload: {0}")]
    Io(#[from] std::io::Error),
}

/// Text gathered for one document and how it was obtained
#[derive(Debug, Clone)]
pub struct ExtractedText {
    pub text: String,
    pub method: ExtractionMethod,
}

pub struct ExtractionRouter<T = LopdfTextLayer, O = TesseractOcr> {
    text_layer: T,
    ocr: O,
    classifier: Classifier,
    page_limit: u32,
    ocr_threshold: usize,
}

impl ExtractionRouter {
    /// Router with the real lopdf + tesseract backends
    pub fn from_config(config: &AuditorConfig) -> Self {
        Self::with_backends(config, LopdfTextLayer, TesseractOcr::new(config))
    }
}

impl<T: TextLayer, O: OcrBackend> ExtractionRouter<T, O> {
    pub fn with_backends(config: &AuditorConfig, text_layer: T, ocr: O) -> Self {
        Self {
            text_layer,
            ocr,
            classifier: Classifier::new(&config.rules),
            page_limit: config.page_limit,
            ocr_threshold: config.ocr_threshold,
        }
    }

    /// Text layer, falling back to OCR below the threshold
    pub fn gather_text(&self, pdf: &[u8]) -> Result<ExtractedText, OcrError> {
        let mut text = self.text_layer.read_pages(pdf, self.page_limit);
        let length = text.chars().count();
        debug!("text layer: {} chars over {} page(s)", length, self.page_limit);

        if length >= self.ocr_threshold {
            return Ok(ExtractedText {
                text,
                method: ExtractionMethod::DigitalText,
            });
        }

        info!("only {} chars of text (< {}), treating as scan", length, self.ocr_threshold);
        let recognised = self.ocr.recognize(pdf, self.page_limit)?;
        text.push_str(&recognised);
        Ok(ExtractedText {
            text,
            method: ExtractionMethod::OcrScan,
        })
    }

    /// Fields and categories from already-gathered text
    pub fn build_record(&self, file_name: &str, extracted: &ExtractedText) -> ExtractionRecord {
        let text = extracted.text.as_str();
        ExtractionRecord {
            file_name: file_name.to_string(),
            process_number: fields::process_number(text),
            modality: self.classifier.modality(text),
            classification: self.classifier.classification(text),
            balance: fields::balance(text),
            method: extracted.method,
        }
    }

    pub fn extract(&self, document: &UploadedDocument) -> Result<ExtractionRecord, ExtractionError> {
        let extracted = self.gather_text(&document.bytes)?;
        Ok(self.build_record(&document.file_name, &extracted))
    }
}
