// Sequential batch over uploaded documents
use serde::Serialize;
use std::path::PathBuf;
use tracing::{info, warn};

use crate::pdf_extraction::{ExtractionError, ExtractionRouter, OcrBackend, TextLayer};
use crate::types::{ExtractionRecord, UploadedDocument};

/// A document that produced no record
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentFailure {
    pub file_name: String,
    pub message: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchOutcome {
    pub records: Vec<ExtractionRecord>,
    pub failures: Vec<DocumentFailure>,
}

impl BatchOutcome {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn fail(&mut self, file_name: impl Into<String>, message: impl std::fmt::Display) {
        let file_name = file_name.into();
        let message = format!("Error processing {}: {}", file_name, message);
        warn!("{}", message);
        self.failures.push(DocumentFailure { file_name, message });
    }
}

/// Run every document in upload order. A failure skips that document only.
pub fn run_batch<T, O>(router: &ExtractionRouter<T, O>, documents: &[UploadedDocument]) -> BatchOutcome
where
    T: TextLayer,
    O: OcrBackend,
{
    let mut outcome = BatchOutcome::default();
    let total = documents.len();

    for (index, document) in documents.iter().enumerate() {
        info!("[{}/{}] {}", index + 1, total, document.file_name);
        match router.extract(document) {
            Ok(record) => outcome.records.push(record),
            Err(e) => outcome.fail(&document.file_name, e),
        }
    }

    outcome
}

/// Same as [`run_batch`] but reads each upload from disk as it goes, so an
/// unreadable file is reported like any other per-document failure.
pub fn run_paths<T, O>(router: &ExtractionRouter<T, O>, paths: &[PathBuf]) -> BatchOutcome
where
    T: TextLayer,
    O: OcrBackend,
{
    let mut outcome = BatchOutcome::default();
    let total = paths.len();

    for (index, path) in paths.iter().enumerate() {
        info!("[{}/{}] {}", index + 1, total, path.display());
        let result = UploadedDocument::from_path(path)
            .map_err(ExtractionError::from)
            .and_then(|document| router.extract(&document));
        match result {
            Ok(record) => outcome.records.push(record),
            Err(e) => outcome.fail(path.display().to_string(), e),
        }
    }

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AuditorConfig;
    use crate::pdf_extraction::OcrError;

    struct NoText;

    impl TextLayer for NoText {
        fn read_pages(&self, _pdf: &[u8], _page_limit: u32) -> String {
            String::new()
        }
    }

    struct BrokenOcr;

    impl OcrBackend for BrokenOcr {
        fn recognize(&self, _pdf: &[u8], _page_limit: u32) -> Result<String, OcrError> {
            Err(OcrError::NoImages)
        }
    }

    #[test]
    fn test_unreadable_path_is_reported() {
        let router = ExtractionRouter::with_backends(&AuditorConfig::default(), NoText, BrokenOcr);
        let outcome = run_paths(&router, &[PathBuf::from("/definitely/missing.pdf")]);
        assert!(outcome.records.is_empty());
        assert_eq!(outcome.failures.len(), 1);
        assert!(outcome.failures[0].message.contains("missing.pdf"));
        assert!(!outcome.is_clean());
    }

    #[test]
    fn test_ocr_failure_names_file() {
        let router = ExtractionRouter::with_backends(&AuditorConfig::default(), NoText, BrokenOcr);
        let docs = vec![UploadedDocument::new("scan.pdf", vec![1, 2, 3])];
        let outcome = run_batch(&router, &docs);
        assert_eq!(outcome.failures[0].file_name, "scan.pdf");
        assert!(outcome.failures[0].message.starts_with("Error processing scan.pdf"));
    }
}
