//! parcel-auditor: field extraction and classification for Brazilian tax
//! installment-plan (parcelamento) PDF statements, with an OCR fallback for
//! scanned documents and XLSX export of the results.

pub mod batch;
pub mod classifier;
pub mod config;
pub mod fields;
pub mod pdf_extraction;
pub mod report;
pub mod types;

pub use batch::{run_batch, run_paths, BatchOutcome, DocumentFailure};
pub use config::AuditorConfig;
pub use pdf_extraction::{ExtractionError, ExtractionRouter};
pub use types::{
    Classification, ExtractionMethod, ExtractionRecord, Modality, UploadedDocument, NOT_IDENTIFIED,
};
