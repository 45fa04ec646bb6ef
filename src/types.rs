// Core types and constants for parcel-auditor
use serde::Serialize;
use std::fmt;
use std::path::Path;

pub const NOT_IDENTIFIED: &str = "not identified";

/// A PDF handed to the auditor, exactly as uploaded.
#[derive(Debug, Clone)]
pub struct UploadedDocument {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl UploadedDocument {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
        }
    }

    pub fn from_path(path: &Path) -> std::io::Result<Self> {
        let bytes = std::fs::read(path)?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self { file_name, bytes })
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub enum Modality {
    #[serde(rename = "Simplified")]
    Simplified,
    #[serde(rename = "Law 13.485")]
    Law13485,
    #[serde(rename = "Ordinary/Special")]
    OrdinarySpecial,
    #[serde(rename = "PGFN")]
    Pgfn,
    #[serde(rename = "Unknown/Other")]
    Other,
}

impl Modality {
    pub fn label(&self) -> &'static str {
        match self {
            Modality::Simplified => "Simplified",
            Modality::Law13485 => "Law 13.485",
            Modality::OrdinarySpecial => "Ordinary/Special",
            Modality::Pgfn => "PGFN",
            Modality::Other => "Unknown/Other",
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub enum Classification {
    #[serde(rename = "PASEP")]
    Pasep,
    #[serde(rename = "Social-Security (Patronal/Segurado)")]
    SocialSecurityPatronal,
    #[serde(rename = "Social-Security Special (Law 13.485)")]
    SocialSecuritySpecial,
    #[serde(rename = "Social-Security")]
    SocialSecurity,
    #[serde(rename = "To verify")]
    ToVerify,
}

impl Classification {
    pub fn label(&self) -> &'static str {
        match self {
            Classification::Pasep => "PASEP",
            Classification::SocialSecurityPatronal => "Social-Security (Patronal/Segurado)",
            Classification::SocialSecuritySpecial => "Social-Security Special (Law 13.485)",
            Classification::SocialSecurity => "Social-Security",
            Classification::ToVerify => "To verify",
        }
    }
}

/// How the text behind a record was obtained
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub enum ExtractionMethod {
    #[serde(rename = "digital-text")]
    DigitalText,
    #[serde(rename = "OCR-scan")]
    OcrScan,
}

impl ExtractionMethod {
    pub fn label(&self) -> &'static str {
        match self {
            ExtractionMethod::DigitalText => "digital-text",
            ExtractionMethod::OcrScan => "OCR-scan",
        }
    }
}

macro_rules! display_via_label {
    ($($ty:ty),*) => {
        $(impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        })*
    };
}

display_via_label!(Modality, Classification, ExtractionMethod);

/// One row of the audit report. Built once per document and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtractionRecord {
    pub file_name: String,
    pub process_number: String,
    pub modality: Modality,
    pub classification: Classification,
    pub balance: f64,
    pub method: ExtractionMethod,
}

impl ExtractionRecord {
    /// Cell values in report column order. Shared by the terminal table and
    /// the spreadsheet so both stay aligned.
    pub fn columns(&self) -> [String; 6] {
        [
            self.file_name.clone(),
            self.process_number.clone(),
            self.modality.to_string(),
            self.classification.to_string(),
            format_brl(self.balance),
            self.method.to_string(),
        ]
    }
}

pub const COLUMN_HEADERS: [&str; 6] = [
    "File",
    "Process",
    "Modality",
    "Classification",
    "Balance (R$)",
    "Method",
];

/// Format a value the way e-CAC statements print it: `1.234,56`
pub fn format_brl(value: f64) -> String {
    let value = if value.is_finite() { value.max(0.0) } else { 0.0 };
    // Works on the decimal text so amounts past u64 keep every digit
    let fixed = format!("{:.2}", value);
    let (int_part, frac) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    format!("{},{}", grouped, frac)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_brl() {
        assert_eq!(format_brl(0.0), "0,00");
        assert_eq!(format_brl(234.56), "234,56");
        assert_eq!(format_brl(1234.56), "1.234,56");
        assert_eq!(format_brl(1_000_000.0), "1.000.000,00");
        assert_eq!(format_brl(0.999), "1,00");
    }

    #[test]
    fn test_format_brl_beyond_u64_range() {
        assert_eq!(format_brl(2e17), "200.000.000.000.000.000,00");
        assert_eq!(format_brl(1e20), "100.000.000.000.000.000.000,00");
    }

    #[test]
    fn test_serialized_values_match_labels() {
        for method in [ExtractionMethod::DigitalText, ExtractionMethod::OcrScan] {
            assert_eq!(serde_json::to_value(method).unwrap(), method.label());
        }
        for modality in [
            Modality::Simplified,
            Modality::Law13485,
            Modality::OrdinarySpecial,
            Modality::Pgfn,
            Modality::Other,
        ] {
            assert_eq!(serde_json::to_value(modality).unwrap(), modality.label());
        }
        for class in [
            Classification::Pasep,
            Classification::SocialSecurityPatronal,
            Classification::SocialSecuritySpecial,
            Classification::SocialSecurity,
            Classification::ToVerify,
        ] {
            assert_eq!(serde_json::to_value(class).unwrap(), class.label());
        }
    }

    #[test]
    fn test_columns_follow_header_order() {
        let record = ExtractionRecord {
            file_name: "a.pdf".into(),
            process_number: "123".into(),
            modality: Modality::Pgfn,
            classification: Classification::Pasep,
            balance: 10.5,
            method: ExtractionMethod::OcrScan,
        };
        let cols = record.columns();
        assert_eq!(cols.len(), COLUMN_HEADERS.len());
        assert_eq!(cols[2], "PGFN");
        assert_eq!(cols[4], "10,50");
        assert_eq!(cols[5], "OCR-scan");
    }

    #[test]
    fn test_from_path_uses_file_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("extrato.pdf");
        std::fs::write(&path, b"%PDF-1.4").unwrap();
        let doc = UploadedDocument::from_path(&path).unwrap();
        assert_eq!(doc.file_name, "extrato.pdf");
        assert_eq!(doc.bytes, b"%PDF-1.4");
    }
}
