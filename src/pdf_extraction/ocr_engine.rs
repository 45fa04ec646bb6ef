// OCR engine - pdftoppm for rasterisation, tesseract for recognition
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;
use thiserror::Error;
use tracing::{debug, info};

use super::page_renderer::SystemPdfRenderer;
use crate::config::AuditorConfig;

#[derive(Debug, Error)]
pub enum OcrError {
    #[error("could not run {tool}: {source}")]
    Spawn {
        tool: &'static str,
        #[source]
        source: std::io::Error,
    },
    #[error("{tool} failed: {stderr}")]
    ToolFailed { tool: &'static str, stderr: String },
    #[error("page rendering produced no images")]
    NoImages,
    #[error("could not decode rendered page {}: {source}", .path.display())]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Recognises text on the first `page_limit` pages of a scanned PDF.
pub trait OcrBackend {
    fn recognize(&self, pdf: &[u8], page_limit: u32) -> Result<String, OcrError>;
}

pub struct TesseractOcr {
    renderer: SystemPdfRenderer,
    tesseract: PathBuf,
    language: String,
}

impl TesseractOcr {
    pub fn new(config: &AuditorConfig) -> Self {
        Self {
            renderer: SystemPdfRenderer::new(config.tools.pdftoppm(), config.ocr.dpi),
            tesseract: config.tools.tesseract_cmd.clone(),
            language: config.ocr.language.clone(),
        }
    }

    /// Probe both external binaries
    pub fn is_available(config: &AuditorConfig) -> ToolStatus {
        ToolStatus {
            pdftoppm: probe(&config.tools.pdftoppm(), "-v"),
            tesseract: probe(&config.tools.tesseract_cmd, "--version"),
        }
    }

    fn recognize_image(&self, image_path: &Path) -> Result<String, OcrError> {
        let output = Command::new(&self.tesseract)
            .arg(image_path)
            .arg("stdout")
            .arg("-l")
            .arg(&self.language)
            .output()
            .map_err(|source| OcrError::Spawn {
                tool: "tesseract",
                source,
            })?;

        if !output.status.success() {
            return Err(OcrError::ToolFailed {
                tool: "tesseract",
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl OcrBackend for TesseractOcr {
    fn recognize(&self, pdf: &[u8], page_limit: u32) -> Result<String, OcrError> {
        let temp_dir = TempDir::new()?;
        let pdf_path = temp_dir.path().join("input.pdf");
        std::fs::write(&pdf_path, pdf)?;

        let pages = self.renderer.render_pages(&pdf_path, page_limit, temp_dir.path())?;
        info!("OCR over {} rendered page(s), language {}", pages.len(), self.language);

        let mut text = String::new();
        for page in &pages {
            let prepared = to_grayscale(page)?;
            let page_text = self.recognize_image(&prepared)?;
            debug!("{}: {} chars recognised", page.display(), page_text.len());
            text.push_str(&page_text);
            text.push('\n');
        }
        Ok(text)
    }
}

/// Grayscale copy next to the original; tesseract binarises it better.
fn to_grayscale(path: &Path) -> Result<PathBuf, OcrError> {
    let image = image::open(path).map_err(|source| OcrError::Image {
        path: path.to_path_buf(),
        source,
    })?;
    let gray_path = path.with_extension("gray.png");
    image
        .grayscale()
        .save(&gray_path)
        .map_err(|source| OcrError::Image {
            path: gray_path.clone(),
            source,
        })?;
    Ok(gray_path)
}

fn probe(binary: &Path, flag: &str) -> bool {
    Command::new(binary).arg(flag).output().is_ok()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolStatus {
    pub pdftoppm: bool,
    pub tesseract: bool,
}

impl ToolStatus {
    pub fn ready(&self) -> bool {
        self.pdftoppm && self.tesseract
    }
}
