// Page rasterisation using poppler's pdftoppm
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::debug;

use super::ocr_engine::OcrError;

pub struct SystemPdfRenderer {
    pdftoppm: PathBuf,
    dpi: u32,
}

impl SystemPdfRenderer {
    pub fn new(pdftoppm: PathBuf, dpi: u32) -> Self {
        Self { pdftoppm, dpi }
    }

    /// Render pages `1..=page_limit` of `pdf_path` as PNGs inside `out_dir`,
    /// returned in page order.
    pub fn render_pages(
        &self,
        pdf_path: &Path,
        page_limit: u32,
        out_dir: &Path,
    ) -> Result<Vec<PathBuf>, OcrError> {
        let output_prefix = out_dir.join("page");
        debug!(
            "rendering pages 1-{} at {} dpi with {}",
            page_limit,
            self.dpi,
            self.pdftoppm.display()
        );

        let output = Command::new(&self.pdftoppm)
            .arg("-png")
            .arg("-r")
            .arg(self.dpi.to_string())
            .arg("-f")
            .arg("1")
            .arg("-l")
            .arg(page_limit.to_string())
            .arg(pdf_path)
            .arg(&output_prefix)
            .output()
            .map_err(|source| OcrError::Spawn {
                tool: "pdftoppm",
                source,
            })?;

        if !output.status.success() {
            return Err(OcrError::ToolFailed {
                tool: "pdftoppm",
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let pages = collect_page_images(out_dir)?;
        if pages.is_empty() {
            return Err(OcrError::NoImages);
        }
        Ok(pages)
    }
}

/// pdftoppm names its output `page-1.png`, `page-01.png` or `page-001.png`
/// depending on the page count, so order by the parsed number.
fn collect_page_images(dir: &Path) -> Result<Vec<PathBuf>, OcrError> {
    let mut numbered: Vec<(u32, PathBuf)> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.extension().and_then(|ext| ext.to_str()) == Some("png"))
        .filter_map(|path| page_number(&path).map(|n| (n, path)))
        .collect();

    numbered.sort_by_key(|(n, _)| *n);
    Ok(numbered.into_iter().map(|(_, path)| path).collect())
}

fn page_number(path: &Path) -> Option<u32> {
    let stem = path.file_stem()?.to_str()?;
    stem.rsplit('-').next()?.parse().ok()
}
