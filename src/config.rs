// Configuration for parcel-auditor
use anyhow::{ensure, Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_ENV: &str = "PARCEL_AUDITOR_CONFIG";
pub const CONFIG_FILE_NAME: &str = "config.toml";
pub const APP_DIR: &str = "parcel-auditor";

/// Everything the extractor needs, resolved once at start-up and passed down.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuditorConfig {
    #[serde(default = "default_page_limit")]
    pub page_limit: u32,
    #[serde(default = "default_ocr_threshold")]
    pub ocr_threshold: usize,
    #[serde(default)]
    pub ocr: OcrConfig,
    #[serde(default)]
    pub tools: ToolsConfig,
    #[serde(default)]
    pub rules: RulesConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OcrConfig {
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default = "default_dpi")]
    pub dpi: u32,
}

/// Locations of the external rasterisation and recognition binaries
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ToolsConfig {
    #[serde(default = "default_poppler_path")]
    pub poppler_path: Option<PathBuf>,
    #[serde(default = "default_tesseract_cmd")]
    pub tesseract_cmd: PathBuf,
}

/// Optional members of the rule tables
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RulesConfig {
    #[serde(default = "default_true")]
    pub pgfn_modality: bool,
    #[serde(default = "default_true")]
    pub cpss_code: bool,
}

fn default_page_limit() -> u32 { 5 }
fn default_ocr_threshold() -> usize { 50 }
fn default_language() -> String { "por".to_string() }
fn default_dpi() -> u32 { 300 }
fn default_true() -> bool { true }

fn default_poppler_path() -> Option<PathBuf> {
    if cfg!(windows) {
        Some(PathBuf::from(r"C:\poppler-24.02.0\Library\bin"))
    } else {
        None
    }
}

fn default_tesseract_cmd() -> PathBuf {
    if cfg!(windows) {
        PathBuf::from(r"C:\Program Files\Tesseract-OCR\tesseract.exe")
    } else {
        PathBuf::from("tesseract")
    }
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            language: default_language(),
            dpi: default_dpi(),
        }
    }
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            poppler_path: default_poppler_path(),
            tesseract_cmd: default_tesseract_cmd(),
        }
    }
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            pgfn_modality: true,
            cpss_code: true,
        }
    }
}

impl Default for AuditorConfig {
    fn default() -> Self {
        Self {
            page_limit: default_page_limit(),
            ocr_threshold: default_ocr_threshold(),
            ocr: OcrConfig::default(),
            tools: ToolsConfig::default(),
            rules: RulesConfig::default(),
        }
    }
}

impl ToolsConfig {
    /// Full path to `pdftoppm`, honouring `poppler_path` when set
    pub fn pdftoppm(&self) -> PathBuf {
        let exe = if cfg!(windows) { "pdftoppm.exe" } else { "pdftoppm" };
        match &self.poppler_path {
            Some(dir) => dir.join(exe),
            None => PathBuf::from(exe),
        }
    }
}

impl AuditorConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would silently disable a pipeline step.
    /// `pdftoppm -l 0` renders every page and a zero threshold never OCRs.
    pub fn validate(&self) -> Result<()> {
        ensure!(self.page_limit >= 1, "page_limit must be at least 1");
        ensure!(self.ocr_threshold >= 1, "ocr_threshold must be at least 1");
        ensure!(self.ocr.dpi >= 1, "ocr.dpi must be at least 1");
        Ok(())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("parsing config {}", path.display()))
    }

    /// Resolve configuration: explicit path, then `$PARCEL_AUDITOR_CONFIG`,
    /// then the user config dir, then built-in defaults.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load_from(path);
        }
        if let Ok(path) = env::var(CONFIG_ENV) {
            return Self::load_from(Path::new(&path));
        }
        if let Some(path) = default_config_path() {
            if path.exists() {
                tracing::debug!("loading config from {}", path.display());
                return Self::load_from(&path);
            }
        }
        Ok(Self::default())
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE_NAME))
}
