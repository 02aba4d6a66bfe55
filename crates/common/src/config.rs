use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::api::FormatTag;

/// Server configuration, loaded from TOML. Every field has a default so the
/// server also runs without a config file, against the conventional corpus
/// layout in the working directory.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub corpus: CorpusConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_bind")]
    pub bind: String,

    /// Close a session when no query arrives within this many seconds.
    /// Unset preserves the original protocol behaviour: block forever.
    #[serde(default)]
    pub idle_timeout_secs: Option<u64>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            idle_timeout_secs: None,
        }
    }
}

fn default_bind() -> String {
    "127.0.0.1:12345".into()
}

/// One flat directory per format; searches never recurse into subdirectories.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorpusConfig {
    #[serde(default = "default_text_dir")]
    pub text_dir: PathBuf,
    #[serde(default = "default_pdf_dir")]
    pub pdf_dir: PathBuf,
    #[serde(default = "default_spreadsheet_dir")]
    pub spreadsheet_dir: PathBuf,
    #[serde(default = "default_html_dir")]
    pub html_dir: PathBuf,
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self {
            text_dir: default_text_dir(),
            pdf_dir: default_pdf_dir(),
            spreadsheet_dir: default_spreadsheet_dir(),
            html_dir: default_html_dir(),
        }
    }
}

impl CorpusConfig {
    pub fn dir(&self, tag: FormatTag) -> &Path {
        match tag {
            FormatTag::Text => &self.text_dir,
            FormatTag::Pdf => &self.pdf_dir,
            FormatTag::Spreadsheet => &self.spreadsheet_dir,
            FormatTag::Html => &self.html_dir,
        }
    }
}

fn default_text_dir() -> PathBuf {
    "text_files".into()
}

fn default_pdf_dir() -> PathBuf {
    "pdf_files".into()
}

fn default_spreadsheet_dir() -> PathBuf {
    "excel_files".into()
}

fn default_html_dir() -> PathBuf {
    "html_files".into()
}
