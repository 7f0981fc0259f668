use serde::Deserialize;
use std::fs;
use std::io;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Invalid report configuration: {0}")]
    Parse(#[from] toml::de::Error),
}

/// External configuration for the result writer.
///
/// Stream file names are formed by concatenating the base path, the
/// session `suffix` and the extension token passed to `start_session`.
/// The `append-mode` flag selects the tabular record layout for the
/// descriptor table; without it records are written in the verbose
/// labelled layout.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields, default, rename_all = "kebab-case")]
pub struct ReportConfig {
    /// Base path for the graph-score log.
    pub graph_file: String,
    /// Base path for the mapping/match log.
    pub match_file: String,
    /// Base path for the tab-separated descriptor table.
    pub descriptor_file: String,
    /// Base name for query molecule exports (`<name><suffix>.mol`).
    pub query_out_name: String,
    /// Base name for target molecule exports (`<name><suffix>.mol`).
    pub target_out_name: String,
    /// Filename suffix inserted before the extension of every artifact.
    pub suffix: String,
    /// Selects the tabular descriptor layout (flushed after every record).
    pub append_mode: bool,
    /// Explicit depiction width in pixels; `None` falls back to defaults.
    pub image_width: Option<u32>,
    /// Explicit depiction height in pixels; `None` falls back to defaults.
    pub image_height: Option<u32>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            graph_file: "graph_scores".to_string(),
            match_file: "mcs_mappings".to_string(),
            descriptor_file: "descriptors".to_string(),
            query_out_name: "query".to_string(),
            target_out_name: "target".to_string(),
            suffix: String::new(),
            append_mode: false,
            image_width: None,
            image_height: None,
        }
    }
}

impl ReportConfig {
    /// Parses a configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid TOML or contains unknown
    /// keys.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Loads a configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// The explicit depiction size, if both dimensions are configured.
    pub fn image_size(&self) -> Option<(u32, u32)> {
        match (self.image_width, self.image_height) {
            (Some(w), Some(h)) => Some((w, h)),
            _ => None,
        }
    }
}
