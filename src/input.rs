//! Layout input documents
//!
//! User-supplied layout configuration in TOML form. Axes are declared as an
//! `[[axes]]` array of tables so declaration order survives parsing;
//! constraint resolution is order-sensitive.

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::layout::AxisType;

/// Errors that can occur when loading or parsing layout documents
#[derive(Error, Debug)]
pub enum InputError {
    #[error("Failed to read layout file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse layout TOML: {0}")]
    Parse(#[from] toml::de::Error),
}

/// One axis declaration as supplied by the user
#[derive(Debug, Clone, Deserialize)]
pub struct AxisDecl {
    pub id: String,

    #[serde(rename = "type")]
    pub axis_type: Option<AxisType>,

    /// Counter axis this axis wants to scale with
    pub scale_with: Option<String>,

    /// Data units of this axis per data unit of the target; defaults to 1
    /// when a link is requested without a ratio
    pub scale_ratio: Option<f64>,
}

/// A layout document: axes in declaration order
#[derive(Debug, Clone, Deserialize)]
pub struct LayoutDoc {
    pub title: Option<String>,

    #[serde(default)]
    pub axes: Vec<AxisDecl>,
}

impl LayoutDoc {
    /// Load a layout document from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, InputError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load a layout document from a TOML string
    pub fn from_str(content: &str) -> Result<Self, InputError> {
        Ok(toml::from_str(content)?)
    }
}
