use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::StampError;

/// Typography and batch settings, read from a TOML file. All layout
/// fields are required; a missing or malformed config aborts the whole
/// batch, since it applies to every document uniformly.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// The raw statement text, with `**bold**` markers and `\n`
    /// paragraph breaks.
    pub statement: String,

    /// Font size in points.
    pub font_size: f64,

    pub left_margin_pts: f64,
    pub right_margin_pts: f64,

    /// Vertical advance per line / per paragraph break, as multiples
    /// of the font size.
    pub line_height_multiplier: f64,
    pub paragraph_gap_multiplier: f64,

    /// Where the first baseline sits, measured down from the page top.
    pub insert_y_from_top_pts: f64,

    /// Text color, each channel in [0, 1].
    pub text_color_rgb: [f64; 3],

    /// Directory scanned for PDFs when none are given on the command
    /// line, and directory stamped copies are written to.
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,

    /// Appended to the output filename stem.
    #[serde(default)]
    pub output_suffix: String,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self, StampError> {
        let content = fs::read_to_string(path).map_err(|source| StampError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| StampError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }
}
