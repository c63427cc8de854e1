mod config;
mod error;
mod layout;
mod line;
mod markup;
mod metrics;
mod pdf;

pub use config::Config;
pub use error::StampError;
pub use line::{RenderedLine, StyledRun, StyledSegment, StyledWord, TextLine};
pub use metrics::{FontMetrics, HELVETICA, HELVETICA_BOLD};

use std::path::{Path, PathBuf};

/// Parse `**bold**` markers into an ordered list of styled segments.
pub fn parse(text: &str) -> Vec<StyledSegment> {
    markup::parse(text)
}

/// Wrap marked-up text into rendered lines no wider than `max_width`.
///
/// `measure` returns the width of a string in the regular or bold face
/// at the caller's font size, in the same unit as `max_width`.
pub fn wrap<F>(text: &str, measure: F, max_width: f64) -> Vec<RenderedLine>
where
    F: Fn(&str, bool) -> f64,
{
    layout::wrap(text, measure, max_width)
}

/// Stamp the configured statement onto the first page of `input` and
/// save the result to the configured output directory. Returns the
/// output path.
pub fn stamp_file(input: &Path, config: &Config) -> Result<PathBuf, StampError> {
    pdf::stamp_file(input, config)
}
