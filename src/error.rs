use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Everything that can go wrong while stamping. The layout core is
/// total over its inputs; all of these come from configuration or the
/// PDF boundary.
#[derive(Debug, Error)]
pub enum StampError {
    #[error("failed to read config {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid config {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to load {path}: {source}")]
    Load {
        path: PathBuf,
        #[source]
        source: lopdf::Error,
    },

    #[error("document has no pages")]
    NoPages,

    #[error("missing or malformed MediaBox")]
    MediaBox,

    #[error("pdf error: {0}")]
    Pdf(#[from] lopdf::Error),

    #[error("failed to save {path}: {source}")]
    Save {
        path: PathBuf,
        #[source]
        source: lopdf::Error,
    },

    #[error("failed to read input directory {path}: {source}")]
    InputDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
