use std::fs;
use std::path::{Path, PathBuf};
use std::process::exit;

use clap::Parser;

use stamp::{Config, StampError};

#[derive(Parser)]
#[command(name = "stamp")]
#[command(about = "Stamp a statement onto the first page of PDF files")]
struct Cli {
    /// Input PDF files (defaults to every PDF in the configured input
    /// directory)
    inputs: Vec<PathBuf>,

    /// Path to the TOML configuration file
    #[arg(short, long, default_value = "stamp.toml")]
    config: PathBuf,
}

fn main() {
    let cli = Cli::parse();

    // A bad config applies to every document, so it aborts the batch.
    let config = match Config::load(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            exit(1);
        }
    };

    let inputs = if cli.inputs.is_empty() {
        match discover_pdfs(&config.input_dir) {
            Ok(inputs) => inputs,
            Err(e) => {
                eprintln!("Error: {e}");
                exit(1);
            }
        }
    } else {
        cli.inputs
    };

    if inputs.is_empty() {
        eprintln!("No PDF files found in {}", config.input_dir.display());
        return;
    }

    if let Err(e) = fs::create_dir_all(&config.output_dir) {
        eprintln!("Error creating {}: {e}", config.output_dir.display());
        exit(1);
    }

    // One bad document doesn't stop the rest of the batch.
    let mut failed = false;
    for input in &inputs {
        match stamp::stamp_file(input, &config) {
            Ok(output) => println!("Saved: {}", output.display()),
            Err(e) => {
                eprintln!("Error processing {}: {e}", input.display());
                failed = true;
            }
        }
    }
    if failed {
        exit(1);
    }
}

/// Every `*.pdf` in `dir` (case-insensitive), in sorted order.
fn discover_pdfs(dir: &Path) -> Result<Vec<PathBuf>, StampError> {
    let entries = fs::read_dir(dir).map_err(|source| StampError::InputDir {
        path: dir.to_path_buf(),
        source,
    })?;
    let mut pdfs = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| StampError::InputDir {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        if path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
        {
            pdfs.push(path);
        }
    }
    pdfs.sort();
    Ok(pdfs)
}
