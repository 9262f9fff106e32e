//! huffpress: command-line front end for the Huffman codec.

mod config;
mod input_gen;
mod logger;

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Cursor, Read, Seek};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use huffpress_core::{compress, decompress, CodecStats};
use log::{info, warn};
use thiserror::Error;

use config::{Config, Mode};

/// Failures of one tool run.
#[derive(Debug, Error)]
enum RunError {
    #[error(transparent)]
    Codec(#[from] huffpress_core::Error),

    #[error("cannot open {}: {}", .path.display(), .source)]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("cannot create {}: {}", .path.display(), .source)]
    Create {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("{mode} needs an input path")]
    MissingInput { mode: &'static str },

    #[error("{mode} needs an output path")]
    MissingOutput { mode: &'static str },

    #[error("roundtrip mismatch: {original} bytes in, {restored} bytes out, first difference at {offset}")]
    Mismatch {
        original: usize,
        restored: usize,
        offset: usize,
    },
}

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = match Config::from_args(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {}", e);
            eprintln!("run with --help for usage");
            return ExitCode::from(2);
        }
    };

    logger::init(config.verbosity, config.quiet);

    if config.print_config {
        config.print();
    }

    match run(&config) {
        Ok(stats) => {
            if config.print_stats {
                for s in &stats {
                    if config.stats_text {
                        print!("{}", s.export_text());
                    } else {
                        s.print_summary();
                    }
                }
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("✗ {} failed: {}", config.mode.name(), e);
            ExitCode::FAILURE
        }
    }
}

fn run(config: &Config) -> Result<Vec<CodecStats>, RunError> {
    match config.mode {
        Mode::Compress => {
            let output = required_output(config)?;
            let stats = match &config.input_file {
                Some(path) => compress_to(open(path)?, output)?,
                None => compress_to(Cursor::new(sample(config)), output)?,
            };
            println!(
                "✓ compressed {} bytes into {} bytes ({})",
                stats.input_bytes,
                stats.output_bytes,
                output.display()
            );
            Ok(vec![stats])
        }
        Mode::Decompress => {
            let output = required_output(config)?;
            let input = match &config.input_file {
                Some(path) => open(path)?,
                None => return Err(RunError::MissingInput { mode: "decompress" }),
            };
            let stats = decompress_to(input, output)?;
            println!(
                "✓ restored {} bytes from {} bytes ({})",
                stats.output_bytes,
                stats.input_bytes,
                output.display()
            );
            Ok(vec![stats])
        }
        Mode::RoundTrip => round_trip(config),
    }
}

fn required_output(config: &Config) -> Result<&Path, RunError> {
    config
        .output_file
        .as_deref()
        .ok_or(RunError::MissingOutput {
            mode: config.mode.name(),
        })
}

fn sample(config: &Config) -> Vec<u8> {
    println!(
        "{}",
        input_gen::describe_sample(config.seed, config.sample_bytes)
    );
    input_gen::generate_sample_data(config.seed, config.sample_bytes)
}

fn open(path: &Path) -> Result<BufReader<File>, RunError> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|source| RunError::Open {
            path: path.to_path_buf(),
            source,
        })
}

fn create(path: &Path) -> Result<BufWriter<File>, RunError> {
    File::create(path)
        .map(BufWriter::new)
        .map_err(|source| RunError::Create {
            path: path.to_path_buf(),
            source,
        })
}

fn compress_to<R: Read + Seek>(input: R, path: &Path) -> Result<CodecStats, RunError> {
    let output = create(path)?;
    compress(input, output).map_err(|e| {
        discard(path);
        e.into()
    })
}

/// Partial output of a failed decode is never left behind.
fn decompress_to<R: Read>(input: R, path: &Path) -> Result<CodecStats, RunError> {
    let output = create(path)?;
    decompress(input, output).map_err(|e| {
        discard(path);
        e.into()
    })
}

fn discard(path: &Path) {
    if let Err(e) = fs::remove_file(path) {
        warn!("could not remove partial output {}: {}", path.display(), e);
    }
}

fn round_trip(config: &Config) -> Result<Vec<CodecStats>, RunError> {
    let original = match &config.input_file {
        Some(path) => {
            let mut data = Vec::new();
            open(path)?
                .read_to_end(&mut data)
                .map_err(huffpress_core::Error::from)?;
            data
        }
        None => sample(config),
    };

    let mut container = Vec::new();
    let compress_stats = compress(Cursor::new(original.as_slice()), &mut container)?;

    let mut restored = Vec::new();
    let decompress_stats = decompress(container.as_slice(), &mut restored)?;

    if restored != original {
        let offset = original
            .iter()
            .zip(&restored)
            .position(|(a, b)| a != b)
            .unwrap_or_else(|| original.len().min(restored.len()));
        return Err(RunError::Mismatch {
            original: original.len(),
            restored: restored.len(),
            offset,
        });
    }

    if let Some(path) = &config.output_file {
        fs::write(path, &container).map_err(|source| RunError::Create {
            path: path.clone(),
            source,
        })?;
        info!("wrote container to {}", path.display());
    }

    println!(
        "✓ roundtrip verified: {} bytes -> {} bytes -> {} bytes",
        original.len(),
        container.len(),
        restored.len()
    );
    Ok(vec![compress_stats, decompress_stats])
}
