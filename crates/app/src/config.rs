//! Configuration for the huffpress command-line tool.
//!
//! Handles parsing command-line arguments and filling in defaults.
//!
//! # Philosophy
//!
//! The tool should work with ZERO arguments: it then generates a sample
//! input, compresses it, decompresses it and verifies the result. The seed
//! used for the sample is always printed so runs are reproducible.

use std::path::PathBuf;

/// What the tool does with its input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Input bytes -> container
    Compress,
    /// Container -> original bytes
    Decompress,
    /// Compress, decompress and compare, in memory
    RoundTrip,
}

impl Mode {
    fn parse(arg: &str) -> Option<Self> {
        match arg {
            "compress" | "c" => Some(Mode::Compress),
            "decompress" | "d" => Some(Mode::Decompress),
            "roundtrip" | "r" => Some(Mode::RoundTrip),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Mode::Compress => "compress",
            Mode::Decompress => "decompress",
            Mode::RoundTrip => "roundtrip",
        }
    }
}

/// Complete configuration for one run.
#[derive(Debug, Clone)]
pub struct Config {
    pub mode: Mode,

    // === Files ===
    /// Input file path (None = generate sample)
    pub input_file: Option<PathBuf>,

    /// Output file path (None = no output file in roundtrip mode)
    pub output_file: Option<PathBuf>,

    // === Sample generation ===
    /// Seed for the generated sample
    pub seed: u64,

    /// Size of the generated sample in bytes
    pub sample_bytes: usize,

    // === Behavior ===
    /// Log verbosity: 0 = warnings, 1 = info, 2 = debug, 3+ = trace
    pub verbosity: u8,

    /// Only log errors
    pub quiet: bool,

    /// Whether to print detailed config
    pub print_config: bool,

    /// Whether to print the stats summary
    pub print_stats: bool,

    /// Print stats as key=value lines instead of the summary
    pub stats_text: bool,
}

impl Config {
    /// Parse configuration from command-line arguments (program name excluded).
    ///
    /// The first positional argument selects the mode; without one the tool
    /// runs a roundtrip. If --seed is not given, a time-based seed is used.
    pub fn from_args(args: &[String]) -> Result<Self, String> {
        let mut mode: Option<Mode> = None;
        let mut input_file: Option<PathBuf> = None;
        let mut output_file: Option<PathBuf> = None;
        let mut seed: Option<u64> = None;
        let mut sample_bytes: Option<usize> = None;
        let mut verbosity: u8 = 0;
        let mut quiet = false;
        let mut print_config = false;
        let mut print_stats = true;
        let mut stats_text = false;

        let mut i = 0;
        while i < args.len() {
            match args[i].as_str() {
                "--in" | "-i" => {
                    i += 1;
                    if i >= args.len() {
                        return Err("--in requires a path".to_string());
                    }
                    input_file = Some(PathBuf::from(&args[i]));
                }
                "--out" | "-o" => {
                    i += 1;
                    if i >= args.len() {
                        return Err("--out requires a path".to_string());
                    }
                    output_file = Some(PathBuf::from(&args[i]));
                }
                "--seed" => {
                    i += 1;
                    if i >= args.len() {
                        return Err("--seed requires a number".to_string());
                    }
                    seed = Some(args[i].parse().map_err(|_| "invalid seed")?);
                }
                "--sample-bytes" => {
                    i += 1;
                    if i >= args.len() {
                        return Err("--sample-bytes requires a number".to_string());
                    }
                    sample_bytes = Some(args[i].parse().map_err(|_| "invalid sample-bytes")?);
                }
                "--verbose" | "-v" => {
                    verbosity = verbosity.saturating_add(1);
                }
                "-vv" => {
                    verbosity = verbosity.saturating_add(2);
                }
                "-vvv" => {
                    verbosity = verbosity.saturating_add(3);
                }
                "--quiet" | "-q" => {
                    quiet = true;
                }
                "--print-config" => {
                    print_config = true;
                }
                "--no-stats" => {
                    print_stats = false;
                }
                "--stats-text" => {
                    stats_text = true;
                }
                "--help" | "-h" => {
                    print_help();
                    std::process::exit(0);
                }
                other => match Mode::parse(other) {
                    Some(parsed) if mode.is_none() => mode = Some(parsed),
                    Some(_) => return Err(format!("mode given twice: {}", other)),
                    None => return Err(format!("unknown argument: {}", other)),
                },
            }
            i += 1;
        }

        let mode = mode.unwrap_or(Mode::RoundTrip);

        if mode == Mode::Decompress && input_file.is_none() {
            return Err("decompress requires --in <PATH>".to_string());
        }

        let output_file = output_file.or_else(|| match mode {
            Mode::Compress => Some(PathBuf::from("./out.huff")),
            Mode::Decompress => Some(PathBuf::from("./out.bin")),
            Mode::RoundTrip => None,
        });

        // Determine seed (explicit or time-based)
        let seed = seed.unwrap_or_else(|| {
            use std::time::{SystemTime, UNIX_EPOCH};
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_millis() as u64)
                .unwrap_or(0)
        });

        Ok(Config {
            mode,
            input_file,
            output_file,
            seed,
            sample_bytes: sample_bytes.unwrap_or(256 * 1024), // 256 KiB
            verbosity,
            quiet,
            print_config,
            print_stats,
            stats_text,
        })
    }

    /// Print the configuration in human-readable form.
    pub fn print(&self) {
        println!("=== Configuration ===");
        println!("Mode:        {}", self.mode.name());
        match &self.input_file {
            Some(path) => println!("Input file:  {}", path.display()),
            None => println!("Input file:  (generate {} sample bytes)", self.sample_bytes),
        }
        match &self.output_file {
            Some(path) => println!("Output file: {}", path.display()),
            None => println!("Output file: (none)"),
        }
        println!("Seed: {}", self.seed);
        println!("Verbosity: {}", self.verbosity);
        println!();
    }
}

fn print_help() {
    println!("huffpress: Huffman compression with a self-describing tree header");
    println!();
    println!("USAGE:");
    println!("    huffpress [MODE] [OPTIONS]");
    println!();
    println!("MODES:");
    println!("    compress, c             Compress input to a container");
    println!("    decompress, d           Restore the original bytes from a container");
    println!("    roundtrip, r            Compress, decompress and verify (default)");
    println!();
    println!("OPTIONS:");
    println!("    --in, -i <PATH>         Input file (default: generate sample)");
    println!("    --out, -o <PATH>        Output file (default: ./out.huff or ./out.bin)");
    println!("    --seed <N>              Seed for the generated sample");
    println!("    --sample-bytes <N>      Size of the generated sample (default: 262144)");
    println!();
    println!("    --verbose, -v           More log output (repeatable)");
    println!("    --quiet, -q             Only log errors");
    println!("    --print-config          Print resolved configuration");
    println!("    --no-stats              Don't print the stats summary");
    println!("    --stats-text            Print stats as key=value lines");
    println!("    --help, -h              Print this help");
    println!();
    println!("EXAMPLES:");
    println!("    huffpress                                   # Roundtrip a random sample");
    println!("    huffpress --seed 42                         # Deterministic sample");
    println!("    huffpress compress --in a.txt --out a.huff  # Compress a file");
    println!("    huffpress decompress --in a.huff --out a.txt");
    println!();
}
