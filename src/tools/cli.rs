use std::{fmt::Display, fmt::Formatter};

use clap::Parser;
use log::{info, warn};

/// Verbosity of user information
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verbosity {
    Quiet,
    Errors,
    Warnings,
    Info,
    Debug,
    Trace,
}

impl Verbosity {
    /// Count of -v flags to a verbosity level. No flag means errors only.
    fn from_count(v: u64) -> Self {
        match v {
            0 => Verbosity::Errors,
            1 => Verbosity::Warnings,
            2 => Verbosity::Info,
            3 => Verbosity::Debug,
            _ => Verbosity::Trace,
        }
    }

    pub fn level_filter(self) -> log::LevelFilter {
        match self {
            Verbosity::Quiet => log::LevelFilter::Off,
            Verbosity::Errors => log::LevelFilter::Error,
            Verbosity::Warnings => log::LevelFilter::Warn,
            Verbosity::Info => log::LevelFilter::Info,
            Verbosity::Debug => log::LevelFilter::Debug,
            Verbosity::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Compress, Decompress, Test
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Zip,
    Unzip,
    Test,
}
impl Display for Mode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Define the two output channels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Output {
    File,
    Stdout,
}
impl Display for Output {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug)]
pub struct HufOpts {
    /// Vec of names of files to read for input
    pub files: Vec<String>,
    /// Silently overwrite existing files with the same name
    pub force_overwrite: bool,
    /// Compress/Decompress/Test
    pub op_mode: Mode,
    /// Location where output is sent
    pub output: Output,
    /// Write bare packed bytes plus a separate table file instead of an archive
    pub raw: bool,
    /// Table file used to decompress bare packed bytes
    pub table: Option<String>,
    /// Verbosity of user information
    pub verbose: Verbosity,
}

impl HufOpts {
    pub fn new() -> Self {
        Self {
            files: vec![],
            force_overwrite: false,
            op_mode: Mode::Zip,
            output: Output::File,
            raw: false,
            table: None,
            verbose: Verbosity::Errors,
        }
    }
}

impl Default for HufOpts {
    fn default() -> Self {
        Self::new()
    }
}

/// Command Line Interpretation - uses external CLAP crate.
#[derive(Parser, Debug)]
#[clap(
    version,
    about = "A static Huffman file compressor",
    long_about = "
    Compresses each input file with a Huffman code built from that file's own byte
    frequencies. name.ext is written as name.bin; decompressing name.bin writes
    name_decompressed.txt. By default the code table travels inside the .bin archive.
    With --raw the .bin holds only the packed bits and the table goes to name.tbl,
    which must then be given back with --table to decompress."
)]
pub struct Args {
    /// Files to process
    #[clap()]
    files: Vec<String>,

    /// Compress the input files (default)
    #[clap(short = 'z', long = "compress")]
    compress: bool,

    /// Decompress the input files
    #[clap(short = 'd', long = "decompress", conflicts_with = "compress")]
    decompress: bool,

    /// Compress and decompress in memory, checking the round trip. Nothing is written.
    #[clap(short = 't', long = "test", conflicts_with_all = &["compress", "decompress"])]
    test: bool,

    /// Overwrite existing output files
    #[clap(short = 'f', long = "force")]
    force: bool,

    /// Send output to standard out
    #[clap(short = 'c', long = "stdout")]
    stdout: bool,

    /// Write bare packed bytes and a separate .tbl table file (the .tbl is written even with -c)
    #[clap(long = "raw")]
    raw: bool,

    /// Table file to decompress bare packed bytes with
    #[clap(long = "table", value_name = "PATH")]
    table: Option<String>,

    /// Be verbose (a 2nd -v gives more)
    #[clap(short = 'v', long = "verbose", parse(from_occurrences))]
    verbose: u64,

    /// Suppress all log output
    #[clap(short = 'q', long = "quiet", conflicts_with = "verbose")]
    quiet: bool,
}

impl Args {
    /// Copy the parsed command line into our internal structure.
    pub fn into_opts(self) -> HufOpts {
        let mut opts = HufOpts::new();
        opts.files = self.files;
        if self.compress {
            opts.op_mode = Mode::Zip
        };
        if self.decompress {
            opts.op_mode = Mode::Unzip
        };
        if self.test {
            opts.op_mode = Mode::Test
        };
        opts.force_overwrite = self.force;
        if self.stdout {
            opts.output = Output::Stdout
        };
        opts.raw = self.raw;
        opts.table = self.table;
        opts.verbose = if self.quiet {
            Verbosity::Quiet
        } else {
            Verbosity::from_count(self.verbose)
        };
        opts
    }
}

/// Parse the command line into HufOpts.
pub fn hufopts_init() -> HufOpts {
    Args::parse().into_opts()
}

/// Set the log level from the options and report the settings.
pub fn report_opts(opts: &HufOpts) {
    log::set_max_level(opts.verbose.level_filter());

    info!("---- Initialization Start ----");
    info!("Verbosity set to {}", log::max_level());
    info!("Operational mode set to {}", opts.op_mode);
    info!("Output goes to {}", opts.output);
    if opts.files.is_empty() {
        warn!("No input files given");
    }
    if opts.force_overwrite {
        info!("Forcing file overwriting")
    };
    if opts.raw {
        info!("Writing raw packed data with separate table files")
    };
    if let Some(t) = &opts.table {
        info!("Decompressing with the table in {}", t)
    };
    info!("---- Initialization End ----");
}

#[cfg(test)]
mod test {
    use super::{Args, Mode, Output, Verbosity};
    use clap::Parser;

    fn parse(args: &[&str]) -> super::HufOpts {
        Args::try_parse_from(args).unwrap().into_opts()
    }

    #[test]
    fn defaults_compress_to_files() {
        let opts = parse(&["huff", "a.txt", "b.txt"]);
        assert_eq!(opts.op_mode, Mode::Zip);
        assert_eq!(opts.output, Output::File);
        assert_eq!(opts.files, vec!["a.txt", "b.txt"]);
        assert_eq!(opts.verbose, Verbosity::Errors);
        assert!(!opts.raw);
    }

    #[test]
    fn decompress_with_table() {
        let opts = parse(&["huff", "-d", "--table", "a.tbl", "a.bin"]);
        assert_eq!(opts.op_mode, Mode::Unzip);
        assert_eq!(opts.table.as_deref(), Some("a.tbl"));
    }

    #[test]
    fn verbosity_counts_flags() {
        assert_eq!(parse(&["huff", "-vv", "x"]).verbose, Verbosity::Info);
        assert_eq!(parse(&["huff", "-vvvvv", "x"]).verbose, Verbosity::Trace);
        assert_eq!(parse(&["huff", "-q", "x"]).verbose, Verbosity::Quiet);
    }

    #[test]
    fn short_flags_combine() {
        let opts = parse(&["huff", "-tfc", "x"]);
        assert_eq!(opts.op_mode, Mode::Test);
        assert!(opts.force_overwrite);
        assert_eq!(opts.output, Output::Stdout);
    }

    #[test]
    fn conflicting_modes_are_rejected() {
        assert!(Args::try_parse_from(["huff", "-z", "-d", "x"]).is_err());
    }
}
