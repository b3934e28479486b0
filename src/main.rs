//Enable more cargo lint tests
#![warn(rust_2018_idioms)]
#![warn(clippy::disallowed_types)]

use huffman::compression::compress::{compress_files, test_files};
use huffman::compression::decompress::decompress_files;
use huffman::tools::cli::{hufopts_init, report_opts, Mode, Output};
use huffman::HuffError;

use log::info;
use simplelog::{Config, TermLogger, TerminalMode};

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

fn main() -> Result<(), HuffError> {
    let options = hufopts_init();

    // Keep log lines out of the data when the data itself goes to stdout.
    let terminal = match options.output {
        Output::Stdout => TerminalMode::Stderr,
        Output::File => TerminalMode::Stdout,
    };
    // Available log levels are Error, Warn, Info, Debug, Trace
    if let Err(e) = TermLogger::init(
        options.verbose.level_filter(),
        Config::default(),
        terminal,
        simplelog::ColorChoice::Auto,
    ) {
        eprintln!("Could not start the logger: {}", e);
    }
    report_opts(&options);

    //----- Figure how what we need to do and go do it
    let failures = match options.op_mode {
        Mode::Zip => compress_files(&options)?,
        Mode::Unzip => decompress_files(&options)?,
        Mode::Test => test_files(&options)?,
    };

    info!("Done.");
    if failures > 0 {
        std::process::exit(1);
    }
    Ok(())
}
