use std::fs;

use log::{debug, error, info};

use super::container::{write_archive, write_table};
use super::decompress::decompress;
use super::target_path;
use crate::bitstream::bitpacker::pack;
use crate::error::{HuffError, Result};
use crate::huffman_coding::code_table::CodeTable;
use crate::tools::cli::{HufOpts, Output};
use crate::tools::freq_count::freqs;

/// Result of compressing one buffer: the packed bytes and the table needed to unpack them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Compressed {
    pub bytes: Vec<u8>,
    pub table: CodeTable,
}

/// Compress `data` with a code built from its own byte frequencies.
///
/// Empty input gives an empty buffer and an empty table.
pub fn compress(data: &[u8]) -> Result<Compressed> {
    if data.is_empty() {
        return Ok(Compressed {
            bytes: Vec::new(),
            table: CodeTable::default(),
        });
    }
    let freq = freqs(data);
    let table = CodeTable::from_freqs(&freq);
    debug!("{} distinct symbols in {} bytes", freq.len(), data.len());
    let bytes = pack(data, &freq, &table)?;
    Ok(Compressed { bytes, table })
}

/// Compress the files named in opts (HufOpts). `name.ext` becomes the archive `name.bin`,
/// or with `--raw` the bare packed `name.bin` plus its table in `name.tbl`.
pub fn compress_files(opts: &HufOpts) -> Result<usize> {
    let mut failures = 0;
    for file in &opts.files {
        if let Err(e) = compress_file(opts, file) {
            error!("{}: {}", file, e);
            failures += 1;
        }
    }
    super::summarize(failures, opts.files.len());
    Ok(failures)
}

fn compress_file(opts: &HufOpts, file: &str) -> Result<()> {
    let data = fs::read(file)?;
    let compressed = compress(&data)?;

    if opts.raw {
        info!(
            "{}: {} bytes -> {} packed bytes, {} table entries",
            file,
            data.len(),
            compressed.bytes.len(),
            compressed.table.len()
        );
        // The table always goes to name.tbl, even when the packed bytes go to stdout.
        let force = opts.force_overwrite;
        let table = write_table(&compressed.table);
        super::write_output(&target_path(file, ".tbl")?, &table, force)?;
        return match opts.output {
            Output::Stdout => super::write_stdout(&compressed.bytes),
            Output::File => {
                super::write_output(&target_path(file, ".bin")?, &compressed.bytes, force)
            }
        };
    }

    let archive = write_archive(&compressed.table, &compressed.bytes);
    info!("{}: {} bytes -> {} bytes", file, data.len(), archive.len());
    match opts.output {
        Output::Stdout => super::write_stdout(&archive),
        Output::File => {
            super::write_output(&target_path(file, ".bin")?, &archive, opts.force_overwrite)
        }
    }
}

/// Compress and decompress each file in memory, checking that the round trip is exact.
/// Nothing is written.
pub fn test_files(opts: &HufOpts) -> Result<usize> {
    let mut failures = 0;
    for file in &opts.files {
        if let Err(e) = test_file(file) {
            error!("{}: {}", file, e);
            failures += 1;
        }
    }
    super::summarize(failures, opts.files.len());
    Ok(failures)
}

fn test_file(file: &str) -> Result<()> {
    let data = fs::read(file)?;
    let compressed = compress(&data)?;
    let recovered = decompress(&compressed.bytes, &compressed.table)?;
    if recovered != data {
        return Err(HuffError::BadArchive(format!(
            "round trip produced {} bytes that differ from the {} byte original",
            recovered.len(),
            data.len()
        )));
    }
    let archive_len = write_archive(&compressed.table, &compressed.bytes).len();
    let ratio = if data.is_empty() {
        0.0
    } else {
        archive_len as f64 / data.len() as f64
    };
    info!(
        "{}: ok. {} bytes, {} packed, {} archived ({:.3} of original)",
        file,
        data.len(),
        compressed.bytes.len(),
        archive_len,
        ratio
    );
    Ok(())
}
