use std::fs;

use log::{error, info, trace, warn};

use super::container::{read_archive, read_table};
use super::target_path;
use crate::bitstream::bitreader::BitReader;
use crate::error::{HuffError, Result};
use crate::huffman_coding::code_table::{Code, CodeTable};
use crate::tools::cli::{HufOpts, Output};

/// Unpack and decode a buffer produced by [`pack`](crate::bitstream::bitpacker::pack).
///
/// `table` must be the table the buffer was packed with. An empty buffer decodes to
/// nothing whatever the table. Errors:
/// - `InvalidPadding` / `PaddingOverrun` if the header byte cannot describe this buffer,
/// - `MissingTable` if the buffer holds data but the table is empty,
/// - `UnknownCode` if bits match no code. Corrupt data and a mismatched table look the
///   same here, so both are reported as corruption,
/// - `Truncated` if the payload ends part way through a code.
pub fn decompress(packed: &[u8], table: &CodeTable) -> Result<Vec<u8>> {
    if packed.is_empty() {
        return Ok(Vec::new());
    }

    let mut br = BitReader::new(packed);
    let padding = br.byte().ok_or(HuffError::Truncated(0))?;
    if padding > 8 {
        error!("Padding field of {} is out of range", padding);
        return Err(HuffError::InvalidPadding(padding));
    }
    if !br.truncate_tail(padding as usize) {
        return Err(HuffError::PaddingOverrun {
            padding,
            available: br.remaining(),
        });
    }
    trace!("Payload starts at {} with {} bits", br.loc(), br.remaining());

    if br.remaining() > 0 && table.is_empty() {
        return Err(HuffError::MissingTable);
    }

    let mut output = Vec::new();
    let mut candidate = Code::new();
    let mut start = br.position();
    while let Some(bit) = br.bool_bit() {
        candidate.push(bit);
        if let Some(symbol) = table.symbol(&candidate) {
            output.push(symbol);
            candidate.clear();
            start = br.position();
        } else if candidate.len() >= table.max_len() {
            // No code is this long, so no further bit can produce a match.
            warn!("No code matches the bits at {}", start);
            return Err(HuffError::UnknownCode(start));
        }
    }
    if !candidate.is_empty() {
        return Err(HuffError::Truncated(candidate.len()));
    }
    Ok(output)
}

/// Decompress the files named in opts (HufOpts). Each file is either an archive, or bare
/// packed bytes when a table file was given with `--table`.
pub fn decompress_files(opts: &HufOpts) -> Result<usize> {
    let sidecar = match &opts.table {
        Some(path) => Some(read_table(&fs::read(path)?)?),
        None => None,
    };

    let mut failures = 0;
    for file in &opts.files {
        if let Err(e) = decompress_file(opts, file, sidecar.as_ref()) {
            error!("{}: {}", file, e);
            failures += 1;
        }
    }
    super::summarize(failures, opts.files.len());
    Ok(failures)
}

fn decompress_file(opts: &HufOpts, file: &str, sidecar: Option<&CodeTable>) -> Result<()> {
    let data = fs::read(file)?;
    let recovered = match sidecar {
        Some(table) => decompress(&data, table)?,
        None => {
            let (table, packed) = read_archive(&data)?;
            decompress(packed, &table)?
        }
    };
    info!("{}: {} bytes -> {} bytes", file, data.len(), recovered.len());

    match opts.output {
        Output::Stdout => super::write_stdout(&recovered),
        Output::File => {
            let out = target_path(file, "_decompressed.txt")?;
            super::write_output(&out, &recovered, opts.force_overwrite)
        }
    }
}
