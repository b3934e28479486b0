//! On-disk layouts for code tables and archives.
//!
//! A packed buffer carries no table, so a decompressor started on its own needs the table
//! from somewhere else. Two layouts are provided:
//!
//! Table file (`.tbl`):
//! ```text
//! "HUFT" | count: u16 BE | count x (symbol: u8, len: u8, ceil(len/8) code bytes, MSB first)
//! ```
//! Archive (`.bin`):
//! ```text
//! "HUF1" | count: u16 BE | count x entry (as above) | packed buffer
//! ```
//! Tables read back are validated (non-empty, unique, prefix-free) before use.

use log::{debug, error};

use crate::bitstream::bitreader::BitReader;
use crate::bitstream::bitwriter::BitWriter;
use crate::error::{HuffError, Result};
use crate::huffman_coding::code_table::{Code, CodeTable};

pub const TABLE_MAGIC: [u8; 4] = *b"HUFT";
pub const ARCHIVE_MAGIC: [u8; 4] = *b"HUF1";

/// Append the entry count and entries of `table` to `out`.
fn put_entries(out: &mut Vec<u8>, table: &CodeTable) {
    out.extend_from_slice(&(table.len() as u16).to_be_bytes());
    for (symbol, code) in table.iter() {
        out.push(symbol);
        // Codes never exceed 255 bits: a tree over 256 leaves is at most 255 deep.
        out.push(code.len() as u8);
        let mut bw = BitWriter::new((code.len() + 7) / 8);
        bw.out_code(code);
        out.extend(bw.finish());
    }
}

/// Read the entry count and entries starting at `data[0]`. Returns the table and the
/// number of bytes consumed.
fn take_entries(data: &[u8]) -> Result<(CodeTable, usize)> {
    let short = || HuffError::BadTable("table is truncated".to_string());
    let count = match data.get(0..2) {
        Some(&[hi, lo]) => u16::from_be_bytes([hi, lo]) as usize,
        _ => return Err(short()),
    };
    if count > 256 {
        return Err(HuffError::BadTable(format!("{} entries for a byte alphabet", count)));
    }

    let mut pos = 2;
    let mut codes = Vec::with_capacity(count);
    for _ in 0..count {
        let (symbol, len) = match data.get(pos..pos + 2) {
            Some(&[symbol, len]) => (symbol, len as usize),
            _ => return Err(short()),
        };
        pos += 2;
        let code_bytes = data.get(pos..pos + (len + 7) / 8).ok_or_else(short)?;
        pos += code_bytes.len();

        let mut br = BitReader::new(code_bytes);
        let mut code = Code::new();
        for _ in 0..len {
            code.push(br.bool_bit().ok_or_else(short)?);
        }
        codes.push((symbol, code));
    }
    Ok((CodeTable::from_codes(codes)?, pos))
}

/// Serialize a code table as a standalone table file.
pub fn write_table(table: &CodeTable) -> Vec<u8> {
    let mut out = TABLE_MAGIC.to_vec();
    put_entries(&mut out, table);
    out
}

/// Parse a standalone table file.
pub fn read_table(data: &[u8]) -> Result<CodeTable> {
    if data.get(0..4) != Some(&TABLE_MAGIC[..]) {
        error!("Table file does not start with the table signature");
        return Err(HuffError::BadTable("missing HUFT signature".to_string()));
    }
    let (table, used) = take_entries(&data[4..])?;
    if 4 + used != data.len() {
        return Err(HuffError::BadTable(format!(
            "{} trailing bytes after the table",
            data.len() - 4 - used
        )));
    }
    Ok(table)
}

/// Build an archive: the table followed by the packed buffer it belongs to.
pub fn write_archive(table: &CodeTable, packed: &[u8]) -> Vec<u8> {
    let mut out = ARCHIVE_MAGIC.to_vec();
    put_entries(&mut out, table);
    debug!("Archive header is {} bytes", out.len());
    out.extend_from_slice(packed);
    out
}

/// Split an archive into its table and the packed buffer that follows it.
pub fn read_archive(data: &[u8]) -> Result<(CodeTable, &[u8])> {
    if data.get(0..4) != Some(&ARCHIVE_MAGIC[..]) {
        error!("Input does not start with the archive signature");
        return Err(HuffError::BadArchive("missing HUF1 signature".to_string()));
    }
    let (table, used) = take_entries(&data[4..]).map_err(|e| match e {
        HuffError::BadTable(msg) => HuffError::BadArchive(msg),
        other => other,
    })?;
    Ok((table, &data[4 + used..]))
}
