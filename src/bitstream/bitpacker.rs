use log::{debug, error};

use super::bitwriter::BitWriter;
use crate::error::{HuffError, Result};
use crate::huffman_coding::code_table::CodeTable;
use crate::tools::freq_count::FreqTable;

/// Number of zero bits appended after `encoded_bits` of payload. Always 1..=8: a payload
/// that already ends on a byte boundary still gets a full byte, so the header never says 0.
pub fn padding_for(encoded_bits: u64) -> u8 {
    8 - (encoded_bits % 8) as u8
}

/// Packed size in bytes for a payload of `encoded_bits`: header byte, payload and padding.
pub fn packed_len(encoded_bits: u64) -> usize {
    ((8 + encoded_bits + padding_for(encoded_bits) as u64) / 8) as usize
}

/// Encode `data` with `table` and pack it as `[padding][codes...][padding zeros]`.
///
/// `freqs` must be the frequency count of `data`; it is used to size the payload up
/// front so the padding byte can be written first.
pub fn pack(data: &[u8], freqs: &FreqTable, table: &CodeTable) -> Result<Vec<u8>> {
    let encoded_bits = table.encoded_len(freqs)?;
    let padding = padding_for(encoded_bits);
    debug!(
        "Packing {} bytes into {} bits plus {} padding bits",
        data.len(),
        encoded_bits,
        padding
    );

    let mut bw = BitWriter::new(packed_len(encoded_bits));
    bw.out8(padding);
    for &byte in data {
        match table.code(byte) {
            Some(code) => bw.out_code(code),
            None => {
                error!("Byte {:#04x} is missing from the code table", byte);
                return Err(HuffError::UnmappedSymbol(byte));
            }
        }
    }
    bw.out_zeros(padding);
    debug_assert_eq!(bw.bit_count() % 8, 0);
    Ok(bw.finish())
}
