//! Static Huffman compression of byte buffers and files.
//!
//! Each input is compressed with a prefix code built from that input's own byte
//! frequencies. The packed output is a one byte padding count, the codes for every input
//! byte, and zero bits up to the next byte boundary. The code table is returned alongside
//! the packed bytes and must be handed back to decompress them.
//!
//! Basic usage from the command line:
//!
//! `$> huff notes.txt` writes notes.bin (table and packed data together)
//!
//! `$> huff -d notes.bin` writes notes_decompressed.txt
//!
//! And as a library:
//!
//! ```
//! let compressed = huffman::compress(b"aaabbc")?;
//! assert_eq!(compressed.bytes.len(), 3);
//! let recovered = huffman::decompress(&compressed.bytes, &compressed.table)?;
//! assert_eq!(recovered, b"aaabbc");
//! # Ok::<(), huffman::HuffError>(())
//! ```
//!
pub mod bitstream;
pub mod compression;
pub mod error;
pub mod huffman_coding;
pub mod tools;

pub use compression::compress::{compress, Compressed};
pub use compression::decompress::decompress;
pub use error::{ErrorKind, HuffError, Result};
pub use huffman_coding::code_table::{Code, CodeTable};
pub use tools::freq_count::{freqs, FreqTable};
