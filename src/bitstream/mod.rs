//! The bitstream module is the bit-level I/O layer of the compressor.
//!
//! - bitwriter: queues bits most-significant-first and flushes them as bytes.
//! - bitpacker: lays out a packed buffer, a padding-length byte followed by the
//!   huffman codes and the zero padding that fills the last byte.
//! - bitreader: reads the packed buffer back one bit at a time.
//!
//! Everything here works on whole in-memory buffers.
//!
pub mod bitpacker;
pub mod bitreader;
pub mod bitwriter;
