//! The huffman module turns a frequency count into a prefix code.
//!
//! Building the code happens in two steps:
//! - huffman: merge the lightest nodes on a min-priority queue until one tree remains.
//! - code_table: walk that tree (left = 0, right = 1) and record every leaf's path in
//!   both a symbol -> code map and a code -> symbol map.
//!
//! Equal weights are resolved by queue insertion order, so the same input always yields
//! the same codes. The tree is dropped once the table exists; only the table is needed
//! to pack or unpack data.
//!

pub mod code_table;
pub mod huffman;
