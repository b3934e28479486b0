//! Codes derived from a prefix tree, in both directions.
//!
//! The forward map (symbol -> code) drives the packer; the inverse map (code -> symbol)
//! drives the greedy decoder. Both are built together and never change afterwards.

use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

use log::debug;
use rustc_hash::FxHashMap;

use super::huffman::{build_tree, Node};
use crate::error::{HuffError, Result};
use crate::tools::freq_count::FreqTable;

/// A variable length bit string. Index 0 is the first bit on the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Code(Vec<bool>);

impl Code {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn push(&mut self, bit: bool) {
        self.0.push(bit)
    }

    pub fn clear(&mut self) {
        self.0.clear()
    }

    pub fn bits(&self) -> &[bool] {
        &self.0
    }

    /// True if `self` is a proper or equal prefix of `other`.
    pub fn is_prefix_of(&self, other: &Code) -> bool {
        other.0.starts_with(&self.0)
    }

    /// Same code with one more bit appended.
    fn with(&self, bit: bool) -> Code {
        let mut next = self.clone();
        next.push(bit);
        next
    }
}

#[cfg(test)]
impl From<&str> for Code {
    fn from(s: &str) -> Self {
        Code(
            s.chars()
                .map(|c| match c {
                    '0' => false,
                    '1' => true,
                    _ => panic!("{:?} is not a bit", c),
                })
                .collect(),
        )
    }
}

impl Display for Code {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for &bit in &self.0 {
            write!(f, "{}", if bit { '1' } else { '0' })?;
        }
        Ok(())
    }
}

/// Bijective symbol <-> code mapping.
#[derive(Debug, Clone, Default)]
pub struct CodeTable {
    forward: BTreeMap<u8, Code>,
    inverse: FxHashMap<Code, u8>,
    max_len: usize,
}

impl CodeTable {
    /// Derive the table for the given frequencies. An empty frequency table gives an empty
    /// code table.
    pub fn from_freqs(freqs: &FreqTable) -> Self {
        let mut table = CodeTable::default();
        if let Some(root) = build_tree(freqs) {
            match root {
                // A lone leaf has no path from the root, so it gets a one bit code.
                Node::Leaf { symbol, .. } => table.insert(symbol, Code(vec![false])),
                _ => table.walk(&root, Code::new()),
            }
        }
        debug!(
            "Derived {} codes, longest is {} bits",
            table.len(),
            table.max_len
        );
        table
    }

    /// Rebuild a table from explicit (symbol, code) pairs, as read back from disk.
    /// Rejects empty codes, repeated symbols or codes, and any code that is a prefix of another.
    pub fn from_codes<I>(codes: I) -> Result<Self>
    where
        I: IntoIterator<Item = (u8, Code)>,
    {
        let mut table = CodeTable::default();
        for (symbol, code) in codes {
            if code.is_empty() {
                return Err(HuffError::BadTable(format!(
                    "symbol {:#04x} has an empty code",
                    symbol
                )));
            }
            if table.forward.contains_key(&symbol) {
                return Err(HuffError::BadTable(format!(
                    "symbol {:#04x} appears twice",
                    symbol
                )));
            }
            if table.inverse.contains_key(&code) {
                return Err(HuffError::BadTable(format!("code {} appears twice", code)));
            }
            table.insert(symbol, code);
        }

        // After sorting, a code that prefixes another sits directly in front of some code it prefixes.
        let mut sorted: Vec<&Code> = table.inverse.keys().collect();
        sorted.sort();
        if let Some(pair) = sorted.windows(2).find(|w| w[0].is_prefix_of(w[1])) {
            return Err(HuffError::BadTable(format!(
                "code {} is a prefix of {}",
                pair[0], pair[1]
            )));
        }
        Ok(table)
    }

    fn walk(&mut self, node: &Node, path: Code) {
        match node {
            Node::Leaf { symbol, .. } => self.insert(*symbol, path),
            Node::Kids { left, right, .. } => {
                self.walk(left, path.with(false));
                self.walk(right, path.with(true));
            }
        }
    }

    fn insert(&mut self, symbol: u8, code: Code) {
        self.max_len = self.max_len.max(code.len());
        self.inverse.insert(code.clone(), symbol);
        self.forward.insert(symbol, code);
    }

    pub fn len(&self) -> usize {
        self.forward.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }

    /// Length of the longest code, 0 for an empty table.
    pub fn max_len(&self) -> usize {
        self.max_len
    }

    pub fn code(&self, symbol: u8) -> Option<&Code> {
        self.forward.get(&symbol)
    }

    pub fn symbol(&self, code: &Code) -> Option<u8> {
        self.inverse.get(code).copied()
    }

    /// (symbol, code) pairs in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, &Code)> + '_ {
        self.forward.iter().map(|(&sym, code)| (sym, code))
    }

    /// Total encoded bit length of an input with these frequencies.
    pub fn encoded_len(&self, freqs: &FreqTable) -> Result<u64> {
        let mut bits = 0_u64;
        for (symbol, count) in freqs.iter() {
            let code = self.code(symbol).ok_or(HuffError::UnmappedSymbol(symbol))?;
            bits += code.len() as u64 * count;
        }
        Ok(bits)
    }
}

impl PartialEq for CodeTable {
    fn eq(&self, other: &Self) -> bool {
        self.forward == other.forward
    }
}
impl Eq for CodeTable {}
