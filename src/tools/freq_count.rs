use std::collections::BTreeMap;

/// Count of each byte value present in some input. Bytes that never occur are absent,
/// so the table's length is the size of the alphabet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FreqTable {
    counts: BTreeMap<u8, u64>,
}

impl FreqTable {
    /// Number of distinct symbols.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn get(&self, symbol: u8) -> Option<u64> {
        self.counts.get(&symbol).copied()
    }

    /// Sum of all counts, i.e. the length of the counted input.
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// (symbol, count) pairs in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        self.counts.iter().map(|(&sym, &count)| (sym, count))
    }
}

/// Returns a frequency count of the input data.
pub fn freqs(data: &[u8]) -> FreqTable {
    // Count into a flat array first, then keep only the symbols that occurred.
    let mut flat = [0_u64; 256];
    data.iter().for_each(|&el| flat[el as usize] += 1);

    let counts = flat
        .iter()
        .enumerate()
        .filter(|(_, &count)| count > 0)
        .map(|(sym, &count)| (sym as u8, count))
        .collect();
    FreqTable { counts }
}

#[cfg(test)]
mod test {
    use super::freqs;

    #[test]
    fn counts_each_symbol() {
        let table = freqs(b"aaabbc");
        assert_eq!(table.len(), 3);
        assert_eq!(table.get(b'a'), Some(3));
        assert_eq!(table.get(b'b'), Some(2));
        assert_eq!(table.get(b'c'), Some(1));
        assert_eq!(table.total(), 6);
    }

    #[test]
    fn absent_symbols_have_no_entry() {
        let table = freqs(b"xyz");
        assert_eq!(table.get(b'a'), None);
        assert!(table.iter().all(|(_, count)| count > 0));
    }

    #[test]
    fn empty_input_gives_empty_table() {
        let table = freqs(&[]);
        assert!(table.is_empty());
        assert_eq!(table.total(), 0);
    }

    #[test]
    fn iterates_in_symbol_order() {
        let table = freqs(&[200, 3, 200, 0, 255]);
        let syms: Vec<u8> = table.iter().map(|(s, _)| s).collect();
        assert_eq!(syms, vec![0, 3, 200, 255]);
    }
}
