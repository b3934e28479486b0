//! BitReader: reads a packed buffer one bit (or one byte) at a time, most-significant bit first.
//!
//! The reader works on an in-memory slice and can be told to stop short of the end,
//! which is how the trailing padding bits are kept away from the decoder.

const BIT_MASK: u8 = 0xff;

#[derive(Debug)]
pub struct BitReader<'a> {
    buffer: &'a [u8],
    cursor: usize,
    bit_index: usize,
    /// Bits past this position are not handed out.
    limit: usize,
}

impl<'a> BitReader<'a> {
    pub fn new(buffer: &'a [u8]) -> Self {
        Self {
            buffer,
            cursor: 0,
            bit_index: 0,
            limit: buffer.len() * 8,
        }
    }

    /// Absolute bit position of the next read.
    pub fn position(&self) -> usize {
        self.cursor * 8 + self.bit_index
    }

    /// Bits left before the limit.
    pub fn remaining(&self) -> usize {
        self.limit.saturating_sub(self.position())
    }

    /// Hold back the last `n` bits of the buffer. Returns false (and changes nothing) if
    /// that would cut into bits already read.
    pub fn truncate_tail(&mut self, n: usize) -> bool {
        match (self.buffer.len() * 8).checked_sub(n) {
            Some(limit) if limit >= self.position() => {
                self.limit = limit;
                true
            }
            _ => false,
        }
    }

    /// Return Option<bool>: *true* if the next bit is 1, *false* if 0, consuming the bit,
    /// or None if there is no more data to read.
    pub fn bool_bit(&mut self) -> Option<bool> {
        if self.remaining() == 0 {
            return None;
        }
        let bit = (self.buffer[self.cursor] & BIT_MASK >> self.bit_index) >> (7 - self.bit_index);
        self.bit_index += 1;
        if self.bit_index == 8 {
            self.bit_index = 0;
            self.cursor += 1;
        }
        Some(bit == 1)
    }

    /// Returns the next 8 bits as a byte, or None if fewer than 8 remain.
    pub fn byte(&mut self) -> Option<u8> {
        if self.remaining() < 8 {
            return None;
        }
        if self.bit_index == 0 {
            let byte = self.buffer[self.cursor];
            self.cursor += 1;
            return Some(byte);
        }
        let mut byte = 0_u8;
        for _ in 0..8 {
            byte = byte << 1 | self.bool_bit()? as u8;
        }
        Some(byte)
    }

    /// Debugging function. Report current position in the buffer.
    pub fn loc(&self) -> String {
        format!("[{}.{}]", self.cursor, self.bit_index)
    }
}

#[cfg(test)]
mod test {
    use super::BitReader;

    #[test]
    fn basic_test() {
        let x = [0b10000001_u8];
        let mut br = BitReader::new(&x);
        assert_eq!(br.bool_bit(), Some(true));
        for _ in 0..6 {
            assert_eq!(br.bool_bit(), Some(false));
        }
        assert_eq!(br.bool_bit(), Some(true));
        assert_eq!(br.bool_bit(), None);
    }

    #[test]
    fn byte_test() {
        let mut br = BitReader::new(b"Hello");
        assert_eq!(br.byte(), Some(b'H'));
        assert_eq!(br.byte(), Some(b'e'));
        assert_eq!(br.remaining(), 24);
    }

    #[test]
    fn unaligned_byte_test() {
        let x = [0b0101_0101, 0b1000_0000];
        let mut br = BitReader::new(&x);
        assert_eq!(br.bool_bit(), Some(false));
        assert_eq!(br.byte(), Some(0b1010_1011));
        assert_eq!(br.byte(), None);
    }

    #[test]
    fn truncate_tail_hides_padding() {
        let x = [0xff, 0b1100_0000];
        let mut br = BitReader::new(&x);
        assert_eq!(br.byte(), Some(0xff));
        assert!(br.truncate_tail(6));
        assert_eq!(br.remaining(), 2);
        assert_eq!(br.bool_bit(), Some(true));
        assert_eq!(br.bool_bit(), Some(true));
        assert_eq!(br.bool_bit(), None);
    }

    #[test]
    fn truncate_tail_cannot_cut_read_bits() {
        let x = [0xff];
        let mut br = BitReader::new(&x);
        br.byte();
        assert!(!br.truncate_tail(1));
        assert!(br.truncate_tail(0));
        assert!(!BitReader::new(&x).truncate_tail(9));
    }

    #[test]
    fn loc_test() {
        let mut br = BitReader::new(b"Hello, world!");
        for _ in 0..5 {
            br.byte();
        }
        br.bool_bit();
        assert_eq!(br.loc(), "[5.1]");
        assert_eq!(br.position(), 41);
    }
}
