use crate::huffman_coding::code_table::Code;

/// Collects bits most-significant-first into a byte buffer.
#[derive(Debug, Default)]
pub struct BitWriter {
    /// Output buffer of completed bytes.
    output: Vec<u8>,
    /// Private queue to hold bits that are waiting to be put as bytes into the output buffer.
    queue: u64,
    /// Count of valid bits in the queue.
    q_bits: u8,
}

impl BitWriter {
    /// Create a new BitWriter, reserving room for `capacity` output bytes.
    pub fn new(capacity: usize) -> Self {
        Self {
            output: Vec::with_capacity(capacity),
            queue: 0,
            q_bits: 0,
        }
    }

    /// Move every full byte in the queue to the output buffer once the queue is nearly full.
    fn push_queue(&mut self) {
        if self.q_bits > 56 {
            while self.q_bits > 7 {
                let byte = (self.queue >> (self.q_bits - 8)) as u8;
                self.output.push(byte);
                self.q_bits -= 8;
            }
        }
    }

    /// Put a whole byte on the stream.
    pub fn out8(&mut self, data: u8) {
        self.push_queue();
        self.queue <<= 8;
        self.queue |= data as u64;
        self.q_bits += 8;
    }

    /// Put a single bit on the stream.
    pub fn out1(&mut self, bit: bool) {
        self.push_queue();
        self.queue <<= 1;
        self.queue |= bit as u64;
        self.q_bits += 1;
    }

    /// Put a huffman code on the stream, first bit first.
    pub fn out_code(&mut self, code: &Code) {
        code.bits().iter().for_each(|&bit| self.out1(bit));
    }

    /// Put `n` zero bits on the stream.
    pub fn out_zeros(&mut self, n: u8) {
        (0..n).for_each(|_| self.out1(false));
    }

    /// Total bits written so far.
    pub fn bit_count(&self) -> usize {
        self.output.len() * 8 + self.q_bits as usize
    }

    /// Flushes the remaining bits from the queue, zero filling the last byte if it is
    /// partial, and hands back the buffer.
    pub fn finish(mut self) -> Vec<u8> {
        while self.q_bits > 7 {
            let byte = (self.queue >> (self.q_bits - 8)) as u8;
            self.output.push(byte);
            self.q_bits -= 8;
        }
        if self.q_bits > 0 {
            let byte = (self.queue << (8 - self.q_bits)) as u8;
            self.output.push(byte);
            self.q_bits = 0;
        }
        self.output
    }
}
