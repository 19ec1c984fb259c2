use crate::error::{ParseError, Result};

/// MSB-first bit reader over a fixed byte group.
///
/// Groups are byte aligned: the reader is created over exactly the bytes
/// that hold the packed fields, and [`BitReader::finish`] fails unless every
/// bit was read.
#[derive(Debug)]
pub struct BitReader<'a> {
    data: &'a [u8],
    bit_pos: usize,
}

impl<'a> BitReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, bit_pos: 0 }
    }

    pub fn remaining(&self) -> usize {
        self.data.len() * 8 - self.bit_pos
    }

    /// Next `n` bits (at most 64) as an unsigned integer.
    pub fn read(&mut self, n: usize) -> Result<u64> {
        if n > 64 {
            return Err(ParseError::Unsupported(format!("{n}-bit field")));
        }
        if n > self.remaining() {
            return Err(ParseError::UnexpectedEndOfData {
                needed: n.div_ceil(8),
                available: self.remaining() / 8,
            });
        }
        let mut v = 0u64;
        for _ in 0..n {
            let byte = self.data[self.bit_pos / 8];
            let bit = (byte >> (7 - self.bit_pos % 8)) & 1;
            v = (v << 1) | bit as u64;
            self.bit_pos += 1;
        }
        Ok(v)
    }

    pub fn bit(&mut self) -> Result<bool> {
        Ok(self.read(1)? == 1)
    }

    /// Everything left in the group.
    pub fn read_rest(&mut self) -> Result<u64> {
        self.read(self.remaining())
    }

    pub fn finish(&self) -> Result<()> {
        match self.remaining() {
            0 => Ok(()),
            bits => Err(ParseError::UnconsumedBits { bits }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn msb_first() {
        let mut br = BitReader::new(&[0b1011_0010]);
        assert!(br.bit().unwrap());
        assert_eq!(br.read(2).unwrap(), 0b01);
        assert_eq!(br.read(5).unwrap(), 0b10010);
        br.finish().unwrap();
    }

    #[test]
    fn fields_span_bytes() {
        let mut br = BitReader::new(&[0x12, 0x34, 0x56]);
        assert_eq!(br.read(4).unwrap(), 0x1);
        assert_eq!(br.read(16).unwrap(), 0x2345);
        assert_eq!(br.read_rest().unwrap(), 0x6);
        br.finish().unwrap();
    }

    #[test]
    fn short_group_fails_finish() {
        let mut br = BitReader::new(&[0xff]);
        br.read(2).unwrap();
        br.read(5).unwrap();
        assert!(matches!(br.finish(), Err(ParseError::UnconsumedBits { bits: 1 })));
    }

    #[test]
    fn overread_fails() {
        let mut br = BitReader::new(&[0xff]);
        br.read(6).unwrap();
        assert!(br.read(3).is_err());
    }
}
