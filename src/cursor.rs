use crate::boxes::{FourCC, Uuid};
use crate::error::{ParseError, Result};
use byteorder::{BigEndian, ByteOrder};

/// Bounds-checked, zero-copy sequential reader over a byte region.
///
/// `base` is the absolute file offset of `data[0]`, so offsets reported by
/// nested cursors stay meaningful. Slices handed out borrow the underlying
/// buffer (`'a`), not the cursor, so they outlive any scope they were read in.
#[derive(Debug, Clone)]
pub struct ByteCursor<'a> {
    data: &'a [u8],
    pos: usize,
    base: u64,
}

impl<'a> ByteCursor<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self::at(data, 0)
    }

    pub fn at(data: &'a [u8], base: u64) -> Self {
        Self { data, pos: 0, base }
    }

    /// Absolute offset of the next byte to be read.
    pub fn offset(&self) -> u64 {
        self.base + self.pos as u64
    }

    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    pub fn is_empty(&self) -> bool {
        self.pos == self.data.len()
    }

    pub fn peek(&self, n: usize) -> Result<&'a [u8]> {
        let available = self.remaining();
        if n > available {
            return Err(ParseError::UnexpectedEndOfData {
                needed: n,
                available,
            });
        }
        Ok(&self.data[self.pos..self.pos + n])
    }

    pub fn peek_rest(&self) -> &'a [u8] {
        &self.data[self.pos..]
    }

    pub fn read(&mut self, n: usize) -> Result<&'a [u8]> {
        let out = self.peek(n)?;
        self.pos += n;
        Ok(out)
    }

    pub fn read_rest(&mut self) -> &'a [u8] {
        let out = self.peek_rest();
        self.pos = self.data.len();
        out
    }

    /// Big-endian unsigned integer of `n` bytes (0..=8).
    pub fn uint(&mut self, n: usize) -> Result<u64> {
        if n > 8 {
            return Err(ParseError::Unsupported(format!("{n}-byte integer")));
        }
        if n == 0 {
            return Ok(0);
        }
        let b = self.read(n)?;
        Ok(BigEndian::read_uint(b, n))
    }

    /// Big-endian two's complement integer of `n` bytes (0..=8).
    pub fn sint(&mut self, n: usize) -> Result<i64> {
        if n > 8 {
            return Err(ParseError::Unsupported(format!("{n}-byte integer")));
        }
        if n == 0 {
            return Ok(0);
        }
        let b = self.read(n)?;
        Ok(BigEndian::read_int(b, n))
    }

    pub fn u8(&mut self) -> Result<u8> {
        Ok(self.read(1)?[0])
    }

    pub fn u16(&mut self) -> Result<u16> {
        Ok(BigEndian::read_u16(self.read(2)?))
    }

    pub fn u32(&mut self) -> Result<u32> {
        Ok(BigEndian::read_u32(self.read(4)?))
    }

    pub fn u64(&mut self) -> Result<u64> {
        Ok(BigEndian::read_u64(self.read(8)?))
    }

    pub fn i16(&mut self) -> Result<i16> {
        Ok(BigEndian::read_i16(self.read(2)?))
    }

    pub fn i32(&mut self) -> Result<i32> {
        Ok(BigEndian::read_i32(self.read(4)?))
    }

    pub fn fourcc(&mut self) -> Result<FourCC> {
        let b = self.read(4)?;
        Ok(FourCC([b[0], b[1], b[2], b[3]]))
    }

    pub fn uuid(&mut self) -> Result<Uuid> {
        let mut u = [0u8; 16];
        u.copy_from_slice(self.read(16)?);
        Ok(Uuid(u))
    }

    /// Unsigned 16.16 fixed point.
    pub fn fixed16(&mut self) -> Result<f64> {
        Ok(self.u32()? as f64 / 65536.0)
    }

    /// Signed 16.16 fixed point.
    pub fn sfixed16(&mut self) -> Result<f64> {
        Ok(self.i32()? as f64 / 65536.0)
    }

    /// Signed 8.8 fixed point.
    pub fn sfixed8(&mut self) -> Result<f64> {
        Ok(self.i16()? as f64 / 256.0)
    }

    /// NUL-terminated string; the terminator is consumed but not returned.
    pub fn cstring(&mut self) -> Result<&'a [u8]> {
        let rest = self.peek_rest();
        match rest.iter().position(|&b| b == 0) {
            Some(end) => {
                self.pos += end + 1;
                Ok(&rest[..end])
            }
            None => Err(ParseError::UnexpectedEndOfData {
                needed: rest.len() + 1,
                available: rest.len(),
            }),
        }
    }

    /// Split off the next `n` bytes as an independent child cursor.
    pub fn split(&mut self, n: usize) -> Result<ByteCursor<'a>> {
        let base = self.offset();
        let data = self.read(n)?;
        Ok(ByteCursor::at(data, base))
    }

    pub fn expect_end(&self) -> Result<()> {
        match self.remaining() {
            0 => Ok(()),
            remaining => Err(ParseError::UnconsumedTrailingData { remaining }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integers_are_big_endian() {
        let data = [0x01, 0x02, 0xff, 0xfe, 0x00, 0x00, 0x00, 0x2a];
        let mut c = ByteCursor::new(&data);
        assert_eq!(c.uint(2).unwrap(), 0x0102);
        assert_eq!(c.sint(2).unwrap(), -2);
        assert_eq!(c.uint(4).unwrap(), 42);
        assert!(c.is_empty());
    }

    #[test]
    fn three_byte_integer() {
        let mut c = ByteCursor::new(&[0x00, 0x01, 0x00]);
        assert_eq!(c.uint(3).unwrap(), 256);
    }

    #[test]
    fn read_past_end_fails_without_advancing() {
        let mut c = ByteCursor::new(&[1, 2, 3]);
        let err = c.read(4).unwrap_err();
        assert!(matches!(
            err,
            ParseError::UnexpectedEndOfData {
                needed: 4,
                available: 3
            }
        ));
        assert_eq!(c.remaining(), 3);
    }

    #[test]
    fn fixed_point_is_exact() {
        let mut c = ByteCursor::new(&[0x00, 0x48, 0x80, 0x00, 0xff, 0xff, 0x00, 0x00]);
        assert_eq!(c.fixed16().unwrap(), 72.5);
        assert_eq!(c.sfixed16().unwrap(), -1.0);
    }

    #[test]
    fn uuid_grouping() {
        let bytes: Vec<u8> = (0u8..16).collect();
        let mut c = ByteCursor::new(&bytes);
        assert_eq!(
            c.uuid().unwrap().to_string(),
            "00010203-0405-0607-0809-0a0b0c0d0e0f"
        );
    }

    #[test]
    fn cstring_requires_terminator() {
        let mut c = ByteCursor::new(b"abc\0de");
        assert_eq!(c.cstring().unwrap(), b"abc");
        assert!(matches!(
            c.cstring(),
            Err(ParseError::UnexpectedEndOfData { .. })
        ));
    }

    #[test]
    fn split_view_keeps_absolute_offsets() {
        let data = [1, 2, 3, 4, 5];
        let mut c = ByteCursor::at(&data, 100);

        let mut view = c.split(2).unwrap();
        assert_eq!(view.offset(), 100);
        assert_eq!(view.uint(2).unwrap(), 0x0102);
        view.expect_end().unwrap();
        assert_eq!(c.offset(), 102);

        let mut view = c.split(3).unwrap();
        view.u8().unwrap();
        assert!(matches!(
            view.expect_end(),
            Err(ParseError::UnconsumedTrailingData { remaining: 2 })
        ));
    }
}
