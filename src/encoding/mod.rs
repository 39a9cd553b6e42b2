//! # Wire Codec Primitives
//!
//! Hand-rolled big-endian reader/writer over byte buffers, used by the
//! frame serializer. The frame wire format is exact: no framing beyond the
//! header, no varints, no compression.
//!
//! ## Encodings
//!
//! | Primitive | Layout |
//! |-----------|--------|
//! | `i32` / `i64` | big-endian two's complement |
//! | `f64` | big-endian IEEE-754 bits |
//! | `bool` | 1 byte, `0` or `1` |
//! | `utf` | `u16` big-endian byte length + UTF-8 bytes |
//!
//! The `utf` encoding caps strings at 65535 bytes; longer strings cannot be
//! framed and fail serialization. Reads past the end of the buffer and
//! invalid UTF-8 fail with `FrameError::Corrupt`.

use crate::error::{FrameError, Result};

/// Serialized size of a `utf`-encoded string: 2-byte length prefix plus the
/// UTF-8 payload.
pub fn utf_size(value: &str) -> usize {
    2 + value.len()
}

/// Append-only big-endian writer over a growable byte buffer.
#[derive(Debug, Default)]
pub struct ByteWriter {
    buf: Vec<u8>,
}

impl ByteWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
        }
    }

    /// Consumes the writer and returns the accumulated bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn write_u8(&mut self, value: u8) {
        self.buf.push(value);
    }

    pub fn write_bool(&mut self, value: bool) {
        self.buf.push(value as u8);
    }

    pub fn write_i32(&mut self, value: i32) {
        self.buf.extend(value.to_be_bytes());
    }

    pub fn write_i64(&mut self, value: i64) {
        self.buf.extend(value.to_be_bytes());
    }

    pub fn write_f64(&mut self, value: f64) {
        self.buf.extend(value.to_bits().to_be_bytes());
    }

    /// Writes a length-prefixed UTF-8 string.
    pub fn write_utf(&mut self, value: &str) -> Result<()> {
        let len = u16::try_from(value.len()).map_err(|_| {
            FrameError::Corrupt(format!(
                "string of {} bytes exceeds the 65535-byte utf limit",
                value.len()
            ))
        })?;
        self.buf.extend(len.to_be_bytes());
        self.buf.extend(value.as_bytes());
        Ok(())
    }
}

/// Forward-only big-endian reader over a byte slice.
#[derive(Debug)]
pub struct ByteReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Bytes not yet consumed.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8]> {
        if self.remaining() < n {
            return Err(FrameError::Corrupt(format!(
                "unexpected end of data: need {} bytes at offset {}, have {}",
                n,
                self.pos,
                self.remaining()
            )));
        }
        let slice = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.take(1)?[0])
    }

    pub fn read_bool(&mut self) -> Result<bool> {
        Ok(self.take(1)?[0] != 0)
    }

    pub fn read_i32(&mut self) -> Result<i32> {
        let bytes: [u8; 4] = self.take(4)?.try_into().unwrap();
        Ok(i32::from_be_bytes(bytes))
    }

    pub fn read_i64(&mut self) -> Result<i64> {
        let bytes: [u8; 8] = self.take(8)?.try_into().unwrap();
        Ok(i64::from_be_bytes(bytes))
    }

    pub fn read_f64(&mut self) -> Result<f64> {
        let bytes: [u8; 8] = self.take(8)?.try_into().unwrap();
        Ok(f64::from_bits(u64::from_be_bytes(bytes)))
    }

    /// Reads a length-prefixed UTF-8 string.
    pub fn read_utf(&mut self) -> Result<String> {
        let len_bytes: [u8; 2] = self.take(2)?.try_into().unwrap();
        let len = u16::from_be_bytes(len_bytes) as usize;
        let bytes = self.take(len)?;
        String::from_utf8(bytes.to_vec())
            .map_err(|e| FrameError::Corrupt(format!("invalid UTF-8 in string payload: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primitives_round_trip_big_endian() {
        let mut w = ByteWriter::new();
        w.write_i32(-7);
        w.write_i64(1 << 40);
        w.write_f64(2.5);
        w.write_bool(true);
        w.write_u8(3);
        w.write_utf("héllo").unwrap();

        let bytes = w.into_bytes();
        // i32 -7 big-endian
        assert_eq!(&bytes[0..4], &[0xFF, 0xFF, 0xFF, 0xF9]);

        let mut r = ByteReader::new(&bytes);
        assert_eq!(r.read_i32().unwrap(), -7);
        assert_eq!(r.read_i64().unwrap(), 1 << 40);
        assert_eq!(r.read_f64().unwrap(), 2.5);
        assert!(r.read_bool().unwrap());
        assert_eq!(r.read_u8().unwrap(), 3);
        assert_eq!(r.read_utf().unwrap(), "héllo");
        assert_eq!(r.remaining(), 0);
    }

    #[test]
    fn utf_length_prefix_counts_bytes_not_chars() {
        let mut w = ByteWriter::new();
        w.write_utf("é").unwrap();
        let bytes = w.into_bytes();
        assert_eq!(bytes[0..2], [0, 2]);
        assert_eq!(bytes.len(), 4);
        assert_eq!(utf_size("é"), 4);
    }

    #[test]
    fn truncated_reads_are_corrupt() {
        let mut r = ByteReader::new(&[0, 5, b'a']);
        let err = r.read_utf().unwrap_err();
        assert!(matches!(err, FrameError::Corrupt(_)));

        let mut r = ByteReader::new(&[1, 2]);
        assert!(r.read_i32().is_err());
    }

    #[test]
    fn oversized_string_cannot_be_framed() {
        let big = "x".repeat(70_000);
        let mut w = ByteWriter::new();
        assert!(matches!(
            w.write_utf(&big).unwrap_err(),
            FrameError::Corrupt(_)
        ));
    }
}
