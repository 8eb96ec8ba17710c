//! Bounds-checked little-endian reader over an in-memory LOC buffer

use std::io::{Cursor, Read};

use byteorder::{LittleEndian, ReadBytesExt};

use crate::error::{Error, Result};

/// Sequential reader with independent seek.
///
/// Every read checks the remaining length first and fails with
/// [`Error::TruncatedFile`] instead of a bare EOF.
pub struct BinaryCursor<'a> {
    inner: Cursor<&'a [u8]>,
}

impl<'a> BinaryCursor<'a> {
    #[must_use]
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            inner: Cursor::new(data),
        }
    }

    /// Current absolute offset
    #[must_use]
    pub fn tell(&self) -> u64 {
        self.inner.position()
    }

    /// Total length of the buffer
    #[must_use]
    pub fn size(&self) -> u64 {
        self.inner.get_ref().len() as u64
    }

    /// Move to an absolute offset. Seeking past the end is allowed; the next read fails.
    pub fn seek(&mut self, offset: u64) {
        self.inner.set_position(offset);
    }

    fn remaining(&self) -> u64 {
        self.size().saturating_sub(self.tell())
    }

    fn ensure(&self, needed: u64) -> Result<()> {
        let available = self.remaining();
        if available < needed {
            return Err(Error::TruncatedFile {
                offset: self.tell(),
                needed,
                available,
            });
        }
        Ok(())
    }

    /// Read exactly `n` bytes
    pub fn read_bytes(&mut self, n: u64) -> Result<Vec<u8>> {
        self.ensure(n)?;
        let mut buf = vec![0u8; n as usize];
        self.inner.read_exact(&mut buf)?;
        Ok(buf)
    }

    /// Read a four-byte block signature
    pub fn read_signature(&mut self) -> Result<[u8; 4]> {
        self.ensure(4)?;
        let mut sig = [0u8; 4];
        self.inner.read_exact(&mut sig)?;
        Ok(sig)
    }

    /// Read a signature and fail unless it equals `expected`
    pub fn expect_signature(&mut self, expected: [u8; 4], name: &'static str) -> Result<()> {
        let offset = self.tell();
        let found = self.read_signature()?;
        if found != expected {
            return Err(Error::InvalidSignature {
                expected: name,
                found,
                offset,
            });
        }
        Ok(())
    }

    pub fn read_u16(&mut self) -> Result<u16> {
        self.ensure(2)?;
        Ok(self.inner.read_u16::<LittleEndian>()?)
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        self.ensure(4)?;
        Ok(self.inner.read_u32::<LittleEndian>()?)
    }

    /// Read `count` consecutive u32 values
    pub fn read_u32_array(&mut self, count: u32) -> Result<Vec<u32>> {
        self.ensure(u64::from(count) * 4)?;
        (0..count).map(|_| self.read_u32()).collect()
    }
}
