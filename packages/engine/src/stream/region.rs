//! Byte regions and bounded replay readers
//!
//! A [`Region`] identifies the span of exactly one JSON value inside the
//! original byte stream. [`RegionReader`] re-opens a fresh read of the
//! same document bounded to such a span: skip to the start offset, then
//! hand out at most `len` bytes. No seeking is required of the underlying
//! source.

use std::io::{self, Read};

/// Immutable byte span `[start, end)` of one JSON value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    start: u64,
    end: u64,
}

impl Region {
    #[must_use]
    pub fn new(start: u64, end: u64) -> Self {
        debug_assert!(end >= start);
        Self { start, end }
    }

    #[inline]
    #[must_use]
    pub fn start(&self) -> u64 {
        self.start
    }

    #[inline]
    #[must_use]
    pub fn end(&self) -> u64 {
        self.end
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> u64 {
        self.end - self.start
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Reader returning only the bytes of a [`Region`] of the wrapped stream.
///
/// Without a region the full stream is passed through unchanged. The skip
/// to the region start happens lazily on the first read, so constructing
/// the reader never blocks.
pub struct RegionReader<R: Read> {
    inner: R,
    to_skip: u64,
    remaining: u64,
}

impl<R: Read> RegionReader<R> {
    pub fn new(inner: R, region: Option<Region>) -> Self {
        match region {
            Some(r) => Self {
                inner,
                to_skip: r.start(),
                remaining: r.len(),
            },
            None => Self {
                inner,
                to_skip: 0,
                remaining: u64::MAX,
            },
        }
    }

    fn skip_to_start(&mut self) -> io::Result<()> {
        let mut scratch = [0u8; 8192];
        while self.to_skip > 0 {
            let want = self.to_skip.min(scratch.len() as u64) as usize;
            let read = self.inner.read(&mut scratch[..want])?;
            if read == 0 {
                return Err(io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    "stream ended before region start",
                ));
            }
            self.to_skip -= read as u64;
        }
        Ok(())
    }
}

impl<R: Read> Read for RegionReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.to_skip > 0 {
            self.skip_to_start()?;
        }
        if self.remaining == 0 || buf.is_empty() {
            return Ok(0);
        }
        let want = self.remaining.min(buf.len() as u64) as usize;
        let read = self.inner.read(&mut buf[..want])?;
        self.remaining -= read as u64;
        Ok(read)
    }
}
