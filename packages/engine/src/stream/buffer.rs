//! Read-ahead byte window over the input stream
//!
//! Accumulates incoming chunks in a growable window and tracks the
//! absolute offset of the window start, so consumers can scan ahead
//! without committing the cursor position.

use std::io::{self, Read};

use bytes::{Buf, BytesMut};

const CHUNK_SIZE: usize = 8192;

/// Growable byte window over an [`io::Read`] source.
///
/// `position()` is the absolute offset of the first unconsumed byte;
/// `window()` exposes everything read ahead of it. Scanning never moves
/// the position; callers `advance()` explicitly once bytes are consumed.
pub(crate) struct StreamBuffer<'a> {
    input: Box<dyn Read + 'a>,
    window: BytesMut,
    start: u64,
    eof: bool,
}

impl<'a> StreamBuffer<'a> {
    pub(crate) fn new(input: Box<dyn Read + 'a>) -> Self {
        Self {
            input,
            window: BytesMut::with_capacity(CHUNK_SIZE),
            start: 0,
            eof: false,
        }
    }

    /// Absolute byte offset of the first unconsumed byte.
    #[inline]
    pub(crate) fn position(&self) -> u64 {
        self.start
    }

    #[inline]
    pub(crate) fn window(&self) -> &[u8] {
        &self.window
    }

    /// Drop `n` bytes from the front of the window.
    #[inline]
    pub(crate) fn advance(&mut self, n: usize) {
        debug_assert!(n <= self.window.len());
        self.window.advance(n);
        self.start += n as u64;
    }

    /// Grow the window to at least `n` bytes, or as far as EOF allows.
    /// Returns the number of bytes available.
    pub(crate) fn ensure(&mut self, n: usize) -> io::Result<usize> {
        while self.window.len() < n && !self.eof {
            self.fill_more()?;
        }
        Ok(self.window.len())
    }

    /// Read one more chunk into the window. Returns the number of bytes
    /// added; zero means EOF.
    pub(crate) fn fill_more(&mut self) -> io::Result<usize> {
        if self.eof {
            return Ok(0);
        }
        let mut chunk = [0u8; CHUNK_SIZE];
        let read = self.input.read(&mut chunk)?;
        if read == 0 {
            self.eof = true;
        } else {
            self.window.extend_from_slice(&chunk[..read]);
        }
        Ok(read)
    }

    /// Byte at window index `i`, filling as needed.
    pub(crate) fn peek_at(&mut self, i: usize) -> io::Result<Option<u8>> {
        if self.ensure(i + 1)? > i {
            Ok(Some(self.window[i]))
        } else {
            Ok(None)
        }
    }

    /// First unconsumed byte, filling as needed.
    #[inline]
    pub(crate) fn peek(&mut self) -> io::Result<Option<u8>> {
        self.peek_at(0)
    }
}

impl std::fmt::Debug for StreamBuffer<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StreamBuffer")
            .field("start", &self.start)
            .field("window_len", &self.window.len())
            .field("eof", &self.eof)
            .finish()
    }
}
