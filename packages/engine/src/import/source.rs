//! Input source contract
//!
//! An abstract readable byte source that can be opened more than once:
//! unbounded for pass 1, and re-opened for the bounded replay of a
//! captured region in pass 2. Sources need not support seeking; the
//! bounded view is implemented as "skip N bytes, then limit to length"
//! over a fresh read.

use std::fs::File;
use std::io::{self, BufReader, Cursor, Read};
use std::path::{Path, PathBuf};

/// A byte source the engine can open repeatedly.
pub trait ScanSource {
    /// Open a fresh read of the document from its first byte.
    fn open(&self) -> io::Result<Box<dyn Read + '_>>;
}

impl ScanSource for [u8] {
    fn open(&self) -> io::Result<Box<dyn Read + '_>> {
        Ok(Box::new(Cursor::new(self)))
    }
}

impl ScanSource for Vec<u8> {
    fn open(&self) -> io::Result<Box<dyn Read + '_>> {
        self.as_slice().open()
    }
}

impl ScanSource for Path {
    fn open(&self) -> io::Result<Box<dyn Read + '_>> {
        Ok(Box::new(BufReader::new(File::open(self)?)))
    }
}

impl ScanSource for PathBuf {
    fn open(&self) -> io::Result<Box<dyn Read + '_>> {
        self.as_path().open()
    }
}

impl<S: ScanSource + ?Sized> ScanSource for &S {
    fn open(&self) -> io::Result<Box<dyn Read + '_>> {
        (**self).open()
    }
}
