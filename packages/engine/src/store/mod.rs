//! Spillable backing store
//!
//! Potentially large reference tables (rules, artifacts) are accumulated
//! in a [`SpillList`]: an ordinary in-memory list up to a configurable
//! entry-count threshold, transparently overflowing into an append-only
//! temp-file arena with an in-memory offset index beyond it. The access
//! interface (push/get/iterate) is identical in both tiers, and the spill
//! file is deleted when the list is dropped, on success and error paths
//! alike.

use std::cell::RefCell;
use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom, Write};

use serde::de::DeserializeOwned;
use serde::Serialize;

/// Default number of entries kept in memory before spilling to disk.
pub const DEFAULT_SPILL_THRESHOLD: usize = 4096;

/// Index-addressed list that spills to a temp-file arena above a
/// threshold.
pub struct SpillList<T> {
    threshold: usize,
    memory: Vec<T>,
    spill: Option<SpillFile>,
}

struct SpillFile {
    file: RefCell<File>,
    index: Vec<(u64, u32)>,
    write_pos: u64,
}

impl<T> SpillList<T>
where
    T: Serialize + DeserializeOwned + Clone,
{
    #[must_use]
    pub fn new() -> Self {
        Self::with_threshold(DEFAULT_SPILL_THRESHOLD)
    }

    #[must_use]
    pub fn with_threshold(threshold: usize) -> Self {
        Self {
            threshold,
            memory: Vec::new(),
            spill: None,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        match &self.spill {
            Some(spill) => spill.index.len(),
            None => self.memory.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether the list has overflowed into its disk arena.
    #[must_use]
    pub fn is_spilled(&self) -> bool {
        self.spill.is_some()
    }

    /// Append an entry, migrating the in-memory tier to disk when the
    /// threshold is crossed.
    pub fn push(&mut self, value: T) -> io::Result<()> {
        if self.spill.is_none() && self.memory.len() < self.threshold {
            self.memory.push(value);
            return Ok(());
        }
        if self.spill.is_none() {
            log::debug!(
                "spilling list to disk after {} in-memory entries",
                self.memory.len()
            );
            let mut spill = SpillFile::create()?;
            for entry in self.memory.drain(..) {
                spill.append(&entry)?;
            }
            self.spill = Some(spill);
        }
        if let Some(spill) = self.spill.as_mut() {
            spill.append(&value)?;
        }
        Ok(())
    }

    /// Entry at `index`, from whichever tier holds it. Read failures on
    /// the spill arena are logged and surface as a missing entry.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<T> {
        match &self.spill {
            Some(spill) => match spill.read(index) {
                Ok(value) => value,
                Err(e) => {
                    log::error!("spill store read failed for entry {index}: {e}");
                    None
                }
            },
            None => self.memory.get(index).cloned(),
        }
    }

    /// Iterate all entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = T> + '_ {
        (0..self.len()).filter_map(move |i| self.get(i))
    }
}

impl<T> Default for SpillList<T>
where
    T: Serialize + DeserializeOwned + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl SpillFile {
    fn create() -> io::Result<Self> {
        // Anonymous temp file: unlinked immediately, so the arena is
        // reclaimed by the OS even if the process dies mid-run.
        let file = tempfile::tempfile()?;
        Ok(Self {
            file: RefCell::new(file),
            index: Vec::new(),
            write_pos: 0,
        })
    }

    fn append<T: Serialize>(&mut self, value: &T) -> io::Result<()> {
        let encoded = serde_json::to_vec(value)?;
        let mut file = self.file.borrow_mut();
        file.seek(SeekFrom::Start(self.write_pos))?;
        file.write_all(&encoded)?;
        self.index.push((self.write_pos, encoded.len() as u32));
        self.write_pos += encoded.len() as u64;
        Ok(())
    }

    fn read<T: DeserializeOwned>(&self, index: usize) -> io::Result<Option<T>> {
        let Some(&(offset, len)) = self.index.get(index) else {
            return Ok(None);
        };
        let mut encoded = vec![0u8; len as usize];
        let mut file = self.file.borrow_mut();
        file.seek(SeekFrom::Start(offset))?;
        file.read_exact(&mut encoded)?;
        Ok(Some(serde_json::from_slice(&encoded)?))
    }
}
