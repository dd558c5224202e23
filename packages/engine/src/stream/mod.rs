//! Streaming JSON token cursor
//!
//! A pull-based tokenizer over any [`std::io::Read`] source, tracking
//! absolute byte offsets so that sub-tree byte ranges can be captured
//! during one pass and replayed in a later, bounded pass. Structural
//! skipping of unwanted sub-trees runs directly over the byte window and
//! never materializes keys or values.

mod buffer;
mod cursor;
mod region;

pub use cursor::{Event, JsonCursor};
pub use region::{Region, RegionReader};
