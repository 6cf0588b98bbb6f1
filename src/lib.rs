//! Skeletal - ordered collections derived from five primitives.
//!
//! A container implements [`Sequence`] (`len`, `get`, and optionally `set`,
//! `insert`, `remove_at`) and gets searching, bulk edits, sorting, sub-range
//! views, snapshots, equality and hashing from [`SequenceExt`]. Cursors detect
//! structural changes made behind their back through a modification counter.
//!
//! # Quick Start
//!
//! ```
//! use skeletal::{ArraySeq, Sequence, SequenceExt};
//!
//! let mut seq = ArraySeq::from(vec![3, 1, 2]);
//! seq.sort().unwrap();
//! assert_eq!(seq.to_vec(), Ok(vec![1, 2, 3]));
//!
//! // Views write through to the parent.
//! seq.sub_range(0, 2).unwrap().clear().unwrap();
//! assert_eq!(seq.len(), 1);
//! assert_eq!(seq.to_string(), "[3]");
//! ```

pub mod array_seq;
pub mod collection;
pub mod cursor;
pub mod error;
pub mod inline_seq;
pub mod materialize;
pub mod sequence;
pub mod skeletal;
mod sort;
pub mod sub_range;
pub mod tracker;

pub use array_seq::ArraySeq;
pub use collection::Collection;
pub use cursor::{Cursor, CursorMut, Iter, ListCursor};
pub use error::{Result, SeqError};
pub use inline_seq::InlineSeq;
pub use materialize::{GrowthPolicy, MAX_SAFE_CAPACITY};
pub use sequence::{Growable, Sequence, Writable};
pub use skeletal::{Elements, SequenceExt};
pub use sub_range::SubRange;
pub use tracker::ModTracker;

#[cfg(test)]
pub mod test_utils {
    /// Route `tracing` output to the test harness. `RUST_LOG` overrides the
    /// default `debug` filter.
    pub fn init_test_logging() {
        use tracing_subscriber::{EnvFilter, fmt};

        // Already initialized by another test is fine.
        let _ = fmt()
            .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")))
            .with_test_writer()
            .try_init();
    }
}
