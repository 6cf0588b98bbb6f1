//! Errors raised by sequence primitives, cursors and derived operations.
//!
//! Every failure is synchronous and returned to the immediate caller. Nothing
//! in this crate retries internally.

use thiserror::Error;

/// Failure of a sequence operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SeqError {
    /// The container refuses this mutating primitive.
    #[error("operation not supported by this sequence")]
    Unsupported,
    /// A position outside the valid bounds.
    #[error("index {index} out of range for length {len}")]
    IndexOutOfRange { index: usize, len: usize },
    /// A range whose start lies after its end.
    #[error("invalid range {from}..{to}")]
    InvalidRange { from: usize, to: usize },
    /// The sequence changed structure behind a cursor's back.
    /// The iteration must be restarted.
    #[error("sequence was structurally modified outside the cursor")]
    ConcurrentModification,
    /// A cursor was handed a sequence other than the one it was created on.
    #[error("cursor used with a sequence it was not created on")]
    ForeignSequence,
    /// `remove` or `set` on a cursor with no element returned since the last
    /// structural change made through it.
    #[error("cursor has no current element")]
    InvalidCursorState,
    /// Iteration is exhausted.
    #[error("no more elements")]
    NoMoreElements,
    /// Two elements have no ordering under their natural order.
    #[error("elements are not mutually comparable")]
    Incomparable,
    /// A snapshot buffer cannot grow to the required number of slots.
    #[error("cannot allocate a buffer of {needed} elements")]
    AllocationLimitExceeded { needed: usize },
}

pub type Result<T> = std::result::Result<T, SeqError>;

/// Check that `index` addresses an existing element.
#[inline]
pub(crate) fn check_index(index: usize, len: usize) -> Result<()> {
    if index >= len {
        return Err(SeqError::IndexOutOfRange { index, len });
    }
    return Ok(());
}

/// Check that `index` is a valid insertion point (`index <= len`).
#[inline]
pub(crate) fn check_position(index: usize, len: usize) -> Result<()> {
    if index > len {
        return Err(SeqError::IndexOutOfRange { index, len });
    }
    return Ok(());
}

/// Check a half-open range `from..to` against a sequence of `len` elements.
pub(crate) fn check_range(from: usize, to: usize, len: usize) -> Result<()> {
    if from > to {
        return Err(SeqError::InvalidRange { from, to });
    }
    return check_position(to, len);
}
