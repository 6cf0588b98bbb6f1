//! Fail-fast cursors over a [`Sequence`].
//!
//! A cursor does not hold on to its sequence between calls. It keeps four
//! pieces of state and every operation is handed the sequence explicitly:
//!
//! - `owner`: [`Sequence::instance_id`] of the sequence it was created on.
//! - `pos`: index of the element `next` would read, in `0..=len`.
//! - `last`: index of the element most recently returned by `next` or
//!   `previous`, cleared by any structural change made through the cursor.
//! - `expected`: the sequence's modification count as last seen.
//!
//! Before each read or write the cursor checks that it was handed its own
//! sequence, failing with [`SeqError::ForeignSequence`] otherwise, then
//! compares `expected` with the live count and fails with
//! [`SeqError::ConcurrentModification`] on mismatch. A structural change
//! made *through* the cursor resynchronizes `expected`, so it is absorbed
//! rather than reported.
//!
//! Because the sequence is passed per call, it can be mutated between calls.
//! When that safety net is not needed, [`Iter`] and [`CursorMut`] borrow the
//! sequence for their whole lifetime and the borrow checker rules out outside
//! changes.

use crate::error::{Result, SeqError, check_position};
use crate::sequence::Sequence;

/// Map an out-of-range failure of a primitive called through a cursor. The
/// index came from the cursor's own bookkeeping, so the only way for it to be
/// out of range is for the sequence to have shrunk underneath.
fn out_of_range_is_concurrent(err: SeqError) -> SeqError {
    return match err {
        SeqError::IndexOutOfRange { .. } => SeqError::ConcurrentModification,
        other => other,
    };
}

/// Forward cursor: `has_next`, `next` and `remove`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cursor {
    owner: u64,
    pos: usize,
    last: Option<usize>,
    expected: u64,
}

impl Cursor {
    /// Create a cursor positioned before the first element.
    pub fn new<S: Sequence + ?Sized>(seq: &S) -> Cursor {
        return Cursor {
            owner: seq.instance_id(),
            pos: 0,
            last: None,
            expected: seq.mod_count(),
        };
    }

    fn starting_at<S: Sequence + ?Sized>(seq: &S, pos: usize) -> Cursor {
        return Cursor {
            owner: seq.instance_id(),
            pos,
            last: None,
            expected: seq.mod_count(),
        };
    }

    /// Index of the element `next` would return.
    #[inline]
    pub fn position(&self) -> usize {
        return self.pos;
    }

    /// Whether `next` has an element to return. Never fails.
    pub fn has_next<S: Sequence + ?Sized>(&self, seq: &S) -> bool {
        return self.pos != seq.len();
    }

    /// Return the element at the cursor and advance past it.
    pub fn next<'a, S: Sequence + ?Sized>(&mut self, seq: &'a S) -> Result<&'a S::Item> {
        self.check(seq)?;
        let i = self.pos;
        return match seq.get(i) {
            Ok(item) => {
                self.last = Some(i);
                self.pos = i + 1;
                Ok(item)
            }
            Err(SeqError::IndexOutOfRange { .. }) => {
                self.check(seq)?;
                Err(SeqError::NoMoreElements)
            }
            Err(err) => Err(err),
        };
    }

    /// Remove the element most recently returned, through the sequence's
    /// `remove_at` primitive.
    pub fn remove<S: Sequence + ?Sized>(&mut self, seq: &mut S) -> Result<S::Item> {
        let last = self.last.ok_or(SeqError::InvalidCursorState)?;
        self.check(&*seq)?;
        let removed = seq.remove_at(last).map_err(out_of_range_is_concurrent)?;
        if last < self.pos {
            self.pos -= 1;
        }
        self.last = None;
        self.expected = seq.mod_count();
        return Ok(removed);
    }

    fn check<S: Sequence + ?Sized>(&self, seq: &S) -> Result<()> {
        if seq.instance_id() != self.owner {
            tracing::debug!(owner = self.owner, given = seq.instance_id(), "cursor handed a foreign sequence");
            return Err(SeqError::ForeignSequence);
        }
        let actual = seq.mod_count();
        if actual != self.expected {
            tracing::debug!(
                expected = self.expected,
                actual,
                pos = self.pos,
                "cursor detected a structural change made outside it"
            );
            return Err(SeqError::ConcurrentModification);
        }
        return Ok(());
    }
}

/// Bidirectional cursor: a [`Cursor`] that can also step backwards, overwrite
/// the last returned element and insert at its position.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListCursor {
    inner: Cursor,
}

impl ListCursor {
    /// Create a cursor whose first `next` returns the element at `index`.
    /// `index` may equal `len()`, in which case the cursor starts at the end.
    pub fn new<S: Sequence + ?Sized>(seq: &S, index: usize) -> Result<ListCursor> {
        check_position(index, seq.len())?;
        return Ok(ListCursor {
            inner: Cursor::starting_at(seq, index),
        });
    }

    pub fn at_start<S: Sequence + ?Sized>(seq: &S) -> ListCursor {
        return ListCursor {
            inner: Cursor::new(seq),
        };
    }

    #[inline]
    pub fn next_index(&self) -> usize {
        return self.inner.pos;
    }

    /// Index of the element `previous` would return, if any.
    #[inline]
    pub fn previous_index(&self) -> Option<usize> {
        return self.inner.pos.checked_sub(1);
    }

    pub fn has_next<S: Sequence + ?Sized>(&self, seq: &S) -> bool {
        return self.inner.has_next(seq);
    }

    #[inline]
    pub fn has_previous(&self) -> bool {
        return self.inner.pos != 0;
    }

    pub fn next<'a, S: Sequence + ?Sized>(&mut self, seq: &'a S) -> Result<&'a S::Item> {
        return self.inner.next(seq);
    }

    /// Step back and return the element now under the cursor.
    ///
    /// Alternating `next` and `previous` returns the same element repeatedly.
    pub fn previous<'a, S: Sequence + ?Sized>(&mut self, seq: &'a S) -> Result<&'a S::Item> {
        self.inner.check(seq)?;
        let Some(i) = self.inner.pos.checked_sub(1) else {
            return Err(SeqError::NoMoreElements);
        };
        return match seq.get(i) {
            Ok(item) => {
                self.inner.pos = i;
                self.inner.last = Some(i);
                Ok(item)
            }
            Err(SeqError::IndexOutOfRange { .. }) => {
                self.inner.check(seq)?;
                Err(SeqError::NoMoreElements)
            }
            Err(err) => Err(err),
        };
    }

    pub fn remove<S: Sequence + ?Sized>(&mut self, seq: &mut S) -> Result<S::Item> {
        return self.inner.remove(seq);
    }

    /// Overwrite the element most recently returned by `next` or `previous`,
    /// returning the value it replaced.
    pub fn set<S: Sequence + ?Sized>(&mut self, seq: &mut S, value: S::Item) -> Result<S::Item> {
        let last = self.inner.last.ok_or(SeqError::InvalidCursorState)?;
        self.inner.check(&*seq)?;
        let previous = seq.set(last, value).map_err(out_of_range_is_concurrent)?;
        self.inner.expected = seq.mod_count();
        return Ok(previous);
    }

    /// Insert `value` immediately before the element `next` would return.
    /// A following `next` is unaffected; a following `previous` returns the
    /// inserted value.
    pub fn insert<S: Sequence + ?Sized>(&mut self, seq: &mut S, value: S::Item) -> Result<()> {
        self.inner.check(&*seq)?;
        let i = self.inner.pos;
        seq.insert(i, value).map_err(out_of_range_is_concurrent)?;
        self.inner.last = None;
        self.inner.pos = i + 1;
        self.inner.expected = seq.mod_count();
        return Ok(());
    }
}

/// Borrowing forward iterator. Holding `&S` rules out structural changes
/// for its lifetime, so it is an ordinary [`Iterator`].
pub struct Iter<'a, S: Sequence + ?Sized> {
    seq: &'a S,
    cursor: Cursor,
}

impl<'a, S: Sequence + ?Sized> Iter<'a, S> {
    pub fn new(seq: &'a S) -> Iter<'a, S> {
        return Iter {
            seq,
            cursor: Cursor::new(seq),
        };
    }
}

impl<'a, S: Sequence + ?Sized> Iterator for Iter<'a, S> {
    type Item = &'a S::Item;

    /// Assumes `get` succeeds for every index below `len()`. A container that
    /// breaks this ends the iteration early; debug builds assert instead.
    fn next(&mut self) -> Option<&'a S::Item> {
        if !self.cursor.has_next(self.seq) {
            return None;
        }
        let next = self.cursor.next(self.seq);
        debug_assert!(next.is_ok(), "in-range read failed: {:?}", next.as_ref().err());
        return next.ok();
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.seq.len().saturating_sub(self.cursor.position());
        return (remaining, Some(remaining));
    }
}

impl<S: Sequence + ?Sized> ExactSizeIterator for Iter<'_, S> {}

/// Bidirectional cursor that holds the sequence mutably for its lifetime.
pub struct CursorMut<'a, S: Sequence + ?Sized> {
    seq: &'a mut S,
    cursor: ListCursor,
}

impl<'a, S: Sequence + ?Sized> CursorMut<'a, S> {
    /// Borrow `seq` with the cursor before its first element.
    pub fn new(seq: &'a mut S) -> CursorMut<'a, S> {
        let cursor = ListCursor::at_start(&*seq);
        return CursorMut { seq, cursor };
    }

    /// Borrow `seq` with the cursor before the element at `index`.
    pub fn at(seq: &'a mut S, index: usize) -> Result<CursorMut<'a, S>> {
        let cursor = ListCursor::new(&*seq, index)?;
        return Ok(CursorMut { seq, cursor });
    }

    /// The underlying sequence.
    pub fn sequence(&self) -> &S {
        return &*self.seq;
    }

    pub fn next_index(&self) -> usize {
        return self.cursor.next_index();
    }

    pub fn previous_index(&self) -> Option<usize> {
        return self.cursor.previous_index();
    }

    pub fn has_next(&self) -> bool {
        return self.cursor.has_next(&*self.seq);
    }

    pub fn has_previous(&self) -> bool {
        return self.cursor.has_previous();
    }

    pub fn next(&mut self) -> Result<&S::Item> {
        return self.cursor.next(&*self.seq);
    }

    pub fn previous(&mut self) -> Result<&S::Item> {
        return self.cursor.previous(&*self.seq);
    }

    pub fn remove(&mut self) -> Result<S::Item> {
        return self.cursor.remove(&mut *self.seq);
    }

    pub fn set(&mut self, value: S::Item) -> Result<S::Item> {
        return self.cursor.set(&mut *self.seq, value);
    }

    pub fn insert(&mut self, value: S::Item) -> Result<()> {
        return self.cursor.insert(&mut *self.seq, value);
    }
}
