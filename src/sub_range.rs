//! Half-open views into a parent sequence.

use std::fmt;

use crate::error::{Result, check_index, check_position, check_range};
use crate::sequence::{Growable, Sequence, Writable};
use crate::skeletal::SequenceExt;

/// The elements `from..to` of a parent sequence, seen as a sequence of their
/// own. Index `0` of the view is index `from` of the parent.
///
/// Every mutation goes straight through to the parent: inserting into or
/// removing from the view shifts the parent's later elements and bumps the
/// parent's modification count, which the view reports as its own.
///
/// The view borrows the parent mutably, so the parent cannot be changed by
/// any other path while the view is alive.
pub struct SubRange<'a, S: Sequence + ?Sized> {
    parent: &'a mut S,
    offset: usize,
    len: usize,
}

impl<'a, S: Sequence + ?Sized> SubRange<'a, S> {
    /// View `from..to` of `parent`.
    pub fn new(parent: &'a mut S, from: usize, to: usize) -> Result<SubRange<'a, S>> {
        check_range(from, to, parent.len())?;
        return Ok(SubRange {
            parent,
            offset: from,
            len: to - from,
        });
    }

    /// Position of the view's first element in the parent.
    pub fn offset(&self) -> usize {
        return self.offset;
    }
}

impl<S: Sequence + ?Sized> Sequence for SubRange<'_, S> {
    type Item = S::Item;

    fn len(&self) -> usize {
        return self.len;
    }

    fn get(&self, index: usize) -> Result<&S::Item> {
        check_index(index, self.len)?;
        return self.parent.get(self.offset + index);
    }

    fn set(&mut self, index: usize, value: S::Item) -> Result<S::Item> {
        check_index(index, self.len)?;
        return self.parent.set(self.offset + index, value);
    }

    fn insert(&mut self, index: usize, value: S::Item) -> Result<()> {
        check_position(index, self.len)?;
        self.parent.insert(self.offset + index, value)?;
        self.len += 1;
        return Ok(());
    }

    fn remove_at(&mut self, index: usize) -> Result<S::Item> {
        check_index(index, self.len)?;
        let removed = self.parent.remove_at(self.offset + index)?;
        self.len -= 1;
        return Ok(removed);
    }

    fn mod_count(&self) -> u64 {
        return self.parent.mod_count();
    }

    /// Views of different windows on one parent are distinct sequences.
    fn instance_id(&self) -> u64 {
        return self.parent.instance_id().wrapping_mul(31).wrapping_add(self.offset as u64 + 1);
    }
}

impl<S: Writable + ?Sized> Writable for SubRange<'_, S> {}

impl<S: Growable + ?Sized> Growable for SubRange<'_, S> {}

impl<S: Sequence + ?Sized> fmt::Debug for SubRange<'_, S>
where
    S::Item: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        return f.debug_list().entries(self.iter()).finish();
    }
}
