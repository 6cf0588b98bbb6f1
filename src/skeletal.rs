//! Operations derived from the [`Sequence`] primitives.
//!
//! [`SequenceExt`] is implemented for every sequence. Searches walk a cursor
//! forwards or backwards, bulk removals go through cursor `remove`, and
//! rewrites (`replace_all`, `sort`) go through list cursor `set`. Containers
//! therefore only need to supply the primitives, and get consistent fail-fast
//! behavior for free.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use rustc_hash::FxHasher;

use crate::cursor::{Cursor, CursorMut, Iter, ListCursor};
use crate::error::{Result, SeqError, check_position, check_range};
use crate::materialize;
use crate::sequence::{Growable, Sequence, Writable};
use crate::sort::merge_sort_by;
use crate::sub_range::SubRange;

/// Derived operations available on every [`Sequence`].
pub trait SequenceExt: Sequence {
    /// Borrowing iterator over the elements in order.
    fn iter(&self) -> Iter<'_, Self> {
        return Iter::new(self);
    }

    /// A detached forward cursor at the start.
    fn cursor(&self) -> Cursor {
        return Cursor::new(self);
    }

    /// A detached bidirectional cursor whose first `next` returns the element
    /// at `index`. Fails unless `index <= len()`.
    fn list_cursor(&self, index: usize) -> Result<ListCursor> {
        return ListCursor::new(self, index);
    }

    /// A bidirectional cursor at the start that borrows `self` mutably.
    fn cursor_mut(&mut self) -> CursorMut<'_, Self> {
        return CursorMut::new(self);
    }

    fn cursor_mut_at(&mut self, index: usize) -> Result<CursorMut<'_, Self>> {
        return CursorMut::at(self, index);
    }

    /// Position of the first element equal to `x`.
    ///
    /// A primitive failure during the scan ends it with `None`, the same as
    /// not finding `x`. The bundled containers never fail an in-range `get`.
    fn index_of(&self, x: &Self::Item) -> Option<usize>
    where
        Self::Item: PartialEq,
    {
        let mut cursor = self.cursor();
        while cursor.has_next(self) {
            let item = cursor.next(self).ok()?;
            if item == x {
                return Some(cursor.position() - 1);
            }
        }
        return None;
    }

    /// Position of the last element equal to `x`. Primitive failures read as
    /// "not found", as in [`index_of`](SequenceExt::index_of).
    fn last_index_of(&self, x: &Self::Item) -> Option<usize>
    where
        Self::Item: PartialEq,
    {
        let mut cursor = self.list_cursor(self.len()).ok()?;
        while cursor.has_previous() {
            let item = cursor.previous(self).ok()?;
            if item == x {
                return Some(cursor.next_index());
            }
        }
        return None;
    }

    fn contains(&self, x: &Self::Item) -> bool
    where
        Self::Item: PartialEq,
    {
        return self.index_of(x).is_some();
    }

    /// Whether every element of `other` occurs in `self`.
    fn contains_all<O>(&self, other: &O) -> bool
    where
        O: Sequence<Item = Self::Item> + ?Sized,
        Self::Item: PartialEq,
    {
        return other.iter().all(|x| self.contains(x));
    }

    /// Append `value`. Always returns `true` on success.
    fn push(&mut self, value: Self::Item) -> Result<bool> {
        self.insert(self.len(), value)?;
        return Ok(true);
    }

    /// Append every item; returns whether anything was added.
    fn add_all<I>(&mut self, items: I) -> Result<bool>
    where
        I: IntoIterator<Item = Self::Item>,
        Self: Growable,
    {
        let mut modified = false;
        for item in items {
            modified |= self.push(item)?;
        }
        return Ok(modified);
    }

    /// Insert every item starting at `index`, keeping their order.
    fn insert_all<I>(&mut self, index: usize, items: I) -> Result<bool>
    where
        I: IntoIterator<Item = Self::Item>,
        Self: Growable,
    {
        check_position(index, self.len())?;
        let mut at = index;
        for item in items {
            self.insert(at, item)?;
            at += 1;
        }
        return Ok(at != index);
    }

    /// Remove the first element equal to `x`; returns whether one was found.
    fn remove_item(&mut self, x: &Self::Item) -> Result<bool>
    where
        Self::Item: PartialEq,
        Self: Growable,
    {
        let mut cursor = self.cursor();
        while cursor.has_next(&*self) {
            if cursor.next(&*self)? == x {
                cursor.remove(self)?;
                return Ok(true);
            }
        }
        return Ok(false);
    }

    /// Remove every element matching `filter`; returns whether any was removed.
    fn remove_if<F>(&mut self, mut filter: F) -> Result<bool>
    where
        F: FnMut(&Self::Item) -> bool,
        Self: Growable,
    {
        let mut cursor = self.cursor();
        let mut removed = false;
        while cursor.has_next(&*self) {
            if filter(cursor.next(&*self)?) {
                cursor.remove(self)?;
                removed = true;
            }
        }
        return Ok(removed);
    }

    /// Remove every element that occurs in `other`.
    fn remove_all<O>(&mut self, other: &O) -> Result<bool>
    where
        O: Sequence<Item = Self::Item> + ?Sized,
        Self::Item: PartialEq,
        Self: Growable,
    {
        return self.remove_if(|x| other.contains(x));
    }

    /// Keep only the elements that occur in `other`.
    fn retain_all<O>(&mut self, other: &O) -> Result<bool>
    where
        O: Sequence<Item = Self::Item> + ?Sized,
        Self::Item: PartialEq,
        Self: Growable,
    {
        return self.remove_if(|x| !other.contains(x));
    }

    /// Replace each element with `operator` applied to it.
    fn replace_all<F>(&mut self, mut operator: F) -> Result<()>
    where
        F: FnMut(&Self::Item) -> Self::Item,
        Self: Writable,
    {
        let mut cursor = self.list_cursor(0)?;
        while cursor.has_next(&*self) {
            let value = operator(cursor.next(&*self)?);
            cursor.set(self, value)?;
        }
        return Ok(());
    }

    /// Remove the elements `from..to`.
    fn remove_range(&mut self, from: usize, to: usize) -> Result<()>
    where
        Self: Growable,
    {
        check_range(from, to, self.len())?;
        let mut cursor = self.list_cursor(from)?;
        for _ in from..to {
            cursor.next(&*self)?;
            cursor.remove(self)?;
        }
        return Ok(());
    }

    fn clear(&mut self) -> Result<()>
    where
        Self: Growable,
    {
        return self.remove_range(0, self.len());
    }

    /// Stable sort by `compare`.
    ///
    /// The elements are copied out, sorted, and written back in order through
    /// a list cursor, so only `set` is needed from the container.
    fn sort_by<F>(&mut self, mut compare: F) -> Result<()>
    where
        F: FnMut(&Self::Item, &Self::Item) -> Ordering,
        Self::Item: Clone,
        Self: Writable,
    {
        let snapshot = self.to_vec()?;
        let mut by = |a: &Self::Item, b: &Self::Item| -> Result<Ordering> {
            return Ok(compare(a, b));
        };
        let sorted = merge_sort_by(snapshot, &mut by)?;
        return write_back(self, sorted);
    }

    /// Stable sort by natural order.
    ///
    /// Fails with [`SeqError::Incomparable`] if two elements turn out to have
    /// no ordering (a NaN, say), in which case the sequence is left as it was.
    fn sort(&mut self) -> Result<()>
    where
        Self::Item: PartialOrd + Clone,
        Self: Writable,
    {
        let snapshot = self.to_vec()?;
        let mut natural = |a: &Self::Item, b: &Self::Item| -> Result<Ordering> {
            return a.partial_cmp(b).ok_or(SeqError::Incomparable);
        };
        let sorted = merge_sort_by(snapshot, &mut natural)?;
        return write_back(self, sorted);
    }

    /// A view of the elements `from..to` whose mutations reach `self`.
    fn sub_range(&mut self, from: usize, to: usize) -> Result<SubRange<'_, Self>> {
        return SubRange::new(self, from, to);
    }

    /// Copy the elements into a vector.
    fn to_vec(&self) -> Result<Vec<Self::Item>>
    where
        Self::Item: Clone,
    {
        return materialize::to_array(self);
    }

    /// Same length and pairwise equal in order.
    fn eq_elements<O>(&self, other: &O) -> bool
    where
        O: Sequence + ?Sized,
        Self::Item: PartialEq<O::Item>,
    {
        if self.len() != other.len() {
            return false;
        }
        return self.iter().zip(other.iter()).all(|(a, b)| a == b);
    }

    /// Order-sensitive hash: `acc = 31 * acc + h(e)` starting from `1`.
    fn hash_elements(&self) -> u64
    where
        Self::Item: Hash,
    {
        let mut acc: u64 = 1;
        for item in self.iter() {
            let mut hasher = FxHasher::default();
            item.hash(&mut hasher);
            acc = acc.wrapping_mul(31).wrapping_add(hasher.finish());
        }
        return acc;
    }

    /// Render as `[a, b, c]`.
    fn display(&self) -> Elements<'_, Self> {
        return Elements(self);
    }
}

impl<S: Sequence + ?Sized> SequenceExt for S {}

/// Overwrite `seq` front to back with `values`.
fn write_back<S: Sequence + ?Sized>(seq: &mut S, values: Vec<S::Item>) -> Result<()> {
    let mut cursor = ListCursor::new(&*seq, 0)?;
    for value in values {
        cursor.next(&*seq)?;
        cursor.set(seq, value)?;
    }
    return Ok(());
}

/// Display adapter returned by [`SequenceExt::display`].
pub struct Elements<'a, S: ?Sized>(&'a S);

impl<S: Sequence + ?Sized> fmt::Display for Elements<'_, S>
where
    S::Item: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, item) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", item)?;
        }
        return f.write_str("]");
    }
}
