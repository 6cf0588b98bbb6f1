//! The positional primitives a concrete container supplies.
//!
//! Everything else in this crate (cursors, search, bulk edits, sorting,
//! views and snapshots) is derived from the five operations of [`Sequence`].

use crate::error::{Result, SeqError, check_index};

/// A zero-indexed ordered container with no gaps between `0` and `len() - 1`.
///
/// Only `len` and `get` are required. The mutating primitives default to
/// [`SeqError::Unsupported`]; a container overrides the ones it allows and
/// advertises them with [`Writable`] and [`Growable`].
///
/// A container that overrides `insert` or `remove_at` must bump a
/// [`ModTracker`](crate::tracker::ModTracker) on every successful call and
/// report it from `mod_count`. Overwriting with `set` is not a structural
/// change and must leave the count alone.
pub trait Sequence {
    /// The element type.
    type Item;

    /// Number of elements.
    fn len(&self) -> usize;

    /// The element at `index`, for `index < len()`.
    fn get(&self, index: usize) -> Result<&Self::Item>;

    /// Replace the element at `index`, returning the previous one.
    fn set(&mut self, index: usize, value: Self::Item) -> Result<Self::Item> {
        let _ = (index, value);
        return Err(SeqError::Unsupported);
    }

    /// Insert `value` at `index <= len()`, shifting later elements right.
    fn insert(&mut self, index: usize, value: Self::Item) -> Result<()> {
        let _ = (index, value);
        return Err(SeqError::Unsupported);
    }

    /// Remove and return the element at `index`, shifting later elements left.
    fn remove_at(&mut self, index: usize) -> Result<Self::Item> {
        let _ = index;
        return Err(SeqError::Unsupported);
    }

    /// Structural modification count. Sequences that never change structure
    /// can keep the default.
    fn mod_count(&self) -> u64 {
        return 0;
    }

    /// Identity a cursor binds to when it is created. Containers with a
    /// [`ModTracker`](crate::tracker::ModTracker) report its id; the default
    /// is the address of the sequence, which is stable for as long as a
    /// cursor can borrow it.
    fn instance_id(&self) -> u64 {
        return (self as *const Self).cast::<()>() as usize as u64;
    }

    fn is_empty(&self) -> bool {
        return self.len() == 0;
    }
}

/// Marker: `set` is supported.
pub trait Writable: Sequence {}

/// Marker: `insert` and `remove_at` are supported as well as `set`.
pub trait Growable: Writable {}

/// Slices are fixed-length: elements can be overwritten but not inserted or
/// removed.
impl<T> Sequence for [T] {
    type Item = T;

    fn len(&self) -> usize {
        return <[T]>::len(self);
    }

    fn get(&self, index: usize) -> Result<&T> {
        return <[T]>::get(self, index).ok_or(SeqError::IndexOutOfRange {
            index,
            len: <[T]>::len(self),
        });
    }

    fn set(&mut self, index: usize, value: T) -> Result<T> {
        check_index(index, <[T]>::len(self))?;
        return Ok(std::mem::replace(&mut self[index], value));
    }
}

impl<T> Writable for [T] {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slice_reads() {
        let items = [10, 20, 30];
        let seq: &[i32] = &items;
        assert_eq!(Sequence::len(seq), 3);
        assert_eq!(Sequence::get(seq, 1), Ok(&20));
        assert_eq!(
            Sequence::get(seq, 3),
            Err(SeqError::IndexOutOfRange { index: 3, len: 3 })
        );
        assert_eq!(seq.mod_count(), 0);
    }

    #[test]
    fn slice_set_returns_previous() {
        let mut items = [10, 20, 30];
        assert_eq!(Sequence::set(items.as_mut_slice(), 1, 25), Ok(20));
        assert_eq!(Sequence::get(items.as_slice(), 1), Ok(&25));
        assert_eq!(items.as_slice().mod_count(), 0);
    }

    #[test]
    fn slice_refuses_structural_changes() {
        let mut items = [10, 20, 30];
        assert_eq!(Sequence::insert(items.as_mut_slice(), 0, 5), Err(SeqError::Unsupported));
        assert_eq!(Sequence::remove_at(items.as_mut_slice(), 0), Err(SeqError::Unsupported));
        assert_eq!(items, [10, 20, 30]);
    }

    #[test]
    fn default_primitives_unsupported() {
        struct Fixed(Vec<u8>);

        impl Sequence for Fixed {
            type Item = u8;

            fn len(&self) -> usize {
                return self.0.len();
            }

            fn get(&self, index: usize) -> Result<&u8> {
                check_index(index, self.0.len())?;
                return Ok(&self.0[index]);
            }
        }

        let mut fixed = Fixed(vec![1, 2]);
        assert_eq!(fixed.set(0, 9), Err(SeqError::Unsupported));
        assert_eq!(fixed.insert(0, 9), Err(SeqError::Unsupported));
        assert_eq!(fixed.remove_at(0), Err(SeqError::Unsupported));
        assert!(!fixed.is_empty());
    }
}
