//! A growable sequence that keeps short contents inline.

use std::fmt;
use std::hash::{Hash, Hasher};

use smallvec::{Array, SmallVec};

use crate::error::{Result, SeqError, check_index, check_position};
use crate::sequence::{Growable, Sequence, Writable};
use crate::skeletal::SequenceExt;
use crate::tracker::ModTracker;

/// A `SmallVec`-backed sequence: up to `A::size()` elements live inline,
/// longer contents spill to the heap.
pub struct InlineSeq<A: Array> {
    items: SmallVec<A>,
    tracker: ModTracker,
}

impl<A: Array> InlineSeq<A> {
    pub fn new() -> InlineSeq<A> {
        return InlineSeq {
            items: SmallVec::new(),
            tracker: ModTracker::new(),
        };
    }

    /// Whether the contents have moved to the heap.
    pub fn spilled(&self) -> bool {
        return self.items.spilled();
    }

    pub fn as_slice(&self) -> &[A::Item] {
        return self.items.as_slice();
    }
}

impl<A: Array> Default for InlineSeq<A> {
    fn default() -> InlineSeq<A> {
        return InlineSeq::new();
    }
}

impl<A: Array> Sequence for InlineSeq<A> {
    type Item = A::Item;

    fn len(&self) -> usize {
        return self.items.len();
    }

    fn get(&self, index: usize) -> Result<&A::Item> {
        return self.items.get(index).ok_or(SeqError::IndexOutOfRange {
            index,
            len: self.items.len(),
        });
    }

    fn set(&mut self, index: usize, value: A::Item) -> Result<A::Item> {
        check_index(index, self.items.len())?;
        return Ok(std::mem::replace(&mut self.items[index], value));
    }

    fn insert(&mut self, index: usize, value: A::Item) -> Result<()> {
        check_position(index, self.items.len())?;
        self.items.insert(index, value);
        self.tracker.bump();
        return Ok(());
    }

    fn remove_at(&mut self, index: usize) -> Result<A::Item> {
        check_index(index, self.items.len())?;
        let removed = self.items.remove(index);
        self.tracker.bump();
        return Ok(removed);
    }

    fn mod_count(&self) -> u64 {
        return self.tracker.count();
    }

    fn instance_id(&self) -> u64 {
        return self.tracker.id();
    }
}

impl<A: Array> Writable for InlineSeq<A> {}

impl<A: Array> Growable for InlineSeq<A> {}

impl<A: Array> Clone for InlineSeq<A>
where
    A::Item: Clone,
{
    fn clone(&self) -> InlineSeq<A> {
        return InlineSeq {
            items: self.items.clone(),
            tracker: self.tracker.clone(),
        };
    }
}

impl<A: Array> From<Vec<A::Item>> for InlineSeq<A> {
    fn from(items: Vec<A::Item>) -> InlineSeq<A> {
        return InlineSeq {
            items: SmallVec::from_vec(items),
            tracker: ModTracker::new(),
        };
    }
}

impl<A: Array> FromIterator<A::Item> for InlineSeq<A> {
    fn from_iter<I: IntoIterator<Item = A::Item>>(iter: I) -> InlineSeq<A> {
        return InlineSeq {
            items: iter.into_iter().collect(),
            tracker: ModTracker::new(),
        };
    }
}

impl<A: Array> fmt::Debug for InlineSeq<A>
where
    A::Item: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        return f.debug_list().entries(self.items.iter()).finish();
    }
}

impl<A: Array> fmt::Display for InlineSeq<A>
where
    A::Item: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        return write!(f, "{}", self.display());
    }
}

impl<A: Array> PartialEq for InlineSeq<A>
where
    A::Item: PartialEq,
{
    fn eq(&self, other: &InlineSeq<A>) -> bool {
        return self.eq_elements(other);
    }
}

impl<A: Array> Eq for InlineSeq<A> where A::Item: Eq {}

impl<A: Array> Hash for InlineSeq<A>
where
    A::Item: Hash,
{
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.hash_elements());
    }
}
