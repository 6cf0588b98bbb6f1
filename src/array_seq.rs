//! A growable sequence backed by a `Vec`.

use std::fmt;
use std::hash::{Hash, Hasher};

use crate::error::{Result, SeqError, check_index, check_position};
use crate::sequence::{Growable, Sequence, Writable};
use crate::skeletal::SequenceExt;
use crate::tracker::ModTracker;

/// A `Vec`-backed sequence supporting every primitive.
#[derive(Clone)]
pub struct ArraySeq<T> {
    items: Vec<T>,
    tracker: ModTracker,
}

impl<T> ArraySeq<T> {
    pub fn new() -> ArraySeq<T> {
        return ArraySeq {
            items: Vec::new(),
            tracker: ModTracker::new(),
        };
    }

    pub fn with_capacity(capacity: usize) -> ArraySeq<T> {
        return ArraySeq {
            items: Vec::with_capacity(capacity),
            tracker: ModTracker::new(),
        };
    }

    pub fn as_slice(&self) -> &[T] {
        return &self.items;
    }

    pub fn into_vec(self) -> Vec<T> {
        return self.items;
    }
}

impl<T> Sequence for ArraySeq<T> {
    type Item = T;

    fn len(&self) -> usize {
        return self.items.len();
    }

    fn get(&self, index: usize) -> Result<&T> {
        return self.items.get(index).ok_or(SeqError::IndexOutOfRange {
            index,
            len: self.items.len(),
        });
    }

    fn set(&mut self, index: usize, value: T) -> Result<T> {
        check_index(index, self.items.len())?;
        return Ok(std::mem::replace(&mut self.items[index], value));
    }

    fn insert(&mut self, index: usize, value: T) -> Result<()> {
        check_position(index, self.items.len())?;
        self.items.insert(index, value);
        self.tracker.bump();
        return Ok(());
    }

    fn remove_at(&mut self, index: usize) -> Result<T> {
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

impl<T> Default for ArraySeq<T> {
    fn default() -> ArraySeq<T> {
        return ArraySeq::new();
    }
}

impl<T> Writable for ArraySeq<T> {}

impl<T> Growable for ArraySeq<T> {}

impl<T> From<Vec<T>> for ArraySeq<T> {
    fn from(items: Vec<T>) -> ArraySeq<T> {
        return ArraySeq {
            items,
            tracker: ModTracker::new(),
        };
    }
}

impl<T> FromIterator<T> for ArraySeq<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> ArraySeq<T> {
        return ArraySeq::from(iter.into_iter().collect::<Vec<T>>());
    }
}

impl<T: fmt::Debug> fmt::Debug for ArraySeq<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        return f.debug_list().entries(self.items.iter()).finish();
    }
}

impl<T: fmt::Display> fmt::Display for ArraySeq<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        return write!(f, "{}", self.display());
    }
}

impl<T: PartialEq> PartialEq for ArraySeq<T> {
    fn eq(&self, other: &ArraySeq<T>) -> bool {
        return self.eq_elements(other);
    }
}

impl<T: Eq> Eq for ArraySeq<T> {}

impl<T: Hash> Hash for ArraySeq<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.hash_elements());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_then_get() {
        let mut seq = ArraySeq::from(vec![1, 2, 3]);
        assert_eq!(seq.set(1, 7), Ok(2));
        assert_eq!(seq.get(1), Ok(&7));
        assert_eq!(seq.set(3, 0), Err(SeqError::IndexOutOfRange { index: 3, len: 3 }));
    }

    #[test]
    fn structural_changes_bump_count() {
        let mut seq: ArraySeq<i32> = ArraySeq::with_capacity(4);
        assert_eq!(seq.mod_count(), 0);
        seq.insert(0, 1).unwrap();
        seq.insert(1, 2).unwrap();
        assert_eq!(seq.mod_count(), 2);
        seq.set(0, 5).unwrap();
        assert_eq!(seq.mod_count(), 2);
        assert_eq!(seq.remove_at(0), Ok(5));
        assert_eq!(seq.mod_count(), 3);
    }

    #[test]
    fn failed_primitives_leave_count() {
        let mut seq = ArraySeq::from(vec![1]);
        assert_eq!(seq.insert(5, 0), Err(SeqError::IndexOutOfRange { index: 5, len: 1 }));
        assert_eq!(seq.remove_at(1), Err(SeqError::IndexOutOfRange { index: 1, len: 1 }));
        assert_eq!(seq.mod_count(), 0);
    }

    #[test]
    fn value_semantics() {
        let a: ArraySeq<i32> = (1..=3).collect();
        let b = ArraySeq::from(vec![1, 2, 3]);
        assert_eq!(a, b);
        assert_eq!(format!("{:?}", a), "[1, 2, 3]");
        assert_eq!(a.to_string(), "[1, 2, 3]");
        assert_eq!(b.into_vec(), vec![1, 2, 3]);
    }

    #[test]
    fn equal_sequences_hash_equal() {
        use std::hash::DefaultHasher;

        let mut a = ArraySeq::from(vec![1, 2]);
        let b = ArraySeq::from(vec![1, 2]);
        // Different histories, same contents.
        a.push(3).unwrap();
        a.remove_at(2).unwrap();

        let digest = |seq: &ArraySeq<i32>| {
            let mut hasher = DefaultHasher::new();
            seq.hash(&mut hasher);
            return hasher.finish();
        };
        assert_eq!(digest(&a), digest(&b));
    }
}
