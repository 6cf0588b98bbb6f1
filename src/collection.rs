//! Sized, iterable containers: the input of the materializer.

use crate::sequence::Sequence;
use crate::skeletal::SequenceExt;

/// A container that knows roughly how many elements it holds and can hand
/// them out in order.
///
/// `size` is a hint. The materializer never relies on it matching what
/// `elements` actually yields.
pub trait Collection {
    type Item;

    /// Expected number of elements.
    fn size(&self) -> usize;

    /// The elements, in order.
    fn elements(&self) -> impl Iterator<Item = Self::Item> + '_;
}

impl<S: Sequence + ?Sized> Collection for S
where
    S::Item: Clone,
{
    type Item = S::Item;

    fn size(&self) -> usize {
        return self.len();
    }

    fn elements(&self) -> impl Iterator<Item = S::Item> + '_ {
        return self.iter().cloned();
    }
}
