//! Snapshotting a collection into a vector.
//!
//! The size a collection reports is only a hint: the element stream may end
//! early or keep going. The buffer is sized to the hint up front, trimmed if
//! fewer elements arrive, and grown by half again plus one if more do.
//!
//! Growth is bounded by a [`GrowthPolicy`]. Past the soft limit the buffer
//! grows one slot at a time; past the hard limit the snapshot fails with
//! [`SeqError::AllocationLimitExceeded`]. An allocator refusal is reported the
//! same way.

use crate::collection::Collection;
use crate::error::{Result, SeqError};

/// Largest capacity the growth step aims for before it falls back to exact
/// increments.
pub const MAX_SAFE_CAPACITY: usize = isize::MAX as usize - 8;

/// Limits on how far a snapshot buffer may grow.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GrowthPolicy {
    /// Capacity the geometric growth step is clamped to.
    pub soft_limit: usize,
    /// Capacity that is never exceeded.
    pub hard_limit: usize,
}

impl Default for GrowthPolicy {
    fn default() -> Self {
        return GrowthPolicy::new();
    }
}

impl GrowthPolicy {
    pub const fn new() -> GrowthPolicy {
        return GrowthPolicy {
            soft_limit: MAX_SAFE_CAPACITY,
            hard_limit: isize::MAX as usize,
        };
    }

    pub const fn with_soft_limit(mut self, soft_limit: usize) -> GrowthPolicy {
        self.soft_limit = soft_limit;
        return self;
    }

    pub const fn with_hard_limit(mut self, hard_limit: usize) -> GrowthPolicy {
        self.hard_limit = hard_limit;
        return self;
    }

    /// Capacity to move to once a buffer of `cap` slots is full.
    ///
    /// `cap + cap / 2 + 1`, which grows even from `0` and `1`. If that passes
    /// the soft limit, the soft limit is used instead, or exactly `cap + 1`
    /// when the soft limit is already too small.
    pub fn grow(&self, cap: usize) -> Result<usize> {
        let Some(needed) = cap.checked_add(1) else {
            return Err(self.exceeded(usize::MAX));
        };
        let grown = cap.saturating_add(cap >> 1).saturating_add(1);
        if grown <= self.soft_limit {
            return Ok(grown);
        }
        if needed > self.hard_limit {
            return Err(self.exceeded(needed));
        }
        return Ok(needed.max(self.soft_limit));
    }

    fn exceeded(&self, needed: usize) -> SeqError {
        tracing::warn!(needed, hard_limit = self.hard_limit, "snapshot buffer cannot grow");
        return SeqError::AllocationLimitExceeded { needed };
    }
}

fn reserve<T>(buf: &mut Vec<T>, cap: usize) -> Result<()> {
    let additional = cap.saturating_sub(buf.len());
    return buf
        .try_reserve_exact(additional)
        .map_err(|_| SeqError::AllocationLimitExceeded { needed: cap });
}

/// Snapshot `collection` with the default policy.
pub fn to_array<C: Collection + ?Sized>(collection: &C) -> Result<Vec<C::Item>> {
    return to_array_with(collection, &GrowthPolicy::default());
}

pub fn to_array_with<C: Collection + ?Sized>(collection: &C, policy: &GrowthPolicy) -> Result<Vec<C::Item>> {
    return materialize(collection.size(), collection.elements(), policy);
}

/// Collect `elements` into a vector of exactly the produced length, using
/// `hint` as the initial capacity.
///
/// The hint is clamped to the hard limit, so whether a snapshot fails depends
/// only on how many elements are produced.
pub fn materialize<I: Iterator>(hint: usize, mut elements: I, policy: &GrowthPolicy) -> Result<Vec<I::Item>> {
    let hint = hint.min(policy.hard_limit);
    let mut buf = Vec::new();
    reserve(&mut buf, hint)?;
    for produced in 0..hint {
        let Some(item) = elements.next() else {
            tracing::trace!(hint, produced, "fewer elements than hinted");
            buf.shrink_to_fit();
            return Ok(buf);
        };
        buf.push(item);
    }
    return finish(buf, elements, policy);
}

/// Snapshot `collection` into `dest`, with the default policy.
pub fn to_array_into<C: Collection + ?Sized>(
    collection: &C,
    dest: Vec<Option<C::Item>>,
) -> Result<Vec<Option<C::Item>>> {
    return materialize_into(collection.size(), collection.elements(), dest, &GrowthPolicy::default());
}

/// Fill a caller-supplied buffer of slots.
///
/// - `dest` at least as long as `hint`: it is filled in place. If the
///   elements run out first, the slot after the last one is set to `None`
///   and `dest` is returned with its length unchanged.
/// - `dest` shorter than `hint`: a working buffer of `hint` slots is filled.
///   If the elements run out first:
///   - more were produced than `dest` holds: the working buffer, trimmed to
///     the produced count, is returned;
///   - exactly `dest.len()` were produced: they are copied into `dest`, which
///     is returned with no terminator;
///   - fewer were produced: they are copied into `dest` and the next slot is
///     set to `None`.
/// - More elements than the buffer holds: it grows as in [`materialize`] and
///   is returned trimmed to the produced count.
///
/// As in [`materialize`], producing more than `policy.hard_limit` elements
/// fails, however long `dest` is.
pub fn materialize_into<T, I>(
    hint: usize,
    mut elements: I,
    mut dest: Vec<Option<T>>,
    policy: &GrowthPolicy,
) -> Result<Vec<Option<T>>>
where
    I: Iterator<Item = T>,
{
    let hint = hint.min(policy.hard_limit);
    if dest.len() >= hint {
        for i in 0..dest.len() {
            let Some(item) = elements.next() else {
                dest[i] = None;
                return Ok(dest);
            };
            if i == policy.hard_limit {
                return Err(policy.exceeded(i + 1));
            }
            dest[i] = Some(item);
        }
        return finish(dest, elements.map(Some), policy);
    }

    let mut work = Vec::new();
    reserve(&mut work, hint)?;
    for produced in 0..hint {
        let Some(item) = elements.next() else {
            tracing::trace!(hint, produced, dest = dest.len(), "fewer elements than hinted");
            if dest.len() < produced {
                work.shrink_to_fit();
                return Ok(work);
            }
            for (slot, value) in dest.iter_mut().zip(work) {
                *slot = value;
            }
            if dest.len() > produced {
                dest[produced] = None;
            }
            return Ok(dest);
        };
        work.push(Some(item));
    }
    return finish(work, elements.map(Some), policy);
}

/// Keep appending once a full buffer meets more elements, growing by
/// `policy`, then trim the spare capacity.
fn finish<T, I>(mut buf: Vec<T>, elements: I, policy: &GrowthPolicy) -> Result<Vec<T>>
where
    I: Iterator<Item = T>,
{
    let mut cap = buf.len();
    for item in elements {
        if buf.len() == cap {
            let next = policy.grow(cap)?;
            tracing::trace!(from = cap, to = next, "growing snapshot buffer");
            reserve(&mut buf, next)?;
            cap = next;
        }
        buf.push(item);
    }
    if buf.len() < buf.capacity() {
        buf.shrink_to_fit();
    }
    return Ok(buf);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::array_seq::ArraySeq;

    /// A collection whose size hint is deliberately stale.
    struct Stale {
        items: Vec<u32>,
        hint: usize,
    }

    impl Collection for Stale {
        type Item = u32;

        fn size(&self) -> usize {
            return self.hint;
        }

        fn elements(&self) -> impl Iterator<Item = u32> + '_ {
            return self.items.iter().copied();
        }
    }

    fn stale(len: u32, hint: usize) -> Stale {
        return Stale {
            items: (0..len).collect(),
            hint,
        };
    }

    #[test]
    fn growth_step() {
        let policy = GrowthPolicy::default();
        assert_eq!(policy.grow(0), Ok(1));
        assert_eq!(policy.grow(1), Ok(2));
        assert_eq!(policy.grow(2), Ok(4));
        assert_eq!(policy.grow(10), Ok(16));
    }

    #[test]
    fn growth_clamps_to_soft_limit() {
        let policy = GrowthPolicy::new().with_soft_limit(10).with_hard_limit(12);
        assert_eq!(policy.grow(6), Ok(10));
        assert_eq!(policy.grow(10), Ok(11));
        assert_eq!(policy.grow(11), Ok(12));
        assert_eq!(policy.grow(12), Err(SeqError::AllocationLimitExceeded { needed: 13 }));
    }

    #[test]
    fn growth_overflow() {
        let policy = GrowthPolicy::new().with_hard_limit(usize::MAX);
        assert_eq!(
            policy.grow(usize::MAX),
            Err(SeqError::AllocationLimitExceeded { needed: usize::MAX })
        );
        assert_eq!(policy.grow(usize::MAX - 1), Ok(usize::MAX));
    }

    #[test]
    fn exact_hint() {
        let seq = ArraySeq::from(vec![1, 2, 3]);
        assert_eq!(to_array(&seq), Ok(vec![1, 2, 3]));
        let empty: ArraySeq<i32> = ArraySeq::new();
        assert_eq!(to_array(&empty), Ok(Vec::new()));
    }

    #[test]
    fn hint_too_large_trims() {
        let snapshot = to_array(&stale(3, 10)).unwrap();
        assert_eq!(snapshot, vec![0, 1, 2]);
    }

    #[test]
    fn hint_too_small_grows() {
        assert_eq!(to_array(&stale(50, 0)).unwrap(), (0..50).collect::<Vec<_>>());
        assert_eq!(to_array(&stale(50, 7)).unwrap(), (0..50).collect::<Vec<_>>());
    }

    #[test]
    fn growth_fails_past_hard_limit() {
        let policy = GrowthPolicy::new().with_soft_limit(4).with_hard_limit(6);
        assert_eq!(
            to_array_with(&stale(6, 0), &policy),
            Ok((0..6).collect::<Vec<_>>())
        );
        assert_eq!(
            to_array_with(&stale(7, 0), &policy),
            Err(SeqError::AllocationLimitExceeded { needed: 7 })
        );
    }

    #[test]
    fn hint_above_hard_limit_is_clamped() {
        let policy = GrowthPolicy::new().with_soft_limit(4).with_hard_limit(6);
        let exceeded = Err(SeqError::AllocationLimitExceeded { needed: 7 });
        // Same outcome whatever the hint says.
        assert_eq!(materialize(10, 0..10, &policy), exceeded);
        assert_eq!(materialize(0, 0..10, &policy), exceeded);
        assert_eq!(materialize(10, 0..6, &policy), Ok((0..6).collect::<Vec<_>>()));
        assert_eq!(to_array_with(&stale(10, 10), &policy), exceeded);
    }

    #[test]
    fn long_destination_respects_hard_limit() {
        let policy = GrowthPolicy::new().with_soft_limit(4).with_hard_limit(6);
        assert_eq!(
            materialize_into(10, 0..10, vec![None; 10], &policy),
            Err(SeqError::AllocationLimitExceeded { needed: 7 })
        );
        assert_eq!(
            materialize_into(2, 0..10, vec![None; 3], &policy),
            Err(SeqError::AllocationLimitExceeded { needed: 7 })
        );
        let out = materialize_into(10, 0..6, vec![None; 8], &policy).unwrap();
        assert_eq!(out[..7], [Some(0), Some(1), Some(2), Some(3), Some(4), Some(5), None]);
    }

    #[test]
    fn materialize_plain_iterator() {
        let out = materialize(2, "abcde".chars(), &GrowthPolicy::default()).unwrap();
        assert_eq!(out, vec!['a', 'b', 'c', 'd', 'e']);
    }

    #[test]
    fn into_large_destination_terminates() {
        let dest = vec![Some(9); 5];
        let out = to_array_into(&stale(3, 3), dest).unwrap();
        assert_eq!(out, vec![Some(0), Some(1), Some(2), None, Some(9)]);
    }

    #[test]
    fn into_exact_destination() {
        let dest = vec![None; 3];
        let out = to_array_into(&stale(3, 3), dest).unwrap();
        assert_eq!(out, vec![Some(0), Some(1), Some(2)]);
    }

    #[test]
    fn into_small_destination_with_room_after_shrink() {
        // Hint says 6, destination holds 4, only 2 arrive.
        let dest = vec![Some(9); 4];
        let out = to_array_into(&stale(2, 6), dest).unwrap();
        assert_eq!(out, vec![Some(0), Some(1), None, Some(9)]);
    }

    #[test]
    fn into_small_destination_exactly_filled_after_shrink() {
        let dest = vec![Some(9); 2];
        let out = to_array_into(&stale(2, 6), dest).unwrap();
        assert_eq!(out, vec![Some(0), Some(1)]);
    }

    #[test]
    fn into_destination_too_small_for_produced() {
        let dest = vec![Some(9); 1];
        let out = to_array_into(&stale(3, 6), dest).unwrap();
        assert_eq!(out, vec![Some(0), Some(1), Some(2)]);
    }

    #[test]
    fn into_grows_past_destination() {
        let dest = vec![None; 2];
        let out = to_array_into(&stale(5, 2), dest).unwrap();
        assert_eq!(out, vec![Some(0), Some(1), Some(2), Some(3), Some(4)]);

        let dest = vec![None; 1];
        let out = to_array_into(&stale(5, 3), dest).unwrap();
        assert_eq!(out.len(), 5);
    }
}
