//! Stable merge sort with a fallible comparator.
//!
//! `slice::sort_by` needs a total order and may panic when handed an
//! inconsistent one. Sorting by natural `PartialOrd` order has to report
//! incomparable pairs as an error instead, so the comparator here returns a
//! `Result` and the first failure aborts the sort.

use std::cmp::Ordering;

use crate::error::Result;

/// Runs at or below this length are sorted by insertion.
const INSERTION_THRESHOLD: usize = 16;

/// Sort `items` stably by `compare`, consuming and returning the buffer.
pub(crate) fn merge_sort_by<T, F>(mut items: Vec<T>, compare: &mut F) -> Result<Vec<T>>
where
    F: FnMut(&T, &T) -> Result<Ordering>,
{
    if items.len() <= INSERTION_THRESHOLD {
        insertion_sort_by(&mut items, compare)?;
        return Ok(items);
    }
    let right = items.split_off(items.len() / 2);
    let left = merge_sort_by(items, compare)?;
    let right = merge_sort_by(right, compare)?;
    return merge(left, right, compare);
}

fn insertion_sort_by<T, F>(items: &mut [T], compare: &mut F) -> Result<()>
where
    F: FnMut(&T, &T) -> Result<Ordering>,
{
    for i in 1..items.len() {
        let mut j = i;
        while j > 0 && compare(&items[j - 1], &items[j])? == Ordering::Greater {
            items.swap(j - 1, j);
            j -= 1;
        }
    }
    return Ok(());
}

fn merge<T, F>(left: Vec<T>, right: Vec<T>, compare: &mut F) -> Result<Vec<T>>
where
    F: FnMut(&T, &T) -> Result<Ordering>,
{
    let mut out = Vec::with_capacity(left.len() + right.len());
    let mut left = left.into_iter().peekable();
    let mut right = right.into_iter().peekable();
    loop {
        // Ties take from the left run to keep the sort stable.
        let take_right = match (left.peek(), right.peek()) {
            (Some(l), Some(r)) => compare(l, r)? == Ordering::Greater,
            (Some(_), None) => false,
            (None, Some(_)) => true,
            (None, None) => break,
        };
        let next = if take_right { right.next() } else { left.next() };
        out.extend(next);
    }
    return Ok(out);
}
