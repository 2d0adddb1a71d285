//! Score extraction and score comparison
//!
//! Both are plain configuration of a [`Ranking`](super::Ranking). The
//! defaults use each value as its own score and order scores with
//! `PartialOrd`; closures are wrapped in [`KeyFn`] and [`CmpFn`].

use std::cmp::Ordering;
use std::fmt;

/// Maps a value to the score it is ranked by
pub trait ScoreKey<T> {
    type Score;

    /// `None` marks the value as unranked
    fn score(&self, value: &T) -> Option<Self::Score>;
}

/// Total order over scores; a ranking expects `left >= right` for every
/// adjacent pair of ranked values
pub trait Compare<S> {
    fn compare(&self, left: &S, right: &S) -> Ordering;
}

/// Uses a clone of the value as its score
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Identity;

impl<T: Clone> ScoreKey<T> for Identity {
    type Score = T;

    fn score(&self, value: &T) -> Option<T> {
        Some(value.clone())
    }
}

/// Score extractor built from a closure
#[derive(Clone, Copy)]
pub struct KeyFn<F>(pub F);

impl<T, S, F> ScoreKey<T> for KeyFn<F>
where
    F: Fn(&T) -> Option<S>,
{
    type Score = S;

    fn score(&self, value: &T) -> Option<S> {
        (self.0)(value)
    }
}

impl<F> fmt::Debug for KeyFn<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("KeyFn(..)")
    }
}

impl<T, K: ScoreKey<T> + ?Sized> ScoreKey<T> for &K {
    type Score = K::Score;

    fn score(&self, value: &T) -> Option<K::Score> {
        (**self).score(value)
    }
}

/// Natural ordering through `PartialOrd`.
///
/// Incomparable scores (a NaN, for instance) compare as `Less`, so they are
/// reported as an ordering violation rather than silently ranked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Natural;

impl<S: PartialOrd> Compare<S> for Natural {
    fn compare(&self, left: &S, right: &S) -> Ordering {
        left.partial_cmp(right).unwrap_or(Ordering::Less)
    }
}

/// Comparator built from a closure
#[derive(Clone, Copy)]
pub struct CmpFn<F>(pub F);

impl<S, F> Compare<S> for CmpFn<F>
where
    F: Fn(&S, &S) -> Ordering,
{
    fn compare(&self, left: &S, right: &S) -> Ordering {
        (self.0)(left, right)
    }
}

impl<F> fmt::Debug for CmpFn<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CmpFn(..)")
    }
}

impl<S, C: Compare<S> + ?Sized> Compare<S> for &C {
    fn compare(&self, left: &S, right: &S) -> Ordering {
        (**self).compare(left, right)
    }
}
