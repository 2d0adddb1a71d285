//! Ranking engine
//!
//! [`Ranking`] works like `enumerate` over a sequence sorted by score, except
//! that it pairs each value with a rank instead of an index. Values that share
//! a score are ranked by the configured [`Strategy`]:
//!
//! ```rust
//! use ranking::{Rank, Ranking, Strategy};
//!
//! let scores = vec![10, 8, 8, 6];
//! let ranks = Ranking::new(&scores).with_strategy(Strategy::Dense).ranks().unwrap();
//! let expected: Vec<Option<Rank>> = [0, 1, 1, 2].iter().map(|&r| Some(r.into())).collect();
//! assert_eq!(ranks, expected);
//! ```
//!
//! The sequence must already be sorted so that scores never increase. This
//! is checked lazily: an out-of-order element is reported as
//! [`Error::OrderingViolation`](crate::error::Error::OrderingViolation) when
//! iteration reaches it.

mod iter;
pub mod order;

use std::cmp::Ordering;
use std::fmt;

use crate::config::RankingConfig;
use crate::error::Result;
use crate::rank::Rank;
use crate::strategy::Strategy;

pub use iter::Iter;
pub use order::{CmpFn, Compare, Identity, KeyFn, Natural, ScoreKey};

/// A value paired with its rank; `None` for unranked values
pub type Ranked<T> = (Option<Rank>, T);

/// Ranking configuration over a sorted sequence
///
/// Holds no iteration state. Every call to [`iter`](Ranking::iter) starts a
/// fresh pass over the sequence, so a ranking over a re-iterable sequence
/// (a slice, a `Vec`, a cloneable iterator) can be read any number of times.
#[derive(Clone)]
pub struct Ranking<I, K = Identity, C = Natural> {
    sequence: I,
    strategy: Strategy,
    start: Rank,
    key: K,
    cmp: C,
}

impl<I> Ranking<I> {
    /// Ranks the values of `sequence` by their own natural order, with
    /// competition ranking from rank 0
    pub fn new(sequence: I) -> Self {
        Ranking {
            sequence,
            strategy: Strategy::default(),
            start: Rank::default(),
            key: Identity,
            cmp: Natural,
        }
    }

    /// Applies the strategy and start rank of a loaded configuration
    pub fn from_config(sequence: I, config: &RankingConfig) -> Self {
        Ranking::new(sequence).with_config(config)
    }
}

impl<T> Default for Ranking<Vec<T>> {
    fn default() -> Self {
        Ranking::new(Vec::new())
    }
}

impl<I, K, C> Ranking<I, K, C> {
    /// Sets the tie-breaking strategy
    pub fn with_strategy(mut self, strategy: impl Into<Strategy>) -> Self {
        self.strategy = strategy.into();
        self
    }

    /// Sets the rank of the first value
    pub fn with_start(mut self, start: impl Into<Rank>) -> Self {
        self.start = start.into();
        self
    }

    /// Sets strategy and start rank from a configuration
    pub fn with_config(self, config: &RankingConfig) -> Self {
        self.with_strategy(config.strategy).with_start(config.start)
    }

    /// Ranks values by the score `key` extracts; a `None` score leaves the
    /// value unranked.
    ///
    /// Replaces the comparator with the natural order of the new score type,
    /// so call [`with_comparator`](Ranking::with_comparator) after this.
    pub fn with_key<F, S>(self, key: F) -> Ranking<I, KeyFn<F>, Natural>
    where
        I: IntoIterator,
        F: Fn(&I::Item) -> Option<S>,
    {
        Ranking {
            sequence: self.sequence,
            strategy: self.strategy,
            start: self.start,
            key: KeyFn(key),
            cmp: Natural,
        }
    }

    /// Orders scores with `cmp` instead of their natural order
    pub fn with_comparator<F>(self, cmp: F) -> Ranking<I, K, CmpFn<F>>
    where
        I: IntoIterator,
        K: ScoreKey<I::Item>,
        F: Fn(&K::Score, &K::Score) -> Ordering,
    {
        Ranking {
            sequence: self.sequence,
            strategy: self.strategy,
            start: self.start,
            key: self.key,
            cmp: CmpFn(cmp),
        }
    }

    /// The tie-breaking strategy
    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Rank of the first value
    pub fn start(&self) -> Rank {
        self.start
    }

    /// The ranked sequence
    pub fn sequence(&self) -> &I {
        &self.sequence
    }

    /// Gives back the ranked sequence
    pub fn into_sequence(self) -> I {
        self.sequence
    }
}

impl<I, K, C> Ranking<I, K, C>
where
    I: IntoIterator + Clone,
    K: ScoreKey<I::Item>,
    C: Compare<K::Score>,
{
    /// Starts a new pass yielding `(rank, value)` pairs in input order
    pub fn iter(&self) -> Iter<I::IntoIter, &K, &C> {
        Iter::new(
            self.sequence.clone().into_iter(),
            self.strategy,
            self.start,
            &self.key,
            &self.cmp,
        )
    }

    /// Ranks only, in input order
    pub fn iter_ranks(&self) -> impl Iterator<Item = Result<Option<Rank>>> + '_ {
        self.iter().map(|pair| pair.map(|(rank, _)| rank))
    }

    /// Values only, in input order
    pub fn iter_values(&self) -> impl Iterator<Item = Result<I::Item>> + '_ {
        self.iter().map(|pair| pair.map(|(_, value)| value))
    }

    pub fn ranks(&self) -> Result<Vec<Option<Rank>>> {
        self.iter_ranks().collect()
    }

    pub fn values(&self) -> Result<Vec<I::Item>> {
        self.iter_values().collect()
    }

    /// All `(rank, value)` pairs
    pub fn pairs(&self) -> Result<Vec<Ranked<I::Item>>> {
        self.iter().collect()
    }
}

impl<I, K, C> IntoIterator for Ranking<I, K, C>
where
    I: IntoIterator,
    K: ScoreKey<I::Item>,
    C: Compare<K::Score>,
{
    type Item = Result<Ranked<I::Item>>;
    type IntoIter = Iter<I::IntoIter, K, C>;

    fn into_iter(self) -> Self::IntoIter {
        Iter::new(
            self.sequence.into_iter(),
            self.strategy,
            self.start,
            self.key,
            self.cmp,
        )
    }
}

impl<'a, I, K, C> IntoIterator for &'a Ranking<I, K, C>
where
    I: IntoIterator + Clone,
    K: ScoreKey<I::Item>,
    C: Compare<K::Score>,
{
    type Item = Result<Ranked<I::Item>>;
    type IntoIter = Iter<I::IntoIter, &'a K, &'a C>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<I, K, C> fmt::Debug for Ranking<I, K, C>
where
    I: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ranking")
            .field("sequence", &self.sequence)
            .field("strategy", &self.strategy)
            .field("start", &self.start)
            .finish_non_exhaustive()
    }
}
