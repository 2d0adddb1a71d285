use std::cmp::Ordering;
use std::collections::VecDeque;
use std::iter::{Fuse, FusedIterator};

use super::order::{Compare, ScoreKey};
use super::Ranked;
use crate::error::{Error, Result};
use crate::rank::Rank;
use crate::strategy::Strategy;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Pulling values from the source
    Streaming,
    /// Handing out a resolved group before pulling again
    Flushing,
    Done,
}

/// Pull-based ranking of one pass over a sequence.
///
/// Values with equal scores are held back until the first value with a lower
/// score, an unranked value, or the end of input closes their group; the group
/// is then resolved by the strategy and handed out in input order. An unranked
/// value is never buffered: it closes the open group and follows it out.
/// Ordering is still checked across unranked values against the last ranked
/// score.
pub struct Iter<It, K, C>
where
    It: Iterator,
    K: ScoreKey<It::Item>,
{
    source: Fuse<It>,
    strategy: Strategy,
    key: K,
    cmp: C,
    rank: Rank,
    position: usize,
    group: Vec<It::Item>,
    last_score: Option<K::Score>,
    ready: VecDeque<Ranked<It::Item>>,
    state: State,
}

impl<It, K, C> Iter<It, K, C>
where
    It: Iterator,
    K: ScoreKey<It::Item>,
    C: Compare<K::Score>,
{
    pub(crate) fn new(source: It, strategy: Strategy, start: Rank, key: K, cmp: C) -> Self {
        Iter {
            source: source.fuse(),
            strategy,
            key,
            cmp,
            rank: start,
            position: 0,
            group: Vec::new(),
            last_score: None,
            ready: VecDeque::new(),
            state: State::Streaming,
        }
    }

    /// The rank the next ranked value would receive if it started a group
    pub fn current_rank(&self) -> Rank {
        self.rank
    }

    fn open_group(&mut self, value: It::Item, score: K::Score) {
        self.group.push(value);
        self.last_score = Some(score);
    }

    /// Assigns ranks to the open group and queues it for output
    fn resolve_group(&mut self) {
        match self.group.len() {
            0 => {}
            1 => {
                let value = self.group.remove(0);
                self.ready.push_back((Some(self.rank), value));
                self.rank = self.rank + 1;
            }
            len => {
                log::trace!(
                    "resolving {} tied values from rank {} with {} ranking",
                    len,
                    self.rank,
                    self.strategy
                );
                let mut ranks = self.strategy.ranks(self.rank, len);
                for value in self.group.drain(..) {
                    self.ready.push_back((ranks.next(), value));
                }
                // the trailing rank belongs to the next distinct score
                self.rank = ranks.next().unwrap_or(self.rank + len);
            }
        }
    }

    fn fail(&mut self, position: usize) -> Error {
        log::debug!(
            "ranking stopped at element {}: scores are not in non-increasing order",
            position
        );
        self.group.clear();
        self.last_score = None;
        self.ready.clear();
        self.state = State::Done;
        Error::OrderingViolation { position }
    }
}

impl<It, K, C> Iterator for Iter<It, K, C>
where
    It: Iterator,
    K: ScoreKey<It::Item>,
    C: Compare<K::Score>,
{
    type Item = Result<Ranked<It::Item>>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.state {
                State::Done => return None,
                State::Flushing => match self.ready.pop_front() {
                    Some(pair) => return Some(Ok(pair)),
                    None => self.state = State::Streaming,
                },
                State::Streaming => {
                    let Some(value) = self.source.next() else {
                        self.resolve_group();
                        if self.ready.is_empty() {
                            self.state = State::Done;
                            return None;
                        }
                        self.state = State::Flushing;
                        continue;
                    };
                    let position = self.position;
                    self.position += 1;

                    let Some(score) = self.key.score(&value) else {
                        if self.group.is_empty() {
                            return Some(Ok((None, value)));
                        }
                        self.resolve_group();
                        self.ready.push_back((None, value));
                        self.state = State::Flushing;
                        continue;
                    };

                    let Some(previous) = self.last_score.take() else {
                        self.open_group(value, score);
                        continue;
                    };

                    match self.cmp.compare(&previous, &score) {
                        Ordering::Less => return Some(Err(self.fail(position))),
                        Ordering::Equal if !self.group.is_empty() => {
                            self.group.push(value);
                            self.last_score = Some(score);
                        }
                        // a lower score, or an equal one after an unranked value
                        _ => {
                            self.resolve_group();
                            self.open_group(value, score);
                            if !self.ready.is_empty() {
                                self.state = State::Flushing;
                            }
                        }
                    }
                }
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.state == State::Done {
            return (0, Some(0));
        }
        let buffered = self.ready.len() + self.group.len();
        let (_, upper) = self.source.size_hint();
        // an ordering violation can end iteration early
        (0, upper.and_then(|n| n.checked_add(buffered)))
    }
}

impl<It, K, C> FusedIterator for Iter<It, K, C>
where
    It: Iterator,
    K: ScoreKey<It::Item>,
    C: Compare<K::Score>,
{
}
