//! Tie-resolution strategies
//!
//! A strategy receives the rank a group of tied values would start at and the
//! size of the group, and yields one rank per tied value followed by the rank
//! of the next distinct value. For two values tied from rank 1:
//!
//! | Strategy              | Ranks       |
//! |-----------------------|-------------|
//! | competition ("1224")  | 1, 1, 3     |
//! | modified ("1334")     | 2, 2, 3     |
//! | dense ("1223")        | 1, 1, 2     |
//! | ordinal ("1234")      | 1, 2, 3     |
//! | fractional            | 1.5, 1.5, 3 |

use std::fmt;
use std::iter::FusedIterator;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::rank::Rank;

/// Signature shared by every strategy, built-in or caller-supplied
pub type StrategyFn = fn(Rank, usize) -> TieRanks;

/// Lazy sequence of ranks for one tie group plus the rank that follows it
#[derive(Debug, Clone)]
pub struct TieRanks {
    tied: Tied,
    remaining: usize,
    next: Option<Rank>,
}

#[derive(Debug, Clone)]
enum Tied {
    Repeat(Rank),
    Step(Rank),
    Listed(std::vec::IntoIter<Rank>),
}

impl TieRanks {
    /// `rank` for each of `length` tied values, then `next`
    pub fn repeat(rank: Rank, length: usize, next: Rank) -> Self {
        TieRanks {
            tied: Tied::Repeat(rank),
            remaining: length,
            next: Some(next),
        }
    }

    /// `start, start + 1, ...` for `length` tied values, then `next`
    pub fn sequential(start: Rank, length: usize, next: Rank) -> Self {
        TieRanks {
            tied: Tied::Step(start),
            remaining: length,
            next: Some(next),
        }
    }

    /// Explicit ranks for the tied values, then `next`
    pub fn from_ranks(tied: Vec<Rank>, next: Rank) -> Self {
        TieRanks {
            remaining: tied.len(),
            tied: Tied::Listed(tied.into_iter()),
            next: Some(next),
        }
    }
}

impl Iterator for TieRanks {
    type Item = Rank;

    fn next(&mut self) -> Option<Rank> {
        if self.remaining == 0 {
            return self.next.take();
        }
        self.remaining -= 1;
        match &mut self.tied {
            Tied::Repeat(rank) => Some(*rank),
            Tied::Step(rank) => {
                let current = *rank;
                *rank = current + 1;
                Some(current)
            }
            Tied::Listed(ranks) => ranks.next(),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.remaining + usize::from(self.next.is_some());
        (len, Some(len))
    }
}

impl ExactSizeIterator for TieRanks {}

impl FusedIterator for TieRanks {}

/// Standard competition ranking ("1224")
pub fn competition(start: Rank, length: usize) -> TieRanks {
    TieRanks::repeat(start, length, start + length)
}

/// Modified competition ranking ("1334")
pub fn modified_competition(start: Rank, length: usize) -> TieRanks {
    let next = start + length;
    TieRanks::repeat(next - 1, length, next)
}

/// Dense ranking ("1223")
pub fn dense(start: Rank, length: usize) -> TieRanks {
    let next = if length == 0 { start } else { start + 1 };
    TieRanks::repeat(start, length, next)
}

/// Ordinal ranking ("1234")
pub fn ordinal(start: Rank, length: usize) -> TieRanks {
    TieRanks::sequential(start, length, start + length)
}

/// Fractional ranking ("1 2.5 2.5 4"); tied values share the mean of the
/// ranks they would have occupied
///
/// This is `start + (length - 1) / 2`, the pandas `average` method. It is not
/// `(2 * start + length - 1) / length`: the two agree only for two-way ties,
/// and the latter puts three ties from rank 0 at 0.67 instead of 1.
pub fn fractional(start: Rank, length: usize) -> TieRanks {
    let next = start + length;
    if length == 0 {
        return TieRanks::repeat(start, 0, next);
    }
    let average = start.as_f64() + (length as f64 - 1.0) / 2.0;
    TieRanks::repeat(Rank::Fractional(average), length, next)
}

/// Strategy for assigning ranks to tied scores
#[derive(Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Tied values share the lowest rank; a gap follows ("1224")
    #[default]
    #[serde(alias = "1224", alias = "min", alias = "standard")]
    Competition,
    /// Tied values share the highest rank; the gap precedes them ("1334")
    #[serde(alias = "1334", alias = "max", alias = "modified")]
    ModifiedCompetition,
    /// Tied values share a rank and no gap follows ("1223")
    #[serde(alias = "1223")]
    Dense,
    /// Tied values get consecutive ranks in input order ("1234")
    #[serde(alias = "1234", alias = "first")]
    Ordinal,
    /// Tied values share the average of their ranks
    #[serde(alias = "average", alias = "mean")]
    Fractional,
    /// Caller-supplied strategy
    #[serde(skip)]
    Custom(StrategyFn),
}

impl Strategy {
    /// Every built-in strategy
    pub const BUILTIN: [Strategy; 5] = [
        Strategy::Competition,
        Strategy::ModifiedCompetition,
        Strategy::Dense,
        Strategy::Ordinal,
        Strategy::Fractional,
    ];

    /// The function this strategy dispatches to
    pub fn function(&self) -> StrategyFn {
        match *self {
            Strategy::Competition => competition,
            Strategy::ModifiedCompetition => modified_competition,
            Strategy::Dense => dense,
            Strategy::Ordinal => ordinal,
            Strategy::Fractional => fractional,
            Strategy::Custom(f) => f,
        }
    }

    /// Ranks for `length` values tied from `start`, then the next rank
    pub fn ranks(&self, start: Rank, length: usize) -> TieRanks {
        (self.function())(start, length)
    }

    /// Canonical lowercase name, or `"custom"` for a caller-supplied strategy
    pub fn name(&self) -> &'static str {
        match self {
            Strategy::Competition => "competition",
            Strategy::ModifiedCompetition => "modified_competition",
            Strategy::Dense => "dense",
            Strategy::Ordinal => "ordinal",
            Strategy::Fractional => "fractional",
            Strategy::Custom(_) => "custom",
        }
    }
}

impl From<StrategyFn> for Strategy {
    fn from(f: StrategyFn) -> Self {
        Strategy::Custom(f)
    }
}

impl PartialEq for Strategy {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Strategy::Custom(a), Strategy::Custom(b)) => *a as usize == *b as usize,
            _ => std::mem::discriminant(self) == std::mem::discriminant(other),
        }
    }
}

impl Eq for Strategy {}

impl fmt::Debug for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::Competition => f.write_str("Competition"),
            Strategy::ModifiedCompetition => f.write_str("ModifiedCompetition"),
            Strategy::Dense => f.write_str("Dense"),
            Strategy::Ordinal => f.write_str("Ordinal"),
            Strategy::Fractional => f.write_str("Fractional"),
            Strategy::Custom(func) => f.debug_tuple("Custom").field(func).finish(),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Strategy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        match normalized.as_str() {
            "competition" | "standard" | "min" | "1224" => Ok(Strategy::Competition),
            "modified_competition" | "modified" | "max" | "1334" => {
                Ok(Strategy::ModifiedCompetition)
            }
            "dense" | "1223" => Ok(Strategy::Dense),
            "ordinal" | "first" | "1234" => Ok(Strategy::Ordinal),
            "fractional" | "average" | "mean" => Ok(Strategy::Fractional),
            _ => Err(Error::UnknownStrategy(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(ranks: TieRanks) -> Vec<Rank> {
        ranks.collect()
    }

    fn ints(values: &[i64]) -> Vec<Rank> {
        values.iter().map(|&v| Rank::Integer(v)).collect()
    }

    #[test]
    fn test_two_ties_from_one() {
        let start = Rank::Integer(1);
        assert_eq!(collect(competition(start, 2)), ints(&[1, 1, 3]));
        assert_eq!(collect(modified_competition(start, 2)), ints(&[2, 2, 3]));
        assert_eq!(collect(dense(start, 2)), ints(&[1, 1, 2]));
        assert_eq!(collect(ordinal(start, 2)), ints(&[1, 2, 3]));
        assert_eq!(
            collect(fractional(start, 2)),
            vec![Rank::Fractional(1.5), Rank::Fractional(1.5), Rank::Integer(3)]
        );
    }

    #[test]
    fn test_yields_length_plus_one() {
        for strategy in Strategy::BUILTIN {
            for length in 0..6 {
                let ranks = strategy.ranks(Rank::Integer(4), length);
                assert_eq!(ranks.len(), length + 1, "{} / {}", strategy, length);
                assert_eq!(ranks.count(), length + 1);
            }
        }
    }

    #[test]
    fn test_fractional_three_way_tie() {
        let ranks = collect(fractional(Rank::Integer(2), 3));
        assert_eq!(ranks[..3], [Rank::Fractional(3.0); 3]);
        assert_eq!(ranks[3], Rank::Integer(5));
    }

    #[test]
    fn test_empty_group_only_yields_next() {
        assert_eq!(collect(dense(Rank::Integer(2), 0)), ints(&[2]));
        assert_eq!(collect(fractional(Rank::Integer(2), 0)), ints(&[2]));
        assert_eq!(collect(modified_competition(Rank::Integer(2), 0)), ints(&[2]));
    }

    #[test]
    fn test_iterator_is_fused() {
        let mut ranks = competition(Rank::Integer(0), 1);
        assert_eq!(ranks.next(), Some(Rank::Integer(0)));
        assert_eq!(ranks.next(), Some(Rank::Integer(1)));
        assert_eq!(ranks.next(), None);
        assert_eq!(ranks.next(), None);
    }

    #[test]
    fn test_from_ranks() {
        let ranks = TieRanks::from_ranks(ints(&[7, 9]), Rank::Integer(10));
        assert_eq!(ranks.len(), 3);
        assert_eq!(collect(ranks), ints(&[7, 9, 10]));
    }

    #[test]
    fn test_parse_names_and_aliases() {
        assert_eq!("competition".parse::<Strategy>().unwrap(), Strategy::Competition);
        assert_eq!("1334".parse::<Strategy>().unwrap(), Strategy::ModifiedCompetition);
        assert_eq!(
            "Modified-Competition".parse::<Strategy>().unwrap(),
            Strategy::ModifiedCompetition
        );
        assert_eq!(" dense ".parse::<Strategy>().unwrap(), Strategy::Dense);
        assert_eq!("first".parse::<Strategy>().unwrap(), Strategy::Ordinal);
        assert_eq!("average".parse::<Strategy>().unwrap(), Strategy::Fractional);
        assert!(matches!(
            "olympic".parse::<Strategy>(),
            Err(Error::UnknownStrategy(name)) if name == "olympic"
        ));
    }

    #[test]
    fn test_display_round_trips_through_parse() {
        for strategy in Strategy::BUILTIN {
            assert_eq!(strategy.to_string().parse::<Strategy>().unwrap(), strategy);
        }
    }

    #[test]
    fn test_custom_strategy() {
        fn reversed(start: Rank, length: usize) -> TieRanks {
            let tied = (0..length).rev().map(|i| start + i).collect();
            TieRanks::from_ranks(tied, start + length)
        }

        let strategy = Strategy::from(reversed as StrategyFn);
        assert_eq!(strategy.name(), "custom");
        assert_eq!(collect(strategy.ranks(Rank::Integer(0), 3)), ints(&[2, 1, 0, 3]));
        assert_eq!(strategy, Strategy::Custom(reversed));
        assert_ne!(strategy, Strategy::Ordinal);
    }

    #[test]
    fn test_serde_names() {
        assert_eq!(
            serde_json::to_string(&Strategy::ModifiedCompetition).unwrap(),
            "\"modified_competition\""
        );
        let s: Strategy = serde_json::from_str("\"1223\"").unwrap();
        assert_eq!(s, Strategy::Dense);
    }
}
