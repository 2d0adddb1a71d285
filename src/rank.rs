//! Rank values
//!
//! Every strategy except fractional ranking produces whole numbers, so a rank
//! is kept as an integer until an average forces it to become fractional.
//! Comparisons are numeric across both representations.

use std::cmp::Ordering;
use std::fmt::{self, Display};
use std::ops::{Add, Sub};

use num_traits::{ToPrimitive, Zero};
use serde::{Deserialize, Serialize};

/// A rank assigned to a scored value
///
/// Integer arithmetic that would overflow `i64` continues as a fractional
/// rank instead of panicking.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Rank {
    /// Whole-number rank
    Integer(i64),
    /// Averaged rank, produced by fractional ranking
    Fractional(f64),
}

impl Rank {
    /// Returns true if the rank is stored as a whole number
    pub fn is_integer(&self) -> bool {
        matches!(self, Rank::Integer(_))
    }

    /// The rank as a float
    pub fn as_f64(&self) -> f64 {
        match *self {
            Rank::Integer(i) => i as f64,
            Rank::Fractional(f) => f,
        }
    }
}

impl Default for Rank {
    fn default() -> Self {
        Rank::Integer(0)
    }
}

macro_rules! rank_from_integer {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Rank {
                fn from(value: $t) -> Self {
                    Rank::Integer(value as i64)
                }
            }
        )*
    };
}

rank_from_integer!(i8, i16, i32, i64, u8, u16, u32, usize);

impl From<f32> for Rank {
    fn from(value: f32) -> Self {
        Rank::Fractional(value as f64)
    }
}

impl From<f64> for Rank {
    fn from(value: f64) -> Self {
        Rank::Fractional(value)
    }
}

impl Add<usize> for Rank {
    type Output = Rank;

    fn add(self, rhs: usize) -> Rank {
        match self {
            Rank::Integer(i) => i64::try_from(rhs)
                .ok()
                .and_then(|n| i.checked_add(n))
                .map_or(Rank::Fractional(i as f64 + rhs as f64), Rank::Integer),
            Rank::Fractional(f) => Rank::Fractional(f + rhs as f64),
        }
    }
}

impl Sub<usize> for Rank {
    type Output = Rank;

    fn sub(self, rhs: usize) -> Rank {
        match self {
            Rank::Integer(i) => i64::try_from(rhs)
                .ok()
                .and_then(|n| i.checked_sub(n))
                .map_or(Rank::Fractional(i as f64 - rhs as f64), Rank::Integer),
            Rank::Fractional(f) => Rank::Fractional(f - rhs as f64),
        }
    }
}

impl Add for Rank {
    type Output = Rank;

    fn add(self, rhs: Rank) -> Rank {
        match (self, rhs) {
            (Rank::Integer(a), Rank::Integer(b)) => a
                .checked_add(b)
                .map_or(Rank::Fractional(a as f64 + b as f64), Rank::Integer),
            (a, b) => Rank::Fractional(a.as_f64() + b.as_f64()),
        }
    }
}

impl Zero for Rank {
    fn zero() -> Self {
        Rank::Integer(0)
    }

    fn is_zero(&self) -> bool {
        self.as_f64() == 0.0
    }
}

impl ToPrimitive for Rank {
    fn to_i64(&self) -> Option<i64> {
        match *self {
            Rank::Integer(i) => Some(i),
            Rank::Fractional(f) => f.to_i64(),
        }
    }

    fn to_u64(&self) -> Option<u64> {
        match *self {
            Rank::Integer(i) => i.to_u64(),
            Rank::Fractional(f) => f.to_u64(),
        }
    }

    fn to_f64(&self) -> Option<f64> {
        Some(self.as_f64())
    }
}

// Numeric equality, so 3 == 3.0
impl PartialEq for Rank {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Rank::Integer(a), Rank::Integer(b)) => a == b,
            (a, b) => a.as_f64() == b.as_f64(),
        }
    }
}

impl PartialOrd for Rank {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Rank::Integer(a), Rank::Integer(b)) => Some(a.cmp(b)),
            (a, b) => a.as_f64().partial_cmp(&b.as_f64()),
        }
    }
}

impl Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rank::Integer(i) => write!(f, "{}", i),
            Rank::Fractional(x) => write!(f, "{}", x),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_equality_across_variants() {
        assert_eq!(Rank::Integer(3), Rank::Fractional(3.0));
        assert_ne!(Rank::Integer(1), Rank::Fractional(1.5));
        assert!(Rank::Integer(1) < Rank::Fractional(1.5));
        assert!(Rank::Fractional(2.5) > Rank::Integer(2));
    }

    #[test]
    fn test_arithmetic_keeps_representation() {
        assert!((Rank::Integer(1) + 2).is_integer());
        assert_eq!(Rank::Integer(1) + 2, Rank::Integer(3));
        assert_eq!(Rank::Integer(3) - 1, Rank::Integer(2));
        assert!(!(Rank::Fractional(0.5) + 1).is_integer());
        assert_eq!(Rank::Fractional(0.5) + 1, Rank::Fractional(1.5));
        assert_eq!(Rank::Integer(1) + Rank::Fractional(0.5), Rank::Fractional(1.5));
    }

    #[test]
    fn test_overflow_continues_as_fractional() {
        let top = Rank::Integer(i64::MAX);
        assert!(!(top + 1).is_integer());
        assert_eq!(top + 1, Rank::Fractional(i64::MAX as f64 + 1.0));
        assert!(!(Rank::Integer(i64::MIN) - 1).is_integer());
        assert!(!(top + Rank::Integer(1)).is_integer());
        assert_eq!(Rank::Integer(i64::MAX - 1) + 1, top);
    }

    #[test]
    fn test_conversions() {
        assert_eq!(Rank::from(4), Rank::Integer(4));
        assert_eq!(Rank::from(7usize), Rank::Integer(7));
        assert_eq!(Rank::from(1.5), Rank::Fractional(1.5));
        assert_eq!(Rank::Fractional(2.0).to_i64(), Some(2));
        assert_eq!(Rank::Integer(-1).to_u64(), None);
        assert!(Rank::zero().is_zero());
    }

    #[test]
    fn test_display() {
        assert_eq!(Rank::Integer(2).to_string(), "2");
        assert_eq!(Rank::Fractional(1.5).to_string(), "1.5");
    }

    #[test]
    fn test_serde_untagged() {
        assert_eq!(serde_json::to_string(&Rank::Integer(3)).unwrap(), "3");
        assert_eq!(serde_json::to_string(&Rank::Fractional(1.5)).unwrap(), "1.5");

        let r: Rank = serde_json::from_str("2").unwrap();
        assert!(r.is_integer());
        let r: Rank = serde_json::from_str("2.5").unwrap();
        assert_eq!(r, Rank::Fractional(2.5));
    }
}
