//! # Travel direction
//!
//! Crossings are strictly one of two directions. Most of the crate is
//! direction-indexed: waiting counters and wake queues live in
//! two-element arrays addressed by [`Direction::index`], so there is no
//! per-vehicle caching of "my side" pointers anywhere.

use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;

/// One of the two travel directions over the bridge.
///
/// The two variants are total opposites: a vehicle heading one way
/// conflicts with every vehicle heading the other way, and with nothing
/// else.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Travel toward the eastern shore.
    Eastbound,
    /// Travel toward the western shore.
    Westbound,
}

impl Direction {
    /// Both directions, in index order.
    ///
    /// Useful for iterating over per-direction state:
    ///
    /// ```rust
    /// use bridgekeeper::Direction;
    ///
    /// for dir in Direction::BOTH {
    ///     assert_eq!(dir.opposite().opposite(), dir);
    /// }
    /// ```
    pub const BOTH: [Direction; 2] = [Direction::Eastbound, Direction::Westbound];

    /// The oncoming direction.
    #[inline]
    pub fn opposite(self) -> Direction {
        match self {
            Direction::Eastbound => Direction::Westbound,
            Direction::Westbound => Direction::Eastbound,
        }
    }

    /// Stable position of this direction in per-direction arrays.
    ///
    /// `Eastbound` is `0`, `Westbound` is `1`.
    #[inline]
    pub(crate) fn index(self) -> usize {
        match self {
            Direction::Eastbound => 0,
            Direction::Westbound => 1,
        }
    }

    /// Lowercase human-readable name.
    #[inline]
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Eastbound => "eastbound",
            Direction::Westbound => "westbound",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = ConfigError;

    /// Parses the spellings accepted on the command line and at the
    /// interactive prompt: `e`, `east`, `eastbound` and the westbound
    /// equivalents, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "e" | "east" | "eastbound" => Ok(Direction::Eastbound),
            "w" | "west" | "westbound" => Ok(Direction::Westbound),
            _ => Err(ConfigError::UnknownDirection {
                token: s.trim().to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opposite_is_involution() {
        for dir in Direction::BOTH {
            assert_eq!(dir.opposite().opposite(), dir);
            assert_ne!(dir.opposite(), dir);
        }
    }

    #[test]
    fn test_index_is_stable_and_distinct() {
        assert_eq!(Direction::Eastbound.index(), 0);
        assert_eq!(Direction::Westbound.index(), 1);
        assert_eq!(Direction::BOTH[0], Direction::Eastbound);
        assert_eq!(Direction::BOTH[1], Direction::Westbound);
    }

    #[test]
    fn test_parse_accepts_short_and_long_spellings() {
        for token in ["e", "E", "east", "EAST", " eastbound "] {
            assert_eq!(
                token.parse::<Direction>().expect("eastbound token"),
                Direction::Eastbound,
            );
        }
        for token in ["w", "W", "west", "Westbound"] {
            assert_eq!(
                token.parse::<Direction>().expect("westbound token"),
                Direction::Westbound,
            );
        }
    }

    #[test]
    fn test_parse_rejects_unknown_token() {
        let err = "north".parse::<Direction>().expect_err("must not parse");
        assert!(matches!(err, ConfigError::UnknownDirection { ref token } if token == "north"));
    }

    #[test]
    fn test_display_matches_as_str() {
        assert_eq!(Direction::Eastbound.to_string(), "eastbound");
        assert_eq!(Direction::Westbound.to_string(), "westbound");
    }
}
