use core::fmt;
use serde::{Deserialize, Serialize};

/// One of the four seats, in clockwise play order (§3). Partnerships are
/// diagonal: {P0, P2} versus {P1, P3}.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Position {
    P0 = 0,
    P1 = 1,
    P2 = 2,
    P3 = 3,
}

impl Position {
    pub const LOOP: [Position; 4] = [Position::P0, Position::P1, Position::P2, Position::P3];

    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Position::P0),
            1 => Some(Position::P1),
            2 => Some(Position::P2),
            3 => Some(Position::P3),
            _ => None,
        }
    }

    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn next(self) -> Position {
        match self {
            Position::P0 => Position::P1,
            Position::P1 => Position::P2,
            Position::P2 => Position::P3,
            Position::P3 => Position::P0,
        }
    }

    pub const fn previous(self) -> Position {
        match self {
            Position::P0 => Position::P3,
            Position::P1 => Position::P0,
            Position::P2 => Position::P1,
            Position::P3 => Position::P2,
        }
    }

    /// Partner of `self`: `(p + 2) mod 4` (§3).
    pub const fn partner(self) -> Position {
        match self {
            Position::P0 => Position::P2,
            Position::P1 => Position::P3,
            Position::P2 => Position::P0,
            Position::P3 => Position::P1,
        }
    }

    /// The two seats on the other partnership, in seat order.
    pub const fn opponents(self) -> [Position; 2] {
        match self {
            Position::P0 | Position::P2 => [Position::P1, Position::P3],
            Position::P1 | Position::P3 => [Position::P0, Position::P2],
        }
    }

    pub const fn is_partner_of(self, other: Position) -> bool {
        matches!(
            (self, other),
            (Position::P0, Position::P2)
                | (Position::P2, Position::P0)
                | (Position::P1, Position::P3)
                | (Position::P3, Position::P1)
        )
    }

    pub const fn same_team(self, other: Position) -> bool {
        self.index() == other.index() || self.is_partner_of(other)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Position::P0 => "P0",
            Position::P1 => "P1",
            Position::P2 => "P2",
            Position::P3 => "P3",
        };
        f.write_str(label)
    }
}

#[cfg(test)]
mod tests {
    use super::Position;

    #[test]
    fn next_wraps_around() {
        assert_eq!(Position::P3.next(), Position::P0);
    }

    #[test]
    fn previous_wraps_around() {
        assert_eq!(Position::P0.previous(), Position::P3);
    }

    #[test]
    fn partner_is_diagonal() {
        assert_eq!(Position::P0.partner(), Position::P2);
        assert_eq!(Position::P1.partner(), Position::P3);
        assert_eq!(Position::P2.partner(), Position::P0);
    }

    #[test]
    fn opponents_are_the_other_team() {
        assert_eq!(Position::P0.opponents(), [Position::P1, Position::P3]);
    }

    #[test]
    fn same_team_includes_self_and_partner_only() {
        assert!(Position::P0.same_team(Position::P0));
        assert!(Position::P0.same_team(Position::P2));
        assert!(!Position::P0.same_team(Position::P1));
    }

    #[test]
    fn index_roundtrip() {
        for (i, seat) in Position::LOOP.iter().enumerate() {
            assert_eq!(Position::from_index(i), Some(*seat));
            assert_eq!(seat.index(), i);
        }
    }
}
