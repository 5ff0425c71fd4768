use core::fmt;
use serde::{Deserialize, Serialize};

/// One of the eight ranks in the 32-card Baloot deck.
///
/// `value()` is a plain numeric ordinal (7..=14, Ace highest) used only for
/// deterministic tie-breaking (see [`crate::model::card::Card::beats`] and the
/// endgame solver's move ordering). It is **not** the in-game strength order,
/// which is mode- and trump-dependent — use [`Rank::strength`] for that.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[repr(u8)]
pub enum Rank {
    Seven = 7,
    Eight = 8,
    Nine = 9,
    Ten = 10,
    Jack = 11,
    Queen = 12,
    King = 13,
    Ace = 14,
}

impl Rank {
    pub const ORDERED: [Rank; 8] = [
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
        Rank::Ace,
    ];

    pub const fn from_value(value: u8) -> Option<Self> {
        match value {
            7 => Some(Rank::Seven),
            8 => Some(Rank::Eight),
            9 => Some(Rank::Nine),
            10 => Some(Rank::Ten),
            11 => Some(Rank::Jack),
            12 => Some(Rank::Queen),
            13 => Some(Rank::King),
            14 => Some(Rank::Ace),
            _ => None,
        }
    }

    pub const fn value(self) -> u8 {
        self as u8
    }

    /// Position in the weakest-to-strongest order for `suit_is_trump`'s context
    /// under `mode` (§3). Higher is stronger. This is the order `Card::beats`
    /// consults; it is intentionally distinct from `value()`.
    pub const fn strength(self, mode: super::mode::Mode, suit_is_trump: bool) -> u8 {
        use super::mode::Mode;
        match (mode, suit_is_trump) {
            // SUN, and HOKUM non-trump suits: 7,8,9,J,Q,K,10,A.
            // The spec's HOKUM non-trump table omits the Nine; we treat that
            // omission as a transcription slip and use the same order as SUN
            // (see DESIGN.md "Open Question decisions").
            (Mode::Sun, _) | (Mode::Hokum, false) => match self {
                Rank::Seven => 0,
                Rank::Eight => 1,
                Rank::Nine => 2,
                Rank::Jack => 3,
                Rank::Queen => 4,
                Rank::King => 5,
                Rank::Ten => 6,
                Rank::Ace => 7,
            },
            // HOKUM trump suit: 7,8,Q,K,10,A,9,J.
            (Mode::Hokum, true) => match self {
                Rank::Seven => 0,
                Rank::Eight => 1,
                Rank::Queen => 2,
                Rank::King => 3,
                Rank::Ten => 4,
                Rank::Ace => 5,
                Rank::Nine => 6,
                Rank::Jack => 7,
            },
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
            Rank::Ace => "A",
        };
        f.write_str(text)
    }
}
