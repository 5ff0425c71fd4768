use crate::model::mode::{Contract, Mode};
use crate::model::rank::Rank;
use crate::model::suit::Suit;
use core::fmt;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
}

impl Card {
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }

    /// Points this card is worth if captured in a trick, SUN mode (§3 point table).
    pub fn point_value(self, mode: Mode) -> u8 {
        match mode {
            Mode::Sun => match self.rank {
                Rank::Ace => 11,
                Rank::Ten => 10,
                Rank::King => 4,
                Rank::Queen => 3,
                Rank::Jack => 2,
                Rank::Nine | Rank::Eight | Rank::Seven => 0,
            },
            Mode::Hokum => unreachable!(
                "point_value(Mode::Hokum) is ambiguous without knowing trump; use point_value_in"
            ),
        }
    }

    /// Points this card is worth under `contract`, trump-aware for HOKUM (§3).
    pub fn point_value_in(self, contract: Contract) -> u8 {
        match contract.mode {
            Mode::Sun => self.point_value(Mode::Sun),
            Mode::Hokum => {
                let is_trump = contract.is_trump(self.suit);
                match (self.rank, is_trump) {
                    (Rank::Ace, _) => 11,
                    (Rank::Ten, _) => 10,
                    (Rank::King, _) => 4,
                    (Rank::Queen, _) => 3,
                    (Rank::Jack, true) => 20,
                    (Rank::Jack, false) => 2,
                    (Rank::Nine, true) => 14,
                    (Rank::Nine, false) => 0,
                    (Rank::Eight, _) | (Rank::Seven, _) => 0,
                }
            }
        }
    }

    /// `true` iff `self` beats `other` when both contest the same trick under
    /// `contract`. A trump always beats a non-trump in HOKUM regardless of rank.
    pub fn beats(self, other: Card, contract: Contract) -> bool {
        let self_trump = contract.is_trump(self.suit);
        let other_trump = contract.is_trump(other.suit);

        if self_trump != other_trump {
            return self_trump;
        }

        if self.suit != other.suit {
            // Different non-trump suits never contest the same trick directly;
            // callers only compare cards that could plausibly beat one another
            // (same suit, or one of them trump).
            return false;
        }

        self.rank.strength(contract.mode, self_trump)
            > other.rank.strength(contract.mode, other_trump)
    }

    /// Convert card to a unique ID in range 0..32. Encoding: suit * 8 + rank_index.
    pub const fn to_id(self) -> u8 {
        let suit_id = self.suit as u8;
        let rank_index = self.rank.value() - 7;
        suit_id * 8 + rank_index
    }

    pub const fn from_id(id: u8) -> Option<Self> {
        if id >= 32 {
            return None;
        }
        let suit_id = id / 8;
        let rank_index = id % 8;
        let rank_value = rank_index + 7;

        let suit = match Suit::from_index(suit_id as usize) {
            Some(s) => s,
            None => return None,
        };
        let rank = match Rank::from_value(rank_value) {
            Some(r) => r,
            None => return None,
        };
        Some(Card::new(rank, suit))
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank, self.suit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::mode::Contract;

    #[test]
    fn card_id_roundtrip() {
        for id in 0..32 {
            let card = Card::from_id(id).expect("valid id");
            assert_eq!(card.to_id(), id);
        }
    }

    #[test]
    fn all_32_cards_unique() {
        let mut seen = std::collections::HashSet::new();
        for id in 0..32 {
            let card = Card::from_id(id).expect("valid id");
            assert!(seen.insert(card), "duplicate for id {id}");
        }
        assert_eq!(seen.len(), 32);
    }

    #[test]
    fn card_from_id_invalid() {
        assert_eq!(Card::from_id(32), None);
    }

    #[test]
    fn sun_point_values_match_table() {
        assert_eq!(Card::new(Rank::Ace, Suit::Clubs).point_value(Mode::Sun), 11);
        assert_eq!(Card::new(Rank::Ten, Suit::Clubs).point_value(Mode::Sun), 10);
        assert_eq!(Card::new(Rank::Jack, Suit::Clubs).point_value(Mode::Sun), 2);
        assert_eq!(Card::new(Rank::Nine, Suit::Clubs).point_value(Mode::Sun), 0);
    }

    #[test]
    fn hokum_trump_jack_and_nine_are_high_value() {
        let contract = Contract::hokum(Suit::Spades);
        assert_eq!(
            Card::new(Rank::Jack, Suit::Spades).point_value_in(contract),
            20
        );
        assert_eq!(
            Card::new(Rank::Nine, Suit::Spades).point_value_in(contract),
            14
        );
        assert_eq!(
            Card::new(Rank::Jack, Suit::Clubs).point_value_in(contract),
            2
        );
        assert_eq!(
            Card::new(Rank::Nine, Suit::Clubs).point_value_in(contract),
            0
        );
    }

    #[test]
    fn trump_beats_any_non_trump() {
        let contract = Contract::hokum(Suit::Hearts);
        let trump_seven = Card::new(Rank::Seven, Suit::Hearts);
        let ace_clubs = Card::new(Rank::Ace, Suit::Clubs);
        assert!(trump_seven.beats(ace_clubs, contract));
        assert!(!ace_clubs.beats(trump_seven, contract));
    }

    #[test]
    fn hokum_trump_order_ranks_nine_over_ace() {
        let contract = Contract::hokum(Suit::Hearts);
        let nine = Card::new(Rank::Nine, Suit::Hearts);
        let ace = Card::new(Rank::Ace, Suit::Hearts);
        assert!(nine.beats(ace, contract));
    }

    #[test]
    fn sun_order_ranks_ten_over_king() {
        let contract = Contract::sun();
        let ten = Card::new(Rank::Ten, Suit::Diamonds);
        let king = Card::new(Rank::King, Suit::Diamonds);
        assert!(ten.beats(king, contract));
    }
}
