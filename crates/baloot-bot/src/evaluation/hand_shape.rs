use baloot_core::model::{Hand, Mode, Rank, Suit};

/// Coarse classification of an eight-card suit distribution (§4.2). The
/// pattern itself (`[usize; 4]`, descending) is kept alongside the label so
/// callers needing exact counts don't have to re-derive them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeType {
    Balanced,
    Semi,
    Unbalanced,
    UnbalancedPlus,
    Extreme,
}

/// Output of classifying a hand's shape (§4.2 hand-shape table). `sun_adjustment`
/// and `hokum_adjustment` are added directly into the corresponding bid
/// optimizer's raw strength (§4.3).
#[derive(Debug, Clone, Copy)]
pub struct HandShape {
    pub pattern: [usize; 4],
    pub shape_type: ShapeType,
    pub sun_adjustment: f32,
    pub hokum_adjustment: f32,
    /// Ruff potential: voids/singletons scaled by spare trumps held, zero
    /// outside HOKUM or when no trump suit is yet fixed.
    pub ruff_potential: f32,
    /// Running-trick count for any 5+ card suit topped by an Ace or Ace-King.
    pub long_suit_tricks: f32,
}

/// Classifies `hand`'s shape and derives bidding adjustments plus
/// trump-aware ruff potential (§4.2). `trump` is `None` during SUN
/// evaluation or before a HOKUM trump suit has been chosen.
pub fn evaluate(hand: &Hand, mode: Mode, trump: Option<Suit>) -> HandShape {
    let pattern = hand.shape_descending();
    let has_void = pattern[3] == 0;

    let (shape_type, sun_adjustment, hokum_adjustment) = match pattern {
        [4, 3, 3, 3] => (ShapeType::Balanced, 0.0, -2.0),
        [4, 4, 3, 2] => (ShapeType::Balanced, 0.0, -1.0),
        [5, 3, 3, 2] => (ShapeType::Semi, -1.0, 2.0),
        [5, 4, 2, 2] => (ShapeType::Semi, -2.0, 3.0),
        [5, 3, 1, 1] => (ShapeType::Unbalanced, -3.0, 4.0),
        [5, 4, 3, 1] => (ShapeType::Unbalanced, -2.0, 3.0),
        // §4.2 bounds this at HOKUM adj +4..+6; an 8-0-0-0 hand (a - 6 == 2)
        // would otherwise push it to +7, so the bonus is capped at +1 on
        // top of the +5 base.
        [a, ..] if a >= 6 => (ShapeType::Extreme, -4.0, 5.0 + ((a - 6).min(1) as f32)),
        _ if has_void => (ShapeType::UnbalancedPlus, -4.0, 5.0),
        _ => (ShapeType::Semi, -1.0, 1.0),
    };

    let ruff_potential = trump
        .filter(|_| mode.is_hokum())
        .map(|trump_suit| ruff_potential_for(hand, trump_suit))
        .unwrap_or(0.0);

    let long_suit_tricks = long_suit_tricks_for(hand, mode, trump);

    HandShape {
        pattern,
        shape_type,
        sun_adjustment,
        hokum_adjustment,
        ruff_potential,
        long_suit_tricks,
    }
}

/// Voids/singletons (excluding trump itself) scaled by how many spare trumps
/// remain once one is reserved per ruffing opportunity.
fn ruff_potential_for(hand: &Hand, trump: Suit) -> f32 {
    let spare_trumps = hand.count_in_suit(trump) as f32;
    if spare_trumps == 0.0 {
        return 0.0;
    }
    let mut shortages = 0.0;
    for suit in Suit::ALL {
        if suit == trump {
            continue;
        }
        match hand.count_in_suit(suit) {
            0 => shortages += 1.0,
            1 => shortages += 0.5,
            _ => {}
        }
    }
    (shortages * spare_trumps.min(3.0)).min(spare_trumps)
}

/// Running-trick estimate for any suit holding 5+ cards topped by an Ace, or
/// an Ace-King combination (§4.2 "long-suit tricks"). Non-trump suits only —
/// a HOKUM trump suit's length is already counted via `ruff_potential` and
/// the bidding trump-power score, not here.
fn long_suit_tricks_for(hand: &Hand, _mode: Mode, trump: Option<Suit>) -> f32 {
    let mut total = 0.0;
    for suit in Suit::ALL {
        if trump == Some(suit) {
            continue;
        }
        let count = hand.count_in_suit(suit);
        if count < 5 {
            continue;
        }
        let has_ace = hand
            .cards()
            .iter()
            .any(|c| c.suit == suit && c.rank == Rank::Ace);
        let has_king = hand
            .cards()
            .iter()
            .any(|c| c.suit == suit && c.rank == Rank::King);
        if has_ace && has_king {
            total += (count as f32 - 2.0).max(0.0) + 2.0;
        } else if has_ace {
            total += (count as f32 - 3.0).max(0.0) + 1.0;
        }
    }
    total
}

#[cfg(test)]
mod tests {
    use super::*;
    use baloot_core::model::Card;

    fn hand_of(cards: Vec<Card>) -> Hand {
        Hand::with_cards(cards)
    }

    #[test]
    fn a_singleton_plus_void_hand_is_penalized_in_sun() {
        let shaped = hand_of(vec![
            Card::new(Rank::Seven, Suit::Clubs),
            Card::new(Rank::Eight, Suit::Clubs),
            Card::new(Rank::Nine, Suit::Clubs),
            Card::new(Rank::Ten, Suit::Clubs),
            Card::new(Rank::Jack, Suit::Diamonds),
            Card::new(Rank::Queen, Suit::Diamonds),
            Card::new(Rank::King, Suit::Diamonds),
            Card::new(Rank::Ace, Suit::Hearts),
        ]);
        let shape = evaluate(&shaped, Mode::Sun, None);
        assert_eq!(shape.pattern, [4, 3, 1, 0]);
        assert_eq!(shape.shape_type, ShapeType::UnbalancedPlus);
        assert_eq!(shape.sun_adjustment, -4.0);
    }

    #[test]
    fn a_true_four_three_three_three_hand_is_balanced() {
        let hand = hand_of(vec![
            Card::new(Rank::Seven, Suit::Clubs),
            Card::new(Rank::Eight, Suit::Clubs),
            Card::new(Rank::Nine, Suit::Clubs),
            Card::new(Rank::Ten, Suit::Clubs),
            Card::new(Rank::Jack, Suit::Diamonds),
            Card::new(Rank::Queen, Suit::Diamonds),
            Card::new(Rank::King, Suit::Diamonds),
            Card::new(Rank::Ace, Suit::Hearts),
            Card::new(Rank::Ten, Suit::Hearts),
            Card::new(Rank::King, Suit::Hearts),
            Card::new(Rank::Seven, Suit::Spades),
            Card::new(Rank::Eight, Suit::Spades),
            Card::new(Rank::Nine, Suit::Spades),
        ]);
        let shape = evaluate(&hand, Mode::Hokum, None);
        assert_eq!(shape.pattern, [4, 3, 3, 3]);
        assert_eq!(shape.shape_type, ShapeType::Balanced);
        assert_eq!(shape.hokum_adjustment, -2.0);
    }

    #[test]
    fn six_card_suit_is_extreme() {
        let hand = hand_of(vec![
            Card::new(Rank::Seven, Suit::Clubs),
            Card::new(Rank::Eight, Suit::Clubs),
            Card::new(Rank::Nine, Suit::Clubs),
            Card::new(Rank::Ten, Suit::Clubs),
            Card::new(Rank::Jack, Suit::Clubs),
            Card::new(Rank::Queen, Suit::Clubs),
            Card::new(Rank::King, Suit::Diamonds),
            Card::new(Rank::Ace, Suit::Hearts),
        ]);
        let shape = evaluate(&hand, Mode::Hokum, None);
        assert_eq!(shape.shape_type, ShapeType::Extreme);
        assert!(shape.hokum_adjustment >= 5.0);
    }

    #[test]
    fn a_void_suit_is_unbalanced_plus() {
        let hand = hand_of(vec![
            Card::new(Rank::Seven, Suit::Clubs),
            Card::new(Rank::Eight, Suit::Clubs),
            Card::new(Rank::Nine, Suit::Clubs),
            Card::new(Rank::Jack, Suit::Diamonds),
            Card::new(Rank::Queen, Suit::Diamonds),
            Card::new(Rank::King, Suit::Diamonds),
            Card::new(Rank::Ace, Suit::Hearts),
            Card::new(Rank::Ten, Suit::Hearts),
        ]);
        let shape = evaluate(&hand, Mode::Sun, None);
        assert_eq!(shape.shape_type, ShapeType::UnbalancedPlus);
    }

    #[test]
    fn ruff_potential_rewards_spare_trumps_against_shortages() {
        let hand = hand_of(vec![
            Card::new(Rank::Jack, Suit::Spades),
            Card::new(Rank::Nine, Suit::Spades),
            Card::new(Rank::Ace, Suit::Spades),
            Card::new(Rank::King, Suit::Spades),
            Card::new(Rank::Seven, Suit::Clubs),
            Card::new(Rank::Eight, Suit::Clubs),
            Card::new(Rank::Nine, Suit::Clubs),
            Card::new(Rank::Queen, Suit::Diamonds),
        ]);
        let shape = evaluate(&hand, Mode::Hokum, Some(Suit::Spades));
        assert!(shape.ruff_potential > 0.0);
    }
}
