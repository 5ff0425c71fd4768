use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::model::bid::{Bid, BidAction};
use crate::model::card::Card;
use crate::model::mode::Contract;
use crate::model::position::Position;
use crate::model::profiles::Difficulty;
use crate::model::rank::Rank;
use crate::model::suit::Suit;

/// Smooths the Bayesian void step (§4.1): a seat's probability of holding a
/// void in a suit decays towards certainty as fewer cards of that suit
/// remain unseen, weighted against this many "phantom" unseen cards so a
/// single early discard doesn't instantly convict a seat of a void.
const UNSEEN_WEIGHT: f64 = 6.0;

/// Nudge applied to a seat's prior void probability in a suit when the
/// auction gives a (weak, non-deterministic) signal about that suit (§4.1
/// "bid_prior").
const BID_PRIOR_NUDGE: f64 = 0.05;

/// Per-card Bayesian step applied to every not-yet-played seat's void
/// probability in `led_suit` on each trick-card update (§4.1 "decrement
/// P[p][led_suit] toward 0"). Smaller than [`BID_PRIOR_NUDGE`] since this
/// fires on every card played to a trick rather than once per auction bid.
const TRICK_FOLLOW_NUDGE_STEP: f64 = 0.03;

/// A void is considered established once its probability crosses this bar.
const VOID_THRESHOLD: f64 = 0.999;

/// Probability the tracker silently drops an otherwise-applicable update,
/// simulating an imperfect reader at lower difficulty tiers (§4.1, §4.8).
fn drop_rate(difficulty: Difficulty) -> f64 {
    match difficulty {
        Difficulty::Easy => 0.40,
        Difficulty::Medium => 0.10,
        Difficulty::Hard | Difficulty::Expert => 0.0,
    }
}

/// Round-scoped probabilistic tracker of the 32-card deck (§4.1). Maintains
/// which cards are still unseen, a per-seat/per-suit void probability
/// matrix, and applies each trick update at most once (P7: idempotence).
#[derive(Debug, Clone)]
pub struct CardTracker {
    difficulty: Difficulty,
    rng: StdRng,
    unseen: HashSet<Card>,
    void_probability: [[f64; 4]; 4],
    applied: HashSet<(u8, Position)>,
}

impl CardTracker {
    /// Builds a tracker for a fresh round. `my_hand` and any known face-up
    /// card are removed from the unseen pool immediately; everything else
    /// starts as unseen with zero void probability everywhere.
    pub fn new(difficulty: Difficulty, rng_seed: u64, known_cards: &[Card]) -> Self {
        let mut unseen: HashSet<Card> = Suit::ALL
            .iter()
            .flat_map(|&suit| Rank::ORDERED.iter().map(move |&rank| Card::new(rank, suit)))
            .collect();
        for card in known_cards {
            unseen.remove(card);
        }
        Self {
            difficulty,
            rng: StdRng::seed_from_u64(rng_seed),
            unseen,
            void_probability: [[0.0; 4]; 4],
            applied: HashSet::new(),
        }
    }

    /// Count of still-unseen cards in `suit`, consumed by point density and
    /// trick projection (§4.2).
    pub fn remaining_in_suit(&self, suit: Suit) -> usize {
        self.unseen.iter().filter(|c| c.suit == suit).count()
    }

    /// `true` if no unseen card of `card`'s suit can beat it under
    /// `contract` — i.e. `card` is a guaranteed trick winner if led now
    /// (§4.1 "is_master", feeds lead selector's `MASTER_CASH`).
    pub fn is_master(&self, card: Card, contract: Contract) -> bool {
        self.unseen
            .iter()
            .filter(|c| c.suit == card.suit)
            .all(|&c| !c.beats(card, contract))
    }

    /// Current void-probability estimate for `position` holding no cards of
    /// `suit`.
    pub fn void_probability_of(&self, position: Position, suit: Suit) -> f64 {
        self.void_probability[position.index()][suit.index()]
    }

    /// Suits each seat is judged void in, at or above [`VOID_THRESHOLD`]
    /// (§4.1 "get_voids").
    pub fn get_voids(&self, position: Position) -> Vec<Suit> {
        Suit::ALL
            .into_iter()
            .filter(|&suit| self.void_probability_of(position, suit) >= VOID_THRESHOLD)
            .collect()
    }

    /// Folds the auction into the void matrix before play starts (§4.1
    /// "bid_prior"). A seat that proposed `Hokum(suit)` is nudged away from
    /// a void in that suit; a seat that passed while `suit` was live is
    /// nudged (weakly) towards one. This is a soft prior, not a renege
    /// signal — only [`CardTracker::on_trick_card`] can push a probability
    /// to certainty.
    pub fn apply_bid_priors(&mut self, bid_history: &[Bid]) {
        for bid in bid_history {
            match bid.action {
                BidAction::Hokum(suit) => {
                    self.nudge(bid.seat, suit, -BID_PRIOR_NUDGE);
                }
                BidAction::Pass => {
                    for suit in Suit::ALL {
                        self.nudge(bid.seat, suit, BID_PRIOR_NUDGE / 4.0);
                    }
                }
                BidAction::Sun | BidAction::Ashkal | BidAction::Double | BidAction::Redouble => {}
            }
        }
    }

    /// Records one played card within `trick_index` (§4.1 "on_trick_card").
    /// Removes the card from the unseen pool and, if it broke suit relative
    /// to `lead_suit`, marks `position` as certainly void in `lead_suit`.
    /// Every other position that hasn't played to this trick yet has its
    /// void probability in `led_suit` nudged towards 0 — it just watched one
    /// more card of that suit disappear without anyone else committing to a
    /// void, so it's marginally likelier to still hold one. Skipped entirely
    /// (debited against `drop_rate`) at lower difficulty, and a no-op on a
    /// repeat call for the same `(trick_index, position)` (P7).
    pub fn on_trick_card(
        &mut self,
        trick_index: u8,
        position: Position,
        card: Card,
        lead_suit: Option<Suit>,
    ) {
        let key = (trick_index, position);
        if !self.applied.insert(key) {
            return;
        }
        self.unseen.remove(&card);

        if self.rng.gen_bool(drop_rate(self.difficulty)) {
            return;
        }

        if let Some(lead_suit) = lead_suit {
            if card.suit != lead_suit {
                self.void_probability[position.index()][lead_suit.index()] = 1.0;
            }

            for other in Position::LOOP {
                if other == position || self.applied.contains(&(trick_index, other)) {
                    continue;
                }
                self.nudge(other, lead_suit, -TRICK_FOLLOW_NUDGE_STEP);
            }
        }
    }

    fn nudge(&mut self, position: Position, suit: Suit, delta: f64) {
        let remaining = self.remaining_in_suit(suit).max(1) as f64;
        let decay = remaining / (remaining + UNSEEN_WEIGHT);
        let slot = &mut self.void_probability[position.index()][suit.index()];
        *slot = (*slot + delta * decay).clamp(0.0, 1.0 - f64::EPSILON);
    }
}
