use serde::{Deserialize, Serialize};

use crate::model::bid::{Bid, BidAction};
use crate::model::card::Card;
use crate::model::hand::Hand;
use crate::model::mode::Contract;
use crate::model::position::Position;
use crate::model::profiles::{Difficulty, Personality};
use crate::model::trick::{CompletedTrick, TrickInProgress};

/// Raw point totals for "us" (the observer's team) versus "them" (§3: "team
/// scores (us, them) within the round and match").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TeamScore {
    pub us: u32,
    pub them: u32,
}

impl TeamScore {
    pub const fn new(us: u32, them: u32) -> Self {
        Self { us, them }
    }
}

/// Escalation level of the contract (glossary: "Doubling").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DoublingLevel {
    #[default]
    None,
    Double,
    Redouble,
}

/// A pre-play declaration bonus (glossary: "Declaration (project)"). The core
/// treats the scoring formula as opaque (§9 Open Questions); it only reads
/// `owner` / `kind` to inform partner/opponent strength inference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Declaration {
    pub owner: Position,
    pub kind: DeclarationKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeclarationKind {
    Run(u8),
    FourOfAKind,
    Baloot,
}

/// Bidding-phase-only data (§3, §6).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BiddingContext {
    pub hand: Hand,
    pub face_up_card: Option<Card>,
    pub legal_actions: Vec<BidAction>,
}

/// Where in the current trick the observer sits (§3: "seat_in_trick (1=leader,
/// 2-4 followers)").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatInTrick(pub u8);

impl SeatInTrick {
    pub const LEADER: SeatInTrick = SeatInTrick(1);

    pub const fn is_leader(self) -> bool {
        self.0 == 1
    }
}

/// Playing-phase-only data (§3, §6).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayingContext {
    pub hand: Hand,
    pub contract: Contract,
    pub buyer: Position,
    pub we_are_buyers: bool,
    pub tricks_played: u8,
    pub current_trick: TrickInProgress,
    pub seat_in_trick: SeatInTrick,
    pub trick_history: Vec<CompletedTrick>,
    pub legal_actions: Vec<usize>,
}

impl PlayingContext {
    pub fn cards_remaining(&self) -> usize {
        self.hand.len()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Phase {
    Bidding(BiddingContext),
    Playing(PlayingContext),
}

/// The immutable input to every decision (§3, I4: a total function of the
/// Observation given a seeded RNG).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Observation {
    pub my_position: Position,
    pub bid_history: Vec<Bid>,
    pub round_score: TeamScore,
    pub match_score: TeamScore,
    pub doubling_level: DoublingLevel,
    pub declarations: Vec<Declaration>,
    pub personality: Personality,
    pub difficulty: Difficulty,
    /// Caller-seeded PRNG source (§5): any stochastic behaviour in the core
    /// (personality's false-signal roll, difficulty's noise) derives from
    /// this seed alone, never a global RNG, so P3 determinism holds.
    pub rng_seed: u64,
    pub phase: Phase,
}

impl Observation {
    pub fn is_bidding(&self) -> bool {
        matches!(self.phase, Phase::Bidding(_))
    }

    pub fn is_playing(&self) -> bool {
        matches!(self.phase, Phase::Playing(_))
    }

    pub fn bidding(&self) -> Option<&BiddingContext> {
        match &self.phase {
            Phase::Bidding(ctx) => Some(ctx),
            Phase::Playing(_) => None,
        }
    }

    pub fn playing(&self) -> Option<&PlayingContext> {
        match &self.phase {
            Phase::Playing(ctx) => Some(ctx),
            Phase::Bidding(_) => None,
        }
    }

    pub fn partner(&self) -> Position {
        self.my_position.partner()
    }

    pub fn opponents(&self) -> [Position; 2] {
        self.my_position.opponents()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::card::Card;
    use crate::model::mode::Contract;
    use crate::model::rank::Rank;
    use crate::model::suit::Suit;
    use crate::model::trick::TrickInProgress;

    fn sample_hand() -> Hand {
        Hand::with_cards(vec![
            Card::new(Rank::Seven, Suit::Clubs),
            Card::new(Rank::Ace, Suit::Clubs),
        ])
    }

    #[test]
    fn bidding_phase_exposes_bidding_context_only() {
        let obs = Observation {
            my_position: Position::P0,
            bid_history: Vec::new(),
            round_score: TeamScore::default(),
            match_score: TeamScore::default(),
            doubling_level: DoublingLevel::None,
            declarations: Vec::new(),
            personality: Personality::Balanced,
            difficulty: Difficulty::Medium,
            rng_seed: 7,
            phase: Phase::Bidding(BiddingContext {
                hand: sample_hand(),
                face_up_card: None,
                legal_actions: vec![BidAction::Pass, BidAction::Sun],
            }),
        };
        assert!(obs.is_bidding());
        assert!(obs.bidding().is_some());
        assert!(obs.playing().is_none());
    }

    #[test]
    fn playing_phase_exposes_playing_context_only() {
        let obs = Observation {
            my_position: Position::P1,
            bid_history: Vec::new(),
            round_score: TeamScore::default(),
            match_score: TeamScore::default(),
            doubling_level: DoublingLevel::None,
            declarations: Vec::new(),
            personality: Personality::Balanced,
            difficulty: Difficulty::Hard,
            rng_seed: 7,
            phase: Phase::Playing(PlayingContext {
                hand: sample_hand(),
                contract: Contract::sun(),
                buyer: Position::P1,
                we_are_buyers: true,
                tricks_played: 0,
                current_trick: TrickInProgress::new(),
                seat_in_trick: SeatInTrick::LEADER,
                trick_history: Vec::new(),
                legal_actions: vec![0, 1],
            }),
        };
        assert!(obs.is_playing());
        assert!(obs.playing().is_some());
        assert!(obs.bidding().is_none());
    }

    #[test]
    fn partner_and_opponents_follow_seat_geometry() {
        let obs = Observation {
            my_position: Position::P0,
            bid_history: Vec::new(),
            round_score: TeamScore::default(),
            match_score: TeamScore::default(),
            doubling_level: DoublingLevel::None,
            declarations: Vec::new(),
            personality: Personality::Balanced,
            difficulty: Difficulty::Medium,
            rng_seed: 0,
            phase: Phase::Bidding(BiddingContext {
                hand: sample_hand(),
                face_up_card: None,
                legal_actions: vec![BidAction::Pass],
            }),
        };
        assert_eq!(obs.partner(), Position::P2);
        assert_eq!(obs.opponents(), [Position::P1, Position::P3]);
    }
}
