use baloot_core::model::{Observation, Rank, Suit};
use baloot_core::tracker::CardTracker;

/// Sweep pursuit status (§4.6).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KabootStatus {
    Pursuing,
    Locked,
    Abort,
}

/// The card to lead with when `status == Pursuing` and we hold the lead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KabootLead {
    MasterFirst,
    LongSuit,
    TrumpDraw,
}

#[derive(Debug, Clone)]
pub struct KabootAssessment {
    pub status: KabootStatus,
    pub lead: Option<KabootLead>,
}

/// Assesses whether a clean sweep (kaboot) is still alive (§4.6). Only
/// meaningful when we are the buyers and have won every trick played so far;
/// callers outside that condition should treat the result as inapplicable.
pub fn assess(obs: &Observation, tracker: &CardTracker) -> Option<KabootAssessment> {
    let ctx = obs.playing()?;
    if !ctx.we_are_buyers {
        return None;
    }

    let tricks_won_by_us = ctx
        .trick_history
        .iter()
        .filter(|t| obs.my_position.same_team(t.winner))
        .count() as u8;
    if tricks_won_by_us != ctx.tricks_played {
        return None;
    }

    if ctx.tricks_played > 0 {
        let any_lost = ctx
            .trick_history
            .iter()
            .any(|t| !obs.my_position.same_team(t.winner));
        if any_lost {
            return Some(KabootAssessment {
                status: KabootStatus::Abort,
                lead: None,
            });
        }
    }

    let hand_masters: Vec<_> = ctx
        .hand
        .cards()
        .iter()
        .copied()
        .filter(|&c| tracker.is_master(c, ctx.contract))
        .collect();
    if hand_masters.is_empty() && ctx.tricks_played < 5 {
        return Some(KabootAssessment {
            status: KabootStatus::Abort,
            lead: None,
        });
    }

    if let Some(trump) = ctx.contract.trump {
        let enemies_likely_have_trump = obs
            .opponents()
            .iter()
            .any(|&p| tracker.void_probability_of(p, trump) < 0.5);
        if ctx.hand.count_in_suit(trump) == 0 && enemies_likely_have_trump {
            return Some(KabootAssessment {
                status: KabootStatus::Abort,
                lead: None,
            });
        }
    }

    if ctx.tricks_played >= 3 && !ctx.seat_in_trick.is_leader() {
        let leader = ctx.current_trick.leader();
        if leader == Some(obs.partner()) {
            return Some(KabootAssessment {
                status: KabootStatus::Locked,
                lead: None,
            });
        }
    }

    if !ctx.seat_in_trick.is_leader() {
        return Some(KabootAssessment {
            status: KabootStatus::Pursuing,
            lead: None,
        });
    }

    let lead = if !hand_masters.is_empty() {
        KabootLead::MasterFirst
    } else if ctx.contract.trump.is_some()
        && ctx.hand.cards().iter().any(|c| {
            Some(c.suit) == ctx.contract.trump && matches!(c.rank, Rank::Jack | Rank::Nine)
        })
    {
        KabootLead::TrumpDraw
    } else {
        KabootLead::LongSuit
    };

    Some(KabootAssessment {
        status: KabootStatus::Pursuing,
        lead: Some(lead),
    })
}

/// Picks the shortest side suit holding a master (MASTER_FIRST), or `None`
/// if no side suit currently holds one.
pub fn shortest_master_suit(obs: &Observation, tracker: &CardTracker) -> Option<Suit> {
    let ctx = obs.playing()?;
    Suit::ALL
        .into_iter()
        .filter(|&s| Some(s) != ctx.contract.trump)
        .filter(|&s| {
            ctx.hand
                .cards()
                .iter()
                .any(|c| c.suit == s && tracker.is_master(*c, ctx.contract))
        })
        .min_by_key(|&s| ctx.hand.count_in_suit(s))
}

#[cfg(test)]
mod tests {
    use super::*;
    use baloot_core::model::{
        Card, CompletedTrick, Contract, Difficulty, Hand, Personality, Phase, Play,
        PlayingContext, Position, SeatInTrick, TeamScore, TrickInProgress,
    };

    fn won_trick(winner: Position) -> CompletedTrick {
        CompletedTrick {
            leader: winner,
            plays: vec![
                Play { position: Position::P0, card: Card::new(Rank::Seven, Suit::Clubs) },
                Play { position: Position::P1, card: Card::new(Rank::Eight, Suit::Clubs) },
                Play { position: Position::P2, card: Card::new(Rank::Nine, Suit::Clubs) },
                Play { position: Position::P3, card: Card::new(Rank::Ten, Suit::Clubs) },
            ],
            winner,
        }
    }

    fn obs_with(history: Vec<CompletedTrick>, hand: Hand) -> Observation {
        Observation {
            my_position: Position::P0,
            bid_history: Vec::new(),
            round_score: TeamScore::default(),
            match_score: TeamScore::default(),
            doubling_level: baloot_core::model::DoublingLevel::None,
            declarations: Vec::new(),
            personality: Personality::Balanced,
            difficulty: Difficulty::Expert,
            rng_seed: 0,
            phase: Phase::Playing(PlayingContext {
                hand: hand.clone(),
                contract: Contract::sun(),
                buyer: Position::P0,
                we_are_buyers: true,
                tricks_played: history.len() as u8,
                current_trick: TrickInProgress::new(),
                seat_in_trick: SeatInTrick::LEADER,
                trick_history: history,
                legal_actions: (0..hand.len()).collect(),
            }),
        }
    }

    #[test]
    fn five_tricks_swept_with_masters_in_hand_is_pursuing() {
        let history = vec![
            won_trick(Position::P0),
            won_trick(Position::P0),
            won_trick(Position::P0),
            won_trick(Position::P0),
            won_trick(Position::P0),
        ];
        let hand = Hand::with_cards(vec![
            Card::new(Rank::Ace, Suit::Diamonds),
            Card::new(Rank::Ace, Suit::Hearts),
            Card::new(Rank::Seven, Suit::Spades),
        ]);
        let obs = obs_with(history, hand.clone());
        let tracker = CardTracker::new(Difficulty::Expert, 0, hand.cards());
        let assessment = assess(&obs, &tracker).expect("buyers with a clean sweep so far");
        assert_eq!(assessment.status, KabootStatus::Pursuing);
        assert_eq!(assessment.lead, Some(KabootLead::MasterFirst));
    }

    #[test]
    fn losing_any_trick_aborts_the_chase() {
        let history = vec![won_trick(Position::P2)];
        let hand = Hand::with_cards(vec![Card::new(Rank::Seven, Suit::Spades)]);
        let obs = obs_with(history, hand.clone());
        let tracker = CardTracker::new(Difficulty::Expert, 0, hand.cards());
        let assessment = assess(&obs, &tracker);
        assert!(assessment.is_none());
    }
}
