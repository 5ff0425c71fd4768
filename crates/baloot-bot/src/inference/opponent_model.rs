use std::collections::BTreeSet;

use baloot_core::model::{BidAction, Observation, Position, Rank, Suit};

/// Reading of one opponent's probable hand, mirroring [`super::partner_read::PartnerRead`]
/// (§4.4) with an additional play-style and danger classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayStyle {
    Aggressive,
    Passive,
    Unknown,
}

#[derive(Debug, Clone, Default)]
pub struct OpponentRead {
    pub likely_strong_suits: Vec<Suit>,
    pub likely_void_suits: Vec<Suit>,
    pub danger_level: f32,
    pub confidence: f32,
}

#[derive(Debug, Clone)]
pub struct OpponentModel {
    pub reads: Vec<(Position, OpponentRead)>,
    pub play_style: PlayStyle,
    /// Suits where no opponent is judged void and none is judged strong
    /// (§4.4).
    pub safe_lead_suits: Vec<Suit>,
    /// Suits where any opponent is void (ruff risk) or strong (§4.4).
    pub avoid_lead_suits: Vec<Suit>,
}

/// Builds an [`OpponentModel`] across both opponents from bids and plays in
/// `obs` (§4.4).
pub fn model(obs: &Observation) -> OpponentModel {
    let opponents = obs.opponents();
    let mut reads = Vec::new();
    let mut high_plays = 0u32;
    let mut low_discards = 0u32;
    let mut ruffs = 0u32;

    for &opponent in &opponents {
        let mut strong = BTreeSet::new();
        let mut void = BTreeSet::new();
        let mut evidence = 0.0f32;
        let mut danger = 0.0f32;

        for bid in &obs.bid_history {
            if bid.seat != opponent {
                continue;
            }
            match bid.action {
                BidAction::Hokum(suit) => {
                    strong.insert(suit);
                    evidence += 2.0;
                    danger += 0.3;
                }
                BidAction::Sun | BidAction::Ashkal => {
                    evidence += 1.0;
                    danger += 0.15;
                }
                BidAction::Double | BidAction::Redouble => {
                    danger += 0.25;
                }
                BidAction::Pass => {}
            }
        }

        if let Some(ctx) = obs.playing() {
            for trick in &ctx.trick_history {
                let Some(lead_suit) = trick.lead_suit() else {
                    continue;
                };
                let Some(card) = trick.card_played_by(opponent) else {
                    continue;
                };
                evidence += 0.5;

                if card.suit != lead_suit {
                    if ctx.contract.is_trump(card.suit) {
                        ruffs += 1;
                        danger += 0.2;
                    } else if card.rank.value() <= Rank::Nine.value() {
                        void.insert(lead_suit);
                        low_discards += 1;
                    }
                } else if trick.leader == opponent {
                    if matches!(card.rank, Rank::Ace | Rank::King | Rank::Ten) {
                        strong.insert(card.suit);
                        high_plays += 1;
                        danger += 0.15;
                    }
                }
            }
        }

        reads.push((
            opponent,
            OpponentRead {
                likely_strong_suits: strong.into_iter().collect(),
                likely_void_suits: void.into_iter().collect(),
                danger_level: danger.clamp(0.0, 1.0),
                confidence: (evidence / 6.0).clamp(0.0, 1.0),
            },
        ));
    }

    let play_style = classify_style(high_plays + ruffs, low_discards);

    let mut safe_lead_suits = Vec::new();
    let mut avoid_lead_suits = BTreeSet::new();
    for suit in Suit::ALL {
        let any_void = reads.iter().any(|(_, r)| r.likely_void_suits.contains(&suit));
        let any_strong = reads.iter().any(|(_, r)| r.likely_strong_suits.contains(&suit));
        if any_void || any_strong {
            avoid_lead_suits.insert(suit);
        } else {
            safe_lead_suits.push(suit);
        }
    }

    OpponentModel {
        reads,
        play_style,
        safe_lead_suits,
        avoid_lead_suits: avoid_lead_suits.into_iter().collect(),
    }
}

fn classify_style(aggressive_signals: u32, passive_signals: u32) -> PlayStyle {
    if aggressive_signals + passive_signals < 2 {
        return PlayStyle::Unknown;
    }
    let ratio = aggressive_signals as f32 / (aggressive_signals + passive_signals).max(1) as f32;
    if ratio >= 0.6 {
        PlayStyle::Aggressive
    } else if ratio <= 0.4 {
        PlayStyle::Passive
    } else {
        PlayStyle::Unknown
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use baloot_core::model::{BiddingContext, Card, Difficulty, Hand, Personality, Phase, Position, TeamScore};

    fn base_obs() -> Observation {
        Observation {
            my_position: Position::P0,
            bid_history: vec![baloot_core::model::Bid::new(
                Position::P1,
                BidAction::Hokum(Suit::Diamonds),
            )],
            round_score: TeamScore::default(),
            match_score: TeamScore::default(),
            doubling_level: baloot_core::model::DoublingLevel::None,
            declarations: Vec::new(),
            personality: Personality::Balanced,
            difficulty: Difficulty::Expert,
            rng_seed: 0,
            phase: Phase::Bidding(BiddingContext {
                hand: Hand::with_cards(vec![Card::new(Rank::Seven, Suit::Clubs)]),
                face_up_card: None,
                legal_actions: Vec::new(),
            }),
        }
    }

    #[test]
    fn an_opponent_hokum_bid_marks_the_suit_avoided() {
        let obs = base_obs();
        let opponent_model = model(&obs);
        assert!(opponent_model.avoid_lead_suits.contains(&Suit::Diamonds));
        assert!(!opponent_model.safe_lead_suits.contains(&Suit::Diamonds));
    }

    #[test]
    fn sparse_evidence_is_an_unknown_play_style() {
        let obs = base_obs();
        let opponent_model = model(&obs);
        assert_eq!(opponent_model.play_style, PlayStyle::Unknown);
    }
}
