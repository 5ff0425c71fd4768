use std::collections::HashMap;

use baloot_core::model::{Observation, Suit};

/// How the round has trended for our team over the completed tricks (§4.4).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Momentum {
    Winning,
    Losing,
    Tied,
    Collapsing,
}

/// A suggested tonal shift for upcoming tactical decisions (§4.4).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrategyShift {
    None,
    Conservative,
    Aggressive,
    DamageControl,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SuitResult {
    pub led: u8,
    pub won: u8,
    pub lost: u8,
    pub got_trumped: u8,
    pub points_lost: u32,
}

#[derive(Debug, Clone)]
pub struct TrickReview {
    pub our_tricks: u8,
    pub their_tricks: u8,
    pub momentum: Momentum,
    pub points_won_by_us: u32,
    pub points_won_by_them: u32,
    pub suit_results: HashMap<Suit, SuitResult>,
    pub strategy_shift: StrategyShift,
    pub partner_contribution: f32,
    pub opponent_cooperation: f32,
}

/// Summarizes completed tricks of the current round (§4.4). Returns a
/// neutral/empty review when no tricks have been played yet or the
/// observation isn't in the playing phase.
pub fn review(obs: &Observation) -> TrickReview {
    let Some(ctx) = obs.playing() else {
        return empty_review();
    };

    let mut our_tricks = 0u8;
    let mut their_tricks = 0u8;
    let mut points_won_by_us = 0u32;
    let mut points_won_by_them = 0u32;
    let mut suit_results: HashMap<Suit, SuitResult> = HashMap::new();
    let mut partner_good_plays = 0u32;
    let mut partner_plays = 0u32;
    let mut opponent_good_plays = 0u32;
    let mut opponent_plays = 0u32;

    let partner = obs.partner();
    let opponents = obs.opponents();

    for trick in &ctx.trick_history {
        let Some(lead_suit) = trick.lead_suit() else {
            continue;
        };
        let points = trick.point_total(ctx.contract);
        let we_won = obs.my_position.same_team(trick.winner);

        let entry = suit_results.entry(lead_suit).or_default();
        entry.led += 1;
        if we_won {
            our_tricks += 1;
            points_won_by_us += points;
            entry.won += 1;
        } else {
            their_tricks += 1;
            points_won_by_them += points;
            entry.lost += 1;
            entry.points_lost += points;
            if let Some(winner_card) = trick.card_played_by(trick.winner) {
                if winner_card.suit != lead_suit && ctx.contract.is_trump(winner_card.suit) {
                    entry.got_trumped += 1;
                }
            }
        }

        if let Some(card) = trick.card_played_by(partner) {
            partner_plays += 1;
            if (we_won && trick.winner == partner) || card.suit == lead_suit {
                partner_good_plays += 1;
            }
        }
        for &opponent in &opponents {
            if let Some(_card) = trick.card_played_by(opponent) {
                opponent_plays += 1;
                if trick.winner == opponent {
                    opponent_good_plays += 1;
                }
            }
        }
    }

    let momentum = if our_tricks == 0 && their_tricks >= 3 {
        Momentum::Collapsing
    } else if our_tricks > their_tricks {
        Momentum::Winning
    } else if our_tricks < their_tricks {
        Momentum::Losing
    } else {
        Momentum::Tied
    };

    let strategy_shift = match momentum {
        Momentum::Collapsing => StrategyShift::DamageControl,
        Momentum::Losing if points_won_by_them > points_won_by_us + 20 => StrategyShift::Aggressive,
        Momentum::Winning => StrategyShift::Conservative,
        _ => StrategyShift::None,
    };

    let partner_contribution = if partner_plays == 0 {
        0.0
    } else {
        partner_good_plays as f32 / partner_plays as f32
    };
    let opponent_cooperation = if opponent_plays == 0 {
        0.0
    } else {
        1.0 - (opponent_good_plays as f32 / opponent_plays as f32)
    };

    TrickReview {
        our_tricks,
        their_tricks,
        momentum,
        points_won_by_us,
        points_won_by_them,
        suit_results,
        strategy_shift,
        partner_contribution,
        opponent_cooperation,
    }
}

fn empty_review() -> TrickReview {
    TrickReview {
        our_tricks: 0,
        their_tricks: 0,
        momentum: Momentum::Tied,
        points_won_by_us: 0,
        points_won_by_them: 0,
        suit_results: HashMap::new(),
        strategy_shift: StrategyShift::None,
        partner_contribution: 0.0,
        opponent_cooperation: 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use baloot_core::model::{
        Card, CompletedTrick, Contract, Difficulty, Hand, Personality, Phase, Play,
        PlayingContext, Position, Rank, SeatInTrick, TeamScore, TrickInProgress,
    };

    fn trick(leader: Position, winner: Position, cards: [(Position, Rank, Suit); 4]) -> CompletedTrick {
        CompletedTrick {
            leader,
            plays: cards
                .into_iter()
                .map(|(position, rank, suit)| Play {
                    position,
                    card: Card::new(rank, suit),
                })
                .collect(),
            winner,
        }
    }

    fn playing_obs(trick_history: Vec<CompletedTrick>) -> Observation {
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
                hand: Hand::new(),
                contract: Contract::sun(),
                buyer: Position::P0,
                we_are_buyers: true,
                tricks_played: trick_history.len() as u8,
                current_trick: TrickInProgress::new(),
                seat_in_trick: SeatInTrick::LEADER,
                trick_history,
                legal_actions: Vec::new(),
            }),
        }
    }

    #[test]
    fn collapsing_when_we_have_lost_every_trick_so_far() {
        let history = vec![
            trick(
                Position::P1,
                Position::P1,
                [
                    (Position::P1, Rank::Ace, Suit::Clubs),
                    (Position::P2, Rank::Seven, Suit::Clubs),
                    (Position::P3, Rank::Eight, Suit::Clubs),
                    (Position::P0, Rank::Nine, Suit::Clubs),
                ],
            ),
            trick(
                Position::P1,
                Position::P3,
                [
                    (Position::P1, Rank::King, Suit::Diamonds),
                    (Position::P2, Rank::Seven, Suit::Diamonds),
                    (Position::P3, Rank::Ace, Suit::Diamonds),
                    (Position::P0, Rank::Eight, Suit::Diamonds),
                ],
            ),
            trick(
                Position::P1,
                Position::P1,
                [
                    (Position::P1, Rank::Queen, Suit::Hearts),
                    (Position::P2, Rank::Seven, Suit::Hearts),
                    (Position::P3, Rank::Eight, Suit::Hearts),
                    (Position::P0, Rank::Nine, Suit::Hearts),
                ],
            ),
        ];
        let obs = playing_obs(history);
        let review_result = review(&obs);
        assert_eq!(review_result.our_tricks, 0);
        assert_eq!(review_result.momentum, Momentum::Collapsing);
        assert_eq!(review_result.strategy_shift, StrategyShift::DamageControl);
    }

    #[test]
    fn no_completed_tricks_is_a_neutral_review() {
        let obs = playing_obs(Vec::new());
        let review_result = review(&obs);
        assert_eq!(review_result.momentum, Momentum::Tied);
        assert_eq!(review_result.strategy_shift, StrategyShift::None);
    }
}
