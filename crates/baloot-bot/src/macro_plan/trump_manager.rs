use baloot_core::model::{Observation, Suit};
use baloot_core::tracker::CardTracker;

use crate::inference::PartnerRead;

/// HOKUM trump-management directive (§4.5). Rules are evaluated in order;
/// the first match wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrumpAction {
    Draw,
    Preserve,
    CrossRuff,
    Neutral,
}

#[derive(Debug, Clone)]
pub struct TrumpManagerOutput {
    pub action: TrumpAction,
    pub lead_trump: bool,
    pub safe_side_suits: Vec<Suit>,
    pub ruff_target_suits: Vec<Suit>,
}

/// Computes the trump-management directive for the current hand (§4.5).
/// `None` outside HOKUM — trump management has nothing to say in SUN.
pub fn plan(obs: &Observation, tracker: &CardTracker, partner_read: &PartnerRead) -> Option<TrumpManagerOutput> {
    let ctx = obs.playing()?;
    let trump = ctx.contract.trump?;

    let held_trumps: Vec<_> = ctx
        .hand
        .cards()
        .iter()
        .filter(|c| c.suit == trump)
        .collect();
    let holds_jack = held_trumps.iter().any(|c| c.rank == baloot_core::model::Rank::Jack);
    let holds_nine = held_trumps.iter().any(|c| c.rank == baloot_core::model::Rank::Nine);

    let enemies_have_trumps = obs
        .opponents()
        .iter()
        .any(|&p| tracker.void_probability_of(p, trump) < 0.5);
    let all_enemy_trumps_gone = obs
        .opponents()
        .iter()
        .all(|&p| tracker.void_probability_of(p, trump) >= 0.999)
        || tracker.remaining_in_suit(trump) == 0;

    let safe_side_suits: Vec<Suit> = Suit::ALL
        .into_iter()
        .filter(|&s| s != trump && ctx.hand.count_in_suit(s) > 0)
        .collect();

    let ruff_target_suits: Vec<Suit> = partner_read
        .likely_void_suits
        .iter()
        .copied()
        .filter(|&s| s != trump && ctx.hand.count_in_suit(trump) > 0)
        .collect();

    let (action, lead_trump) = if holds_jack && holds_nine && enemies_have_trumps {
        (TrumpAction::Draw, true)
    } else if held_trumps.len() <= 2 && enemies_have_trumps {
        (TrumpAction::Preserve, false)
    } else if !ruff_target_suits.is_empty() {
        (TrumpAction::CrossRuff, false)
    } else if all_enemy_trumps_gone {
        (TrumpAction::Neutral, false)
    } else {
        (TrumpAction::Neutral, false)
    };

    Some(TrumpManagerOutput {
        action,
        lead_trump,
        safe_side_suits,
        ruff_target_suits,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use baloot_core::model::{
        Card, Contract, Difficulty, Hand, Personality, Phase, PlayingContext, Position, Rank,
        SeatInTrick, TeamScore, TrickInProgress,
    };

    fn playing_obs(hand: Hand, trump: Suit) -> Observation {
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
                hand,
                contract: Contract::hokum(trump),
                buyer: Position::P0,
                we_are_buyers: true,
                tricks_played: 0,
                current_trick: TrickInProgress::new(),
                seat_in_trick: SeatInTrick::LEADER,
                trick_history: Vec::new(),
                legal_actions: vec![0],
            }),
        }
    }

    #[test]
    fn holding_jack_and_nine_with_enemies_armed_calls_for_draw() {
        let hand = Hand::with_cards(vec![
            Card::new(Rank::Jack, Suit::Spades),
            Card::new(Rank::Nine, Suit::Spades),
            Card::new(Rank::Ace, Suit::Spades),
            Card::new(Rank::Seven, Suit::Clubs),
        ]);
        let obs = playing_obs(hand, Suit::Spades);
        let tracker = CardTracker::new(Difficulty::Expert, 0, obs.playing().unwrap().hand.cards());
        let partner_read = PartnerRead::default();
        let plan = plan(&obs, &tracker, &partner_read).expect("hokum contract");
        assert_eq!(plan.action, TrumpAction::Draw);
        assert!(plan.lead_trump);
    }

    #[test]
    fn sun_contracts_have_no_trump_plan() {
        let hand = Hand::with_cards(vec![Card::new(Rank::Seven, Suit::Clubs)]);
        let mut obs = playing_obs(hand, Suit::Spades);
        if let Phase::Playing(ctx) = &mut obs.phase {
            ctx.contract = Contract::sun();
        }
        let tracker = CardTracker::new(Difficulty::Expert, 0, &[]);
        let partner_read = PartnerRead::default();
        assert!(plan(&obs, &tracker, &partner_read).is_none());
    }
}
