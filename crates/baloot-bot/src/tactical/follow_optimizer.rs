use baloot_core::model::{Card, Observation, PlayDecision, StrategyLabel};
use baloot_core::tracker::CardTracker;

use crate::evaluation::point_density;
use crate::hints::Hints;

struct LegalCard {
    index: usize,
    card: Card,
}

fn legal_cards(obs: &Observation) -> Vec<LegalCard> {
    let ctx = obs.playing().expect("follow_optimizer requires playing phase");
    ctx.legal_actions
        .iter()
        .map(|&index| LegalCard {
            index,
            card: ctx.hand.cards()[index],
        })
        .collect()
}

/// The 8-tactic follow cascade for seats 2-4 (§4.5). Assumes a lead card is
/// already on the table — callers at the lead position should use
/// [`super::lead_selector::select`] instead.
pub fn select(obs: &Observation, hints: &Hints, tracker: &CardTracker) -> PlayDecision {
    let ctx = obs.playing().expect("follow_optimizer requires playing phase");
    let cards = legal_cards(obs);
    let contract = ctx.contract;
    let lead_suit = ctx
        .current_trick
        .lead_suit()
        .expect("follow_optimizer requires a card already on the table");
    let current_best = ctx
        .current_trick
        .current_best(contract)
        .expect("a led card implies a current best");
    let points = ctx.current_trick.point_total(contract);
    let partner_winning = obs.my_position.same_team(current_best.position);

    let same_suit: Vec<&LegalCard> = cards.iter().filter(|lc| lc.card.suit == lead_suit).collect();

    if !same_suit.is_empty() {
        if partner_winning && points >= 15 {
            if let Some(feed) = same_suit
                .iter()
                .filter(|lc| !lc.card.beats(current_best.card, contract))
                .max_by_key(|lc| lc.card.point_value_in(contract))
            {
                return decision(
                    feed.index,
                    StrategyLabel::FeedPartner,
                    0.65,
                    format!(
                        "partner holds the trick at {points} pts: feeding the highest card that doesn't overtake"
                    ),
                    vec!["follow_optimizer".to_string()],
                );
            }
        }

        let beaters: Vec<&&LegalCard> = same_suit
            .iter()
            .filter(|lc| lc.card.beats(current_best.card, contract))
            .collect();

        if let Some(cheapest) = beaters
            .iter()
            .min_by_key(|lc| (lc.card.point_value_in(contract), lc.card.rank.value()))
        {
            let density = point_density::evaluate(
                points,
                partner_winning,
                mode_of(contract),
                ctx.cards_remaining(),
            );
            if density.should_play_high {
                let biggest = beaters
                    .iter()
                    .max_by_key(|lc| (lc.card.point_value_in(contract), lc.card.rank.value()))
                    .expect("beaters is non-empty");
                return decision(
                    biggest.index,
                    StrategyLabel::WinBig,
                    0.7,
                    format!("{points} pts on the table: winning with our strongest beater"),
                    vec!["follow_optimizer".to_string()],
                );
            }

            return decision(
                cheapest.index,
                StrategyLabel::WinCheap,
                0.6,
                "winning the trick as cheaply as possible".to_string(),
                vec!["follow_optimizer".to_string()],
            );
        }

        let lowest = same_suit
            .iter()
            .min_by_key(|lc| lc.card.rank.value())
            .expect("same_suit is non-empty");
        return decision(
            lowest.index,
            StrategyLabel::ShedSafe,
            0.5,
            "can't beat the current best: following with our lowest card".to_string(),
            vec!["follow_optimizer".to_string()],
        );
    }

    // Void on the led suit.
    if let Some(trump) = contract.trump {
        let trumps: Vec<&LegalCard> = cards.iter().filter(|lc| lc.card.suit == trump).collect();
        let opponent_led = !obs.my_position.same_team(
            ctx.current_trick
                .leader()
                .expect("a led card implies a leader"),
        );
        let already_trumped = current_best.card.suit == trump;

        if opponent_led && points >= 10 && !trumps.is_empty() {
            let cheapest_trump = trumps
                .iter()
                .min_by_key(|lc| lc.card.rank.value())
                .expect("trumps is non-empty");
            return decision(
                cheapest_trump.index,
                StrategyLabel::TrumpIn,
                0.65,
                format!("void on {lead_suit:?}: ruffing in on a {points}-pt trick led by an opponent"),
                vec!["follow_optimizer".to_string()],
            );
        }

        if already_trumped {
            if let Some(over) = trumps
                .iter()
                .filter(|lc| lc.card.beats(current_best.card, contract))
                .min_by_key(|lc| lc.card.rank.value())
            {
                return decision(
                    over.index,
                    StrategyLabel::TrumpOver,
                    0.6,
                    "over-ruffing the trump already on the table".to_string(),
                    vec!["follow_optimizer".to_string()],
                );
            }
        }

        if partner_winning {
            let dodge = cards
                .iter()
                .filter(|lc| lc.card.suit != trump)
                .min_by_key(|lc| lc.card.rank.value())
                .or_else(|| cards.iter().min_by_key(|lc| lc.card.rank.value()))
                .expect("at least one legal card");
            return decision(
                dodge.index,
                StrategyLabel::Dodge,
                0.55,
                "partner already holds the trick: discarding low".to_string(),
                vec!["follow_optimizer".to_string()],
            );
        }
    }

    let shed = shed_safe_card(&cards, obs, tracker);
    decision(
        shed.index,
        StrategyLabel::ShedSafe,
        0.5,
        "void on the led suit with nothing better to do: shedding safely".to_string(),
        vec!["follow_optimizer".to_string()],
    )
}

fn shed_safe_card<'a>(cards: &'a [LegalCard], obs: &Observation, tracker: &CardTracker) -> &'a LegalCard {
    let partner_voids = tracker.get_voids(obs.partner());
    cards
        .iter()
        .filter(|lc| partner_voids.contains(&lc.card.suit))
        .min_by_key(|lc| lc.card.rank.value())
        .unwrap_or_else(|| {
            cards
                .iter()
                .min_by_key(|lc| lc.card.rank.value())
                .expect("at least one legal card")
        })
}

fn mode_of(contract: baloot_core::model::Contract) -> baloot_core::model::Mode {
    if contract.trump.is_some() {
        baloot_core::model::Mode::Hokum
    } else {
        baloot_core::model::Mode::Sun
    }
}

fn decision(
    card_index: usize,
    strategy_label: StrategyLabel,
    confidence: f32,
    reasoning: String,
    modules_consulted: Vec<String>,
) -> PlayDecision {
    PlayDecision {
        card_index,
        strategy_label,
        confidence,
        reasoning,
        modules_consulted,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use baloot_core::model::{
        Contract, Difficulty, Hand, Personality, Phase, Play, PlayingContext, Position, Rank,
        SeatInTrick, Suit, TeamScore, TrickInProgress,
    };

    fn follower_obs(hand: Hand, contract: Contract, table: Vec<Play>, seat: u8) -> Observation {
        let legal_actions = (0..hand.len()).collect();
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
                contract,
                buyer: Position::P0,
                we_are_buyers: true,
                tricks_played: 0,
                current_trick: TrickInProgress::with_plays(table),
                seat_in_trick: SeatInTrick(seat),
                trick_history: Vec::new(),
                legal_actions,
            }),
        }
    }

    #[test]
    fn feeds_partner_a_high_card_without_overtaking() {
        let hand = Hand::with_cards(vec![Card::new(Rank::Queen, Suit::Clubs), Card::new(Rank::Eight, Suit::Spades)]);
        let table = vec![
            Play { position: Position::P3, card: Card::new(Rank::King, Suit::Clubs) },
            Play { position: Position::P2, card: Card::new(Rank::Ace, Suit::Clubs) },
            Play { position: Position::P3, card: Card::new(Rank::Seven, Suit::Clubs) },
        ];
        let obs = follower_obs(hand.clone(), Contract::hokum(Suit::Spades), table, 4);
        let tracker = CardTracker::new(Difficulty::Expert, 0, hand.cards());
        let hints = Hints::gather(&obs, &tracker);
        let play = select(&obs, &hints, &tracker);
        assert_eq!(play.strategy_label, StrategyLabel::FeedPartner);
        assert_eq!(hand.cards()[play.card_index], Card::new(Rank::Queen, Suit::Clubs));
    }

    #[test]
    fn ruffs_in_on_a_rich_opponent_led_trick_when_void() {
        let hand = Hand::with_cards(vec![Card::new(Rank::Seven, Suit::Spades), Card::new(Rank::Eight, Suit::Diamonds)]);
        let table = vec![Play { position: Position::P1, card: Card::new(Rank::Ace, Suit::Clubs) }];
        let obs = follower_obs(hand.clone(), Contract::hokum(Suit::Spades), table, 2);
        let tracker = CardTracker::new(Difficulty::Expert, 0, hand.cards());
        let hints = Hints::gather(&obs, &tracker);
        let play = select(&obs, &hints, &tracker);
        assert_eq!(play.strategy_label, StrategyLabel::TrumpIn);
        assert_eq!(hand.cards()[play.card_index], Card::new(Rank::Seven, Suit::Spades));
    }
}
