//! The brain (§4.7, §6): the priority cascade that ties bidding, evaluation,
//! inference, macro-planning, and tactical selectors into the two entry
//! points a host calls — [`decide_bid`] and [`decide_play`]. Every level of
//! the play cascade is consulted in order regardless of whether an earlier
//! level already produced a decision, and if a candidate agrees with the
//! card the immediately preceding *consulted* level also picked, its
//! confidence gets the agreement boost (§4.7 "if two consecutively consulted
//! modules independently recommend the same card, add +0.1") before the
//! first level whose confidence clears 0.5 is returned — falling back to the
//! always-present default tactical level if none does.

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{error, info, instrument, warn};

use baloot_core::model::{
    BidAction, BidDecision, Card, Observation, PlayDecision, Position, Rank, StrategyLabel, Suit,
};
use baloot_core::tracker::CardTracker;
use baloot_core::{CoreError, CoreResult};

use crate::bidding;
use crate::difficulty;
use crate::evaluation::{point_density, score_pressure, Density};
use crate::hints::Hints;
use crate::inference::Momentum;
use crate::macro_plan::endgame::{self, EndgamePosition};
use crate::macro_plan::{kaboot, mid_game, trump_manager::TrumpAction};
use crate::params::BotParams;
use crate::personality;
use crate::tactical::{self, cooperative_play};

const ENDGAME_MAX_CARDS: usize = 3;
const HAND_SIZE: usize = 8;

struct LegalCard {
    index: usize,
    card: Card,
}

fn legal_cards(obs: &Observation) -> Vec<LegalCard> {
    let ctx = obs.playing().expect("brain requires playing phase");
    ctx.legal_actions
        .iter()
        .map(|&index| LegalCard {
            index,
            card: ctx.hand.cards()[index],
        })
        .collect()
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

/// §7 "invariant violation": a cascade level named a card outside
/// `legal_actions`. This must never happen in a correct build; it exists so
/// the failure is a typed, loggable `CoreError` rather than a silent or
/// panicking one.
fn validate_card_index(legal_actions: &[usize], card_index: usize) -> CoreResult<()> {
    if legal_actions.contains(&card_index) {
        Ok(())
    } else {
        Err(CoreError::logic(format!(
            "cascade named card index {card_index} outside legal_actions"
        )))
    }
}

/// Runs the play cascade and checks its result against P1 before handing it
/// back, propagating an invariant violation via `?` rather than letting it
/// escape silently.
fn run_cascade_checked(
    obs: &Observation,
    hints: &Hints,
    tracker: &CardTracker,
    params: &BotParams,
    legal_actions: &[usize],
) -> CoreResult<PlayDecision> {
    let decision = cascade(obs, hints, tracker, params);
    validate_card_index(legal_actions, decision.card_index)?;
    Ok(decision)
}

/// §7 "invariant violation" for the bidding pipeline's P2 check.
fn validate_bid_action(legal_actions: &[BidAction], action: BidAction) -> CoreResult<()> {
    if legal_actions.contains(&action) {
        Ok(())
    } else {
        Err(CoreError::logic(format!(
            "cascade named bid action {action:?} outside legal_actions"
        )))
    }
}

/// Final P2 check for a fully-assembled bid decision, propagating via `?`.
fn finalize_bid(decision: BidDecision, legal_actions: &[BidAction]) -> CoreResult<BidDecision> {
    validate_bid_action(legal_actions, decision.action)?;
    Ok(decision)
}

/// Rebuilds a tracker for this decision alone (§4.1, §5): every call is a
/// pure function of `obs`, so there is no tracker instance to carry forward
/// — the auction and trick history are replayed from scratch each time.
fn build_tracker(obs: &Observation) -> CardTracker {
    let ctx = obs.playing().expect("build_tracker requires playing phase");
    let mut tracker = CardTracker::new(obs.difficulty, obs.rng_seed, ctx.hand.cards());
    tracker.apply_bid_priors(&obs.bid_history);
    for (index, trick) in ctx.trick_history.iter().enumerate() {
        let lead_suit = trick.lead_suit();
        for play in &trick.plays {
            tracker.on_trick_card(index as u8, play.position, play.card, lead_suit);
        }
    }
    let lead_suit = ctx.current_trick.lead_suit();
    for play in ctx.current_trick.plays() {
        tracker.on_trick_card(ctx.tricks_played, play.position, play.card, lead_suit);
    }
    tracker
}

fn mode_of(contract: baloot_core::model::Contract) -> baloot_core::model::Mode {
    if contract.trump.is_some() {
        baloot_core::model::Mode::Hokum
    } else {
        baloot_core::model::Mode::Sun
    }
}

// --- Priority 1: endgame solver -------------------------------------------

/// How many cards `position` has already played this round, used to size
/// its still-unknown hand.
fn cards_played_by(obs: &Observation, position: Position) -> usize {
    let ctx = obs.playing().expect("cards_played_by requires playing phase");
    ctx.trick_history
        .iter()
        .filter(|t| t.card_played_by(position).is_some())
        .count()
        + ctx.current_trick
            .plays()
            .iter()
            .filter(|p| p.position == position)
            .count()
}

fn unseen_cards(obs: &Observation) -> Vec<Card> {
    let ctx = obs.playing().expect("unseen_cards requires playing phase");
    let mut seen: std::collections::HashSet<Card> = ctx.hand.cards().iter().copied().collect();
    for trick in &ctx.trick_history {
        for play in &trick.plays {
            seen.insert(play.card);
        }
    }
    for play in ctx.current_trick.plays() {
        seen.insert(play.card);
    }
    Suit::ALL
        .into_iter()
        .flat_map(|s| Rank::ORDERED.into_iter().map(move |r| Card::new(r, s)))
        .filter(|c| !seen.contains(c))
        .collect()
}

/// Attempts to reconstruct every seat's exact remaining hand from the void
/// matrix (§4.6 "activates when <= 3 cards remain in every known hand" —
/// taken to mean the position is fully determined by that point, which void
/// tracking alone can confirm once each suit's unseen cards have only one
/// possible owner). Returns `None` the moment a suit's unseen cards could
/// still belong to more than one seat — the cascade falls through to the
/// mid-game planner instead of guessing.
fn infer_full_position(obs: &Observation, tracker: &CardTracker) -> Option<EndgamePosition> {
    let ctx = obs.playing()?;
    if ctx.hand.len() > ENDGAME_MAX_CARDS {
        return None;
    }

    let others: Vec<Position> = Position::LOOP
        .into_iter()
        .filter(|&p| p != obs.my_position)
        .collect();
    let expected_sizes: Vec<usize> = others
        .iter()
        .map(|&p| HAND_SIZE.saturating_sub(cards_played_by(obs, p)))
        .collect();
    if expected_sizes.iter().any(|&n| n > ENDGAME_MAX_CARDS) {
        return None;
    }

    let unseen = unseen_cards(obs);
    let mut assigned: [Vec<Card>; 3] = [Vec::new(), Vec::new(), Vec::new()];

    for suit in Suit::ALL {
        let suit_cards: Vec<Card> = unseen.iter().copied().filter(|c| c.suit == suit).collect();
        if suit_cards.is_empty() {
            continue;
        }
        let candidates: Vec<usize> = others
            .iter()
            .enumerate()
            .filter(|(_, &p)| tracker.void_probability_of(p, suit) < 0.999)
            .map(|(i, _)| i)
            .collect();
        match candidates.as_slice() {
            [only] => assigned[*only].extend(suit_cards),
            _ => return None,
        }
    }

    for (i, &expected) in expected_sizes.iter().enumerate() {
        if assigned[i].len() != expected {
            return None;
        }
    }

    let mut hands: [Vec<Card>; 4] = [Vec::new(), Vec::new(), Vec::new(), Vec::new()];
    hands[obs.my_position.index()] = ctx.hand.cards().to_vec();
    for (i, &p) in others.iter().enumerate() {
        hands[p.index()] = std::mem::take(&mut assigned[i]);
    }

    Some(EndgamePosition {
        hands,
        current_trick: ctx.current_trick.plays().to_vec(),
        leader: ctx.current_trick.leader().unwrap_or(obs.my_position),
        contract: ctx.contract,
    })
}

fn endgame_decider(obs: &Observation, tracker: &CardTracker) -> Option<PlayDecision> {
    if !difficulty::endgame_solver_enabled(obs.difficulty) {
        return None;
    }
    let position = infer_full_position(obs, tracker)?;
    let output = endgame::solve(obs, &position)?;
    Some(decision(
        output.card_index,
        StrategyLabel::EndgameOptimal,
        0.9,
        format!(
            "exhaustive endgame search: expected differential {}",
            output.expected_differential
        ),
        vec!["endgame_solver".to_string()],
    ))
}

// --- Priority 2: kaboot pursuit --------------------------------------------

fn kaboot_decider(obs: &Observation, tracker: &CardTracker, params: &BotParams) -> Option<PlayDecision> {
    let ctx = obs.playing()?;
    let aggressiveness = difficulty::kaboot_aggressiveness(obs.difficulty);
    if aggressiveness == difficulty::KabootAggressiveness::Never {
        return None;
    }
    let assessment = kaboot::assess(obs, tracker)?;
    if assessment.status != kaboot::KabootStatus::Pursuing || !ctx.seat_in_trick.is_leader() {
        return None;
    }
    let lead = assessment.lead?;
    let cards = legal_cards(obs);
    let trump = ctx.contract.trump;

    let (card, label, reasoning) = match lead {
        kaboot::KabootLead::MasterFirst => {
            let suit = kaboot::shortest_master_suit(obs, tracker)?;
            let lc = cards
                .iter()
                .filter(|lc| lc.card.suit == suit)
                .max_by_key(|lc| lc.card.rank.value())?;
            (lc, StrategyLabel::MasterFirst, format!("chasing the sweep: cashing our master in {suit:?}"))
        }
        kaboot::KabootLead::TrumpDraw => {
            let trump = trump?;
            let lc = cards.iter().filter(|lc| lc.card.suit == trump).max_by_key(|lc| lc.card.rank.value())?;
            (lc, StrategyLabel::TrumpDraw, "chasing the sweep: drawing trump first".to_string())
        }
        kaboot::KabootLead::LongSuit => {
            let suit = Suit::ALL
                .into_iter()
                .filter(|&s| Some(s) != trump)
                .max_by_key(|&s| cards.iter().filter(|lc| lc.card.suit == s).count())?;
            let lc = cards.iter().filter(|lc| lc.card.suit == suit).max_by_key(|lc| lc.card.rank.value())?;
            (lc, StrategyLabel::LongSuit, format!("chasing the sweep: leading our long suit {suit:?}"))
        }
    };

    let confidence = (params.kaboot_pursuit_threshold
        * difficulty::kaboot_confidence_multiplier(aggressiveness))
    .min(1.0);
    Some(decision(card.index, label, confidence, reasoning, vec!["kaboot".to_string()]))
}

// --- Priority 3: mid-game planner ------------------------------------------

fn mid_game_decider(obs: &Observation, tracker: &CardTracker, momentum: Momentum) -> Option<PlayDecision> {
    mid_game::plan(obs, tracker, momentum).map(|plan| plan.decision)
}

// --- Priority 4: point density ----------------------------------------------

/// A brain-level point-density override, distinct from the follow optimizer's
/// own (trick-local) use of the same module: when leading with a critical
/// pile of unclaimed points still live in the deck, cash a master immediately
/// rather than let the tactical cascade set one up slowly (§4.5, §4.7).
fn point_density_decider(obs: &Observation, tracker: &CardTracker) -> Option<PlayDecision> {
    let ctx = obs.playing()?;
    if !ctx.seat_in_trick.is_leader() {
        return None;
    }
    let density = point_density::evaluate(0, false, mode_of(ctx.contract), ctx.cards_remaining());
    if density.density != Density::Critical {
        return None;
    }
    let cards = legal_cards(obs);
    let candidate = cards
        .iter()
        .filter(|lc| tracker.is_master(lc.card, ctx.contract) && lc.card.point_value_in(ctx.contract) > 0)
        .max_by_key(|lc| lc.card.point_value_in(ctx.contract))?;
    Some(decision(
        candidate.index,
        StrategyLabel::MasterCash,
        0.6,
        "critical point density still live: cashing our highest-value master now".to_string(),
        vec!["point_density".to_string()],
    ))
}

// --- Priority 5: trump manager -----------------------------------------------

fn trump_manager_decider(obs: &Observation, hints: &Hints) -> Option<PlayDecision> {
    let ctx = obs.playing()?;
    let trump = ctx.contract.trump?;
    let tm = hints.trump_manager.as_ref()?;
    let cards = legal_cards(obs);

    match tm.action {
        TrumpAction::Draw if ctx.seat_in_trick.is_leader() && tm.lead_trump => {
            let lc = cards.iter().filter(|lc| lc.card.suit == trump).max_by_key(|lc| lc.card.rank.value())?;
            Some(decision(
                lc.index,
                StrategyLabel::TrumpDraw,
                0.7,
                "trump manager: drawing trump before anything else".to_string(),
                vec!["trump_manager".to_string()],
            ))
        }
        TrumpAction::CrossRuff if !ctx.seat_in_trick.is_leader() => {
            let lead_suit = ctx.current_trick.lead_suit()?;
            if cards.iter().any(|lc| lc.card.suit == lead_suit) {
                return None;
            }
            if !tm.ruff_target_suits.contains(&lead_suit) {
                return None;
            }
            let lc = cards.iter().filter(|lc| lc.card.suit == trump).min_by_key(|lc| lc.card.rank.value())?;
            Some(decision(
                lc.index,
                StrategyLabel::TrumpIn,
                0.65,
                format!("trump manager: cross-ruffing {lead_suit:?}, partner's target suit"),
                vec!["trump_manager".to_string()],
            ))
        }
        _ => None,
    }
}

// --- Priorities 6-7: cooperative play ---------------------------------------

fn defense_decider(obs: &Observation, hints: &Hints) -> Option<PlayDecision> {
    cooperative_play::following_override(obs, hints)
}

fn partner_signal_decider(obs: &Observation, hints: &Hints) -> Option<PlayDecision> {
    cooperative_play::leading_override(obs, hints)
}

// --- Priority 8: default tactical -------------------------------------------

fn default_tactical_decider(obs: &Observation, hints: &Hints, tracker: &CardTracker) -> Option<PlayDecision> {
    Some(tactical::default_tactical(obs, hints, tracker))
}

/// Walks the full §4.7 priority cascade, always consulting every level so
/// the agreement-boost rule has something to compare against, then returns
/// the first level whose (possibly boosted) confidence clears 0.5 — or, if
/// none does, the default tactical level's decision regardless of its own
/// confidence, matching §2's "if none fires, a default follow/lead
/// heuristic runs".
fn cascade(obs: &Observation, hints: &Hints, tracker: &CardTracker, params: &BotParams) -> PlayDecision {
    let momentum = hints.trick_review.momentum;

    let mut levels: Vec<Option<PlayDecision>> = vec![
        endgame_decider(obs, tracker),
        kaboot_decider(obs, tracker, params),
        mid_game_decider(obs, tracker, momentum),
        point_density_decider(obs, tracker),
        trump_manager_decider(obs, hints),
        defense_decider(obs, hints),
        partner_signal_decider(obs, hints),
        default_tactical_decider(obs, hints, tracker),
    ];

    let mut previous_card: Option<usize> = None;
    for level in levels.iter_mut() {
        if let Some(candidate) = level {
            if previous_card == Some(candidate.card_index) {
                candidate.confidence = (candidate.confidence + params.agreement_confidence_boost).min(1.0);
            }
            previous_card = Some(candidate.card_index);
        }
    }

    // §4.7: stop at the first level whose confidence clears the 0.5 bar.
    // `default_tactical_decider` is always the last level and is the §2
    // fallback the cascade runs when nothing above it fired strongly enough
    // — it wins regardless of its own confidence once every earlier level
    // has been exhausted.
    let (default_level, ranked_levels) = levels.split_last_mut().expect("cascade has at least one level");
    ranked_levels
        .iter()
        .flatten()
        .find(|candidate| candidate.confidence >= 0.5)
        .cloned()
        .or_else(|| default_level.clone())
        .expect("default_tactical_decider always returns Some")
}

/// `decide_play` (§6, default tuning): the brain's full play-time entry
/// point. Builds the round's tracker and hints from scratch, walks the
/// cascade, then applies personality and difficulty filters. Recovers to the
/// lowest legal card on any structural failure (§7).
pub fn decide_play(obs: &Observation) -> PlayDecision {
    decide_play_with_params(obs, &BotParams::default())
}

#[instrument(skip(obs, params), fields(seat = ?obs.my_position))]
pub fn decide_play_with_params(obs: &Observation, params: &BotParams) -> PlayDecision {
    let Some(ctx) = obs.playing() else {
        warn!("decide_play invoked outside the playing phase");
        return PlayDecision::fallback(0, "decide_play invoked outside the playing phase");
    };
    if ctx.legal_actions.is_empty() {
        warn!("decide_play invoked with no legal actions");
        return PlayDecision::fallback(0, "no legal actions available");
    }
    let lowest_legal = ctx
        .legal_actions
        .iter()
        .copied()
        .min_by_key(|&i| ctx.hand.cards()[i].rank.value())
        .unwrap_or(ctx.legal_actions[0]);

    let tracker = build_tracker(obs);
    let hints = Hints::gather(obs, &tracker);

    let mut decision = match run_cascade_checked(obs, &hints, &tracker, params, &ctx.legal_actions) {
        Ok(decision) => decision,
        Err(err) => {
            error!(error = %err, "play decision violated an invariant, falling back");
            return PlayDecision::fallback(lowest_legal, "a cascade level named a card outside legal_actions");
        }
    };

    personality::apply_to_play(&mut decision, obs.personality);
    let mut rng = StdRng::seed_from_u64(obs.rng_seed);
    difficulty::apply_noise(&mut decision, obs, &mut rng);

    info!(
        strategy = ?decision.strategy_label,
        confidence = decision.confidence,
        card_index = decision.card_index,
        "decide_play"
    );
    decision
}

/// `decide_bid` (§6, default tuning): runs the bid optimizer, layers the
/// doubling check on top, then applies personality filters.
pub fn decide_bid(obs: &Observation) -> BidDecision {
    decide_bid_with_params(obs, &BotParams::default())
}

#[instrument(skip(obs, params), fields(seat = ?obs.my_position))]
pub fn decide_bid_with_params(obs: &Observation, params: &BotParams) -> BidDecision {
    let Some(ctx) = obs.bidding() else {
        warn!("decide_bid invoked outside the bidding phase");
        return fallback_bid(&[], "decide_bid invoked outside the bidding phase");
    };
    if ctx.legal_actions.is_empty() {
        warn!("decide_bid invoked with no legal actions");
        return fallback_bid(&[], "no legal bid actions available");
    }

    let mut decision = bidding::decide(obs, params);

    let pressure = score_pressure::bid_pressure(&obs.match_score);
    let pressure_permits = pressure.doubling_bias >= 0.0;
    if ctx.legal_actions.contains(&BidAction::Double)
        && bidding::should_double(&decision.components, pressure_permits)
    {
        decision.action = BidAction::Double;
        decision.confidence = (decision.confidence + pressure.doubling_bias.max(0.0)).min(1.0);
        decision.reasoning = format!(
            "{} (escalating to DOUBLE: projected tricks clear the sweep bar)",
            decision.reasoning
        );
        decision.modules_consulted.push("bid_optimizer::should_double".to_string());
    }

    let mut rng = StdRng::seed_from_u64(obs.rng_seed);
    personality::apply_to_bid(&mut decision, obs.personality, &mut rng);

    let decision = match finalize_bid(decision, &ctx.legal_actions) {
        Ok(decision) => decision,
        Err(err) => {
            error!(error = %err, "bid decision violated an invariant, falling back");
            return fallback_bid(&ctx.legal_actions, "a cascade level named a bid action outside legal_actions");
        }
    };

    info!(action = ?decision.action, confidence = decision.confidence, "decide_bid");
    decision
}

/// §7 InternalLogicError recovery for the bidding pipeline: PASS if it's
/// legal (the trivial, always-safe choice), otherwise the first legal
/// action, carrying zero confidence so the host can tell this apart from a
/// genuine recommendation (P2: the action returned is always in
/// `legal_actions`, never a null).
fn fallback_bid(legal_actions: &[BidAction], reasoning: &str) -> BidDecision {
    let action = if legal_actions.contains(&BidAction::Pass) {
        BidAction::Pass
    } else {
        legal_actions.first().copied().unwrap_or(BidAction::Pass)
    };
    BidDecision {
        action,
        confidence: 0.0,
        reasoning: reasoning.to_string(),
        components: baloot_core::model::BidComponents::default(),
        modules_consulted: vec!["decide_bid::fallback".to_string()],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use baloot_core::model::{
        Contract, Difficulty, Hand, Personality, Phase, PlayingContext, Position, Rank,
        SeatInTrick, TeamScore, TrickInProgress,
    };

    fn leader_obs(hand: Hand, contract: Contract) -> Observation {
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
            rng_seed: 7,
            phase: Phase::Playing(PlayingContext {
                hand,
                contract,
                buyer: Position::P0,
                we_are_buyers: true,
                tricks_played: 0,
                current_trick: TrickInProgress::new(),
                seat_in_trick: SeatInTrick::LEADER,
                trick_history: Vec::new(),
                legal_actions,
            }),
        }
    }

    #[test]
    fn decide_play_always_returns_a_legal_card() {
        let hand = Hand::with_cards(vec![
            Card::new(Rank::Ace, Suit::Clubs),
            Card::new(Rank::Seven, Suit::Diamonds),
            Card::new(Rank::King, Suit::Hearts),
        ]);
        let obs = leader_obs(hand.clone(), Contract::sun());
        let play = decide_play(&obs);
        assert!(obs.playing().unwrap().legal_actions.contains(&play.card_index));
    }

    #[test]
    fn decide_play_outside_playing_phase_falls_back() {
        let obs = Observation {
            my_position: Position::P0,
            bid_history: Vec::new(),
            round_score: TeamScore::default(),
            match_score: TeamScore::default(),
            doubling_level: baloot_core::model::DoublingLevel::None,
            declarations: Vec::new(),
            personality: Personality::Balanced,
            difficulty: Difficulty::Expert,
            rng_seed: 0,
            phase: Phase::Bidding(baloot_core::model::BiddingContext {
                hand: Hand::new(),
                face_up_card: None,
                legal_actions: vec![baloot_core::model::BidAction::Pass],
            }),
        };
        let play = decide_play(&obs);
        assert_eq!(play.strategy_label, StrategyLabel::LowestLegalFallback);
        assert_eq!(play.confidence, 0.0);
    }

    #[test]
    fn decide_bid_on_a_weak_hand_passes() {
        let hand = Hand::with_cards(vec![
            Card::new(Rank::Seven, Suit::Clubs),
            Card::new(Rank::Eight, Suit::Clubs),
            Card::new(Rank::Seven, Suit::Diamonds),
            Card::new(Rank::Eight, Suit::Diamonds),
            Card::new(Rank::Seven, Suit::Hearts),
            Card::new(Rank::Eight, Suit::Hearts),
            Card::new(Rank::Seven, Suit::Spades),
            Card::new(Rank::Eight, Suit::Spades),
        ]);
        let obs = Observation {
            my_position: Position::P0,
            bid_history: Vec::new(),
            round_score: TeamScore::default(),
            match_score: TeamScore::default(),
            doubling_level: baloot_core::model::DoublingLevel::None,
            declarations: Vec::new(),
            personality: Personality::Balanced,
            difficulty: Difficulty::Expert,
            rng_seed: 1,
            phase: Phase::Bidding(baloot_core::model::BiddingContext {
                hand,
                face_up_card: None,
                legal_actions: vec![
                    baloot_core::model::BidAction::Pass,
                    baloot_core::model::BidAction::Sun,
                ],
            }),
        };
        let decision = decide_bid(&obs);
        assert_eq!(decision.action, BidAction::Pass);
    }
}
