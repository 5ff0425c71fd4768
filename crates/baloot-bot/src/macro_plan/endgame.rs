use baloot_core::model::{Card, Contract, Observation, Play, Position};

const MAX_CARDS_PER_HAND: usize = 3;
const NODE_CAP: u64 = 20_000;

/// Node cap for [`brute_force`]'s unpruned enumeration. Larger than
/// [`NODE_CAP`] since, without alpha-beta cuts, the full tree over a
/// 3-cards-per-seat position can run to a few thousand leaves before it
/// collapses back down as hands empty out.
const BRUTE_FORCE_NODE_CAP: u64 = 200_000;

#[derive(Debug, Clone)]
pub struct EndgameOutput {
    pub card_index: usize,
    pub expected_differential: i32,
}

/// A fully-known remaining-cards position: each seat's unplayed hand plus
/// whatever has already been played into the current trick.
#[derive(Debug, Clone)]
pub struct EndgamePosition {
    pub hands: [Vec<Card>; 4],
    pub current_trick: Vec<Play>,
    pub leader: Position,
    pub contract: Contract,
}

/// Activates when <= 3 cards remain in every seat's hand (§4.6). Performs
/// exhaustive minimax with alpha-beta; falls back to `None` (the caller
/// should defer to the mid-game planner) when the node cap is exceeded or a
/// hand isn't fully known.
pub fn solve(obs: &Observation, position: &EndgamePosition) -> Option<EndgameOutput> {
    let ctx = obs.playing()?;
    if position.hands.iter().any(|h| h.len() > MAX_CARDS_PER_HAND) {
        return None;
    }

    let my_hand = &position.hands[obs.my_position.index() as usize];
    if my_hand.is_empty() {
        return None;
    }

    let mut nodes = 0u64;
    let mut best_index = None;
    let mut best_score = i32::MIN;

    let my_team_seats: Vec<Position> = Position::LOOP
        .into_iter()
        .filter(|&p| p.same_team(obs.my_position))
        .collect();

    for (candidate_index, &card) in my_hand.iter().enumerate() {
        let mut next = position.clone();
        next.hands[obs.my_position.index() as usize].remove(candidate_index);
        next.current_trick.push(Play {
            position: obs.my_position,
            card,
        });

        let next_to_move = seat_after(obs.my_position, &next.current_trick, position.leader);
        let score = match search(&next, next_to_move, &my_team_seats, &mut nodes, i32::MIN, i32::MAX) {
            Some(s) => s,
            None => return None,
        };

        if score > best_score || (score == best_score && tie_break_prefers(card, my_hand[best_index.unwrap_or(candidate_index)])) {
            best_score = score;
            best_index = Some(candidate_index);
        }
    }

    best_index.map(|card_index| EndgameOutput {
        card_index: ctx
            .legal_actions
            .iter()
            .copied()
            .find(|&i| ctx.hand.cards()[i] == my_hand[card_index])
            .unwrap_or(card_index),
        expected_differential: best_score,
    })
}

fn tie_break_prefers(candidate: Card, incumbent: Card) -> bool {
    candidate.rank.value() < incumbent.rank.value()
}

fn seat_after(current: Position, trick: &[Play], leader: Position) -> Position {
    if trick.len() >= 4 {
        leader
    } else {
        current.next()
    }
}

fn search(
    position: &EndgamePosition,
    to_move: Position,
    my_team: &[Position],
    nodes: &mut u64,
    mut alpha: i32,
    beta: i32,
) -> Option<i32> {
    *nodes += 1;
    if *nodes > NODE_CAP {
        return None;
    }

    if position.hands.iter().all(|h| h.is_empty()) && position.current_trick.is_empty() {
        return Some(0);
    }

    let hand = &position.hands[to_move.index() as usize];
    if hand.is_empty() {
        return Some(0);
    }

    let maximizing = my_team.contains(&to_move);
    let mut best = if maximizing { i32::MIN } else { i32::MAX };

    let mut ordered: Vec<usize> = (0..hand.len()).collect();
    ordered.sort_by_key(|&i| {
        let c = hand[i];
        (std::cmp::Reverse(c.point_value_in(position.contract)), std::cmp::Reverse(c.rank.value()))
    });

    for idx in ordered {
        let card = hand[idx];
        let mut next = position.clone();
        next.hands[to_move.index() as usize].remove(idx);
        next.current_trick.push(Play { position: to_move, card });

        let (trick_score, resumed) = if next.current_trick.len() == 4 {
            resolve_and_score(&mut next, my_team)
        } else {
            (0, None)
        };

        let next_to_move = resumed.unwrap_or_else(|| to_move.next());
        let child = search(&next, next_to_move, my_team, nodes, alpha, beta)?;
        let score = trick_score + child;

        if maximizing {
            best = best.max(score);
            alpha = alpha.max(best);
        } else {
            best = best.min(score);
            let beta = beta.min(best);
            if beta <= alpha {
                break;
            }
        }
        if alpha >= beta {
            break;
        }
    }

    Some(best)
}

fn resolve_and_score(position: &mut EndgamePosition, my_team: &[Position]) -> (i32, Option<Position>) {
    let plays: Vec<Play> = position.current_trick.drain(..).collect();
    let lead_suit = plays[0].card.suit;
    let winner = plays
        .iter()
        .filter(|p| p.card.suit == lead_suit || position.contract.is_trump(p.card.suit))
        .max_by(|a, b| {
            let a_trump = position.contract.is_trump(a.card.suit);
            let b_trump = position.contract.is_trump(b.card.suit);
            match (a_trump, b_trump) {
                (true, false) => std::cmp::Ordering::Greater,
                (false, true) => std::cmp::Ordering::Less,
                _ => a
                    .card
                    .rank
                    .strength(mode_of(position.contract), a_trump)
                    .cmp(&b.card.rank.strength(mode_of(position.contract), b_trump)),
            }
        })
        .map(|p| p.position)
        .unwrap_or(plays[0].position);

    let points: u32 = plays.iter().map(|p| p.card.point_value_in(position.contract)).sum();
    let sign = if my_team.contains(&winner) { 1 } else { -1 };
    position.leader = winner;
    (sign * points as i32, Some(winner))
}

fn mode_of(contract: Contract) -> baloot_core::model::Mode {
    if contract.trump.is_some() {
        baloot_core::model::Mode::Hokum
    } else {
        baloot_core::model::Mode::Sun
    }
}

/// Independent brute-force reference used by tests to validate the
/// alpha-beta solver (P8). A plain recursive walk of the entire remaining
/// game tree: no alpha-beta pruning, no move ordering, and — deliberately —
/// no code shared with [`search`]/[`resolve_and_score`], so a bug in
/// either implementation's winner-determination or trick-scoring logic
/// would not be silently reproduced in both.
pub fn brute_force(obs: &Observation, position: &EndgamePosition) -> Option<EndgameOutput> {
    let ctx = obs.playing()?;
    let my_hand = &position.hands[obs.my_position.index() as usize];
    if my_hand.is_empty() {
        return None;
    }

    let my_team_seats: Vec<Position> = Position::LOOP
        .into_iter()
        .filter(|&p| p.same_team(obs.my_position))
        .collect();

    let mut nodes = 0u64;
    let mut best_index = None;
    let mut best_score = i32::MIN;

    for (candidate_index, &card) in my_hand.iter().enumerate() {
        let mut next = position.clone();
        next.hands[obs.my_position.index() as usize].remove(candidate_index);
        next.current_trick.push(Play {
            position: obs.my_position,
            card,
        });

        let next_to_move = brute_force_next_seat(obs.my_position, next.current_trick.len(), position.leader);
        let score = exhaustive_search(&next, next_to_move, &my_team_seats, &mut nodes)?;

        if score > best_score {
            best_score = score;
            best_index = Some(candidate_index);
        }
    }

    best_index.map(|card_index| EndgameOutput {
        card_index: ctx
            .legal_actions
            .iter()
            .copied()
            .find(|&i| ctx.hand.cards()[i] == my_hand[card_index])
            .unwrap_or(card_index),
        expected_differential: best_score,
    })
}

fn brute_force_next_seat(current: Position, trick_len: usize, leader: Position) -> Position {
    if trick_len >= 4 {
        leader
    } else {
        current.next()
    }
}

/// Determines a completed trick's winner and point total using `Card::beats`
/// directly, rather than `resolve_and_score`'s hand-rolled trump/rank
/// comparison — a second, independently-written path to the same rule.
fn brute_force_resolve_trick(plays: &[Play], contract: Contract) -> (Position, u32) {
    let mut winner = plays[0].position;
    let mut winning_card = plays[0].card;
    for play in &plays[1..] {
        if play.card.beats(winning_card, contract) {
            winner = play.position;
            winning_card = play.card;
        }
    }
    let points: u32 = plays.iter().map(|p| p.card.point_value_in(contract)).sum();
    (winner, points)
}

/// The brute-force recursion itself: visits every legal child unconditionally,
/// never bounding the search with alpha/beta cuts.
fn exhaustive_search(
    position: &EndgamePosition,
    to_move: Position,
    my_team: &[Position],
    nodes: &mut u64,
) -> Option<i32> {
    *nodes += 1;
    if *nodes > BRUTE_FORCE_NODE_CAP {
        return None;
    }

    if position.hands.iter().all(|h| h.is_empty()) && position.current_trick.is_empty() {
        return Some(0);
    }

    let hand = &position.hands[to_move.index() as usize];
    if hand.is_empty() {
        return Some(0);
    }

    let maximizing = my_team.contains(&to_move);
    let mut best: Option<i32> = None;

    for idx in 0..hand.len() {
        let card = hand[idx];
        let mut next = position.clone();
        next.hands[to_move.index() as usize].remove(idx);
        next.current_trick.push(Play { position: to_move, card });

        let (trick_score, resumed) = if next.current_trick.len() == 4 {
            let plays: Vec<Play> = next.current_trick.drain(..).collect();
            let (winner, points) = brute_force_resolve_trick(&plays, next.contract);
            let sign = if my_team.contains(&winner) { 1 } else { -1 };
            next.leader = winner;
            (sign * points as i32, Some(winner))
        } else {
            (0, None)
        };

        let next_to_move = resumed.unwrap_or_else(|| to_move.next());
        let child = exhaustive_search(&next, next_to_move, my_team, nodes)?;
        let score = trick_score + child;

        best = Some(match best {
            None => score,
            Some(current) if maximizing => current.max(score),
            Some(current) => current.min(score),
        });
    }

    best.or(Some(0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use baloot_core::model::{
        Difficulty, Hand, Personality, Phase, PlayingContext, Rank, SeatInTrick, Suit, TeamScore,
        TrickInProgress,
    };

    fn endgame_obs(hand: Hand) -> Observation {
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
                contract: Contract::sun(),
                buyer: Position::P0,
                we_are_buyers: true,
                tricks_played: 5,
                current_trick: TrickInProgress::new(),
                seat_in_trick: SeatInTrick::LEADER,
                trick_history: Vec::new(),
                legal_actions,
            }),
        }
    }

    #[test]
    fn leading_ace_king_suit_prefers_the_ace() {
        let my_hand = Hand::with_cards(vec![
            Card::new(Rank::Ace, Suit::Clubs),
            Card::new(Rank::King, Suit::Clubs),
        ]);
        let obs = endgame_obs(my_hand.clone());
        let position = EndgamePosition {
            hands: [
                my_hand.cards().to_vec(),
                vec![Card::new(Rank::Seven, Suit::Clubs), Card::new(Rank::Eight, Suit::Diamonds)],
                vec![Card::new(Rank::Nine, Suit::Clubs), Card::new(Rank::Seven, Suit::Diamonds)],
                vec![Card::new(Rank::Eight, Suit::Clubs), Card::new(Rank::Nine, Suit::Diamonds)],
            ],
            current_trick: Vec::new(),
            leader: Position::P0,
            contract: Contract::sun(),
        };

        let alpha_beta = solve(&obs, &position).expect("fully known 2-card endgame");
        let reference = brute_force(&obs, &position).expect("fully known 2-card endgame");
        assert_eq!(alpha_beta.card_index, reference.card_index);
        assert_eq!(my_hand.cards()[alpha_beta.card_index], Card::new(Rank::Ace, Suit::Clubs));
    }
}
