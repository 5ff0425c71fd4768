use baloot_core::model::Mode;

/// Label for the current trick's point sum on the table (§4.5).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Density {
    Empty,
    Low,
    Medium,
    High,
    Critical,
}

fn density_of(points: u32) -> Density {
    match points {
        0 => Density::Empty,
        1..=6 => Density::Low,
        7..=15 => Density::Medium,
        16..=25 => Density::High,
        _ => Density::Critical,
    }
}

#[derive(Debug, Clone, Copy)]
pub struct PointDensity {
    pub density: Density,
    pub points: u32,
    pub worth_fighting: bool,
    pub should_play_high: bool,
}

/// Labels the current table point total and derives whether it's worth
/// fighting for (§4.5). Endgame (2 or fewer cards remaining) always forces
/// `should_play_high`.
pub fn evaluate(points: u32, partner_winning: bool, mode: Mode, cards_remaining: usize) -> PointDensity {
    let density = density_of(points);
    let endgame = cards_remaining <= 2;

    let worth_fighting = match density {
        Density::Empty => false,
        Density::Low => mode.is_hokum(),
        Density::Medium | Density::High | Density::Critical => true,
    } && !partner_winning;

    let should_play_high = endgame
        || matches!(density, Density::High | Density::Critical)
        || (matches!(density, Density::Medium) && !partner_winning);

    PointDensity {
        density,
        points,
        worth_fighting,
        should_play_high,
    }
}
