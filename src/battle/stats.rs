use crate::battle::state::TurnRng;
use schema::Effectiveness;

/// Calculate if a move hits based on its accuracy.
/// Draws one roll in `[0, 100)`; the move hits when the roll is below its accuracy.
pub fn move_hits(accuracy: u8, rng: &mut TurnRng) -> bool {
    rng.hit_roll() < f64::from(accuracy)
}

/// Damage dealt by one hit.
///
/// `floor((((2 * level + 10) / 250) * (attack / defense) * power + 2) * multiplier * factor)`,
/// at least 1 unless the defender is immune, in which case it is exactly 0.
pub fn calculate_damage(
    level: u8,
    attack: u16,
    defense: u16,
    power: u16,
    effectiveness: Effectiveness,
    random_factor: f64,
) -> u16 {
    if !effectiveness.deals_damage() {
        return 0;
    }

    let level_term = (2.0 * f64::from(level) + 10.0) / 250.0;
    let stat_ratio = f64::from(attack) / f64::from(defense.max(1));
    let base = level_term * stat_ratio * f64::from(power) + 2.0;
    let damage = (base * effectiveness.multiplier() * random_factor).floor();

    // `as` saturates out-of-range floats.
    (damage as u16).max(1)
}
