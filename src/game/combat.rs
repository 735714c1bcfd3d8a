use rand::Rng;

use super::action::Action;
use super::grid::Grid;

/// Result of resolving one attack against a defensive layout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CombatOutcome {
    pub success: bool,
    pub reward: f32,
}

/// Chance that a wave of `wave_type` breaks through a row holding
/// `towers_in_row` towers.
pub fn success_probability(wave_type: usize, towers_in_row: usize) -> f64 {
    let defense_strength = (towers_in_row + 1) as f64;
    let attack_strength = (wave_type + 1) as f64;
    attack_strength / (defense_strength + attack_strength)
}

/// Simulate an attack with a single Bernoulli draw. Reward is +1 on a
/// breakthrough and -1 when the defense holds.
///
/// Only used for server-side simulation; in play the client reports the real
/// result.
pub fn resolve<R: Rng>(grid: &Grid, action: Action, rng: &mut R) -> CombatOutcome {
    let p = success_probability(action.wave_type, grid.towers_in_row(action.attack_row));
    let success = rng.random::<f64>() < p;
    CombatOutcome {
        success,
        reward: if success { 1.0 } else { -1.0 },
    }
}
