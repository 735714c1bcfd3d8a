//! Flavour text sent back to the player after each wave.

use rand::Rng;

/// Templates; `{}` is replaced by the attacked row.
pub const TAUNTS: [&str; 4] = [
    "Your defense is weak at row {}!",
    "Nice try, but I see an opening at row {}.",
    "Impressive defense, but I'm getting stronger!",
    "You're doing great, but I will adapt soon.",
];

/// Pick one template uniformly and fill in `attack_row`.
pub fn taunt<R: Rng>(attack_row: i64, rng: &mut R) -> String {
    let template = TAUNTS[rng.random_range(0..TAUNTS.len())];
    template.replace("{}", &attack_row.to_string())
}
