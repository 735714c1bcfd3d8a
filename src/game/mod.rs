//! Battlefield model: the tower grid, the enumerable attack choices, and the
//! probabilistic combat resolution used for simulation.

mod action;
pub mod combat;
mod grid;

pub use action::{Action, ActionSpace, NUM_ACTIONS, NUM_WAVE_TYPES};
pub use combat::{resolve, success_probability, CombatOutcome};
pub use grid::{Cell, Grid, TowerPos, BASE_POS, GRID_SIZE, STATE_SIZE};
