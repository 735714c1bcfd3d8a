use super::grid::GRID_SIZE;

/// Number of wave strengths the attacker can send (0 = weak .. 2 = strong).
pub const NUM_WAVE_TYPES: usize = 3;
/// Total number of attack choices.
pub const NUM_ACTIONS: usize = GRID_SIZE * NUM_WAVE_TYPES;

/// One attack: which row to push through and how strong a wave to send.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Action {
    pub attack_row: usize,
    pub wave_type: usize,
}

impl Action {
    /// Position of this action in the [`ActionSpace`] enumeration.
    pub fn index(self) -> usize {
        self.attack_row * NUM_WAVE_TYPES + self.wave_type
    }
}

/// All `(row, wave_type)` pairs, enumerated row-major once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionSpace {
    actions: Vec<Action>,
}

impl ActionSpace {
    pub fn new() -> Self {
        let actions = (0..GRID_SIZE)
            .flat_map(|attack_row| {
                (0..NUM_WAVE_TYPES).map(move |wave_type| Action {
                    attack_row,
                    wave_type,
                })
            })
            .collect();
        ActionSpace { actions }
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<Action> {
        self.actions.get(index).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = Action> + '_ {
        self.actions.iter().copied()
    }
}

impl Default for ActionSpace {
    fn default() -> Self {
        Self::new()
    }
}
