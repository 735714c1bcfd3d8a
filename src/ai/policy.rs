use rand::Rng;

/// Round-decayed epsilon-greedy schedule.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PolicyConfig {
    /// Exploration rate before any decay is applied.
    pub start: f64,
    /// Amount the rate drops per round.
    pub decay_per_round: f64,
    /// Exploration never falls below this.
    pub floor: f64,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        PolicyConfig {
            start: 1.0,
            decay_per_round: 0.05,
            floor: 0.3,
        }
    }
}

/// How an action was picked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    Explore(usize),
    Exploit(usize),
}

impl Choice {
    pub fn index(self) -> usize {
        match self {
            Choice::Explore(i) | Choice::Exploit(i) => i,
        }
    }

    pub fn is_exploration(self) -> bool {
        matches!(self, Choice::Explore(_))
    }
}

#[derive(Debug, Clone, Default)]
pub struct ExplorationPolicy {
    config: PolicyConfig,
}

impl ExplorationPolicy {
    pub fn new(config: PolicyConfig) -> Self {
        ExplorationPolicy { config }
    }

    /// `max(floor, start - decay_per_round * round)`.
    pub fn exploration_rate(&self, round: u32) -> f64 {
        (self.config.start - self.config.decay_per_round * round as f64).max(self.config.floor)
    }

    /// Explore uniformly with probability `exploration_rate(round)`, otherwise
    /// take the best-scoring action. `q_values` must not be empty.
    pub fn choose<R: Rng>(&self, round: u32, q_values: &[f32], rng: &mut R) -> Choice {
        debug_assert!(!q_values.is_empty());
        if rng.random::<f64>() < self.exploration_rate(round) {
            Choice::Explore(rng.random_range(0..q_values.len()))
        } else {
            Choice::Exploit(argmax(q_values))
        }
    }
}

/// Index of the largest score; the first one wins ties.
pub fn argmax(values: &[f32]) -> usize {
    let mut best = 0;
    let mut best_q = f32::NEG_INFINITY;
    for (i, &q) in values.iter().enumerate() {
        if q > best_q {
            best_q = q;
            best = i;
        }
    }
    best
}
