use std::collections::VecDeque;

/// Result of a single simulated round.
#[derive(Debug, Clone, Copy)]
pub struct RoundResult {
    pub success: bool,
    pub explored: bool,
    /// The attacked row had no more towers than any other row.
    pub hit_weakest_row: bool,
}

/// Rolling-window statistics over simulated rounds and training calls.
pub struct SimulationMetrics {
    round_results: VecDeque<RoundResult>,
    update_losses: VecDeque<f32>,
    capacity: usize,
    total_rounds: usize, // lifetime count, never capped
    total_successes: usize,
}

impl SimulationMetrics {
    pub fn with_capacity(capacity: usize) -> Self {
        SimulationMetrics {
            round_results: VecDeque::with_capacity(capacity),
            update_losses: VecDeque::with_capacity(capacity),
            capacity,
            total_rounds: 0,
            total_successes: 0,
        }
    }

    pub fn new() -> Self {
        Self::with_capacity(100)
    }

    pub fn record_round(&mut self, result: RoundResult) {
        self.total_rounds += 1;
        if result.success {
            self.total_successes += 1;
        }
        self.round_results.push_back(result);
        if self.round_results.len() > self.capacity {
            self.round_results.pop_front();
        }
    }

    pub fn record_update(&mut self, loss: f32) {
        self.update_losses.push_back(loss);
        if self.update_losses.len() > self.capacity {
            self.update_losses.pop_front();
        }
    }

    /// Attacker success rate in the last N rounds.
    pub fn success_rate(&self, last_n: usize) -> f32 {
        self.fraction(last_n, |r| r.success)
    }

    /// Share of the last N rounds where the action was picked at random.
    pub fn exploration_share(&self, last_n: usize) -> f32 {
        self.fraction(last_n, |r| r.explored)
    }

    /// Share of the last N rounds that attacked a least-defended row.
    pub fn weakest_row_share(&self, last_n: usize) -> f32 {
        self.fraction(last_n, |r| r.hit_weakest_row)
    }

    /// Average loss over the last N updates.
    pub fn average_loss(&self, last_n: usize) -> f32 {
        let n = self.update_losses.len().min(last_n);
        if n == 0 {
            return 0.0;
        }
        let sum: f32 = self.update_losses.iter().rev().take(n).sum();
        sum / n as f32
    }

    /// Success rate over every round ever recorded.
    pub fn lifetime_success_rate(&self) -> f32 {
        if self.total_rounds == 0 {
            return 0.0;
        }
        self.total_successes as f32 / self.total_rounds as f32
    }

    pub fn total_rounds(&self) -> usize {
        self.total_rounds
    }

    fn fraction(&self, last_n: usize, pred: impl Fn(&RoundResult) -> bool) -> f32 {
        let n = self.round_results.len().min(last_n);
        if n == 0 {
            return 0.0;
        }
        let hits = self
            .round_results
            .iter()
            .rev()
            .take(n)
            .filter(|r| pred(r))
            .count();
        hits as f32 / n as f32
    }
}

impl Default for SimulationMetrics {
    fn default() -> Self {
        Self::new()
    }
}
