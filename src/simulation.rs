//! Headless play against the combat model, for exercising the learning loop
//! without a game client.

use rand::rngs::StdRng;
use rand::seq::index;
use rand::SeedableRng;

use crate::api::FeedbackRequest;
use crate::error::RequestError;
use crate::game::{self, Grid, BASE_POS, GRID_SIZE};
use crate::session::LearningSession;
use crate::training::metrics::{RoundResult, SimulationMetrics};

/// Simulation settings.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub rounds: u32,
    /// Request training after every this many rounds.
    pub train_interval: u32,
    /// Towers placed on each randomly generated layout.
    pub towers_per_round: usize,
    pub log_interval: u32,
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            rounds: 200,
            train_interval: 1,
            towers_per_round: 6,
            log_interval: 20,
            seed: None,
        }
    }
}

/// Totals reported at the end of a run.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct SimulationSummary {
    pub rounds: usize,
    pub transitions: usize,
    pub training_runs: usize,
    pub success_rate: f32,
    pub recent_success_rate: f32,
    pub recent_exploration_share: f32,
    /// Share of recent attacks aimed at a row with the fewest towers.
    pub recent_weakest_row_share: f32,
    pub average_loss: f32,
}

pub struct Simulator {
    config: SimulationConfig,
    rng: StdRng,
}

impl Simulator {
    /// A seeded simulator draws from `seed + 2`, so it never shares a stream
    /// with a [`LearningSession::with_seed`] built from the same value (which
    /// uses `seed` and `seed + 1`).
    pub fn new(config: SimulationConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(2)),
            None => StdRng::from_os_rng(),
        };
        Simulator { config, rng }
    }

    /// Play `rounds` one-shot attacks against random layouts, feeding every
    /// outcome back into `session` and training on schedule.
    pub fn run(&mut self, session: &mut LearningSession) -> Result<SimulationSummary, RequestError> {
        let mut metrics = SimulationMetrics::new();
        let mut training_runs = 0;
        let window = self.config.log_interval as usize;

        tracing::info!(rounds = self.config.rounds, "starting simulation");

        for round in 1..=self.config.rounds {
            let towers = self.random_layout();
            let grid = Grid::from_towers(&towers)?;
            let (action, choice) = session.decide(&grid, round)?;
            let outcome = game::resolve(&grid, action, &mut self.rng);

            let state = grid.state().to_vec();
            session.submit_feedback(&FeedbackRequest {
                reward: outcome.reward as f64,
                state: state.clone(),
                action_idx: action.index() as i64,
                next_state: state,
                done: true,
                attack_row: action.attack_row as i64,
            })?;
            metrics.record_round(RoundResult {
                success: outcome.success,
                explored: choice.is_exploration(),
                hit_weakest_row: grid.towers_in_row(action.attack_row)
                    == grid.towers_in_row(grid.weakest_row()),
            });

            if round % self.config.train_interval == 0 {
                let report = session.train()?;
                if report.trained {
                    training_runs += 1;
                    metrics.record_update(report.mean_loss);
                }
            }

            if round % self.config.log_interval == 0 {
                tracing::info!(
                    round,
                    exploration = session.exploration_rate(round),
                    success_rate = metrics.success_rate(window),
                    weakest_row_share = metrics.weakest_row_share(window),
                    loss = metrics.average_loss(window),
                    "simulation progress"
                );
            }
        }

        Ok(SimulationSummary {
            rounds: metrics.total_rounds(),
            transitions: session.store().len(),
            training_runs,
            success_rate: metrics.lifetime_success_rate(),
            recent_success_rate: metrics.success_rate(window),
            recent_exploration_share: metrics.exploration_share(window),
            recent_weakest_row_share: metrics.weakest_row_share(window),
            average_loss: metrics.average_loss(window),
        })
    }

    /// Distinct random tower cells, never on the base.
    fn random_layout(&mut self) -> Vec<[i64; 2]> {
        let free: Vec<(usize, usize)> = (0..GRID_SIZE)
            .flat_map(|row| (0..GRID_SIZE).map(move |col| (row, col)))
            .filter(|&pos| pos != BASE_POS)
            .collect();
        let count = self.config.towers_per_round.min(free.len());
        index::sample(&mut self.rng, free.len(), count)
            .iter()
            .map(|i| [free[i].0 as i64, free[i].1 as i64])
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;

    fn config(rounds: u32, train_interval: u32) -> SimulationConfig {
        SimulationConfig {
            rounds,
            train_interval,
            towers_per_round: 5,
            log_interval: 10,
            seed: Some(99),
        }
    }

    #[test]
    fn test_random_layout_avoids_base() {
        let mut sim = Simulator::new(config(1, 1));
        for _ in 0..100 {
            let layout = sim.random_layout();
            assert_eq!(layout.len(), 5);
            assert!(layout.iter().all(|&[r, c]| (r as usize, c as usize) != BASE_POS));
            let grid = Grid::from_towers(&layout).unwrap();
            let towers: usize = (0..GRID_SIZE).map(|r| grid.towers_in_row(r)).sum();
            assert_eq!(towers, 5);
        }
    }

    #[test]
    fn test_seeded_simulator_uses_its_own_stream() {
        use rand::Rng;

        let mut sim = Simulator::new(config(1, 1));
        let mut shared = StdRng::seed_from_u64(99);
        let mut store = StdRng::seed_from_u64(100);
        let draw = sim.rng.random::<u64>();
        assert_ne!(draw, shared.random::<u64>());
        assert_ne!(draw, store.random::<u64>());

        // Same seed still reproduces the same layouts.
        let mut a = Simulator::new(config(1, 1));
        let mut b = Simulator::new(config(1, 1));
        assert_eq!(a.random_layout(), b.random_layout());
    }

    #[test]
    fn test_run_records_every_round() {
        let mut session = LearningSession::with_seed(&AppConfig::default(), 4);
        let mut sim = Simulator::new(config(30, 1));
        let summary = sim.run(&mut session).unwrap();

        assert_eq!(summary.rounds, 30);
        assert_eq!(summary.transitions, 30);
        // Training starts once ten transitions are stored.
        assert_eq!(summary.training_runs, 21);
        assert!(summary.average_loss > 0.0);
        assert!((0.0..=1.0).contains(&summary.success_rate));
        assert!((0.0..=1.0).contains(&summary.recent_weakest_row_share));
    }

    #[test]
    fn test_train_interval_spaces_training() {
        let mut session = LearningSession::with_seed(&AppConfig::default(), 4);
        let mut sim = Simulator::new(config(30, 5));
        let summary = sim.run(&mut session).unwrap();
        // Rounds 10, 15, 20, 25, 30.
        assert_eq!(summary.training_runs, 5);
    }
}
