use crate::ai::ValueEstimator;
use crate::error::EstimatorError;
use crate::training::experience_store::ExperienceStore;

/// Replay training hyperparameters.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TrainerConfig {
    pub gamma: f32,
    pub batch_size: usize,
    /// Training is skipped until the store holds at least this many transitions.
    pub min_transitions: usize,
}

impl Default for TrainerConfig {
    fn default() -> Self {
        TrainerConfig {
            gamma: 0.95,
            batch_size: 32,
            min_transitions: 10,
        }
    }
}

/// What a call to [`Trainer::train`] did.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TrainingReport {
    pub trained: bool,
    pub samples: usize,
    pub mean_loss: f32,
}

/// Experience-replay trainer: one gradient step per sampled transition toward
/// its one-step temporal-difference target.
#[derive(Debug, Clone, Default)]
pub struct Trainer {
    config: TrainerConfig,
}

impl Trainer {
    pub fn new(config: TrainerConfig) -> Self {
        Trainer { config }
    }

    /// Sample a batch from `store` and fit `estimator` to it.
    ///
    /// Does nothing when the store holds fewer than `min_transitions`.
    pub fn train(
        &self,
        estimator: &mut ValueEstimator,
        store: &mut ExperienceStore,
    ) -> Result<TrainingReport, EstimatorError> {
        if store.len() < self.config.min_transitions {
            tracing::debug!(
                stored = store.len(),
                required = self.config.min_transitions,
                "not enough transitions to train"
            );
            return Ok(TrainingReport::default());
        }

        let batch = store.sample(self.config.batch_size.min(store.len()));
        let mut total_loss = 0.0;
        for transition in &batch {
            let target = if transition.done {
                transition.reward
            } else {
                transition.reward + self.config.gamma * estimator.max_q(&transition.next_state)?
            };
            total_loss += estimator.fit(&transition.state, transition.action, target)?;
        }

        let report = TrainingReport {
            trained: true,
            samples: batch.len(),
            mean_loss: total_loss / batch.len() as f32,
        };
        tracing::info!(
            samples = report.samples,
            mean_loss = report.mean_loss,
            steps = estimator.step_count(),
            "trained value estimator"
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::EstimatorConfig;
    use crate::game::{Grid, STATE_SIZE};
    use crate::training::experience_store::{StoreConfig, Transition};

    fn filled_store(n: usize, done: bool) -> ExperienceStore {
        let mut store = ExperienceStore::with_seed(&StoreConfig::default(), 5);
        let mut grid = Grid::new();
        grid.set_towers(&[(1, 1), (2, 2)]);
        let state = grid.state();
        for i in 0..n {
            store.push(Transition {
                state,
                action: i % 24,
                reward: if i % 2 == 0 { 1.0 } else { -1.0 },
                next_state: state,
                done,
            });
        }
        store
    }

    #[test]
    fn test_train_skips_small_store() {
        let trainer = Trainer::default();
        let mut estimator = ValueEstimator::new(EstimatorConfig::default());
        let before = estimator.weights_snapshot().unwrap();

        for n in [0, 1, 9] {
            let mut store = filled_store(n, true);
            let report = trainer.train(&mut estimator, &mut store).unwrap();
            assert!(!report.trained);
            assert_eq!(report.samples, 0);
        }
        assert_eq!(before, estimator.weights_snapshot().unwrap());
        assert_eq!(estimator.step_count(), 0);
    }

    #[test]
    fn test_train_at_threshold_uses_whole_store() {
        let trainer = Trainer::default();
        let mut estimator = ValueEstimator::new(EstimatorConfig::default());
        let before = estimator.weights_snapshot().unwrap();
        let mut store = filled_store(10, true);

        let report = trainer.train(&mut estimator, &mut store).unwrap();
        assert!(report.trained);
        assert_eq!(report.samples, 10);
        assert_eq!(estimator.step_count(), 10);
        assert_ne!(before, estimator.weights_snapshot().unwrap());
    }

    #[test]
    fn test_train_caps_batch_size() {
        let trainer = Trainer::default();
        let mut estimator = ValueEstimator::new(EstimatorConfig::default());
        let mut store = filled_store(100, false);

        let report = trainer.train(&mut estimator, &mut store).unwrap();
        assert!(report.trained);
        assert_eq!(report.samples, 32);
        assert_eq!(estimator.step_count(), 32);
        // Sampling does not consume the store.
        assert_eq!(store.len(), 100);
    }

    #[test]
    fn test_repeated_training_fits_terminal_reward() {
        let trainer = Trainer::new(TrainerConfig {
            batch_size: 16,
            ..Default::default()
        });
        let mut estimator = ValueEstimator::new(EstimatorConfig {
            learning_rate: 1e-2,
            ..Default::default()
        });
        let mut store = ExperienceStore::with_seed(&StoreConfig::default(), 2);
        let state = [0.0f32; STATE_SIZE];
        for _ in 0..16 {
            store.push(Transition {
                state,
                action: 4,
                reward: 1.0,
                next_state: state,
                done: true,
            });
        }

        let first = trainer.train(&mut estimator, &mut store).unwrap().mean_loss;
        let mut last = first;
        for _ in 0..20 {
            last = trainer.train(&mut estimator, &mut store).unwrap().mean_loss;
        }
        assert!(last < first, "loss did not fall: {} -> {}", first, last);
        let q = estimator.q_values(&state).unwrap();
        assert!((q[4] - 1.0).abs() < 0.5, "Q(s, 4) = {}", q[4]);
    }
}
