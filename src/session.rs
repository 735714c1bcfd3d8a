use std::sync::{Mutex, PoisonError};

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::ai::{Choice, ExplorationPolicy, ValueEstimator};
use crate::api::{AttackDecision, FeedbackRequest, NextWaveRequest, TauntMessage, TrainingResult};
use crate::config::AppConfig;
use crate::error::{EstimatorError, RequestError};
use crate::game::{Action, ActionSpace, Grid};
use crate::taunt::taunt;
use crate::training::{ExperienceStore, Trainer, TrainingReport, Transition};

/// Everything the opponent learns over the life of a server: the value
/// estimator, the experience it trains on, and the decision policy.
pub struct LearningSession {
    actions: ActionSpace,
    estimator: ValueEstimator,
    policy: ExplorationPolicy,
    store: ExperienceStore,
    trainer: Trainer,
    rng: StdRng,
}

impl LearningSession {
    pub fn new(config: &AppConfig) -> Self {
        let store = ExperienceStore::new(&config.store);
        Self::build(config, store, StdRng::from_os_rng())
    }

    /// Session whose exploration, sampling and taunts are reproducible.
    /// Network initialization is still random.
    pub fn with_seed(config: &AppConfig, seed: u64) -> Self {
        let store = ExperienceStore::with_seed(&config.store, seed.wrapping_add(1));
        Self::build(config, store, StdRng::seed_from_u64(seed))
    }

    fn build(config: &AppConfig, store: ExperienceStore, rng: StdRng) -> Self {
        LearningSession {
            actions: ActionSpace::new(),
            estimator: ValueEstimator::new(config.estimator.clone()),
            policy: ExplorationPolicy::new(config.policy.clone()),
            store,
            trainer: Trainer::new(config.trainer.clone()),
            rng,
        }
    }

    /// Choose the next attack for the reported tower layout.
    pub fn request_next_wave(
        &mut self,
        request: &NextWaveRequest,
    ) -> Result<AttackDecision, RequestError> {
        let grid = Grid::from_towers(&request.towers)?;
        let (action, _) = self.decide(&grid, request.round)?;
        Ok(action.into())
    }

    /// Pick an action for `grid`, reporting whether it was exploratory.
    pub fn decide(&mut self, grid: &Grid, round: u32) -> Result<(Action, Choice), EstimatorError> {
        let q_values = self.estimator.q_values(&grid.state())?;
        let choice = self.policy.choose(round, &q_values, &mut self.rng);
        let action = self
            .actions
            .get(choice.index())
            .ok_or(EstimatorError::OutputSize {
                expected: self.actions.len(),
                actual: q_values.len(),
            })?;
        tracing::debug!(
            round,
            row = action.attack_row,
            wave = action.wave_type,
            explored = choice.is_exploration(),
            "selected attack"
        );
        Ok((action, choice))
    }

    /// Store the reported outcome and answer with a taunt.
    pub fn submit_feedback(
        &mut self,
        request: &FeedbackRequest,
    ) -> Result<TauntMessage, RequestError> {
        let transition = request.to_transition()?;
        self.record(transition);
        Ok(TauntMessage {
            message: taunt(request.attack_row, &mut self.rng),
        })
    }

    /// Append an already-validated transition.
    pub fn record(&mut self, transition: Transition) {
        self.store.push(transition);
        tracing::debug!(stored = self.store.len(), "recorded transition");
    }

    pub fn request_training(&mut self) -> Result<TrainingResult, EstimatorError> {
        let report = self.train()?;
        Ok(TrainingResult {
            trained: report.trained,
        })
    }

    /// Run one replay-training pass, returning the detailed report.
    pub fn train(&mut self) -> Result<TrainingReport, EstimatorError> {
        self.trainer.train(&mut self.estimator, &mut self.store)
    }

    pub fn exploration_rate(&self, round: u32) -> f64 {
        self.policy.exploration_rate(round)
    }

    pub fn estimator(&self) -> &ValueEstimator {
        &self.estimator
    }

    pub fn store(&self) -> &ExperienceStore {
        &self.store
    }
}

/// A [`LearningSession`] behind a mutex, for hosts that handle requests on
/// several threads. Every operation holds the lock for its full duration.
pub struct SharedSession {
    inner: Mutex<LearningSession>,
}

impl SharedSession {
    pub fn new(session: LearningSession) -> Self {
        SharedSession {
            inner: Mutex::new(session),
        }
    }

    pub fn request_next_wave(
        &self,
        request: &NextWaveRequest,
    ) -> Result<AttackDecision, RequestError> {
        self.with(|s| s.request_next_wave(request))
    }

    pub fn submit_feedback(&self, request: &FeedbackRequest) -> Result<TauntMessage, RequestError> {
        self.with(|s| s.submit_feedback(request))
    }

    pub fn request_training(&self) -> Result<TrainingResult, EstimatorError> {
        self.with(|s| s.request_training())
    }

    /// Run `f` with exclusive access to the session.
    pub fn with<T>(&self, f: impl FnOnce(&mut LearningSession) -> T) -> T {
        // A panic mid-request leaves weights valid, so a poisoned lock is usable.
        let mut guard = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut guard)
    }
}
