use burn::backend::{Autodiff, NdArray};
use burn::module::AutodiffModule;
use burn::optim::adaptor::OptimizerAdaptor;
use burn::optim::{Adam, AdamConfig, GradientsParams, Optimizer};
use burn::prelude::*;

use crate::ai::networks::{tensor_to_vec, ValueNetwork, ValueNetworkConfig};
use crate::ai::state_encoding::{encode_row, encode_state};
use crate::error::EstimatorError;
use crate::game::{NUM_ACTIONS, STATE_SIZE};

type InferBackend = NdArray<f32>;
type TrainBackend = Autodiff<InferBackend>;

/// Value estimator hyperparameters.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct EstimatorConfig {
    pub learning_rate: f64,
    pub hidden_size: usize,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        EstimatorConfig {
            learning_rate: 1e-3,
            hidden_size: 64,
        }
    }
}

/// Learned action-value function plus the Adam optimizer that trains it.
pub struct ValueEstimator {
    network: ValueNetwork<TrainBackend>,
    optimizer: OptimizerAdaptor<Adam, ValueNetwork<TrainBackend>, TrainBackend>,
    config: EstimatorConfig,
    device: <TrainBackend as Backend>::Device,
    step_count: usize,
}

impl ValueEstimator {
    pub fn new(config: EstimatorConfig) -> Self {
        let device = Default::default();
        let network = ValueNetworkConfig::new(STATE_SIZE, NUM_ACTIONS)
            .with_hidden_size(config.hidden_size)
            .init(&device);
        let optimizer = AdamConfig::new().init();

        ValueEstimator {
            network,
            optimizer,
            config,
            device,
            step_count: 0,
        }
    }

    /// Score every action for `state`. No gradients are tracked.
    pub fn q_values(&self, state: &[f32; STATE_SIZE]) -> Result<Vec<f32>, EstimatorError> {
        let network = self.network.valid();
        let input = encode_state::<InferBackend>(state, &self.device);
        tensor_to_vec(network.forward(input))
    }

    /// Highest action score for `state`.
    pub fn max_q(&self, state: &[f32; STATE_SIZE]) -> Result<f32, EstimatorError> {
        Ok(self
            .q_values(state)?
            .into_iter()
            .fold(f32::NEG_INFINITY, f32::max))
    }

    /// One Adam step pulling `Q(state, action_index)` toward `target`.
    ///
    /// The target row equals the current output everywhere except
    /// `action_index`, so only that output contributes to the gradient.
    /// Returns the squared-error loss before the step.
    pub fn fit(
        &mut self,
        state: &[f32; STATE_SIZE],
        action_index: usize,
        target: f32,
    ) -> Result<f32, EstimatorError> {
        debug_assert!(action_index < NUM_ACTIONS);

        let input = encode_state::<TrainBackend>(state, &self.device);
        let q_all = self.network.forward(input); // [1, NUM_ACTIONS]

        let mut target_row = tensor_to_vec(q_all.clone())?;
        target_row[action_index] = target;
        let targets = encode_row::<TrainBackend>(&target_row, &self.device);

        // MSE loss
        let diff = q_all - targets;
        let loss = (diff.clone() * diff).mean();
        let loss_val = tensor_to_vec(loss.clone())?
            .first()
            .copied()
            .unwrap_or_default();

        let grads = loss.backward();
        let grads = GradientsParams::from_grads(grads, &self.network);
        self.network = self
            .optimizer
            .step(self.config.learning_rate, self.network.clone(), grads);
        self.step_count += 1;

        Ok(loss_val)
    }

    /// Copy of every network parameter, for comparing before/after training.
    pub fn weights_snapshot(&self) -> Result<Vec<f32>, EstimatorError> {
        self.network.flat_parameters()
    }

    /// Number of gradient steps applied so far.
    pub fn step_count(&self) -> usize {
        self.step_count
    }
}
