use burn::nn::{Linear, LinearConfig, Relu};
use burn::prelude::*;

use crate::error::EstimatorError;

/// Action-value network for the attacker.
///
/// ```text
/// Input:  [batch, 64]   flattened grid
/// FC1:    64 -> hidden (default 64), ReLU
/// FC2:    hidden -> 24  (one score per (row, wave_type) action)
/// ```
#[derive(Module, Debug)]
pub struct ValueNetwork<B: Backend> {
    fc1: Linear<B>,
    fc2: Linear<B>,
    relu: Relu,
}

#[derive(Config, Debug)]
pub struct ValueNetworkConfig {
    pub input_size: usize,
    pub num_actions: usize,
    #[config(default = 64)]
    pub hidden_size: usize,
}

impl ValueNetworkConfig {
    pub fn init<B: Backend>(&self, device: &B::Device) -> ValueNetwork<B> {
        ValueNetwork {
            fc1: LinearConfig::new(self.input_size, self.hidden_size).init(device),
            fc2: LinearConfig::new(self.hidden_size, self.num_actions).init(device),
            relu: Relu::new(),
        }
    }
}

impl<B: Backend> ValueNetwork<B> {
    /// Forward pass: input [batch, input_size] -> output [batch, num_actions].
    pub fn forward(&self, input: Tensor<B, 2>) -> Tensor<B, 2> {
        let x = self.relu.forward(self.fc1.forward(input));
        self.fc2.forward(x)
    }

    /// Every weight and bias, flattened in layer order.
    pub fn flat_parameters(&self) -> Result<Vec<f32>, EstimatorError> {
        let mut out = Vec::new();
        for layer in [&self.fc1, &self.fc2] {
            out.extend(tensor_to_vec(layer.weight.val())?);
            if let Some(bias) = &layer.bias {
                out.extend(tensor_to_vec(bias.val())?);
            }
        }
        Ok(out)
    }
}

/// Pull a tensor's contents back to the host as `f32`s.
pub fn tensor_to_vec<B: Backend, const D: usize>(
    tensor: Tensor<B, D>,
) -> Result<Vec<f32>, EstimatorError> {
    tensor
        .into_data()
        .to_vec::<f32>()
        .map_err(|e| EstimatorError::TensorData(format!("{e:?}")))
}
