use burn::prelude::*;
use burn::tensor::TensorData;

use crate::game::STATE_SIZE;

/// Encode one flattened grid as a tensor of shape [1, 64].
pub fn encode_state<B: Backend>(state: &[f32; STATE_SIZE], device: &B::Device) -> Tensor<B, 2> {
    Tensor::<B, 1>::from_data(TensorData::from(state.as_slice()), device).reshape([1, STATE_SIZE])
}

/// Encode a full score vector as a tensor of shape [1, len].
pub fn encode_row<B: Backend>(values: &[f32], device: &B::Device) -> Tensor<B, 2> {
    Tensor::<B, 1>::from_data(TensorData::from(values), device).reshape([1, values.len()])
}
