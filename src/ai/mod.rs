mod estimator;
pub mod networks;
pub mod policy;
pub mod state_encoding;

pub use estimator::{EstimatorConfig, ValueEstimator};
pub use networks::{ValueNetwork, ValueNetworkConfig};
pub use policy::{argmax, Choice, ExplorationPolicy, PolicyConfig};
