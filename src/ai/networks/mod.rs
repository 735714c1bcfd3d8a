mod value_network;

pub use value_network::{tensor_to_vec, ValueNetwork, ValueNetworkConfig};
