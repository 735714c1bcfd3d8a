//! Learning infrastructure: the experience store, the replay trainer, and
//! rolling metrics for simulated play.

pub mod experience_store;
pub mod metrics;
pub mod trainer;

pub use experience_store::{ExperienceStore, StoreConfig, Transition};
pub use trainer::{Trainer, TrainerConfig, TrainingReport};
