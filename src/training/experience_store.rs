use rand::rngs::StdRng;
use rand::seq::index;
use rand::SeedableRng;

use crate::game::STATE_SIZE;

/// One observed attack and its outcome.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub state: [f32; STATE_SIZE],
    pub action: usize,
    pub reward: f32,
    pub next_state: [f32; STATE_SIZE],
    pub done: bool,
}

/// Experience store settings.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Maximum number of transitions kept. Unbounded when absent; once
    /// reached, the oldest transition is overwritten.
    pub capacity: Option<usize>,
}

/// Append-only log of transitions, sampled uniformly for training.
pub struct ExperienceStore {
    buffer: Vec<Transition>,
    capacity: Option<usize>,
    position: usize,
    total_recorded: u64,
    rng: StdRng,
}

impl ExperienceStore {
    pub fn new(config: &StoreConfig) -> Self {
        Self::with_rng(config, StdRng::from_os_rng())
    }

    pub fn with_seed(config: &StoreConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: &StoreConfig, rng: StdRng) -> Self {
        ExperienceStore {
            buffer: Vec::with_capacity(config.capacity.unwrap_or(0)),
            capacity: config.capacity,
            position: 0,
            total_recorded: 0,
            rng,
        }
    }

    /// Append a transition. With a capacity set, overwrites the oldest when full.
    pub fn push(&mut self, transition: Transition) {
        self.total_recorded += 1;
        match self.capacity {
            Some(capacity) if self.buffer.len() >= capacity => {
                self.buffer[self.position] = transition;
                self.position = (self.position + 1) % capacity;
            }
            _ => self.buffer.push(transition),
        }
    }

    /// Sample `batch_size` distinct transitions uniformly at random.
    pub fn sample(&mut self, batch_size: usize) -> Vec<Transition> {
        let len = self.buffer.len();
        assert!(batch_size <= len, "Not enough transitions to sample");
        let indices = index::sample(&mut self.rng, len, batch_size);
        indices.iter().map(|i| self.buffer[i].clone()).collect()
    }

    /// Transitions currently held.
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Lifetime count of appended transitions, including evicted ones.
    pub fn total_recorded(&self) -> u64 {
        self.total_recorded
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transition(action: usize) -> Transition {
        Transition {
            state: [0.0; STATE_SIZE],
            action,
            reward: 1.0,
            next_state: [0.0; STATE_SIZE],
            done: true,
        }
    }

    #[test]
    fn test_push_and_len() {
        let mut store = ExperienceStore::with_seed(&StoreConfig::default(), 0);
        assert!(store.is_empty());

        store.push(transition(0));
        assert_eq!(store.len(), 1);

        for i in 0..999 {
            store.push(transition(i % 24));
        }
        assert_eq!(store.len(), 1000);
        assert_eq!(store.total_recorded(), 1000);
    }

    #[test]
    fn test_duplicates_are_kept() {
        let mut store = ExperienceStore::with_seed(&StoreConfig::default(), 0);
        for _ in 0..5 {
            store.push(transition(3));
        }
        assert_eq!(store.len(), 5);
    }

    #[test]
    fn test_capacity_overwrites_oldest() {
        let mut store = ExperienceStore::with_seed(&StoreConfig { capacity: Some(3) }, 0);
        for i in 0..5 {
            store.push(transition(i));
        }
        assert_eq!(store.len(), 3);
        assert_eq!(store.total_recorded(), 5);

        let mut actions: Vec<usize> = store.sample(3).into_iter().map(|t| t.action).collect();
        actions.sort_unstable();
        assert_eq!(actions, vec![2, 3, 4]);
    }

    #[test]
    fn test_sample_is_distinct() {
        let mut store = ExperienceStore::with_seed(&StoreConfig::default(), 9);
        for i in 0..40 {
            store.push(transition(i));
        }
        let mut actions: Vec<usize> = store.sample(32).into_iter().map(|t| t.action).collect();
        assert_eq!(actions.len(), 32);
        actions.sort_unstable();
        actions.dedup();
        assert_eq!(actions.len(), 32);
    }

    #[test]
    fn test_sample_whole_store() {
        let mut store = ExperienceStore::with_seed(&StoreConfig::default(), 1);
        for i in 0..10 {
            store.push(transition(i));
        }
        assert_eq!(store.sample(10).len(), 10);
    }

    #[test]
    fn test_repeated_samples_draw_independently() {
        let mut store = ExperienceStore::with_seed(&StoreConfig::default(), 21);
        for i in 0..24 {
            store.push(transition(i));
        }
        let first: Vec<usize> = store.sample(12).into_iter().map(|t| t.action).collect();
        let second: Vec<usize> = store.sample(12).into_iter().map(|t| t.action).collect();
        assert_eq!(first.len(), 12);
        assert_eq!(second.len(), 12);
        assert_ne!(first, second);
        assert_eq!(store.len(), 24);
    }

    #[test]
    #[should_panic(expected = "Not enough transitions")]
    fn test_sample_too_many() {
        let mut store = ExperienceStore::with_seed(&StoreConfig::default(), 0);
        store.push(transition(0));
        store.sample(5);
    }
}
