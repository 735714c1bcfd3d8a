//! # Siege AI
//!
//! An adaptive attacker for a tower-defense game. Given the defender's tower
//! layout it picks which row to hit and how strong a wave to send, then learns
//! from the reported outcome with a small value network trained by experience
//! replay on the Burn ML framework.
//!
//! ## Modules
//!
//! - [`game`] — Grid model, action space, combat outcome model
//! - [`ai`] — Value network, estimator, exploration policy, state encoding
//! - [`training`] — Experience store, replay trainer, rolling metrics
//! - [`session`] — The learning session that serves the opponent operations
//! - [`api`] — Request and response records
//! - [`simulation`] — Headless play against the combat model
//! - [`config`] — TOML configuration loading and validation
//! - [`error`] — Structured error types

#![recursion_limit = "256"]

pub mod ai;
pub mod api;
pub mod config;
pub mod error;
pub mod game;
pub mod session;
pub mod simulation;
pub mod taunt;
pub mod training;
