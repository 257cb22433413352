//! Pure game logic for Tides of Manila.
//!
//! This crate contains every rule of the trading game and nothing that
//! touches a terminal. Randomness is injected through [`rand::Rng`] and the
//! player is reached through the [`frontend::Frontend`] trait, so the same
//! logic drives the console game, the headless harness, and unit tests.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`constants`] | Setup limits, ship tiers, storm probabilities |
//! | [`port`] | Ports, commodities, per-port price ranges |
//! | [`market`] | Per-visit price snapshots |
//! | [`ship`] | Ship tiers and cargo hold |
//! | [`trade`] | Buy/sell arithmetic and ship upgrades |
//! | [`rules`] | Legality checks and player-facing rejections |
//! | [`weather`] | Storm state machine and departure gate |
//! | [`state`] | Setup validation, player and game state, profit |
//! | [`snapshot`] | Serializable views handed to front ends |
//! | [`frontend`] | Presentation boundary trait and request contexts |
//! | [`game`] | Turn controller |

pub mod constants;
pub mod frontend;
pub mod game;
pub mod market;
pub mod port;
pub mod rules;
pub mod ship;
pub mod snapshot;
pub mod state;
pub mod trade;
pub mod weather;

pub use frontend::{Action, Frontend, FrontendError};
pub use game::{request_setup, Game};
pub use state::{GameState, Setup};
