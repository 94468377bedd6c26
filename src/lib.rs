//! Simulation core for a whack-a-pumpkin arcade game.
//!
//! `compute` owns the pumpkin possession cycle and the session rules,
//! `difficulty` the round-scaled timings, and `scenery` the decorative
//! clouds, moon and owls.  Everything is driven by an external loop calling
//! `compute::tick` once per frame with an injected RNG.

pub mod compute;
pub mod config;
pub mod difficulty;
pub mod entities;
pub mod error;
pub mod progress;
pub mod scenery;
