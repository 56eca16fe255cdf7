//! Rogue Square: a top-down arena shooter.
//!
//! Core modules (no terminal I/O):
//! - `geometry`: vector normalization and box overlap
//! - `entities`: plain game data and the `GameState` aggregate
//! - `config`: gameplay tuning with JSON overrides
//! - `input`: per-frame control snapshot
//! - `compute`: the simulation step and state machine

pub mod compute;
pub mod config;
pub mod entities;
pub mod geometry;
pub mod input;
