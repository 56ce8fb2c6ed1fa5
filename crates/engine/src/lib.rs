//! Placement planning for automated players and simulations.
//!
//! A [`Placement`] is a whole move (swap, rotate, place). The planner
//! enumerates the legal ones, ranks them greedily and applies them through the
//! regular engine operations so events, scoring and the turn clock behave
//! exactly as for a human player.

pub use block_grid_core as core;
pub use block_grid_types as types;

pub mod place;

pub use place::{
    apply_placement, best_placement, enumerate_placements, evaluate, random_placement,
    Evaluation, PlaceError, PlaceOutcome, Placement,
};
