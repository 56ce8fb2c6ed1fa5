//! Block grid puzzle (workspace facade crate).
//!
//! Re-exports the `block_grid::{core,engine,types}` public API while the
//! implementation lives in dedicated crates under `crates/`.

pub use block_grid_core as core;
pub use block_grid_engine as engine;
pub use block_grid_types as types;

pub mod logging;
