//! Component definitions for the zoo world.
//!
//! Components are plain data attached to entities.
//! Behaviour lives in systems.

mod common;
mod creature;
mod species;

pub use common::*;
pub use creature::*;
pub use species::*;
