//! Zoo Core - headless engine for a wandering-animal park
//!
//! Builds a park of procedural animal models and static scenery, moves the
//! animals around every frame, and answers click-to-inspect queries. Nothing
//! here depends on a window or a renderer, so every part runs in tests.
//!
//! # Architecture
//!
//! The park uses an Entity Component System (ECS) via `hecs`:
//! - **Entities**: one per animal, carrying a [`components::Creature`]
//! - **Models**: primitive solids assembled per species by a
//!   [`models::ModelRegistry`]
//! - **Systems**: [`systems::motion_system`] wanders every creature
//!
//! # Example
//!
//! ```rust,no_run
//! use zoo_core::prelude::*;
//!
//! let mut engine = ZooEngine::new(ZooConfig::default()).expect("valid config");
//!
//! loop {
//!     engine.update(1.0 / 60.0); // 60 FPS
//! }
//! ```

pub mod components;
pub mod config;
pub mod engine;
pub mod environment;
pub mod error;
pub mod generation;
pub mod info;
pub mod models;
pub mod picking;
pub mod systems;

/// Commonly used types for convenient importing
pub mod prelude {
    pub use crate::components::*;
    pub use crate::config::ZooConfig;
    pub use crate::engine::ZooEngine;
    pub use crate::error::ZooError;
    pub use crate::picking::{Camera, Viewport};
}
