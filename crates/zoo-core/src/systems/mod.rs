//! Systems - logic that operates on components

mod motion;

pub use motion::*;
