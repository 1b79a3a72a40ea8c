//! Generation - procedural creation of scenery and animal populations

mod population;
mod scenery;

pub use population::*;
pub use scenery::*;
