//! Combat systems

pub mod attack;
pub mod damage;


// Re-export all systems
pub use attack::*;
pub use damage::*;
