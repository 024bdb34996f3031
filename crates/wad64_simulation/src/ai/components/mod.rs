//! AI components

pub mod detection;
pub mod fsm;

// Tests (separate files with _tests suffix)
#[cfg(test)]
mod detection_tests;

// Re-export all components
pub use detection::*;
pub use fsm::*;
