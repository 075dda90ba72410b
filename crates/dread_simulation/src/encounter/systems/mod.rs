//! Encounter systems

pub mod tick;

pub use tick::*;
