//! Encounter components

pub mod fsm;


pub use fsm::*;
