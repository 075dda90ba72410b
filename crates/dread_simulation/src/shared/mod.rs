//! Shared helpers used across domains (timer/easing math).

pub mod easing;

pub use easing::*;
