//! Board-agnostic core logic for the spot welder timer
//!
//! This crate contains everything that does not depend on a specific
//! microcontroller:
//!
//! - Persisted settings and their validation
//! - Seven-segment encoding and the multiplexed display refresh
//! - Button polling, debounce waits and the repeat accelerator
//! - The zero-cross gated weld output
//! - The control state machine (startup, setup menu, operating loop)
//!
//! Hardware access goes through the `spotweld-hal` traits and
//! `embedded_hal::delay::DelayNs`, so the whole controller runs on the host
//! against a simulated board in tests.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

#[macro_use]
mod fmt;

pub mod buttons;
pub mod config;
pub mod controller;
pub mod display;
pub mod output;
pub mod segments;
pub mod settings;

#[cfg(test)]
mod sim;

pub use buttons::{Button, Buttons, Keypad, Repeater};
pub use controller::{Controller, Phase};
pub use display::{Digit, DisplayBuffer, DisplayPolarity, Multiplexer};
pub use output::{GateLevel, PulseOutput, ZeroCrossOutput};
pub use settings::{PulseLength, Resolution, Settings};
