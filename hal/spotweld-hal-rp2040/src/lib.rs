//! RP2040-specific HAL for the spot welder timer
//!
//! This crate provides RP2040 implementations of the shared
//! `spotweld-hal` traits:
//!
//! - GPIO wrappers around `embassy-rp` inputs and outputs
//! - Flash-backed settings store (implements `spotweld_hal::ByteStore`)

#![no_std]

pub mod gpio;
pub mod store;

// Re-export shared traits from spotweld-hal for convenience
pub use spotweld_hal::{ByteStore, InputPin, OutputPin, OutputPort, StorageKey};
