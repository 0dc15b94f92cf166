//! Spot welder timer hardware abstraction layer
//!
//! This crate defines the hardware capabilities the timer logic depends on.
//! Chip-specific crates implement them, and the core's host tests implement
//! them with a simulated board.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  spotweld-core (controller, display)    │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  spotweld-hal (this crate - traits)     │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │ spotweld-hal- │       │  simulated    │
//! │    rp2040     │       │  test board   │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`], [`gpio::InputPin`] - Digital I/O
//! - [`gpio::OutputPort`] - A group of output lines written as one mask
//! - [`store::ByteStore`] - Byte-per-key persistent storage with a ready protocol

#![no_std]
#![deny(unsafe_code)]

pub mod gpio;
pub mod store;

// Re-export key traits at crate root for convenience
pub use gpio::{InputPin, OutputPin, OutputPort};
pub use store::{ByteStore, StorageKey, ERASED_BYTE};
