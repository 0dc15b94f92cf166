//! Build-time configuration
//!
//! All tunable timings and limits live here. Durations are in milliseconds
//! unless the name says otherwise.

use crate::display::DisplayPolarity;
use crate::output::GateLevel;
use crate::settings::Resolution;

/// Pulse length used when the stored value is missing or out of range
pub const DEFAULT_PULSE_LENGTH: u8 = 50;
/// Resolution used when the stored value is missing or out of range
pub const DEFAULT_RESOLUTION: Resolution = Resolution::Fine;

pub const PULSE_LENGTH_MIN: u8 = 1;
pub const PULSE_LENGTH_MAX: u8 = 99;

/// Milliseconds of one fine resolution unit (coarse is ten times this)
pub const RESOLUTION_UNIT_MS: u32 = 10;

/// Period of the main control loop
pub const TICK_MS: u32 = 1;

/// Ticks a held adjust button waits before each slow-cadence change
pub const FIRST_STAGE_DELAY: u8 = 250;
/// Ticks between changes once the repeat has accelerated
pub const SECOND_STAGE_DELAY: u8 = 50;
/// Slow-cadence changes counted before switching to the fast cadence
pub const FIRST_STAGE_STEPS: u8 = 10;

/// Hold-off after the trigger is released, before it is polled again
pub const RELEASE_HOLD_MS: u32 = 250;
/// Final debounce after the trigger hold-off
pub const RELEASE_SETTLE_MS: u32 = 10;

/// Settle time between entering setup and polling its buttons
pub const SETUP_SETTLE_MS: u32 = 250;

/// Number of chase frames shown while MODE can select setup
pub const STARTUP_WINDOW_STEPS: u8 = 40;
pub const STARTUP_STEP_MS: u32 = 25;
/// Outer segments cycled by the chase animation (a..f)
pub const CHASE_SEGMENTS: u8 = 6;
/// Frame time of the "saved" animation after leaving setup
pub const SAVED_STEP_MS: u32 = 50;

pub const SPLASH_VERSION_MS: u32 = 1000;
pub const SPLASH_RESOLUTION_MS: u32 = 1000;
pub const SPLASH_BLANK_MS: u32 = 500;

/// Shown as two digits during the splash ("10" reads as v1.0)
pub const FIRMWARE_VERSION: u8 = 10;

// Refresh timer: 8 MHz clock, /1024 prescaler, counter reloaded at 0xE0
pub const REFRESH_CLOCK_HZ: u32 = 8_000_000;
pub const REFRESH_PRESCALE: u32 = 1024;
pub const REFRESH_RELOAD: u8 = 0xE0;

/// Digit refresh rate (~244 Hz, so each digit is lit ~122 times a second)
pub const REFRESH_HZ: u32 = REFRESH_CLOCK_HZ / REFRESH_PRESCALE / (256 - REFRESH_RELOAD as u32);

#[cfg(feature = "common-cathode")]
pub const DISPLAY_POLARITY: DisplayPolarity = DisplayPolarity::CommonCathode;
#[cfg(not(feature = "common-cathode"))]
pub const DISPLAY_POLARITY: DisplayPolarity = DisplayPolarity::CommonAnode;

/// Zero-cross detector level at which the weld output may switch on
pub const ZERO_CROSS_RELEASE: GateLevel = GateLevel::High;
