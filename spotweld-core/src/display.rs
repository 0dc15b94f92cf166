//! Two-digit multiplexed display
//!
//! The control loop writes segment patterns into a [`DisplayBuffer`]; a
//! periodic refresh (timer interrupt or high-priority task) drives one digit
//! at a time through a [`Multiplexer`]. The buffer fields are single-byte
//! atomics, so a refresh that preempts the control loop always reads whole
//! patterns.

use portable_atomic::{AtomicBool, AtomicU8, Ordering};
use spotweld_hal::{OutputPin, OutputPort};

use crate::segments::{encode_two_digit, BLANK, GLYPH_DASH, SEGMENT_MASK};

/// Digit position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Digit {
    /// Rightmost digit (DIG1)
    Units,
    /// Leftmost digit (DIG2)
    Tens,
}

impl Digit {
    pub const fn next(self) -> Self {
        match self {
            Self::Units => Self::Tens,
            Self::Tens => Self::Units,
        }
    }
}

/// Display wiring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayPolarity {
    /// Commons are enabled high, segments are lit low
    CommonAnode,
    /// Commons are enabled low, segments are lit high
    CommonCathode,
}

impl DisplayPolarity {
    /// Convert a logical pattern to the levels for the segment lines
    pub const fn segment_bits(self, pattern: u8) -> u8 {
        match self {
            Self::CommonAnode => !pattern & SEGMENT_MASK,
            Self::CommonCathode => pattern & SEGMENT_MASK,
        }
    }

    /// Level that enables a digit common
    pub const fn common_enabled_level(self) -> bool {
        matches!(self, Self::CommonAnode)
    }
}

/// Shared display contents
pub struct DisplayBuffer {
    units: AtomicU8,
    tens: AtomicU8,
    auto_mode: AtomicBool,
}

impl DisplayBuffer {
    /// Blank display in automatic mode
    pub const fn new() -> Self {
        Self {
            units: AtomicU8::new(BLANK),
            tens: AtomicU8::new(BLANK),
            auto_mode: AtomicBool::new(true),
        }
    }

    pub fn show(&self, tens: u8, units: u8) {
        self.tens.store(tens & SEGMENT_MASK, Ordering::Relaxed);
        self.units.store(units & SEGMENT_MASK, Ordering::Relaxed);
    }

    /// Show `value` as two decimal digits, clamped to 99
    pub fn show_value(&self, value: u8) {
        let (tens, units) = encode_two_digit(value);
        self.show(tens, units);
    }

    /// Replace the units digit only
    pub fn show_units(&self, units: u8) {
        self.units.store(units & SEGMENT_MASK, Ordering::Relaxed);
    }

    pub fn clear(&self) {
        self.show(BLANK, BLANK);
    }

    pub fn units(&self) -> u8 {
        self.units.load(Ordering::Relaxed)
    }

    pub fn tens(&self) -> u8 {
        self.tens.load(Ordering::Relaxed)
    }

    pub fn pattern(&self, digit: Digit) -> u8 {
        match digit {
            Digit::Units => self.units(),
            Digit::Tens => self.tens(),
        }
    }

    /// False while the weld output follows the trigger directly
    pub fn auto_mode(&self) -> bool {
        self.auto_mode.load(Ordering::Relaxed)
    }

    pub fn set_auto_mode(&self, auto_mode: bool) {
        self.auto_mode.store(auto_mode, Ordering::Relaxed);
    }

    /// Flip the mode, returning the new value
    pub fn toggle_auto_mode(&self) -> bool {
        !self.auto_mode.fetch_xor(true, Ordering::Relaxed)
    }

    /// Pattern the refresh will show on `digit` right now
    pub fn frame(&self, digit: Digit) -> u8 {
        if self.auto_mode() {
            self.pattern(digit)
        } else {
            GLYPH_DASH
        }
    }
}

impl Default for DisplayBuffer {
    fn default() -> Self {
        Self::new()
    }
}

/// Drives the segment bus and the two digit commons
pub struct Multiplexer<B, C1, C2> {
    bus: B,
    units_common: C1,
    tens_common: C2,
    polarity: DisplayPolarity,
    active: Digit,
}

impl<B, C1, C2> Multiplexer<B, C1, C2>
where
    B: OutputPort,
    C1: OutputPin,
    C2: OutputPin,
{
    pub fn new(bus: B, units_common: C1, tens_common: C2, polarity: DisplayPolarity) -> Self {
        let mut mux = Self {
            bus,
            units_common,
            tens_common,
            polarity,
            active: Digit::Units,
        };
        mux.blank();
        mux
    }

    /// Digit lit by the next call to [`refresh`](Self::refresh)
    pub fn active_digit(&self) -> Digit {
        self.active
    }

    /// Light the next digit with its current pattern
    pub fn refresh(&mut self, buffer: &DisplayBuffer) {
        let on = self.polarity.common_enabled_level();
        match self.active {
            Digit::Units => {
                self.tens_common.set_state(!on);
                self.units_common.set_state(on);
            }
            Digit::Tens => {
                self.units_common.set_state(!on);
                self.tens_common.set_state(on);
            }
        }
        self.bus.write_bits(self.polarity.segment_bits(buffer.frame(self.active)));
        self.active = self.active.next();
    }

    /// Disable both digits and turn every segment off
    pub fn blank(&mut self) {
        let on = self.polarity.common_enabled_level();
        self.units_common.set_state(!on);
        self.tens_common.set_state(!on);
        self.bus.write_bits(self.polarity.segment_bits(BLANK));
    }
}
