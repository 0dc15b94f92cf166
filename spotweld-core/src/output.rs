//! Zero-cross synchronised weld output
//!
//! The weld transformer is switched by a triac or SSR. Switching on at an
//! arbitrary point of the mains cycle causes inrush and inconsistent welds,
//! so activation waits for the zero-cross detector first. The wait and the
//! pin write happen inside a critical section so the display refresh cannot
//! delay the switch-on past the crossing.

use core::hint::spin_loop;

use spotweld_hal::{InputPin, OutputPin};

/// Detector level that releases the output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GateLevel {
    High,
    Low,
}

/// Switchable weld output
pub trait PulseOutput {
    /// Switch the output on
    fn activate(&mut self);

    /// Switch the output off, immediately
    fn deactivate(&mut self);

    fn is_active(&self) -> bool;
}

/// Output that only switches on while the zero-cross gate is released
pub struct ZeroCrossOutput<O, Z> {
    output: O,
    gate: Z,
    release: GateLevel,
}

impl<O: OutputPin, Z: InputPin> ZeroCrossOutput<O, Z> {
    /// The output is driven low on construction
    pub fn new(mut output: O, gate: Z, release: GateLevel) -> Self {
        output.set_low();
        Self {
            output,
            gate,
            release,
        }
    }

    fn gate_released(&self) -> bool {
        match self.release {
            GateLevel::High => self.gate.is_high(),
            GateLevel::Low => self.gate.is_low(),
        }
    }
}

impl<O: OutputPin, Z: InputPin> PulseOutput for ZeroCrossOutput<O, Z> {
    fn activate(&mut self) {
        critical_section::with(|_| {
            while !self.gate_released() {
                spin_loop();
            }
            self.output.set_high();
        });
    }

    fn deactivate(&mut self) {
        self.output.set_low();
    }

    fn is_active(&self) -> bool {
        self.output.is_set_high()
    }
}
