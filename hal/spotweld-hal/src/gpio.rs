//! GPIO pin abstractions
//!
//! Provides traits for digital input and output pins that can be implemented
//! by chip-specific HALs.

/// Digital output pin
///
/// Implementations should handle the actual hardware register manipulation
/// for the specific chip.
pub trait OutputPin {
    /// Set the pin high (logic 1)
    fn set_high(&mut self);

    /// Set the pin low (logic 0)
    fn set_low(&mut self);

    /// Toggle the pin state
    fn toggle(&mut self) {
        if self.is_set_high() {
            self.set_low();
        } else {
            self.set_high();
        }
    }

    /// Set the pin to a specific state
    fn set_state(&mut self, high: bool) {
        if high {
            self.set_high();
        } else {
            self.set_low();
        }
    }

    /// Check if the pin is currently set high
    fn is_set_high(&self) -> bool;

    /// Check if the pin is currently set low
    fn is_set_low(&self) -> bool {
        !self.is_set_high()
    }
}

/// Digital input pin
///
/// Implementations should handle the actual hardware register reading
/// for the specific chip.
pub trait InputPin {
    /// Check if the pin reads high (logic 1)
    fn is_high(&self) -> bool;

    /// Check if the pin reads low (logic 0)
    fn is_low(&self) -> bool {
        !self.is_high()
    }
}

/// A group of output lines driven from one bit mask
///
/// Bit `n` of the mask drives line `n`. Bits beyond the number of lines
/// are ignored. The seven-segment data bus is the main user.
pub trait OutputPort {
    /// Drive every line from the corresponding bit of `bits`
    fn write_bits(&mut self, bits: u8);
}

impl<P: OutputPin, const N: usize> OutputPort for [P; N] {
    fn write_bits(&mut self, bits: u8) {
        for (line, pin) in self.iter_mut().enumerate().take(8) {
            pin.set_state(bits & (1 << line) != 0);
        }
    }
}
