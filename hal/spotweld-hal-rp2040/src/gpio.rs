//! GPIO wrappers
//!
//! Newtypes that put the `spotweld-hal` pin traits on `embassy-rp` pins.

use embassy_rp::gpio::{Input, Level, Output, Pin, Pull};
use embassy_rp::Peri;

/// Push-pull output pin
pub struct PushPull<'d>(Output<'d>);

impl<'d> PushPull<'d> {
    /// Configure `pin` as an output driven low
    pub fn new_low(pin: Peri<'d, impl Pin>) -> Self {
        Self(Output::new(pin, Level::Low))
    }

    /// Configure `pin` as an output driven high
    pub fn new_high(pin: Peri<'d, impl Pin>) -> Self {
        Self(Output::new(pin, Level::High))
    }
}

impl spotweld_hal::OutputPin for PushPull<'_> {
    fn set_high(&mut self) {
        self.0.set_high();
    }

    fn set_low(&mut self) {
        self.0.set_low();
    }

    fn toggle(&mut self) {
        self.0.toggle();
    }

    fn is_set_high(&self) -> bool {
        self.0.is_set_high()
    }
}

/// Input pin with the internal pull-up enabled
///
/// Buttons and the zero-cross gate idle high and are pulled low externally.
pub struct PullUp<'d>(Input<'d>);

impl<'d> PullUp<'d> {
    /// Configure `pin` as an input with pull-up
    pub fn new(pin: Peri<'d, impl Pin>) -> Self {
        Self(Input::new(pin, Pull::Up))
    }
}

impl spotweld_hal::InputPin for PullUp<'_> {
    fn is_high(&self) -> bool {
        self.0.is_high()
    }
}
