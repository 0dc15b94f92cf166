//! Control state machine
//!
//! ```text
//!   StartupSelect ──MODE──▶ SetupMenu ──MODE──┐
//!        │                                    ▼
//!        └──timeout──▶ VersionSplash ──▶ Operating (forever)
//! ```
//!
//! Everything here is blocking and paced by a `DelayNs`. The display is
//! refreshed independently, so the controller only writes the shared
//! [`DisplayBuffer`].

use embedded_hal::delay::DelayNs;
use spotweld_hal::ByteStore;

use crate::buttons::{Button, Keypad, Repeater, ADJUST_BUTTONS};
use crate::config::{
    CHASE_SEGMENTS, FIRMWARE_VERSION, RELEASE_HOLD_MS, RELEASE_SETTLE_MS, SAVED_STEP_MS,
    SETUP_SETTLE_MS, SPLASH_BLANK_MS, SPLASH_RESOLUTION_MS, SPLASH_VERSION_MS,
    STARTUP_STEP_MS, STARTUP_WINDOW_STEPS, TICK_MS,
};
use crate::display::DisplayBuffer;
use crate::output::PulseOutput;
use crate::segments::{chase_frame, encode_digit, BLANK, GLYPH_T};
use crate::settings::{PulseLength, Resolution, Settings};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Phase {
    /// Chase animation, MODE selects the setup menu
    StartupSelect,
    /// Resolution selection
    SetupMenu,
    /// Firmware version and resolution shown on a normal boot
    VersionSplash,
    /// Trigger, adjust and mode handling
    Operating,
}

pub struct Controller<'a, K, P, S, D> {
    keypad: K,
    output: P,
    store: S,
    delay: D,
    display: &'a DisplayBuffer,
    phase: Phase,
    settings: Settings,
    repeater: Repeater,
}

impl<'a, K, P, S, D> Controller<'a, K, P, S, D>
where
    K: Keypad,
    P: PulseOutput,
    S: ByteStore,
    D: DelayNs,
{
    pub fn new(keypad: K, output: P, store: S, delay: D, display: &'a DisplayBuffer) -> Self {
        Self {
            keypad,
            output,
            store,
            delay,
            display,
            phase: Phase::StartupSelect,
            settings: Settings::default(),
            repeater: Repeater::new(),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn repeater(&self) -> &Repeater {
        &self.repeater
    }

    #[cfg(test)]
    pub(crate) fn output(&self) -> &P {
        &self.output
    }

    #[cfg(test)]
    pub(crate) fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Boot and run the operating loop forever
    pub fn run(mut self) -> ! {
        self.boot();
        loop {
            self.tick();
        }
    }

    /// Everything up to the first operating tick
    pub fn boot(&mut self) {
        self.settings.resolution = Resolution::load(&mut self.store);
        info!("Boot, resolution {}", self.settings.resolution);

        if self.startup_select() {
            self.setup_menu();
        } else {
            self.version_splash();
        }
        self.enter_operating();
    }

    /// Run the startup chase. Returns true if MODE was pressed during it.
    pub fn startup_select(&mut self) -> bool {
        self.phase = Phase::StartupSelect;

        let mut frame = BLANK;
        let mut offset = 0;
        for _ in 0..STARTUP_WINDOW_STEPS {
            self.delay.delay_ms(STARTUP_STEP_MS);
            self.display.show(frame, frame);
            frame = chase_frame(offset);
            offset = (offset + 1) % CHASE_SEGMENTS;

            if self.keypad.is_pressed(Button::Mode) {
                return true;
            }
        }
        false
    }

    /// PLUS or MINUS toggles the resolution, MODE saves and leaves
    pub fn setup_menu(&mut self) {
        self.phase = Phase::SetupMenu;
        info!("Setup menu");

        self.keypad.wait_release(Button::Mode);
        self.delay.delay_ms(SETUP_SETTLE_MS);

        loop {
            self.delay.delay_ms(TICK_MS);

            if self.keypad.any_pressed(&ADJUST_BUTTONS) {
                self.settings.resolution = self.settings.resolution.toggled();
                self.keypad.wait_release_any(&ADJUST_BUTTONS);
            }

            if self.keypad.is_pressed(Button::Mode) {
                self.keypad.wait_release(Button::Mode);
                self.settings.persist_resolution(&mut self.store);
                info!("Resolution saved: {}", self.settings.resolution);
                self.saved_animation();
                return;
            }

            self.show_resolution();
        }
    }

    pub fn version_splash(&mut self) {
        self.phase = Phase::VersionSplash;

        self.display.show_value(FIRMWARE_VERSION);
        self.delay.delay_ms(SPLASH_VERSION_MS);
        self.show_resolution();
        self.delay.delay_ms(SPLASH_RESOLUTION_MS);
        self.display.clear();
        self.delay.delay_ms(SPLASH_BLANK_MS);
    }

    /// Load the pulse length and show it
    pub fn enter_operating(&mut self) {
        self.phase = Phase::Operating;
        self.settings.pulse = PulseLength::load(&mut self.store);
        self.repeater = Repeater::new();
        self.display.show_value(self.settings.pulse.get());
        info!(
            "Operating, pulse {} x {} ms",
            self.settings.pulse.get(),
            self.settings.resolution.unit_ms()
        );
    }

    /// One pass of the operating loop
    pub fn tick(&mut self) {
        self.delay.delay_ms(TICK_MS);

        if self.keypad.is_pressed(Button::Action) {
            self.weld();
        }

        if self.repeater.poll() {
            self.adjust();
        }

        if !self.keypad.any_pressed(&ADJUST_BUTTONS) {
            if self.keypad.is_pressed(Button::Mode) {
                self.repeater.release();
            } else {
                self.repeater.reset();
            }
        }
    }

    fn weld(&mut self) {
        self.output.activate();

        if self.display.auto_mode() {
            let duration = self.settings.pulse_ms();
            self.delay.delay_ms(duration);
            self.output.deactivate();
            debug!("Pulse {} ms", duration);
        }

        // Manual mode: the output follows the trigger
        self.keypad.wait_release(Button::Action);
        self.output.deactivate();

        self.settings.persist_pulse(&mut self.store);

        self.delay.delay_ms(RELEASE_HOLD_MS);
        self.keypad.wait_release(Button::Action);
        self.delay.delay_ms(RELEASE_SETTLE_MS);
    }

    fn adjust(&mut self) {
        if self.keypad.is_pressed(Button::Mode) {
            let auto = self.display.toggle_auto_mode();
            info!("Auto mode: {}", auto);
        }

        let auto = self.display.auto_mode();

        if self.keypad.is_pressed(Button::Plus) && auto {
            self.repeater.record_step();
            self.set_pulse(self.settings.pulse.incremented());
        }

        if self.keypad.is_pressed(Button::Minus) && auto {
            self.repeater.record_step();
            self.set_pulse(self.settings.pulse.decremented());
        }
    }

    fn set_pulse(&mut self, pulse: PulseLength) {
        if pulse != self.settings.pulse {
            self.settings.pulse = pulse;
            self.display.show_value(pulse.get());
        }
    }

    fn show_resolution(&self) {
        self.display
            .show(GLYPH_T, encode_digit(self.settings.resolution.digit()));
    }

    fn saved_animation(&mut self) {
        for offset in 0..CHASE_SEGMENTS {
            self.display.show_units(chase_frame(offset));
            self.delay.delay_ms(SAVED_STEP_MS);
        }
    }
}
