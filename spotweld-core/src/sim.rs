//! Simulated board for host tests
//!
//! Time is a microsecond counter advanced by the delay and by every input
//! read (1 us each), so busy-wait loops make progress. Buttons and the
//! zero-cross gate follow scripted windows on that clock.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use embedded_hal::delay::DelayNs;
use spotweld_hal::{ByteStore, InputPin, OutputPin, StorageKey, ERASED_BYTE};

use crate::buttons::{Button, Buttons};
use crate::config::ZERO_CROSS_RELEASE;
use crate::controller::Controller;
use crate::display::DisplayBuffer;
use crate::output::ZeroCrossOutput;

const READ_COST_US: u64 = 1;

struct Window {
    from_us: u64,
    until_us: u64,
}

impl Window {
    fn ms(from_ms: u64, until_ms: u64) -> Self {
        Self {
            from_us: from_ms * 1000,
            until_us: until_ms * 1000,
        }
    }

    fn contains(&self, now_us: u64) -> bool {
        (self.from_us..self.until_us).contains(&now_us)
    }
}

#[derive(Default)]
pub struct Sim {
    now_us: Cell<u64>,
    presses: RefCell<Vec<(Button, Window)>>,
    gate_low: RefCell<Vec<Window>>,
    output_log: RefCell<Vec<(u64, bool)>>,
    display: Cell<Option<&'static DisplayBuffer>>,
    frames: RefCell<Vec<(u8, u8)>>,
}

pub type SimKeypad = Buttons<SimButton, SimButton, SimButton, SimButton>;
pub type SimPulse = ZeroCrossOutput<SimOutput, SimGate>;
pub type SimController = Controller<'static, SimKeypad, SimPulse, MemStore, SimDelay>;

impl Sim {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn now_us(&self) -> u64 {
        self.now_us.get()
    }

    /// Hold `button` down for `hold_ms` starting at `from_ms`
    pub fn press(&self, button: Button, from_ms: u64, hold_ms: u64) {
        self.presses
            .borrow_mut()
            .push((button, Window::ms(from_ms, from_ms + hold_ms)));
    }

    pub fn hold_gate_low(&self, from_ms: u64, until_ms: u64) {
        self.gate_low.borrow_mut().push(Window::ms(from_ms, until_ms));
    }

    /// Leak a fresh display buffer and record its frames at every delay
    pub fn watch_display(&self) -> &'static DisplayBuffer {
        let display: &'static DisplayBuffer = Box::leak(Box::new(DisplayBuffer::new()));
        self.display.set(Some(display));
        display
    }

    /// Distinct (tens, units) contents seen at delay calls, in order
    pub fn frames(&self) -> Vec<(u8, u8)> {
        self.frames.borrow().clone()
    }

    /// Every write to the weld output as (time in us, level)
    pub fn output_log(&self) -> Vec<(u64, bool)> {
        self.output_log.borrow().clone()
    }

    /// Completed high periods of the weld output as (on, off) in us
    pub fn pulses(&self) -> Vec<(u64, u64)> {
        let mut pulses = Vec::new();
        let mut on = None;
        for &(at, level) in self.output_log.borrow().iter() {
            match (level, on) {
                (true, None) => on = Some(at),
                (false, Some(start)) => {
                    pulses.push((start, at));
                    on = None;
                }
                _ => {}
            }
        }
        pulses
    }

    pub fn button(self: &Rc<Self>, button: Button) -> SimButton {
        SimButton {
            sim: Rc::clone(self),
            button,
        }
    }

    pub fn gate(self: &Rc<Self>) -> SimGate {
        SimGate {
            sim: Rc::clone(self),
        }
    }

    pub fn output(self: &Rc<Self>) -> SimOutput {
        SimOutput {
            sim: Rc::clone(self),
            high: false,
        }
    }

    pub fn delay(self: &Rc<Self>) -> SimDelay {
        SimDelay {
            sim: Rc::clone(self),
        }
    }

    pub fn controller(
        self: &Rc<Self>,
        display: &'static DisplayBuffer,
        store: MemStore,
    ) -> SimController {
        let keypad = Buttons::new(
            self.button(Button::Action),
            self.button(Button::Mode),
            self.button(Button::Plus),
            self.button(Button::Minus),
        );
        let output = ZeroCrossOutput::new(self.output(), self.gate(), ZERO_CROSS_RELEASE);
        Controller::new(keypad, output, store, self.delay(), display)
    }

    fn read(&self) -> u64 {
        let now = self.now_us.get();
        self.now_us.set(now + READ_COST_US);
        now
    }

    fn advance_ns(&self, ns: u64) {
        if let Some(display) = self.display.get() {
            let frame = (display.tens(), display.units());
            let mut frames = self.frames.borrow_mut();
            if frames.last() != Some(&frame) {
                frames.push(frame);
            }
        }
        self.now_us.set(self.now_us.get() + ns / 1000);
    }

    fn is_pressed(&self, button: Button, now_us: u64) -> bool {
        self.presses
            .borrow()
            .iter()
            .any(|(b, window)| *b == button && window.contains(now_us))
    }

    fn gate_is_low(&self, now_us: u64) -> bool {
        self.gate_low.borrow().iter().any(|w| w.contains(now_us))
    }
}

/// Active-low button input
pub struct SimButton {
    sim: Rc<Sim>,
    button: Button,
}

impl InputPin for SimButton {
    fn is_high(&self) -> bool {
        let now = self.sim.read();
        !self.sim.is_pressed(self.button, now)
    }
}

/// Zero-cross detector, high unless scripted low
pub struct SimGate {
    sim: Rc<Sim>,
}

impl InputPin for SimGate {
    fn is_high(&self) -> bool {
        let now = self.sim.read();
        !self.sim.gate_is_low(now)
    }
}

pub struct SimOutput {
    sim: Rc<Sim>,
    high: bool,
}

impl OutputPin for SimOutput {
    fn set_high(&mut self) {
        self.high = true;
        self.sim.output_log.borrow_mut().push((self.sim.now_us(), true));
    }

    fn set_low(&mut self) {
        self.high = false;
        self.sim.output_log.borrow_mut().push((self.sim.now_us(), false));
    }

    fn is_set_high(&self) -> bool {
        self.high
    }
}

pub struct SimDelay {
    sim: Rc<Sim>,
}

impl DelayNs for SimDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.sim.advance_ns(ns as u64);
    }

    fn delay_us(&mut self, us: u32) {
        self.sim.advance_ns(us as u64 * 1000);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.sim.advance_ns(ms as u64 * 1_000_000);
    }
}

/// In-memory store that can be made to report busy
pub struct MemStore {
    cells: [u8; 2],
    busy_polls: Cell<u32>,
    writes: u32,
}

impl MemStore {
    pub fn erased() -> Self {
        Self {
            cells: [ERASED_BYTE; 2],
            busy_polls: Cell::new(0),
            writes: 0,
        }
    }

    pub fn with(pulse: u8, resolution: u8) -> Self {
        let mut store = Self::erased();
        store.cells[StorageKey::PulseLength.as_u8() as usize] = pulse;
        store.cells[StorageKey::Resolution.as_u8() as usize] = resolution;
        store
    }

    /// Report not ready for the next `polls` readiness checks
    pub fn busy_for(&mut self, polls: u32) {
        self.busy_polls.set(polls);
    }

    pub fn writes(&self) -> u32 {
        self.writes
    }

    pub fn peek(&self, key: StorageKey) -> u8 {
        self.cells[key.as_u8() as usize]
    }
}

impl ByteStore for MemStore {
    fn read_byte(&mut self, key: StorageKey) -> u8 {
        self.peek(key)
    }

    fn write_byte(&mut self, key: StorageKey, value: u8) {
        self.cells[key.as_u8() as usize] = value;
        self.writes += 1;
    }

    fn is_ready(&self) -> bool {
        let busy = self.busy_polls.get();
        if busy > 0 {
            self.busy_polls.set(busy - 1);
            false
        } else {
            true
        }
    }
}
