//! Front panel buttons
//!
//! All four buttons are active low with pull-ups. Debouncing is done by the
//! control flow (release waits and fixed hold-offs), not by filtering.

use core::hint::spin_loop;

use spotweld_hal::InputPin;

use crate::config::{FIRST_STAGE_DELAY, FIRST_STAGE_STEPS, SECOND_STAGE_DELAY};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Button {
    /// Weld trigger
    Action,
    /// Mode toggle, setup entry and commit
    Mode,
    Plus,
    Minus,
}

/// Buttons that change the pulse length or resolution
pub const ADJUST_BUTTONS: [Button; 2] = [Button::Plus, Button::Minus];

/// Read access to the button panel
pub trait Keypad {
    fn is_pressed(&self, button: Button) -> bool;

    fn any_pressed(&self, buttons: &[Button]) -> bool {
        buttons.iter().any(|&b| self.is_pressed(b))
    }

    /// Block until `button` reads released
    fn wait_release(&self, button: Button) {
        while self.is_pressed(button) {
            spin_loop();
        }
    }

    /// Block until none of `buttons` reads pressed
    fn wait_release_any(&self, buttons: &[Button]) {
        while self.any_pressed(buttons) {
            spin_loop();
        }
    }
}

/// Four active-low button inputs
pub struct Buttons<A, M, P, N> {
    action: A,
    mode: M,
    plus: P,
    minus: N,
}

impl<A, M, P, N> Buttons<A, M, P, N>
where
    A: InputPin,
    M: InputPin,
    P: InputPin,
    N: InputPin,
{
    pub fn new(action: A, mode: M, plus: P, minus: N) -> Self {
        Self {
            action,
            mode,
            plus,
            minus,
        }
    }
}

impl<A, M, P, N> Keypad for Buttons<A, M, P, N>
where
    A: InputPin,
    M: InputPin,
    P: InputPin,
    N: InputPin,
{
    fn is_pressed(&self, button: Button) -> bool {
        match button {
            Button::Action => self.action.is_low(),
            Button::Mode => self.mode.is_low(),
            Button::Plus => self.plus.is_low(),
            Button::Minus => self.minus.is_low(),
        }
    }
}

/// Two-stage auto-repeat for the adjust buttons
///
/// Polled once per control tick. While slow, an adjustment is due every
/// `FIRST_STAGE_DELAY + 1` ticks; after `FIRST_STAGE_STEPS` recorded steps
/// the next one switches to fast, where an adjustment is due every
/// `SECOND_STAGE_DELAY + 1` ticks. Mode toggles share the same cadence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Repeater {
    first_stage: u8,
    second_stage: u8,
    steps: u8,
    fast: bool,
}

impl Repeater {
    pub const fn new() -> Self {
        Self {
            first_stage: 0,
            second_stage: 0,
            steps: 0,
            fast: false,
        }
    }

    /// Advance one tick. Returns true when the buttons should be evaluated.
    pub fn poll(&mut self) -> bool {
        let due = self.first_stage == FIRST_STAGE_DELAY
            || (self.fast && self.second_stage == SECOND_STAGE_DELAY);
        if due {
            self.first_stage = 0;
            self.second_stage = 0;
        } else if self.fast {
            self.second_stage += 1;
        } else {
            self.first_stage += 1;
        }
        due
    }

    /// Count an adjustment made while a button is held
    pub fn record_step(&mut self) {
        if self.steps == FIRST_STAGE_STEPS {
            self.fast = true;
        } else {
            self.steps += 1;
        }
    }

    /// Both adjust buttons released: back to the slow cadence
    ///
    /// The first-stage count is kept, since a held MODE still runs on it.
    pub fn release(&mut self) {
        self.steps = 0;
        self.fast = false;
        self.second_stage = 0;
    }

    /// No button held: the next press waits a full first stage
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn is_fast(&self) -> bool {
        self.fast
    }

    pub fn steps(&self) -> u8 {
        self.steps
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::Cell;

    struct MockInput {
        high: Cell<bool>,
        reads: Cell<u32>,
        release_after: Option<u32>,
    }

    impl MockInput {
        fn released() -> Self {
            Self {
                high: Cell::new(true),
                reads: Cell::new(0),
                release_after: None,
            }
        }

        fn held_for(reads: u32) -> Self {
            Self {
                high: Cell::new(false),
                reads: Cell::new(0),
                release_after: Some(reads),
            }
        }
    }

    impl InputPin for MockInput {
        fn is_high(&self) -> bool {
            let reads = self.reads.get() + 1;
            self.reads.set(reads);
            if self.release_after.is_some_and(|n| reads > n) {
                self.high.set(true);
            }
            self.high.get()
        }
    }

    #[test]
    fn test_active_low() {
        let buttons = Buttons::new(
            MockInput::held_for(100),
            MockInput::released(),
            MockInput::released(),
            MockInput::held_for(100),
        );
        assert!(buttons.is_pressed(Button::Action));
        assert!(!buttons.is_pressed(Button::Mode));
        assert!(!buttons.is_pressed(Button::Plus));
        assert!(buttons.any_pressed(&ADJUST_BUTTONS));
    }

    #[test]
    fn test_wait_release() {
        let buttons = Buttons::new(
            MockInput::held_for(5),
            MockInput::released(),
            MockInput::released(),
            MockInput::released(),
        );
        buttons.wait_release(Button::Action);
        assert!(!buttons.is_pressed(Button::Action));
        assert_eq!(buttons.action.reads.get(), 7);
    }

    /// Ticks at which the repeater fires while a button stays held
    fn firing_ticks(ticks: u32) -> Vec<u32> {
        let mut repeater = Repeater::new();
        let mut fired = Vec::new();
        for tick in 0..ticks {
            if repeater.poll() {
                repeater.record_step();
                fired.push(tick);
            }
        }
        fired
    }

    #[test]
    fn test_slow_cadence() {
        let fired = firing_ticks(1000);
        assert_eq!(fired, [250, 501, 752]);
    }

    #[test]
    fn test_accelerates_after_first_stage() {
        let fired = firing_ticks(4000);
        let gaps: Vec<u32> = fired.windows(2).map(|w| w[1] - w[0]).collect();

        let slow = FIRST_STAGE_DELAY as u32 + 1;
        let fast = SECOND_STAGE_DELAY as u32 + 1;
        let slow_changes = FIRST_STAGE_STEPS as usize + 1;

        assert!(gaps[..slow_changes - 1].iter().all(|&g| g == slow));
        assert!(gaps[slow_changes - 1..].iter().all(|&g| g == fast));
    }

    #[test]
    fn test_release_resets() {
        let mut repeater = Repeater::new();
        for _ in 0..=FIRST_STAGE_STEPS {
            repeater.record_step();
        }
        assert!(repeater.is_fast());

        repeater.release();
        assert!(!repeater.is_fast());
        assert_eq!(repeater.steps(), 0);
    }

    #[test]
    fn test_reset_restarts_first_stage() {
        let mut repeater = Repeater::new();
        for _ in 0..200 {
            assert!(!repeater.poll());
        }

        // Release keeps the partial count, reset drops it
        repeater.release();
        let ticks_left = (0..).position(|_| repeater.poll()).unwrap();
        assert_eq!(ticks_left, FIRST_STAGE_DELAY as usize - 200);

        for _ in 0..200 {
            repeater.poll();
        }
        repeater.reset();
        let ticks_left = (0..).position(|_| repeater.poll()).unwrap();
        assert_eq!(ticks_left, FIRST_STAGE_DELAY as usize);
        assert_eq!(repeater, Repeater::new());
    }
}
