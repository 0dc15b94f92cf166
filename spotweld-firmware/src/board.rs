//! Board wiring (Raspberry Pi Pico)
//!
//! | Signal              | GPIO |
//! |---------------------|------|
//! | Segments a..g       | 0-6  |
//! | Units digit common  | 8    |
//! | Tens digit common   | 9    |
//! | PLUS                | 10   |
//! | MINUS               | 11   |
//! | MODE                | 12   |
//! | ACTION              | 13   |
//! | Zero-cross detector | 14   |
//! | Weld output         | 15   |

use embassy_rp::Peripherals;
use spotweld_core::config::{DISPLAY_POLARITY, ZERO_CROSS_RELEASE};
use spotweld_core::{Buttons, Multiplexer, ZeroCrossOutput};
use spotweld_hal_rp2040::gpio::{PullUp, PushPull};
use spotweld_hal_rp2040::store::FlashStore;

pub type SegmentBus = [PushPull<'static>; 7];
pub type DisplayMux = Multiplexer<SegmentBus, PushPull<'static>, PushPull<'static>>;
pub type Keys = Buttons<PullUp<'static>, PullUp<'static>, PullUp<'static>, PullUp<'static>>;
pub type WeldOutput = ZeroCrossOutput<PushPull<'static>, PullUp<'static>>;

pub struct Board {
    pub mux: DisplayMux,
    pub keys: Keys,
    pub output: WeldOutput,
    pub store: FlashStore<'static>,
}

impl Board {
    pub fn new(p: Peripherals) -> Self {
        let bus = [
            PushPull::new_low(p.PIN_0),
            PushPull::new_low(p.PIN_1),
            PushPull::new_low(p.PIN_2),
            PushPull::new_low(p.PIN_3),
            PushPull::new_low(p.PIN_4),
            PushPull::new_low(p.PIN_5),
            PushPull::new_low(p.PIN_6),
        ];
        let mux = Multiplexer::new(
            bus,
            PushPull::new_low(p.PIN_8),
            PushPull::new_low(p.PIN_9),
            DISPLAY_POLARITY,
        );

        let keys = Buttons::new(
            PullUp::new(p.PIN_13),
            PullUp::new(p.PIN_12),
            PullUp::new(p.PIN_10),
            PullUp::new(p.PIN_11),
        );

        // Output is low from reset until the first weld
        let output = ZeroCrossOutput::new(
            PushPull::new_low(p.PIN_15),
            PullUp::new(p.PIN_14),
            ZERO_CROSS_RELEASE,
        );

        let store = FlashStore::new(p.FLASH, p.DMA_CH0);

        Self {
            mux,
            keys,
            output,
            store,
        }
    }
}
