//! Spot welder timer firmware
//!
//! Zero-cross synchronised pulse timer for a transformer spot welder, on an
//! RP2040 board.
//!
//! Two contexts run:
//! - the display refresh, a task on an interrupt executor (preemptive)
//! - the control loop, blocking in thread mode, never returns

#![no_std]
#![no_main]

use cortex_m_rt::entry;
use defmt::*;
use embassy_executor::InterruptExecutor;
use embassy_rp::interrupt;
use embassy_rp::interrupt::{InterruptExt, Priority};
use embassy_time::Delay;
use {defmt_rtt as _, panic_probe as _};

use spotweld_core::Controller;

use crate::board::Board;
use crate::shared::DISPLAY;

mod board;
mod shared;
mod tasks;

static EXECUTOR_HIGH: InterruptExecutor = InterruptExecutor::new();

#[interrupt]
unsafe fn SWI_IRQ_1() {
    EXECUTOR_HIGH.on_interrupt()
}

#[entry]
fn main() -> ! {
    info!("Spot welder timer starting...");

    let p = embassy_rp::init(Default::default());
    let board = Board::new(p);
    info!("Peripherals initialized");

    // Refresh preempts the control loop
    interrupt::SWI_IRQ_1.set_priority(Priority::P2);
    let spawner = EXECUTOR_HIGH.start(interrupt::SWI_IRQ_1);
    spawner.spawn(tasks::refresh_task(board.mux)).unwrap();

    let controller = Controller::new(board.keys, board.output, board.store, Delay, &DISPLAY);
    controller.run()
}
