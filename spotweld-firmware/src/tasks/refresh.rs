//! Display refresh task
//!
//! Runs on the high-priority interrupt executor, so it preempts the blocking
//! control loop at a fixed rate, lighting one digit per tick.

use defmt::*;
use embassy_time::{Duration, Ticker};
use spotweld_core::config::REFRESH_HZ;

use crate::board::DisplayMux;
use crate::shared::DISPLAY;

#[embassy_executor::task]
pub async fn refresh_task(mut mux: DisplayMux) {
    info!("Refresh task started, {} Hz", REFRESH_HZ);

    let mut ticker = Ticker::every(Duration::from_hz(REFRESH_HZ as u64));

    loop {
        ticker.next().await;
        mux.refresh(&DISPLAY);
    }
}
