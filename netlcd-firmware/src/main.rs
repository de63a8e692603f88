//! NetLCD - Network Status Display Firmware
//!
//! Main firmware binary for RP2040 boards with an HD44780 character LCD
//! behind a 74HC595 shift register. Shows link status, addresses and HTTP
//! request progress, or a page of free-form text.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::gpio::{Level, Output};
use embassy_time::Delay;
use netlcd_core::ScreenKind;
use netlcd_drivers::ShiftLcd;
use {defmt_rtt as _, panic_probe as _};

mod channels;
mod config;
mod tasks;

use crate::channels::{DisplayCommand, DISPLAY_COMMANDS};
use crate::config::DISPLAY_CONFIG;

/// Shown on the text screen until something else is sent
const BOOT_BANNER: &str = concat!("NetLCD v", env!("CARGO_PKG_VERSION"), "\nbooting...");

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("NetLCD firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let config = DISPLAY_CONFIG;
    info!(
        "Display config: {}x{}, refresh {}ms",
        config.cols, config.rows, config.refresh_interval_ms
    );

    // Setup shift register lines for the LCD
    // Pin assignments are board-specific (SER=GPIO2, SRCLK=GPIO3, RCLK=GPIO4)
    let data = Output::new(p.PIN_2, Level::Low);
    let clock = Output::new(p.PIN_3, Level::Low);
    let latch = Output::new(p.PIN_4, Level::Low);

    let lcd: tasks::Lcd = ShiftLcd::new(data, clock, latch, Delay, config.cols, config.rows);

    spawner.spawn(tasks::display_task(lcd, config)).unwrap();

    if config.initial_screen == ScreenKind::Text {
        DISPLAY_COMMANDS
            .send(DisplayCommand::ShowText(BOOT_BANNER))
            .await;
    }

    info!("All tasks spawned, firmware running");

    loop {
        embassy_time::Timer::after_secs(60).await;
        trace!("Main loop heartbeat");
    }
}
