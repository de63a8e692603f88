//! Display refresh task
//!
//! Owns the LCD and the display controller. Each tick it applies queued
//! commands and lets the controller repaint if anything changed.

use defmt::*;
use embassy_rp::gpio::Output;
use embassy_time::{Delay, Duration, Instant, Ticker};

use netlcd_core::{DisplayConfig, DisplayController, Request};
use netlcd_display::SurfaceError;
use netlcd_drivers::ShiftLcd;

use crate::channels::{DisplayCommand, DISPLAY_COMMANDS};

/// LCD as wired on this board
pub type Lcd = ShiftLcd<Output<'static>, Output<'static>, Output<'static>, Delay>;

type Display = DisplayController<'static, Lcd, dyn Request>;

/// Display task - drains commands and refreshes the LCD
#[embassy_executor::task]
pub async fn display_task(mut lcd: Lcd, config: DisplayConfig) {
    info!("Display task started");

    if let Err(e) = lcd.init() {
        warn!("LCD init failed: {:?}", e);
    }

    let mut display: Display = DisplayController::with_config(lcd, &config);
    let (cols, rows) = display.dimensions();
    info!("Display {}x{}, screen {:?}", cols, rows, display.screen());

    let mut ticker = Ticker::every(Duration::from_millis(config.refresh_interval_ms as u64));
    let mut last = Instant::now();

    loop {
        ticker.next().await;

        while let Ok(command) = DISPLAY_COMMANDS.try_receive() {
            apply(&mut display, command);
        }

        let now = Instant::now();
        let elapsed_ms = (now - last).as_millis() as u32;
        last = now;

        match display.update(elapsed_ms) {
            Ok(true) => trace!("Display repainted"),
            Ok(false) => {}
            Err(SurfaceError::NotInitialized) => {
                warn!("LCD not initialized, retrying init");
                if display.surface_mut().init().is_ok() {
                    display.mark_dirty();
                }
            }
            Err(e) => warn!("Display update failed: {:?}", e),
        }
    }
}

fn apply(display: &mut Display, command: DisplayCommand) {
    debug!("Display command: {:?}", command);
    match command {
        DisplayCommand::SetScreen(screen) => display.set_screen(screen),
        DisplayCommand::SetStatus(status) => display.set_network_status(status),
        DisplayCommand::SetMac(mac) => display.set_mac(mac),
        DisplayCommand::SetIp(ip) => display.set_ip(ip),
        DisplayCommand::ShowText(text) => display.set_text(text),
    }
}
