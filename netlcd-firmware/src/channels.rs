//! Inter-task communication channels
//!
//! Other tasks (network stack, boot code) push display changes here. The
//! display task drains the channel once per refresh tick.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;

use netlcd_core::{IpAddress, MacAddress, NetworkStatus, ScreenKind};

/// Channel capacity for display commands
const DISPLAY_CHANNEL_SIZE: usize = 8;

/// A change to what the display shows
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayCommand {
    /// Switch the active screen
    SetScreen(ScreenKind),
    /// New link status
    SetStatus(NetworkStatus),
    /// Hardware address
    SetMac(MacAddress),
    /// Address assigned to the interface
    SetIp(IpAddress),
    /// Replace the text screen contents
    ShowText(&'static str),
}

/// Display commands from other tasks
pub static DISPLAY_COMMANDS: Channel<CriticalSectionRawMutex, DisplayCommand, DISPLAY_CHANNEL_SIZE> =
    Channel::new();
