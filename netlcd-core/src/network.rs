//! Network screen fields
//!
//! Link status, hardware address and IPv4 address as shown on the
//! network screen.

use core::net::Ipv4Addr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Link status reported by the networking code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum NetworkStatus {
    /// No link
    #[default]
    Disconnected,
    /// Link coming up for the first time
    Connecting,
    /// Link up and address assigned
    Connected,
    /// Link lost, trying to recover
    Reconnecting,
    /// Link up but no DHCP lease
    DhcpFailed,
}

impl NetworkStatus {
    /// Decode a raw status code
    ///
    /// Codes follow declaration order (0 = disconnected .. 4 = DHCP failed).
    pub const fn from_raw(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::Disconnected),
            1 => Some(Self::Connecting),
            2 => Some(Self::Connected),
            3 => Some(Self::Reconnecting),
            4 => Some(Self::DhcpFailed),
            _ => None,
        }
    }

    /// Text shown after "Status: "
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Disconnected => "disconnected",
            Self::Connecting => "connecting",
            Self::Connected => "connected",
            Self::Reconnecting => "reconnecting",
            Self::DhcpFailed => "DHCP failed",
        }
    }

    /// Check if the link carries an address worth showing
    pub fn has_address(&self) -> bool {
        matches!(self, Self::Connected)
    }
}

/// 48-bit hardware address
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MacAddress(pub [u8; 6]);

impl MacAddress {
    /// Address bytes in transmission order
    pub const fn octets(&self) -> [u8; 6] {
        self.0
    }
}

impl From<[u8; 6]> for MacAddress {
    fn from(octets: [u8; 6]) -> Self {
        Self(octets)
    }
}

/// IPv4 address as four stored bytes
///
/// Bytes are kept and shown in the order they were supplied; no
/// host/network reordering happens here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct IpAddress(pub [u8; 4]);

impl IpAddress {
    /// Lay out a raw `u32` the way a little-endian MCU keeps it in memory
    ///
    /// Network stacks on such targets typically hold the address as a `u32`
    /// whose lowest byte is the first octet.
    pub const fn from_raw_le(raw: u32) -> Self {
        Self(raw.to_le_bytes())
    }

    /// Address bytes in display order
    pub const fn octets(&self) -> [u8; 4] {
        self.0
    }
}

impl From<[u8; 4]> for IpAddress {
    fn from(octets: [u8; 4]) -> Self {
        Self(octets)
    }
}

impl From<Ipv4Addr> for IpAddress {
    fn from(addr: Ipv4Addr) -> Self {
        Self(addr.octets())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_labels() {
        assert_eq!(NetworkStatus::Disconnected.label(), "disconnected");
        assert_eq!(NetworkStatus::Connecting.label(), "connecting");
        assert_eq!(NetworkStatus::Connected.label(), "connected");
        assert_eq!(NetworkStatus::Reconnecting.label(), "reconnecting");
        assert_eq!(NetworkStatus::DhcpFailed.label(), "DHCP failed");
    }

    #[test]
    fn test_status_from_raw() {
        assert_eq!(NetworkStatus::from_raw(0), Some(NetworkStatus::Disconnected));
        assert_eq!(NetworkStatus::from_raw(4), Some(NetworkStatus::DhcpFailed));
        assert_eq!(NetworkStatus::from_raw(5), None);
        assert_eq!(NetworkStatus::from_raw(0xff), None);
    }

    #[test]
    fn test_only_connected_has_address() {
        assert!(NetworkStatus::Connected.has_address());
        assert!(!NetworkStatus::Reconnecting.has_address());
        assert!(!NetworkStatus::DhcpFailed.has_address());
    }

    #[test]
    fn test_ip_from_raw_le_keeps_memory_order() {
        // 192.168.1.20 as a little-endian u32
        let ip = IpAddress::from_raw_le(0x1401_a8c0);
        assert_eq!(ip.octets(), [192, 168, 1, 20]);
    }

    #[test]
    fn test_ip_from_std_addr() {
        let ip = IpAddress::from(Ipv4Addr::new(10, 0, 0, 7));
        assert_eq!(ip.octets(), [10, 0, 0, 7]);
    }
}
