//! Ethernet II frames, EtherType values and hardware addresses.

use core::fmt;
use core::str::FromStr;

use crate::{Error, Result};

enum_sim! {
    /// An enum-like type for representing the EtherType field of a frame.
    ///
    /// Any 16-bit value is representable; the named constants are the values
    /// this crate treats specially or that are common enough to name.
    pub struct EtherType (u16) {
        /// Frame payload is Ipv4 protocol.
        IPV4 = 0x0800,
        /// Frame payload is Arp protocol.
        ARP =  0x0806,
        /// An 802.1Q VLAN tag follows instead of the real protocol type.
        VLAN = 0x8100,
        /// Frame payload is Ipv6 protocol.
        IPV6 = 0x86DD,
    }
}

impl fmt::Display for EtherType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:04x}", self.0)
    }
}

/// Byte length of a hardware address.
pub const ETHER_ADDR_LEN: usize = 6;

/// A six-octet Ethernet II address.
#[derive(Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Default)]
pub struct EtherAddr(pub [u8; ETHER_ADDR_LEN]);

impl EtherAddr {
    /// The broadcast address. A frame sent here reaches every device on the
    /// LAN segment.
    pub const BROADCAST: EtherAddr = EtherAddr([0xff; ETHER_ADDR_LEN]);

    /// Copy an address out of a slice of exactly six octets.
    pub fn from_bytes(data: &[u8]) -> Result<EtherAddr> {
        let bytes: [u8; ETHER_ADDR_LEN] =
            data.try_into().map_err(|_| Error::UnexpectedEndOfInput)?;
        Ok(EtherAddr(bytes))
    }

    /// Return the address as a sequence of octets.
    #[inline]
    pub const fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Query whether the address is an unicast address.
    pub fn is_unicast(&self) -> bool {
        !(self.is_broadcast() || self.is_multicast())
    }

    /// Query whether this address is the broadcast address.
    pub fn is_broadcast(&self) -> bool {
        *self == Self::BROADCAST
    }

    /// Query whether the 'multicast' bit in the OUI is set.
    pub const fn is_multicast(&self) -> bool {
        self.0[0] & 0x01 != 0
    }

    /// Query whether the 'locally administered' bit in the OUI is set.
    pub const fn is_local(&self) -> bool {
        self.0[0] & 0x02 != 0
    }
}

impl From<[u8; ETHER_ADDR_LEN]> for EtherAddr {
    fn from(bytes: [u8; ETHER_ADDR_LEN]) -> Self {
        EtherAddr(bytes)
    }
}

impl fmt::Display for EtherAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let b = self.0;
        write!(
            f,
            "{:02x}:{:02x}:{:02x}:{:02x}:{:02x}:{:02x}",
            b[0], b[1], b[2], b[3], b[4], b[5]
        )
    }
}

/// Error returned when a string is not of the form `aa:bb:cc:dd:ee:ff`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("invalid hardware address syntax")]
pub struct ParseEtherAddrError;

impl FromStr for EtherAddr {
    type Err = ParseEtherAddrError;

    fn from_str(s: &str) -> core::result::Result<Self, Self::Err> {
        let mut result = [0; ETHER_ADDR_LEN];
        let mut groups = s.split(':');
        for octet in result.iter_mut() {
            let group = groups.next().ok_or(ParseEtherAddrError)?;
            if group.len() != 2 || !group.bytes().all(|c| c.is_ascii_hexdigit()) {
                return Err(ParseEtherAddrError);
            }
            *octet = u8::from_str_radix(group, 16).map_err(|_| ParseEtherAddrError)?;
        }
        if groups.next().is_some() {
            return Err(ParseEtherAddrError);
        }
        Ok(Self(result))
    }
}

mod frame;
pub use frame::{Frame, MarshalMode};
pub use frame::{ETHER_HEADER_LEN, FCS_LEN, MIN_PAYLOAD_LEN, MIN_VLAN_PAYLOAD_LEN, VLAN_HEADER_LEN};
