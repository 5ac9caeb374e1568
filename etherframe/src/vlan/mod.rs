//! IEEE 802.1Q VLAN tag codec.
//!
//! A VLAN tag occupies 4 bytes on the wire: the [`EtherType::VLAN`] marker
//! followed by a 2-byte tag control field. This module handles the 2-byte
//! body only; the marker is written and consumed by the frame codec in
//! [`crate::ether`].
//!
//! The tag control field is a big-endian `u16` laid out as:
//!
//! ```text
//!  15 14 13   12   11 ........................ 0
//! +--------+-----+-------------------------------+
//! |priority| DEI |            VLAN id            |
//! +--------+-----+-------------------------------+
//! ```
//!
//! # Example
//!
//! ```rust
//! use etherframe::vlan::VlanTag;
//!
//! let tag = VlanTag::new(1, false, 101);
//! assert_eq!(tag.encode()?, [0x20, 0x65]);
//! assert_eq!(VlanTag::decode(&[0x20, 0x65])?, tag);
//! # Ok::<(), etherframe::Error>(())
//! ```
//!
//! [`EtherType::VLAN`]: crate::ether::EtherType::VLAN

use byteorder::{ByteOrder, NetworkEndian};
use bytes::BufMut;

use crate::{Error, Result};

/// Byte length of an encoded VLAN tag body, excluding the marker.
pub const VLAN_TAG_LEN: usize = 2;

/// The largest priority code point a tag may carry.
pub const PRIORITY_MAX: u8 = 7;

/// The reserved VLAN id. It is rejected on both encode and decode.
pub const VLAN_ID_MAX: u16 = 0x0fff;

const PRIORITY_SHIFT: u16 = 13;
const DEI_MASK: u16 = 0x1000;
const VLAN_ID_MASK: u16 = 0x0fff;

/// One 802.1Q VLAN tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct VlanTag {
    /// IEEE 802.1p priority level, 0 to 7.
    pub priority: u8,

    /// Whether the frame may be dropped under congestion.
    pub drop_eligible: bool,

    /// VLAN identifier. 0 means the tag only carries priority information.
    pub id: u16,
}

impl VlanTag {
    /// Build a tag from its fields. Nothing is checked until the tag is
    /// encoded or [`validate`](Self::validate)d.
    #[inline]
    pub const fn new(priority: u8, drop_eligible: bool, id: u16) -> Self {
        Self {
            priority,
            drop_eligible,
            id,
        }
    }

    /// Check that the priority and id are in range.
    #[inline]
    pub fn validate(&self) -> Result<()> {
        if self.priority > PRIORITY_MAX || self.id >= VLAN_ID_MAX {
            return Err(Error::InvalidVlan);
        }
        Ok(())
    }

    /// Pack the tag into its 2-byte wire form.
    pub fn encode(&self) -> Result<[u8; VLAN_TAG_LEN]> {
        self.validate()?;

        let mut b = [0; VLAN_TAG_LEN];
        NetworkEndian::write_u16(&mut b, self.tci());
        Ok(b)
    }

    /// Pack the tag and append it to `buf`.
    ///
    /// Nothing is written if the tag is invalid.
    pub fn encode_to<B: BufMut>(&self, buf: &mut B) -> Result<()> {
        self.validate()?;
        buf.put_u16(self.tci());
        Ok(())
    }

    /// Unpack a tag from exactly [`VLAN_TAG_LEN`] bytes.
    pub fn decode(b: &[u8]) -> Result<Self> {
        if b.len() != VLAN_TAG_LEN {
            return Err(Error::UnexpectedEndOfInput);
        }

        let tci = NetworkEndian::read_u16(b);
        let tag = Self {
            priority: (tci >> PRIORITY_SHIFT) as u8,
            drop_eligible: tci & DEI_MASK != 0,
            id: tci & VLAN_ID_MASK,
        };
        if tag.id == VLAN_ID_MAX {
            return Err(Error::InvalidVlan);
        }
        Ok(tag)
    }

    // Callers validate first, so the id never spills into the DEI bit.
    #[inline]
    fn tci(&self) -> u16 {
        let dei = if self.drop_eligible { DEI_MASK } else { 0 };
        (u16::from(self.priority) << PRIORITY_SHIFT) | dei | self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_known_tags() {
        assert_eq!(VlanTag::default().encode(), Ok([0x00, 0x00]));
        assert_eq!(VlanTag::new(1, false, 101).encode(), Ok([0x20, 0x65]));
        assert_eq!(VlanTag::new(0, true, 100).encode(), Ok([0x10, 0x64]));
        assert_eq!(VlanTag::new(7, true, 4094).encode(), Ok([0xff, 0xfe]));
    }

    #[test]
    fn encode_rejects_out_of_range() {
        assert_eq!(
            VlanTag::new(8, false, 0).encode(),
            Err(Error::InvalidVlan)
        );
        assert_eq!(
            VlanTag::new(0, false, 4095).encode(),
            Err(Error::InvalidVlan)
        );
        assert_eq!(
            VlanTag::new(0, false, 0xffff).encode(),
            Err(Error::InvalidVlan)
        );
        assert!(VlanTag::new(7, false, 0).encode().is_ok());
        assert!(VlanTag::new(0, false, 4093).encode().is_ok());
    }

    #[test]
    fn encode_to_leaves_buffer_untouched_on_error() {
        let mut buf = Vec::new();
        assert_eq!(
            VlanTag::new(9, false, 1).encode_to(&mut buf),
            Err(Error::InvalidVlan)
        );
        assert!(buf.is_empty());

        VlanTag::new(1, false, 101).encode_to(&mut buf).unwrap();
        assert_eq!(buf, [0x20, 0x65]);
    }

    #[test]
    fn decode_known_tags() {
        assert_eq!(
            VlanTag::decode(&[0x20, 0x65]),
            Ok(VlanTag::new(1, false, 101))
        );
        assert_eq!(
            VlanTag::decode(&[0x10, 0x64]),
            Ok(VlanTag::new(0, true, 100))
        );
        assert_eq!(
            VlanTag::decode(&[0xef, 0xfe]),
            Ok(VlanTag::new(7, false, 4094))
        );
    }

    #[test]
    fn decode_rejects_bad_input() {
        assert_eq!(VlanTag::decode(&[]), Err(Error::UnexpectedEndOfInput));
        assert_eq!(VlanTag::decode(&[0]), Err(Error::UnexpectedEndOfInput));
        assert_eq!(
            VlanTag::decode(&[0, 0, 0]),
            Err(Error::UnexpectedEndOfInput)
        );
        assert_eq!(VlanTag::decode(&[0xff, 0xff]), Err(Error::InvalidVlan));
        assert_eq!(VlanTag::decode(&[0x0f, 0xff]), Err(Error::InvalidVlan));
    }

    #[test]
    fn every_valid_tag_survives_packing() {
        for priority in 0..=PRIORITY_MAX {
            for drop_eligible in [false, true] {
                for id in [0, 1, 100, 2048, 4093, 4094] {
                    let tag = VlanTag::new(priority, drop_eligible, id);
                    let b = tag.encode().unwrap();
                    assert_eq!(VlanTag::decode(&b[..]).unwrap(), tag);
                }
            }
        }
    }
}
