use bytes::{Buf, BufMut, Bytes};
use log::{debug, trace};

use crate::ether::{EtherAddr, EtherType, ETHER_ADDR_LEN};
use crate::vlan::{VlanTag, VLAN_TAG_LEN};
use crate::{Cursor, Error, Result};

/// Byte length of the untagged Ethernet II header: two addresses and a type.
pub const ETHER_HEADER_LEN: usize = 14;

/// Byte length of one VLAN tag on the wire: the marker plus the tag body.
pub const VLAN_HEADER_LEN: usize = 4;

/// Minimum payload of an untagged frame, making the frame 60 bytes long.
pub const MIN_PAYLOAD_LEN: usize = 46;

/// Minimum payload of a tagged frame, or of a frame whose tag was stripped.
pub const MIN_VLAN_PAYLOAD_LEN: usize = MIN_PAYLOAD_LEN - VLAN_HEADER_LEN;

/// Byte length of the frame check sequence trailer.
pub const FCS_LEN: usize = 4;

/// How a [`Frame`] is laid out when handed to a transport.
///
/// The set of modes is closed: raw values outside of it are rejected by
/// `TryFrom<u8>` rather than silently mapped to a default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum MarshalMode {
    /// Addresses, VLAN tags, EtherType and payload.
    #[default]
    Normal = 0,

    /// The normal layout followed by a 4-byte frame check sequence field.
    ///
    /// The field is reserved and zero-filled. Computing its value is left to
    /// the transport, usually offloaded to the NIC.
    Fcs = 1,
}

impl MarshalMode {
    /// Bytes appended after the payload in this mode.
    #[inline]
    pub const fn trailer_len(&self) -> usize {
        match self {
            MarshalMode::Normal => 0,
            MarshalMode::Fcs => FCS_LEN,
        }
    }
}

impl TryFrom<u8> for MarshalMode {
    type Error = u8;

    fn try_from(value: u8) -> core::result::Result<Self, u8> {
        match value {
            0 => Ok(MarshalMode::Normal),
            1 => Ok(MarshalMode::Fcs),
            other => Err(other),
        }
    }
}

/// An IEEE 802.3 Ethernet II frame.
///
/// The frame owns all of its data: decoding copies addresses and payload out
/// of the input, so a decoded frame outlives the buffer it came from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Frame {
    /// Destination hardware address. [`EtherAddr::BROADCAST`] reaches every
    /// device on the segment.
    pub destination: EtherAddr,

    /// Source hardware address, usually the sending interface's address.
    pub source: EtherAddr,

    /// 802.1Q tags, outermost first. Empty for an untagged frame.
    pub vlan_tags: Vec<VlanTag>,

    /// Identifies the protocol carried in `payload`.
    pub ether_type: EtherType,

    /// Encapsulated data, copied verbatim to and from the wire.
    pub payload: Bytes,
}

impl Frame {
    /// Build an untagged frame.
    pub fn new(
        destination: EtherAddr,
        source: EtherAddr,
        ether_type: EtherType,
        payload: impl Into<Bytes>,
    ) -> Self {
        Self {
            destination,
            source,
            vlan_tags: Vec::new(),
            ether_type,
            payload: payload.into(),
        }
    }

    /// Length of the encoded frame in [`MarshalMode::Normal`].
    #[inline]
    pub fn encoded_len(&self) -> usize {
        ETHER_HEADER_LEN + VLAN_HEADER_LEN * self.vlan_tags.len() + self.payload.len()
    }

    /// Encode the frame into a freshly allocated buffer.
    ///
    /// No padding is added, so short payloads produce short frames. The only
    /// possible failure is an invalid VLAN tag.
    pub fn encode(&self) -> Result<Vec<u8>> {
        self.encode_with(MarshalMode::Normal)
    }

    /// Encode the frame using the layout selected by `mode`.
    pub fn encode_with(&self, mode: MarshalMode) -> Result<Vec<u8>> {
        let mut buf = Vec::with_capacity(self.encoded_len() + mode.trailer_len());
        self.encode_to(&mut buf)?;
        buf.put_bytes(0, mode.trailer_len());
        Ok(buf)
    }

    /// Append the encoded frame to `buf`.
    ///
    /// Every tag is checked before the first byte is written, so `buf` is left
    /// untouched on error. A fixed-size `buf` without room for
    /// [`encoded_len`](Self::encoded_len) bytes fails with
    /// [`Error::UnexpectedEndOfInput`].
    pub fn encode_to<B: BufMut>(&self, buf: &mut B) -> Result<()> {
        if let Some((idx, tag)) = self
            .vlan_tags
            .iter()
            .enumerate()
            .find(|(_, tag)| tag.validate().is_err())
        {
            debug!("refusing to encode frame, VLAN tag {} is invalid: {:?}", idx, tag);
            return Err(Error::InvalidVlan);
        }
        if buf.remaining_mut() < self.encoded_len() {
            return Err(Error::UnexpectedEndOfInput);
        }

        buf.put_slice(self.destination.as_bytes());
        buf.put_slice(self.source.as_bytes());
        for tag in self.vlan_tags.iter() {
            buf.put_u16(EtherType::VLAN.raw());
            tag.encode_to(buf)?;
        }
        buf.put_u16(self.ether_type.raw());
        buf.put_slice(&self.payload);
        Ok(())
    }

    /// Decode a frame from captured bytes.
    ///
    /// VLAN tags are consumed for as long as the type field holds
    /// [`EtherType::VLAN`]; the first other value becomes
    /// [`ether_type`](Self::ether_type) and everything after it is the
    /// payload. The payload must satisfy the minimum frame length, relaxed by
    /// one tag's worth when tags are present or when an untagged frame is
    /// exactly one tag short of the minimum, which is what a receiver sees
    /// after the operating system stripped the tag.
    pub fn decode(b: &[u8]) -> Result<Frame> {
        if b.len() < ETHER_HEADER_LEN {
            debug!(
                "{}-byte frame is shorter than the {}-byte header",
                b.len(),
                ETHER_HEADER_LEN
            );
            return Err(Error::UnexpectedEndOfInput);
        }

        let mut cursor = Cursor::new(b);
        let mut destination = [0; ETHER_ADDR_LEN];
        cursor.copy_to_slice(&mut destination[..]);
        let mut source = [0; ETHER_ADDR_LEN];
        cursor.copy_to_slice(&mut source[..]);

        let mut vlan_tags = Vec::new();
        let mut ether_type = EtherType::from(cursor.get_u16());
        while ether_type == EtherType::VLAN {
            if cursor.remaining() < VLAN_TAG_LEN {
                debug!(
                    "VLAN tag at offset {} truncated, {} bytes left",
                    cursor.cursor(),
                    cursor.remaining()
                );
                return Err(Error::UnexpectedEndOfInput);
            }

            let tag = VlanTag::decode(&cursor.chunk_shared_lifetime()[..VLAN_TAG_LEN])?;
            vlan_tags.push(tag);
            cursor.advance(VLAN_TAG_LEN);

            ether_type = match cursor.peek_u16() {
                Some(value) => EtherType::from(value),
                None => {
                    debug!(
                        "type field after VLAN tag at offset {} truncated",
                        cursor.cursor()
                    );
                    return Err(Error::UnexpectedEndOfInput);
                }
            };
            cursor.advance(2);
        }

        let payload_len = cursor.remaining();
        let min_len = min_payload_len(vlan_tags.len(), payload_len);
        if payload_len < min_len {
            debug!(
                "payload of {} bytes after {} VLAN tags is below the {}-byte minimum",
                payload_len,
                vlan_tags.len(),
                min_len
            );
            return Err(Error::UnexpectedEndOfInput);
        }

        Ok(Frame {
            destination: EtherAddr(destination),
            source: EtherAddr(source),
            vlan_tags,
            ether_type,
            payload: Bytes::copy_from_slice(cursor.chunk_shared_lifetime()),
        })
    }
}

// One tag lowers the minimum by 4 bytes; further tags do not lower it more.
fn min_payload_len(tag_count: usize, payload_len: usize) -> usize {
    match tag_count {
        0 if payload_len == MIN_VLAN_PAYLOAD_LEN => {
            trace!("untagged 56-byte frame, assuming a VLAN tag was stripped");
            MIN_VLAN_PAYLOAD_LEN
        }
        0 => MIN_PAYLOAD_LEN,
        _ => MIN_VLAN_PAYLOAD_LEN,
    }
}
