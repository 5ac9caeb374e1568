//! Send and receive whole frames over a link-layer transport.
//!
//! [`FrameConn`] keeps a frame template (source address, VLAN tags,
//! EtherType) and a [`MarshalMode`]. Each write copies the template, fills in
//! the destination and payload, encodes it and hands the bytes to the
//! transport. Each read decodes exactly the bytes the transport received into
//! a new, owned [`Frame`].

use std::io;

use bytes::Bytes;
use log::warn;
use parking_lot::RwLock;
use thiserror::Error;

use crate::ether::{EtherAddr, Frame, MarshalMode};

/// A raw link-layer endpoint, such as a packet socket or a DPDK port.
pub trait LinkTransport {
    /// Receive one frame into `buf`, returning the number of bytes written.
    ///
    /// A count larger than `buf` is treated as a truncated frame by
    /// [`FrameConn::read_frame`].
    fn recv(&self, buf: &mut [u8]) -> io::Result<usize>;

    /// Transmit one encoded frame towards `dst`, returning the bytes sent.
    fn send_to(&self, buf: &[u8], dst: EtherAddr) -> io::Result<usize>;
}

/// Errors raised by [`FrameConn`].
#[derive(Debug, Error)]
pub enum ConnError {
    /// The frame could not be encoded or decoded.
    #[error("codec error: {0}")]
    Codec(#[from] crate::Error),

    /// The transport failed.
    #[error("io error: {0}")]
    Io(#[from] io::Error),

    /// A write was attempted before a template was set.
    #[error("no frame template set")]
    NoTemplate,

    /// A raw marshal mode value outside of [`MarshalMode`].
    #[error("unsupported marshal mode: {0}")]
    UnsupportedMarshalMode(u8),
}

#[derive(Debug)]
struct Template {
    frame: Frame,
    mode: MarshalMode,
}

/// A connection that exchanges [`Frame`]s over a [`LinkTransport`].
///
/// `FrameConn` is `Sync` when the transport is: concurrent writers share the
/// template under a read lock while replacing it takes the write lock.
#[derive(Debug)]
pub struct FrameConn<T> {
    transport: T,
    template: RwLock<Option<Template>>,
}

impl<T: LinkTransport> FrameConn<T> {
    /// Wrap `transport`. A template must be set before writing.
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            template: RwLock::new(None),
        }
    }

    /// The wrapped transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Release the wrapped transport.
    pub fn into_inner(self) -> T {
        self.transport
    }

    /// Replace the template used by subsequent writes.
    ///
    /// The template's destination and payload are ignored; every write
    /// supplies its own.
    pub fn set_template(&self, frame: Frame, mode: MarshalMode) {
        *self.template.write() = Some(Template { frame, mode });
    }

    /// Like [`set_template`](Self::set_template), taking the mode as a raw
    /// value. Values outside of [`MarshalMode`] are rejected and leave the
    /// current template in place.
    pub fn set_template_raw(&self, frame: Frame, mode: u8) -> Result<(), ConnError> {
        let mode = MarshalMode::try_from(mode).map_err(ConnError::UnsupportedMarshalMode)?;
        self.set_template(frame, mode);
        Ok(())
    }

    /// Encode `payload` into a frame addressed to `dst` and send it.
    ///
    /// Returns the number of bytes the transport accepted, which includes the
    /// frame header.
    pub fn write_to(&self, payload: &[u8], dst: EtherAddr) -> Result<usize, ConnError> {
        let encoded = {
            let guard = self.template.read();
            let template = guard.as_ref().ok_or(ConnError::NoTemplate)?;
            let frame = Frame {
                destination: dst,
                payload: Bytes::copy_from_slice(payload),
                ..template.frame.clone()
            };
            frame.encode_with(template.mode)?
        };

        self.transport.send_to(&encoded[..], dst).map_err(|e| {
            warn!("failed to send {}-byte frame to {}: {}", encoded.len(), dst, e);
            ConnError::from(e)
        })
    }

    /// Receive one frame, using `buf` as scratch space.
    ///
    /// Only the bytes actually received are decoded. The returned frame does
    /// not borrow `buf`.
    pub fn read_frame(&self, buf: &mut [u8]) -> Result<Frame, ConnError> {
        let n = self.transport.recv(buf).map_err(|e| {
            warn!("failed to receive frame: {}", e);
            ConnError::from(e)
        })?;
        let received = buf.get(..n).ok_or_else(|| {
            warn!("transport reported {} bytes for a {}-byte buffer", n, buf.len());
            crate::Error::UnexpectedEndOfInput
        })?;
        Ok(Frame::decode(received)?)
    }
}
