#![warn(missing_docs, missing_debug_implementations, rust_2018_idioms)]

//! Encode and decode IEEE 802.3 Ethernet II frames carrying zero or more
//! stacked IEEE 802.1Q VLAN tags.
//!
//! A [`ether::Frame`] is a plain value holding the logical fields of a frame.
//! [`ether::Frame::encode`] produces the exact byte sequence a network
//! interface transmits, and [`ether::Frame::decode`] recovers the fields from
//! captured bytes, tolerating frames whose single VLAN tag was already stripped
//! by the operating system.

#[macro_use]
mod macros;

mod cursors;
pub use cursors::Cursor;
pub use bytes::Buf;

mod error;
pub use error::{Error, Result};

pub mod ether;
pub mod vlan;

#[cfg(feature = "conn")]
pub mod conn;
