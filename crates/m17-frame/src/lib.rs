//! Frame layouts, framing and LICH reassembly for the M17 digital voice protocol.
//!
//! Four fixed-size, big-endian records make up the wire format:
//! - [`Payload`]: frame number, 8 opaque bytes, checksum field (12 bytes)
//! - [`LichFrame`]: destination, source, stream type, nonce (28 bytes)
//! - [`RegularFrame`]: one 6-byte LICH chunk plus a payload, for RF (18 bytes)
//! - [`IpFrame`]: "M17 " marker, stream id, full LICH, payload (46 bytes)
//!
//! A [`Framer`] turns outgoing bytes into numbered frames; [`recover_lich`]
//! rebuilds a LICH from five received RF frames. Nothing in this crate
//! performs I/O, computes checksums or applies forward error correction.

#[cfg(feature = "async")]
pub mod codec;
pub mod config;
pub mod consts;
pub mod error;
pub mod framer;
pub mod ip;
pub mod lich;
pub mod payload;
pub mod reassembly;
pub mod regular;

#[cfg(feature = "async")]
pub use codec::{IpFrameCodec, RegularFrameCodec};
pub use config::FramerConfig;
pub use consts::{
    DEFAULT_PORT, IP_FRAME_LEN, LICH_CHUNK_COUNT, LICH_CHUNK_LEN, LICH_LEN, MAGIC, NONCE_LEN,
    PAYLOAD_DATA_LEN, PAYLOAD_LEN, REGULAR_FRAME_LEN, SYNC_WORD,
};
pub use error::{FrameError, Result};
pub use framer::{slice_payload, FrameCounter, FrameKind, Framer, IpFramer, RfFramer};
pub use ip::IpFrame;
pub use lich::{LichFrame, LichSource, StreamType};
pub use payload::Payload;
pub use reassembly::{recover_lich, recover_lich_bytes, recover_lich_bytes_from_frames};
pub use regular::RegularFrame;
