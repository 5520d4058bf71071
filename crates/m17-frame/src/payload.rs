use std::fmt;

use bytes::{Buf, BufMut, Bytes, BytesMut};

use crate::consts::{PAYLOAD_DATA_LEN, PAYLOAD_LEN};
use crate::error::{FrameError, Result};

/// One payload unit: a frame counter, 8 opaque bytes and a checksum field.
///
/// Wire format (12 bytes, big-endian):
/// ```text
/// ┌──────────────┬──────────────┬──────────┐
/// │ Frame number │ Payload      │ CRC      │
/// │ (2B)         │ (8B)         │ (2B)     │
/// └──────────────┴──────────────┴──────────┘
/// ```
///
/// The CRC is carried as-is; nothing here computes or checks it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Payload {
    /// Stream position, wrapping at 65536.
    pub frame_number: u16,
    /// Opaque payload bytes.
    pub data: [u8; PAYLOAD_DATA_LEN],
    /// Checksum field.
    pub crc: u16,
}

impl Payload {
    /// Create a payload with a zero checksum field.
    pub fn new(frame_number: u16, data: [u8; PAYLOAD_DATA_LEN]) -> Self {
        Self {
            frame_number,
            data,
            crc: 0,
        }
    }

    /// Create a payload from a slice that must hold exactly 8 bytes.
    pub fn try_new(frame_number: u16, data: &[u8], crc: u16) -> Result<Self> {
        let data = data
            .try_into()
            .map_err(|_| FrameError::malformed("payload data", PAYLOAD_DATA_LEN, data.len()))?;
        Ok(Self {
            frame_number,
            data,
            crc,
        })
    }

    /// Replace the checksum field.
    pub fn with_crc(mut self, crc: u16) -> Self {
        self.crc = crc;
        self
    }

    /// Append the wire form to `dst`.
    pub fn encode(&self, dst: &mut BytesMut) {
        dst.reserve(PAYLOAD_LEN);
        dst.put_u16(self.frame_number);
        dst.put_slice(&self.data);
        dst.put_u16(self.crc);
    }

    /// Serialize to the 12-byte wire form.
    pub fn pack(&self) -> Bytes {
        let mut buf = BytesMut::with_capacity(PAYLOAD_LEN);
        self.encode(&mut buf);
        buf.freeze()
    }

    /// Parse the 12-byte wire form.
    pub fn unpack(data: &[u8]) -> Result<Self> {
        if data.len() != PAYLOAD_LEN {
            return Err(FrameError::malformed("payload", PAYLOAD_LEN, data.len()));
        }
        let mut src = data;
        Ok(Self::read_from(&mut src))
    }

    /// Read a payload from a buffer already known to hold at least 12 bytes.
    pub(crate) fn read_from(src: &mut impl Buf) -> Self {
        let frame_number = src.get_u16();
        let mut data = [0u8; PAYLOAD_DATA_LEN];
        src.copy_to_slice(&mut data);
        let crc = src.get_u16();
        Self {
            frame_number,
            data,
            crc,
        }
    }
}

impl fmt::Display for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "M17[{}]: {}", self.frame_number, HexGroups(&self.data))
    }
}

/// Lowercase hex in space-separated 4-byte groups.
pub(crate) struct HexGroups<'a>(pub(crate) &'a [u8]);

impl fmt::Display for HexGroups<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, group) in self.0.chunks(4).enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            for byte in group {
                write!(f, "{byte:02x}")?;
            }
        }
        Ok(())
    }
}
