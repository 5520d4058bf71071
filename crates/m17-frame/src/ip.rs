use std::fmt;

use bytes::{Buf, BufMut, Bytes, BytesMut};

use crate::consts::{IP_FRAME_LEN, MAGIC};
use crate::error::{FrameError, Result};
use crate::lich::LichFrame;
use crate::payload::{HexGroups, Payload};

/// An IP frame: the whole LICH travels with every payload unit.
///
/// Wire format (46 bytes):
/// ```text
/// ┌──────────┬───────────┬──────────────┬──────────────┐
/// │ Magic    │ Stream ID │ LICH         │ Payload      │
/// │ "M17 "   │ (2B)      │ (28B)        │ (12B)        │
/// └──────────┴───────────┴──────────────┴──────────────┘
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IpFrame {
    /// Identifies one logical stream for its whole duration.
    pub stream_id: u16,
    pub lich: LichFrame,
    pub payload: Payload,
}

impl IpFrame {
    /// Create an IP frame.
    pub fn new(stream_id: u16, lich: LichFrame, payload: Payload) -> Self {
        Self {
            stream_id,
            lich,
            payload,
        }
    }

    /// Returns true if `data` opens with the IP frame marker.
    ///
    /// Only the prefix is inspected; use [`IpFrame::unpack`] to validate the rest.
    pub fn is_m17(data: &[u8]) -> bool {
        data.starts_with(&MAGIC)
    }

    /// Append the wire form to `dst`.
    pub fn encode(&self, dst: &mut BytesMut) {
        dst.reserve(IP_FRAME_LEN);
        dst.put_slice(&MAGIC);
        dst.put_u16(self.stream_id);
        self.lich.encode(dst);
        self.payload.encode(dst);
    }

    /// Serialize to the 46-byte wire form.
    pub fn pack(&self) -> Bytes {
        let mut buf = BytesMut::with_capacity(IP_FRAME_LEN);
        self.encode(&mut buf);
        buf.freeze()
    }

    /// Parse the 46-byte wire form.
    pub fn unpack(data: &[u8]) -> Result<Self> {
        if data.len() != IP_FRAME_LEN {
            return Err(FrameError::malformed("IP frame", IP_FRAME_LEN, data.len()));
        }
        let mut src = data;
        Self::read_from(&mut src)
    }

    pub(crate) fn read_from(src: &mut impl Buf) -> Result<Self> {
        let mut magic = [0u8; 4];
        src.copy_to_slice(&mut magic);
        if magic != MAGIC {
            return Err(FrameError::InvalidMagic { found: magic });
        }
        let stream_id = src.get_u16();
        let lich = LichFrame::read_from(src)?;
        let payload = Payload::read_from(src);
        Ok(Self {
            stream_id,
            lich,
            payload,
        })
    }
}

impl fmt::Display for IpFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "SID: {:04x}", self.stream_id)?;
        writeln!(
            f,
            "LICH: {} =[ {} ]> {}",
            self.lich.src.callsign(),
            self.lich.stream_type,
            self.lich.dst.callsign()
        )?;
        write!(
            f,
            "M17[ {} ]: {}",
            self.payload.frame_number,
            HexGroups(&self.payload.data)
        )
    }
}
