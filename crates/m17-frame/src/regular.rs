use std::fmt;

use bytes::{Buf, BufMut, Bytes, BytesMut};

use crate::consts::{is_regular_frame_len, LICH_CHUNK_COUNT, LICH_CHUNK_LEN, REGULAR_FRAME_LEN};
use crate::error::{FrameError, Result};
use crate::lich::LichSource;
use crate::payload::{HexGroups, Payload};

/// An RF frame: one LICH chunk plus one payload unit.
///
/// Wire format (18 bytes):
/// ```text
/// ┌────────────────┬──────────────────┐
/// │ LICH chunk     │ Payload          │
/// │ (6B)           │ (12B)            │
/// └────────────────┴──────────────────┘
/// ```
///
/// The chunk is implicitly chunk `frame_number % 5` of the stream's LICH.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RegularFrame {
    pub lich_chunk: [u8; LICH_CHUNK_LEN],
    pub payload: Payload,
}

impl RegularFrame {
    /// Build a frame, taking the chunk from `lich` according to the frame number.
    pub fn new(lich: impl Into<LichSource>, payload: Payload) -> Self {
        let lich_chunk = lich.into().chunk_for(payload.frame_number);
        Self {
            lich_chunk,
            payload,
        }
    }

    /// Build a frame from raw LICH bytes: a 6-byte chunk or a packed 28-byte LICH.
    pub fn from_raw_lich(lich: &[u8], payload: Payload) -> Result<Self> {
        Ok(Self::new(LichSource::try_from(lich)?, payload))
    }

    /// Which of the five LICH chunks this frame carries.
    pub fn chunk_index(&self) -> usize {
        usize::from(self.payload.frame_number) % LICH_CHUNK_COUNT
    }

    /// Append the wire form to `dst`.
    pub fn encode(&self, dst: &mut BytesMut) {
        dst.reserve(REGULAR_FRAME_LEN);
        dst.put_slice(&self.lich_chunk);
        self.payload.encode(dst);
    }

    /// Serialize to the 18-byte wire form.
    pub fn pack(&self) -> Bytes {
        let mut buf = BytesMut::with_capacity(REGULAR_FRAME_LEN);
        self.encode(&mut buf);
        buf.freeze()
    }

    /// Parse the 18-byte wire form.
    pub fn unpack(data: &[u8]) -> Result<Self> {
        if !is_regular_frame_len(data.len()) {
            return Err(FrameError::malformed(
                "regular frame",
                REGULAR_FRAME_LEN,
                data.len(),
            ));
        }
        let mut src = data;
        Ok(Self::read_from(&mut src))
    }

    pub(crate) fn read_from(src: &mut impl Buf) -> Self {
        let mut lich_chunk = [0u8; LICH_CHUNK_LEN];
        src.copy_to_slice(&mut lich_chunk);
        let payload = Payload::read_from(src);
        Self {
            lich_chunk,
            payload,
        }
    }
}

impl fmt::Display for RegularFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "M17[{}]: {}",
            self.payload.frame_number,
            HexGroups(&self.payload.data)
        )
    }
}
