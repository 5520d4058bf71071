use std::fmt;

use bytes::{Buf, BufMut, Bytes, BytesMut};
use m17_address::{Address, ADDRESS_LEN};

use crate::consts::{LICH_CHUNK_COUNT, LICH_CHUNK_LEN, LICH_LEN, NONCE_LEN};
use crate::error::{FrameError, Result};

/// The 16-bit stream type field of the LICH.
///
/// Bits are numbered from the least-significant end:
/// ```text
/// bit  0      stream (1) / packet (0)
/// bit  1      carries data
/// bit  2      carries voice
/// bit  3      not Codec2
/// bit  4      not 3200 bps
/// bits 5-6    encryption type
/// bits 7-8    encryption subtype
/// bits 9-15   reserved
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct StreamType(pub u16);

impl StreamType {
    /// Codec2 3200 bps voice stream.
    pub const CODEC2_3200_VOICE: StreamType = StreamType(0b0_0101);

    fn bit(self, n: u16) -> bool {
        self.0 & (1 << n) != 0
    }

    fn field(self, shift: u16, width: u16) -> u16 {
        (self.0 >> shift) & ((1 << width) - 1)
    }

    pub fn is_stream(self) -> bool {
        self.bit(0)
    }

    pub fn has_data(self) -> bool {
        self.bit(1)
    }

    pub fn has_voice(self) -> bool {
        self.bit(2)
    }

    pub fn non_codec2(self) -> bool {
        self.bit(3)
    }

    pub fn non_3200bps(self) -> bool {
        self.bit(4)
    }

    pub fn enc_type(self) -> u8 {
        self.field(5, 2) as u8
    }

    pub fn enc_subtype(self) -> u8 {
        self.field(7, 2) as u8
    }

    pub fn reserved(self) -> u8 {
        self.field(9, 7) as u8
    }
}

impl From<u16> for StreamType {
    fn from(value: u16) -> Self {
        Self(value)
    }
}

impl From<StreamType> for u16 {
    fn from(value: StreamType) -> Self {
        value.0
    }
}

impl fmt::Display for StreamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The link information channel: who is talking to whom, and how.
///
/// Wire format (28 bytes, big-endian):
/// ```text
/// ┌──────────┬──────────┬─────────────┬──────────────┐
/// │ Dst (6B) │ Src (6B) │ Stream type │ Nonce (14B)  │
/// │          │          │ (2B)        │              │
/// └──────────┴──────────┴─────────────┴──────────────┘
/// ```
///
/// On RF the packed form is spread over five frames as chunks of
/// 6, 6, 6, 6 and 4 bytes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LichFrame {
    pub dst: Address,
    pub src: Address,
    pub stream_type: StreamType,
    /// Reserved for encryption; carried opaquely.
    pub nonce: [u8; NONCE_LEN],
}

impl LichFrame {
    /// Create a LICH.
    pub fn new(
        dst: Address,
        src: Address,
        stream_type: impl Into<StreamType>,
        nonce: [u8; NONCE_LEN],
    ) -> Self {
        Self {
            dst,
            src,
            stream_type: stream_type.into(),
            nonce,
        }
    }

    /// Create a LICH from a nonce slice that must hold exactly 14 bytes.
    pub fn try_new(
        dst: Address,
        src: Address,
        stream_type: impl Into<StreamType>,
        nonce: &[u8],
    ) -> Result<Self> {
        let nonce = nonce
            .try_into()
            .map_err(|_| FrameError::malformed("LICH nonce", NONCE_LEN, nonce.len()))?;
        Ok(Self::new(dst, src, stream_type, nonce))
    }

    /// Size-only check; nothing else distinguishes a LICH on the wire.
    pub fn is_lich(data: &[u8]) -> bool {
        data.len() == LICH_LEN
    }

    /// Append the wire form to `dst`.
    pub fn encode(&self, dst: &mut BytesMut) {
        dst.reserve(LICH_LEN);
        dst.put_slice(&self.dst.to_bytes());
        dst.put_slice(&self.src.to_bytes());
        dst.put_u16(self.stream_type.0);
        dst.put_slice(&self.nonce);
    }

    /// Serialize to the 28-byte wire form.
    pub fn pack(&self) -> Bytes {
        let mut buf = BytesMut::with_capacity(LICH_LEN);
        self.encode(&mut buf);
        buf.freeze()
    }

    /// Parse the 28-byte wire form.
    pub fn unpack(data: &[u8]) -> Result<Self> {
        if data.len() != LICH_LEN {
            return Err(FrameError::malformed("LICH", LICH_LEN, data.len()));
        }
        let mut src = data;
        Self::read_from(&mut src)
    }

    /// Read a LICH from a buffer already known to hold at least 28 bytes.
    pub(crate) fn read_from(src: &mut impl Buf) -> Result<Self> {
        let mut addr = [0u8; ADDRESS_LEN];
        src.copy_to_slice(&mut addr);
        let dst = Address::from_array(addr)?;
        src.copy_to_slice(&mut addr);
        let source = Address::from_array(addr)?;
        let stream_type = StreamType(src.get_u16());
        let mut nonce = [0u8; NONCE_LEN];
        src.copy_to_slice(&mut nonce);
        Ok(Self {
            dst,
            src: source,
            stream_type,
            nonce,
        })
    }

    /// The packed LICH split into its five RF chunks (6, 6, 6, 6 and 4 bytes).
    pub fn chunks(&self) -> Vec<Bytes> {
        let packed = self.pack();
        (0..LICH_LEN)
            .step_by(LICH_CHUNK_LEN)
            .map(|start| packed.slice(start..(start + LICH_CHUNK_LEN).min(LICH_LEN)))
            .collect()
    }

    /// The chunk an RF frame carries at `index` (taken modulo 5).
    ///
    /// The short final chunk is zero-padded to the 6-byte slot.
    pub fn chunk(&self, index: usize) -> [u8; LICH_CHUNK_LEN] {
        let packed = self.pack();
        let start = (index % LICH_CHUNK_COUNT) * LICH_CHUNK_LEN;
        let end = (start + LICH_CHUNK_LEN).min(LICH_LEN);
        let mut out = [0u8; LICH_CHUNK_LEN];
        out[..end - start].copy_from_slice(&packed[start..end]);
        out
    }
}

impl fmt::Display for LichFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "LICH: {} =[{}]> {}",
            self.src.callsign(),
            self.stream_type,
            self.dst.callsign()
        )
    }
}

/// Where an RF frame gets its LICH chunk from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LichSource {
    /// A chunk taken verbatim, e.g. from a received frame.
    Chunk([u8; LICH_CHUNK_LEN]),
    /// The full LICH; the frame number selects the chunk.
    Full(LichFrame),
}

impl LichSource {
    /// Resolve the chunk carried by the frame numbered `frame_number`.
    pub fn chunk_for(&self, frame_number: u16) -> [u8; LICH_CHUNK_LEN] {
        match self {
            LichSource::Chunk(chunk) => *chunk,
            LichSource::Full(lich) => lich.chunk(usize::from(frame_number)),
        }
    }
}

impl From<LichFrame> for LichSource {
    fn from(value: LichFrame) -> Self {
        LichSource::Full(value)
    }
}

impl From<[u8; LICH_CHUNK_LEN]> for LichSource {
    fn from(value: [u8; LICH_CHUNK_LEN]) -> Self {
        LichSource::Chunk(value)
    }
}

impl TryFrom<&[u8]> for LichSource {
    type Error = FrameError;

    /// 6 bytes are a chunk, 28 bytes a packed LICH; anything else is rejected.
    fn try_from(value: &[u8]) -> Result<Self> {
        match value.len() {
            LICH_CHUNK_LEN => {
                let mut chunk = [0u8; LICH_CHUNK_LEN];
                chunk.copy_from_slice(value);
                Ok(LichSource::Chunk(chunk))
            }
            LICH_LEN => Ok(LichSource::Full(LichFrame::unpack(value)?)),
            len => Err(FrameError::UnsupportedLichSource { len }),
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn sample_lich() -> LichFrame {
        LichFrame::new(
            Address::from_callsign("SP5WWP").unwrap(),
            Address::from_callsign("W2FBI").unwrap(),
            StreamType::CODEC2_3200_VOICE,
            *b"nonce-14-bytes",
        )
    }

    #[test]
    fn layout_matches_fields() {
        let lich = sample_lich();
        let packed = lich.pack();
        assert_eq!(packed.len(), LICH_LEN);
        assert_eq!(&packed[0..6], &lich.dst.to_bytes());
        assert_eq!(&packed[6..12], &[0x00, 0x00, 0x01, 0x61, 0xAE, 0x1F]);
        assert_eq!(&packed[12..14], &[0x00, 0x05]);
        assert_eq!(&packed[14..], b"nonce-14-bytes");
    }

    #[test]
    fn unpack_inverts_pack() {
        let lich = sample_lich();
        assert_eq!(LichFrame::unpack(&lich.pack()).unwrap(), lich);

        for nonce in [[0x00; NONCE_LEN], [0xFF; NONCE_LEN]] {
            let lich = LichFrame { nonce, ..sample_lich() };
            assert_eq!(LichFrame::unpack(&lich.pack()).unwrap(), lich);
        }
    }

    #[test]
    fn unpack_rejects_wrong_length() {
        assert!(matches!(
            LichFrame::unpack(&[0u8; 27]),
            Err(FrameError::MalformedFrame { expected: 28, .. })
        ));
    }

    #[test]
    fn unpack_rejects_out_of_range_address() {
        let mut raw = sample_lich().pack().to_vec();
        raw[0..6].copy_from_slice(&[0xFF; 6]);
        assert!(matches!(
            LichFrame::unpack(&raw),
            Err(FrameError::Address(_))
        ));
    }

    #[test]
    fn try_new_checks_nonce_length() {
        let lich = sample_lich();
        let err = LichFrame::try_new(lich.dst.clone(), lich.src.clone(), 5u16, &[0u8; 13])
            .unwrap_err();
        assert!(matches!(
            err,
            FrameError::MalformedFrame {
                expected: 14,
                actual: 13,
                ..
            }
        ));
        let ok = LichFrame::try_new(lich.dst.clone(), lich.src.clone(), 5u16, &lich.nonce);
        assert_eq!(ok.unwrap(), lich);
    }

    #[test]
    fn chunks_split_six_six_six_six_four() {
        let lich = sample_lich();
        let chunks = lich.chunks();
        let sizes: Vec<usize> = chunks.iter().map(|c| c.len()).collect();
        assert_eq!(sizes, vec![6, 6, 6, 6, 4]);
        assert_eq!(chunks.concat(), lich.pack().to_vec());
    }

    #[test]
    fn chunk_pads_final_piece() {
        let lich = sample_lich();
        let packed = lich.pack();
        assert_eq!(&lich.chunk(0), &packed[0..6]);
        assert_eq!(&lich.chunk(3), &packed[18..24]);
        let last = lich.chunk(4);
        assert_eq!(&last[..4], &packed[24..28]);
        assert_eq!(&last[4..], &[0, 0]);
        assert_eq!(lich.chunk(7), lich.chunk(2));
    }

    #[test]
    fn is_lich_checks_size() {
        assert!(LichFrame::is_lich(&sample_lich().pack()));
        assert!(!LichFrame::is_lich(&[0u8; 18]));
    }

    #[test]
    fn stream_type_bits() {
        let voice = StreamType::CODEC2_3200_VOICE;
        assert!(voice.is_stream());
        assert!(!voice.has_data());
        assert!(voice.has_voice());
        assert!(!voice.non_codec2());
        assert!(!voice.non_3200bps());
        assert_eq!(voice.enc_type(), 0);

        let st = StreamType(0b1010101_10_11_0_0_0_1_0);
        assert!(st.has_data());
        assert_eq!(st.enc_type(), 0b11);
        assert_eq!(st.enc_subtype(), 0b10);
        assert_eq!(st.reserved(), 0b1010101);
    }

    #[test]
    fn lich_source_from_slice() {
        let lich = sample_lich();
        assert_eq!(
            LichSource::try_from(&lich.pack()[..]).unwrap(),
            LichSource::Full(lich.clone())
        );
        assert_eq!(
            LichSource::try_from(&[1u8, 2, 3, 4, 5, 6][..]).unwrap(),
            LichSource::Chunk([1, 2, 3, 4, 5, 6])
        );
        assert!(matches!(
            LichSource::try_from(&[0u8; 4][..]),
            Err(FrameError::UnsupportedLichSource { len: 4 })
        ));
    }

    #[test]
    fn display_names_stations() {
        assert_eq!(sample_lich().to_string(), "LICH: W2FBI =[5]> SP5WWP");
    }
}
