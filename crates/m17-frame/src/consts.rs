//! Wire constants shared by the frame types and their transport collaborators.
//!
//! Record sizes follow the big-endian layouts documented on each type.

/// Default UDP port for M17 over IP.
pub const DEFAULT_PORT: u16 = 17000;

/// RF synchronization word. Defined for RF transports; never emitted here.
pub const SYNC_WORD: u16 = 0x3243;

/// Marker that opens every IP frame.
pub const MAGIC: [u8; 4] = *b"M17 ";

/// Opaque payload bytes per frame.
pub const PAYLOAD_DATA_LEN: usize = 8;

/// Payload record: frame number (2) + data (8) + crc (2).
pub const PAYLOAD_LEN: usize = 2 + PAYLOAD_DATA_LEN + 2;

/// Nonce bytes carried in the LICH.
pub const NONCE_LEN: usize = 14;

/// LICH record: dst (6) + src (6) + stream type (2) + nonce (14).
pub const LICH_LEN: usize = 6 + 6 + 2 + NONCE_LEN;

/// Bytes of LICH carried by each RF frame.
pub const LICH_CHUNK_LEN: usize = 6;

/// Number of chunks the LICH is spread over (four full, one short).
pub const LICH_CHUNK_COUNT: usize = LICH_LEN.div_ceil(LICH_CHUNK_LEN);

/// RF frame: LICH chunk (6) + payload (12).
pub const REGULAR_FRAME_LEN: usize = LICH_CHUNK_LEN + PAYLOAD_LEN;

/// IP frame: magic (4) + stream id (2) + LICH (28) + payload (12).
pub const IP_FRAME_LEN: usize = MAGIC.len() + 2 + LICH_LEN + PAYLOAD_LEN;

/// Returns true if `len` is the size of a serialized RF frame.
pub fn is_regular_frame_len(len: usize) -> bool {
    len == REGULAR_FRAME_LEN
}
