use m17_address::AddressError;

/// Errors that can occur while building, encoding or decoding frames.
#[derive(Debug, thiserror::Error)]
pub enum FrameError {
    /// A fixed-width field or record had the wrong number of bytes.
    #[error("malformed {record}: expected {expected} bytes, got {actual}")]
    MalformedFrame {
        record: &'static str,
        expected: usize,
        actual: usize,
    },

    /// An IP frame did not start with the "M17 " marker.
    #[error("invalid IP frame magic {found:02x?} (expected \"M17 \")")]
    InvalidMagic { found: [u8; 4] },

    /// A LICH source was neither a 6-byte chunk nor a full 28-byte LICH.
    #[error("unsupported LICH source ({len} bytes; expected a 6-byte chunk or a 28-byte LICH)")]
    UnsupportedLichSource { len: usize },

    /// No frame in a reassembly window carries LICH chunk 0.
    #[error("no frame in the window carries the first LICH chunk ({frames} frames)")]
    MissingLichStart { frames: usize },

    /// An embedded address could not be decoded.
    #[error("invalid address: {0}")]
    Address(#[from] AddressError),

    /// An I/O error reported by a codec's underlying transport.
    #[error("frame I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl FrameError {
    pub(crate) fn malformed(record: &'static str, expected: usize, actual: usize) -> Self {
        Self::MalformedFrame {
            record,
            expected,
            actual,
        }
    }
}

pub type Result<T> = std::result::Result<T, FrameError>;
