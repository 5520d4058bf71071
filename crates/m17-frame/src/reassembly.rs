//! Rebuilding a LICH from the chunks spread over a window of RF frames.
//!
//! The window must hold exactly one frame per chunk position, already in
//! cyclic order. Nothing here detects loss, duplication or reordering: the
//! caller is expected to check frame numbers before asking for a LICH.

use bytes::{Bytes, BytesMut};
use tracing::{debug, trace};

use crate::consts::{LICH_CHUNK_COUNT, LICH_CHUNK_LEN, LICH_LEN};
use crate::error::{FrameError, Result};
use crate::lich::LichFrame;
use crate::regular::RegularFrame;

/// Concatenate the LICH chunks of serialized RF frames, starting at chunk 0.
///
/// The window is rotated so the first frame whose number is a multiple of 5
/// leads; the relative order of the others is kept. The result is cut to the
/// 28-byte LICH size, dropping the padding of the short final chunk.
pub fn recover_lich_bytes<T: AsRef<[u8]>>(frames: &[T]) -> Result<Bytes> {
    let decoded = frames
        .iter()
        .map(|raw| RegularFrame::unpack(raw.as_ref()))
        .collect::<Result<Vec<_>>>()?;
    recover_lich_bytes_from_frames(&decoded)
}

/// Like [`recover_lich_bytes`] for frames that are already decoded.
pub fn recover_lich_bytes_from_frames(frames: &[RegularFrame]) -> Result<Bytes> {
    let start = frames
        .iter()
        .position(|frame| usize::from(frame.payload.frame_number) % LICH_CHUNK_COUNT == 0)
        .ok_or(FrameError::MissingLichStart {
            frames: frames.len(),
        })?;
    trace!(
        frames = frames.len(),
        start,
        first_frame = frames[start].payload.frame_number,
        "located first LICH chunk"
    );

    let mut lich = BytesMut::with_capacity(frames.len() * LICH_CHUNK_LEN);
    for frame in frames[start..].iter().chain(&frames[..start]) {
        lich.extend_from_slice(&frame.lich_chunk);
    }
    lich.truncate(LICH_LEN);
    Ok(lich.freeze())
}

/// Recover and decode the LICH carried by a window of serialized RF frames.
pub fn recover_lich<T: AsRef<[u8]>>(frames: &[T]) -> Result<LichFrame> {
    let raw = recover_lich_bytes(frames)?;
    let lich = LichFrame::unpack(&raw)?;
    debug!(
        src = lich.src.callsign(),
        dst = lich.dst.callsign(),
        stream_type = lich.stream_type.0,
        "recovered LICH"
    );
    Ok(lich)
}
