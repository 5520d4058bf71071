//! `tokio-util` codecs for fixed-size M17 frames.
//!
//! These let a transport wrap a byte stream (`FramedRead`/`FramedWrite`) or a
//! datagram socket (`UdpFramed`) without re-implementing the frame layouts.

use bytes::BytesMut;
use tokio_util::codec::{Decoder, Encoder};

use crate::consts::{IP_FRAME_LEN, MAGIC, REGULAR_FRAME_LEN};
use crate::error::{FrameError, Result};
use crate::ip::IpFrame;
use crate::regular::RegularFrame;

/// Decodes and encodes back-to-back 18-byte RF frames.
#[derive(Debug, Clone, Copy, Default)]
pub struct RegularFrameCodec;

impl Decoder for RegularFrameCodec {
    type Item = RegularFrame;
    type Error = FrameError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<RegularFrame>> {
        if src.len() < REGULAR_FRAME_LEN {
            src.reserve(REGULAR_FRAME_LEN - src.len());
            return Ok(None);
        }
        let mut frame = src.split_to(REGULAR_FRAME_LEN);
        Ok(Some(RegularFrame::read_from(&mut frame)))
    }
}

impl Encoder<RegularFrame> for RegularFrameCodec {
    type Error = FrameError;

    fn encode(&mut self, item: RegularFrame, dst: &mut BytesMut) -> Result<()> {
        item.encode(dst);
        Ok(())
    }
}

/// Decodes and encodes 46-byte IP frames, rejecting foreign traffic early.
#[derive(Debug, Clone, Copy, Default)]
pub struct IpFrameCodec;

impl Decoder for IpFrameCodec {
    type Item = IpFrame;
    type Error = FrameError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<IpFrame>> {
        if src.len() < MAGIC.len() {
            return Ok(None);
        }
        if !IpFrame::is_m17(src) {
            let mut found = [0u8; 4];
            found.copy_from_slice(&src[..MAGIC.len()]);
            return Err(FrameError::InvalidMagic { found });
        }
        if src.len() < IP_FRAME_LEN {
            src.reserve(IP_FRAME_LEN - src.len());
            return Ok(None);
        }
        let mut frame = src.split_to(IP_FRAME_LEN);
        IpFrame::read_from(&mut frame).map(Some)
    }
}

impl Encoder<IpFrame> for IpFrameCodec {
    type Error = FrameError;

    fn encode(&mut self, item: IpFrame, dst: &mut BytesMut) -> Result<()> {
        item.encode(dst);
        Ok(())
    }
}
