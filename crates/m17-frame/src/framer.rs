//! Slicing an outgoing payload into numbered frames.
//!
//! A [`Framer`] owns the stream's LICH and its frame counter. Each call to
//! [`Framer::payload_stream`] cuts the payload into 8-byte units (zero-padding
//! the last one), numbers them from the counter and wraps each in a frame.
//! [`RfFramer`] embeds one LICH chunk per frame; [`IpFramer`] embeds the
//! whole LICH plus a stream identifier.
//!
//! A framer is single-writer: use one per outbound stream.

use tracing::{debug, trace};

use crate::config::FramerConfig;
use crate::consts::{LICH_CHUNK_COUNT, LICH_CHUNK_LEN, PAYLOAD_DATA_LEN};
use crate::ip::IpFrame;
use crate::lich::LichFrame;
use crate::payload::Payload;
use crate::regular::RegularFrame;

/// Wrapping 16-bit frame counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameCounter(u16);

impl FrameCounter {
    pub fn new(start: u16) -> Self {
        Self(start)
    }

    /// The number the next frame will get.
    pub fn current(&self) -> u16 {
        self.0
    }

    /// Take the current number and advance, wrapping 65535 -> 0.
    pub fn advance(&mut self) -> u16 {
        let number = self.0;
        self.0 = number.wrapping_add(1);
        if self.0 == 0 {
            debug!("frame counter wrapped");
        }
        number
    }
}

/// Cut `payload` into 8-byte units and build one frame per unit.
///
/// Units are numbered from `counter`, which is left pointing past the last one.
pub fn slice_payload<F>(
    payload: &[u8],
    counter: &mut FrameCounter,
    mut build: impl FnMut(Payload) -> F,
) -> Vec<F> {
    payload
        .chunks(PAYLOAD_DATA_LEN)
        .map(|unit| {
            let mut data = [0u8; PAYLOAD_DATA_LEN];
            data[..unit.len()].copy_from_slice(unit);
            build(Payload::new(counter.advance(), data))
        })
        .collect()
}

/// The kind of frame a [`Framer`] produces.
pub trait FrameKind {
    type Frame;

    fn build(&self, lich: &LichFrame, payload: Payload) -> Self::Frame;
}

/// RF framing: each frame carries chunk `frame_number % 5` of the LICH.
#[derive(Debug, Clone)]
pub struct Rf {
    chunks: [[u8; LICH_CHUNK_LEN]; LICH_CHUNK_COUNT],
}

impl Rf {
    fn for_lich(lich: &LichFrame) -> Self {
        Self {
            chunks: std::array::from_fn(|index| lich.chunk(index)),
        }
    }
}

impl FrameKind for Rf {
    type Frame = RegularFrame;

    fn build(&self, _lich: &LichFrame, payload: Payload) -> RegularFrame {
        RegularFrame {
            lich_chunk: self.chunks[usize::from(payload.frame_number) % LICH_CHUNK_COUNT],
            payload,
        }
    }
}

/// IP framing: each frame carries the full LICH and the stream identifier.
#[derive(Debug, Clone, Copy)]
pub struct Ip {
    stream_id: u16,
}

impl FrameKind for Ip {
    type Frame = IpFrame;

    fn build(&self, lich: &LichFrame, payload: Payload) -> IpFrame {
        IpFrame::new(self.stream_id, lich.clone(), payload)
    }
}

/// Turns payload bytes into frames for one outbound stream.
#[derive(Debug, Clone)]
pub struct Framer<K> {
    lich: LichFrame,
    counter: FrameCounter,
    kind: K,
}

/// Produces [`RegularFrame`]s.
pub type RfFramer = Framer<Rf>;

/// Produces [`IpFrame`]s.
pub type IpFramer = Framer<Ip>;

impl Framer<Rf> {
    /// Create an RF framer starting at frame number 0.
    pub fn new(lich: LichFrame) -> Self {
        Self::with_config(lich, FramerConfig::default())
    }

    /// Create an RF framer with explicit configuration.
    pub fn with_config(lich: LichFrame, config: FramerConfig) -> Self {
        debug!(
            src = lich.src.callsign(),
            dst = lich.dst.callsign(),
            first_frame = config.initial_frame_number,
            "rf framer ready"
        );
        Self {
            kind: Rf::for_lich(&lich),
            lich,
            counter: FrameCounter::new(config.initial_frame_number),
        }
    }
}

impl Framer<Ip> {
    /// Create an IP framer with a random stream identifier.
    pub fn new(lich: LichFrame) -> Self {
        Self::with_config(lich, FramerConfig::default())
    }

    /// Create an IP framer with explicit configuration.
    pub fn with_config(lich: LichFrame, config: FramerConfig) -> Self {
        let stream_id = config.stream_id.unwrap_or_else(rand::random);
        debug!(
            src = lich.src.callsign(),
            dst = lich.dst.callsign(),
            stream_id,
            first_frame = config.initial_frame_number,
            "ip framer ready"
        );
        Self {
            lich,
            counter: FrameCounter::new(config.initial_frame_number),
            kind: Ip { stream_id },
        }
    }

    /// The identifier stamped on every frame of this stream.
    pub fn stream_id(&self) -> u16 {
        self.kind.stream_id
    }
}

impl<K: FrameKind> Framer<K> {
    /// Slice `payload` into frames, advancing the frame counter.
    ///
    /// An empty payload produces no frames.
    pub fn payload_stream(&mut self, payload: &[u8]) -> Vec<K::Frame> {
        let first = self.counter.current();
        let lich = &self.lich;
        let kind = &self.kind;
        let frames = slice_payload(payload, &mut self.counter, |unit| kind.build(lich, unit));
        trace!(
            bytes = payload.len(),
            frames = frames.len(),
            first_frame = first,
            "sliced payload"
        );
        frames
    }

    /// The number the next frame will get.
    pub fn frame_number(&self) -> u16 {
        self.counter.current()
    }

    /// The LICH shared by every frame of the stream.
    pub fn lich(&self) -> &LichFrame {
        &self.lich
    }
}
