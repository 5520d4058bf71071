/// Controls how a [`Framer`](crate::framer::Framer) numbers and tags its frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FramerConfig {
    /// Frame number given to the first emitted frame.
    pub initial_frame_number: u16,
    /// Stream identifier for IP frames. When `None`, a random one is drawn
    /// once per framer. Ignored by RF framers.
    pub stream_id: Option<u16>,
}

impl FramerConfig {
    /// Use a fixed stream identifier.
    pub fn with_stream_id(mut self, stream_id: u16) -> Self {
        self.stream_id = Some(stream_id);
        self
    }

    /// Start numbering at `frame_number`.
    pub fn with_initial_frame_number(mut self, frame_number: u16) -> Self {
        self.initial_frame_number = frame_number;
        self
    }
}
