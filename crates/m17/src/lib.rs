//! Wire-level building blocks of the M17 digital voice protocol.
//!
//! # Crate Structure
//!
//! - [`address`] — Callsign to 48-bit address codec
//! - [`frame`] — Payload, LICH, RF and IP frames, framing and LICH reassembly
//! - `logging` — `tracing-subscriber` setup for applications (behind `logging` feature)
//!
//! Audio, voice coding, sockets and process orchestration live outside this
//! crate and talk to it through the byte layouts in [`frame`].

/// Re-export address types.
pub mod address {
    pub use m17_address::*;
}

/// Re-export frame types.
pub mod frame {
    pub use m17_frame::*;
}

#[cfg(feature = "logging")]
pub mod logging;

pub use m17_address::Address;
pub use m17_frame::{IpFrame, IpFramer, LichFrame, Payload, RegularFrame, RfFramer};
