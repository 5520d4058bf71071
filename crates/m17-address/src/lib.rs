//! Callsign addressing for the M17 digital voice protocol.
//!
//! Every M17 station is identified by a 48-bit address derived from its
//! callsign. The callsign is read as a base-40 number whose first character
//! is the least-significant digit:
//!
//! ```text
//! alphabet: ' ' A-Z 0-9 '-' '/' '.'   (index 0..=39)
//! "W2FBI"  -> W + 2*40 + F*40^2 + B*40^3 + I*40^4 = 23178783
//!          -> 00 00 01 61 AE 1F       (6 bytes, most-significant first)
//! ```
//!
//! Only values below 40^9 carry a callsign. Talkgroups and reflectors are
//! ordinary callsigns distinguished by naming convention (see
//! [`Address::is_brandmeister_tg`] and [`Address::is_dstar_reflector`]).

pub mod address;
pub mod error;

pub use address::{
    decode, encode, Address, ADDRESS_LEN, CALLSIGN_ALPHABET, MAX_ADDRESS, MAX_CALLSIGN_LEN,
};
pub use error::{AddressError, Result};
