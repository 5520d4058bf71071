use std::fmt;
use std::str::FromStr;

use crate::error::{AddressError, Result};

/// The 40-symbol callsign alphabet. A symbol's index is its base-40 digit.
pub const CALLSIGN_ALPHABET: &[u8; 40] = b" ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789-/.";

/// Number of base-40 digits an address can hold.
pub const MAX_CALLSIGN_LEN: usize = 9;

/// First value that does not decode to a callsign (40^9).
pub const MAX_ADDRESS: u64 = 40u64.pow(MAX_CALLSIGN_LEN as u32);

/// Size of an address on the wire.
pub const ADDRESS_LEN: usize = 6;

const RADIX: u64 = CALLSIGN_ALPHABET.len() as u64;

fn digit_of(ch: char) -> Option<u64> {
    let upper = ch.to_ascii_uppercase();
    if !upper.is_ascii() {
        return None;
    }
    CALLSIGN_ALPHABET
        .iter()
        .position(|&symbol| symbol == upper as u8)
        .map(|idx| idx as u64)
}

/// Encode a callsign into its numeric address.
///
/// The first character is the least-significant digit, so the callsign is
/// folded from its last character backwards. Lowercase letters are accepted.
pub fn encode(callsign: &str) -> Result<u64> {
    let mut value = 0u64;
    for ch in callsign.chars().rev() {
        let digit = digit_of(ch).ok_or_else(|| AddressError::InvalidCallsign {
            callsign: callsign.to_owned(),
            ch,
        })?;
        value = value * RADIX + digit;
        if value >= MAX_ADDRESS {
            return Err(AddressError::AddressOverflow {
                value,
                max: MAX_ADDRESS,
            });
        }
    }
    Ok(value)
}

/// Decode a numeric address back into its callsign.
///
/// Digits are emitted least-significant first until the value is exhausted,
/// so trailing blanks in the original callsign do not come back.
pub fn decode(addr: u64) -> Result<String> {
    if addr >= MAX_ADDRESS {
        return Err(AddressError::AddressOverflow {
            value: addr,
            max: MAX_ADDRESS,
        });
    }
    Ok(digits_to_callsign(addr))
}

fn digits_to_callsign(mut addr: u64) -> String {
    let mut callsign = String::with_capacity(MAX_CALLSIGN_LEN);
    while addr > 0 {
        callsign.push(CALLSIGN_ALPHABET[(addr % RADIX) as usize] as char);
        addr /= RADIX;
    }
    callsign
}

/// A station address: a callsign together with its 48-bit numeric form.
///
/// Both representations are always in sync. The stored callsign is the
/// canonical (decoded) spelling, upper-cased and without trailing blanks.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "String", into = "String")
)]
pub struct Address {
    addr: u64,
    callsign: String,
}

impl Address {
    /// Build an address from a callsign.
    pub fn from_callsign(callsign: &str) -> Result<Self> {
        let addr = encode(callsign)?;
        Ok(Self {
            addr,
            callsign: digits_to_callsign(addr),
        })
    }

    /// Build an address from its numeric form.
    pub fn from_addr(addr: u64) -> Result<Self> {
        let callsign = decode(addr)?;
        Ok(Self { addr, callsign })
    }

    /// Build an address from its 6-byte big-endian wire form.
    pub fn from_array(bytes: [u8; ADDRESS_LEN]) -> Result<Self> {
        let mut wide = [0u8; 8];
        wide[8 - ADDRESS_LEN..].copy_from_slice(&bytes);
        Self::from_addr(u64::from_be_bytes(wide))
    }

    /// Build an address from a byte slice that must be exactly 6 bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let array: [u8; ADDRESS_LEN] =
            bytes.try_into().map_err(|_| AddressError::InvalidLength {
                len: bytes.len(),
                expected: ADDRESS_LEN,
            })?;
        Self::from_array(array)
    }

    /// The 6-byte big-endian wire form.
    pub fn to_bytes(&self) -> [u8; ADDRESS_LEN] {
        let wide = self.addr.to_be_bytes();
        let mut out = [0u8; ADDRESS_LEN];
        out.copy_from_slice(&wide[8 - ADDRESS_LEN..]);
        out
    }

    /// Numeric address.
    pub fn addr(&self) -> u64 {
        self.addr
    }

    /// Canonical callsign.
    pub fn callsign(&self) -> &str {
        &self.callsign
    }

    /// Compare against a textual identifier.
    ///
    /// An all-digit string is read as a numeric address; anything else is
    /// compared case-insensitively against the callsign.
    pub fn equals_str(&self, other: &str) -> bool {
        if !other.is_empty() && other.bytes().all(|b| b.is_ascii_digit()) {
            return other.parse::<u64>().is_ok_and(|n| n == self.addr);
        }
        other.eq_ignore_ascii_case(&self.callsign)
    }

    /// `D` followed by digits.
    pub fn is_dmr_id(&self) -> bool {
        is_prefix_then_digits(&self.callsign, "D")
    }

    /// Any known DMR talkgroup convention.
    pub fn is_dmr_talkgroup(&self) -> bool {
        self.is_brandmeister_tg()
    }

    /// `BM` followed by digits.
    pub fn is_brandmeister_tg(&self) -> bool {
        is_prefix_then_digits(&self.callsign, "BM")
    }

    /// D-STAR reflectors are named `REFnnn`.
    pub fn is_dstar_reflector(&self) -> bool {
        self.callsign.starts_with("REF")
    }
}

fn is_prefix_then_digits(callsign: &str, prefix: &str) -> bool {
    callsign
        .strip_prefix(prefix)
        .is_some_and(|rest| !rest.is_empty() && rest.bytes().all(|b| b.is_ascii_digit()))
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} == 0x{:06x}", self.callsign, self.addr)
    }
}

impl FromStr for Address {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_callsign(s)
    }
}

impl TryFrom<String> for Address {
    type Error = AddressError;

    fn try_from(value: String) -> Result<Self> {
        Self::from_callsign(&value)
    }
}

impl TryFrom<u64> for Address {
    type Error = AddressError;

    fn try_from(value: u64) -> Result<Self> {
        Self::from_addr(value)
    }
}

impl From<Address> for String {
    fn from(value: Address) -> Self {
        value.callsign
    }
}

impl From<&Address> for u64 {
    fn from(value: &Address) -> Self {
        value.addr
    }
}

impl PartialEq<u64> for Address {
    fn eq(&self, other: &u64) -> bool {
        self.addr == *other
    }
}

impl PartialEq<str> for Address {
    fn eq(&self, other: &str) -> bool {
        self.equals_str(other)
    }
}

impl PartialEq<&str> for Address {
    fn eq(&self, other: &&str) -> bool {
        self.equals_str(other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn w2fbi() -> Address {
        Address::from_callsign("W2FBI").unwrap()
    }

    #[test]
    fn encodes_known_callsign() {
        assert_eq!(encode("W2FBI").unwrap(), 23_178_783);
        assert_eq!(w2fbi().addr(), 0x0161_AE1F);
    }

    #[test]
    fn decodes_known_address() {
        assert_eq!(decode(23_178_783).unwrap(), "W2FBI");
        assert_eq!(Address::from_addr(23_178_783).unwrap().callsign(), "W2FBI");
    }

    #[test]
    fn byte_form_is_big_endian() {
        assert_eq!(w2fbi().to_bytes(), [0x00, 0x00, 0x01, 0x61, 0xAE, 0x1F]);
        let back = Address::from_array([0x00, 0x00, 0x01, 0x61, 0xAE, 0x1F]).unwrap();
        assert_eq!(back, w2fbi());
    }

    #[test]
    fn from_bytes_requires_six_bytes() {
        let err = Address::from_bytes(&[0x01, 0x02, 0x03]).unwrap_err();
        assert_eq!(
            err,
            AddressError::InvalidLength {
                len: 3,
                expected: ADDRESS_LEN
            }
        );
    }

    #[test]
    fn equality_across_representations() {
        let me = w2fbi();
        assert_eq!(me, "W2FBI");
        assert_eq!(me, "w2fbi");
        assert_eq!(me, "23178783");
        assert_eq!(me, 23_178_783u64);
        assert_eq!(me, Address::from_addr(23_178_783).unwrap());
        assert_ne!(me, Address::from_addr(23_178_784).unwrap());
        assert!(!me.equals_str("SP5WWP"));
        assert!(!me.equals_str("23178784"));
    }

    #[test]
    fn lowercase_input_is_canonicalised() {
        let addr = Address::from_callsign("sp5wwp").unwrap();
        assert_eq!(addr.callsign(), "SP5WWP");
    }

    #[test]
    fn interior_blank_survives_roundtrip() {
        let reflector = Address::from_callsign("XLX307 D").unwrap();
        assert_eq!(reflector.callsign(), "XLX307 D");
        assert_eq!(decode(reflector.addr()).unwrap(), "XLX307 D");
    }

    #[test]
    fn trailing_blanks_are_dropped() {
        let addr = Address::from_callsign("AB  ").unwrap();
        assert_eq!(addr.callsign(), "AB");
        assert_eq!(addr, Address::from_callsign("AB").unwrap());
    }

    #[test]
    fn empty_callsign_is_zero() {
        assert_eq!(encode("").unwrap(), 0);
        assert_eq!(decode(0).unwrap(), "");
    }

    #[test]
    fn nine_symbols_fit() {
        let max = encode(".........").unwrap();
        assert_eq!(max, MAX_ADDRESS - 1);
        assert_eq!(decode(max).unwrap(), ".........");
    }

    #[test]
    fn ten_symbols_overflow() {
        let err = encode("ABCDEFGHIJ").unwrap_err();
        assert!(matches!(err, AddressError::AddressOverflow { .. }));
    }

    #[test]
    fn ten_symbols_with_trailing_blank_fit() {
        assert_eq!(
            encode("ABCDEFGHI ").unwrap(),
            encode("ABCDEFGHI").unwrap()
        );
    }

    #[test]
    fn invalid_character_rejected() {
        let err = encode("W2FBI!").unwrap_err();
        assert_eq!(
            err,
            AddressError::InvalidCallsign {
                callsign: "W2FBI!".to_owned(),
                ch: '!'
            }
        );
        assert!(matches!(
            encode("Ä1").unwrap_err(),
            AddressError::InvalidCallsign { ch: 'Ä', .. }
        ));
    }

    #[test]
    fn decode_rejects_out_of_range() {
        assert!(matches!(
            decode(MAX_ADDRESS),
            Err(AddressError::AddressOverflow { .. })
        ));
        assert!(Address::from_array([0xFF; ADDRESS_LEN]).is_err());
    }

    #[test]
    fn display_shows_callsign_and_hex() {
        assert_eq!(w2fbi().to_string(), "W2FBI == 0x161ae1f");
    }

    #[test]
    fn parses_from_str() {
        let parsed: Address = "W2FBI".parse().unwrap();
        assert_eq!(parsed, w2fbi());
    }

    #[test]
    fn classification_predicates() {
        let bm = Address::from_callsign("BM3100").unwrap();
        assert!(bm.is_brandmeister_tg());
        assert!(bm.is_dmr_talkgroup());
        assert!(!bm.is_dmr_id());

        let dmr = Address::from_callsign("D3125404").unwrap();
        assert!(dmr.is_dmr_id());
        assert!(!dmr.is_brandmeister_tg());

        assert!(Address::from_callsign("REF001").unwrap().is_dstar_reflector());
        assert!(!w2fbi().is_dstar_reflector());
        assert!(!Address::from_callsign("BM").unwrap().is_brandmeister_tg());
        assert!(!Address::from_callsign("DL1ABC").unwrap().is_dmr_id());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_uses_callsign_string() {
        let json = serde_json::to_string(&w2fbi()).unwrap();
        assert_eq!(json, "\"W2FBI\"");
        let back: Address = serde_json::from_str("\"w2fbi\"").unwrap();
        assert_eq!(back, w2fbi());
        assert!(serde_json::from_str::<Address>("\"BAD!\"").is_err());
    }
}
