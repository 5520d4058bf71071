/// Errors that can occur while converting between callsigns and addresses.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AddressError {
    /// The callsign contains a character outside the 40-symbol alphabet.
    #[error("invalid callsign {callsign:?}: character {ch:?} is not in the callsign alphabet")]
    InvalidCallsign { callsign: String, ch: char },

    /// The value does not fit in nine base-40 digits.
    #[error("address overflow ({value} >= {max})")]
    AddressOverflow { value: u64, max: u64 },

    /// A byte-form address was not exactly 6 bytes long.
    #[error("address must be {expected} bytes, got {len}")]
    InvalidLength { len: usize, expected: usize },
}

pub type Result<T> = std::result::Result<T, AddressError>;
