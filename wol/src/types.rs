use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// A six-octet IEEE EUI-48 hardware address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MacAddr([u8; 6]);

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ParseMacError {
    /// Not one of the three supported notations.
    #[error("invalid length")]
    InvalidLength,

    /// A separator was missing, inconsistent, or unsupported.
    #[error("expected a separator at position {0}")]
    ExpectedSeparator(usize),

    /// A character outside `[0-9a-fA-F]` where a hex digit belongs.
    #[error("invalid hex digit at position {0}")]
    InvalidDigit(usize),
}

impl MacAddr {
    pub const fn new(octets: [u8; 6]) -> Self {
        Self(octets)
    }

    pub const fn octets(&self) -> [u8; 6] {
        self.0
    }
}

impl FromStr for MacAddr {
    type Err = ParseMacError;

    /// Parses the colon, hyphen, or dot notation of an EUI-48 address:
    /// `aa:bb:cc:dd:ee:ff`, `aa-bb-cc-dd-ee-ff`, or `aabb.ccdd.eeff`.
    /// The separator must be used consistently.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = s.as_bytes();

        // The notation is fixed-width: 17 characters with a separator
        // every third position, or 14 characters with a dot every fifth.
        let (sep, every) = match bytes.len() {
            17 => match bytes[2] {
                b':' | b'-' => (bytes[2], 3),
                _ => return Err(ParseMacError::ExpectedSeparator(2)),
            },
            14 => (b'.', 5),
            _ => return Err(ParseMacError::InvalidLength),
        };

        let mut octets = [0u8; 6];
        let mut nibbles = 0;
        for (i, &b) in bytes.iter().enumerate() {
            if (i + 1) % every == 0 {
                if b != sep {
                    return Err(ParseMacError::ExpectedSeparator(i));
                }
                continue;
            }
            let digit = (b as char)
                .to_digit(16)
                .ok_or(ParseMacError::InvalidDigit(i))? as u8;
            octets[nibbles / 2] = octets[nibbles / 2] << 4 | digit;
            nibbles += 1;
        }

        Ok(Self(octets))
    }
}

impl fmt::Display for MacAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let m = self.0;
        write!(
            f,
            "{:02x}:{:02x}:{:02x}:{:02x}:{:02x}:{:02x}",
            m[0], m[1], m[2], m[3], m[4], m[5]
        )
    }
}

/// A SecureOn wake password, carried as the tail of a magic packet.
/// The wire format allows four or six bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Password {
    bytes: [u8; 6],
    len: usize,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ParsePasswordError {
    /// Only 4-byte and 6-byte passwords exist on the wire.
    #[error("invalid password length")]
    InvalidLength,

    /// A character outside `[0-9a-fA-F]` where a hex digit belongs.
    #[error("invalid hex digit at position {0}")]
    InvalidDigit(usize),
}

impl Password {
    pub fn new(bytes: &[u8]) -> Result<Self, ParsePasswordError> {
        match bytes.len() {
            4 | 6 => {
                let mut buf = [0u8; 6];
                buf[..bytes.len()].copy_from_slice(bytes);
                Ok(Self {
                    bytes: buf,
                    len: bytes.len(),
                })
            }
            _ => Err(ParsePasswordError::InvalidLength),
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len]
    }
}

impl FromStr for Password {
    type Err = ParsePasswordError;

    /// Parses a hex wake password, eight or twelve digits.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 8 && s.len() != 12 {
            return Err(ParsePasswordError::InvalidLength);
        }

        let mut bytes = [0u8; 6];
        for (i, &b) in s.as_bytes().iter().enumerate() {
            let digit = (b as char)
                .to_digit(16)
                .ok_or(ParsePasswordError::InvalidDigit(i))? as u8;
            bytes[i / 2] = bytes[i / 2] << 4 | digit;
        }

        Password::new(&bytes[..s.len() / 2])
    }
}
