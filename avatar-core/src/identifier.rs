//! Avatar identifiers.
//!
//! An identifier is canonicalized by dropping every character that is not an
//! ASCII hex digit and keeping the first 32 digits that remain. Letter case is
//! kept as written: `ABCD…` and `abcd…` derive the same parameters (hex is
//! case-insensitive) but stay distinct as cache keys.

use std::fmt;
use std::str::FromStr;

use uuid::Uuid;

use crate::error::{AvatarError, AvatarResult};

/// Number of hex digits an identifier must provide.
pub const HEX_DIGITS: usize = 32;

/// A canonical 128-bit avatar identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identifier {
    hex: String,
    words: [u32; 4],
}

impl Identifier {
    /// Parse an identifier, stripping separators.
    ///
    /// # Errors
    ///
    /// Returns [`AvatarError::InvalidIdentifier`] if fewer than 32 hex digits
    /// remain after stripping.
    pub fn parse(input: &str) -> AvatarResult<Self> {
        let hex: String = input
            .chars()
            .filter(char::is_ascii_hexdigit)
            .take(HEX_DIGITS)
            .collect();

        if hex.len() < HEX_DIGITS {
            return Err(AvatarError::InvalidIdentifier {
                identifier: input.to_string(),
                hex_digits: hex.len(),
            });
        }

        let mut words = [0u32; 4];
        for (word, chunk) in words.iter_mut().zip(hex.as_bytes().chunks_exact(8)) {
            *word = chunk
                .iter()
                .filter_map(|&b| char::from(b).to_digit(16))
                .fold(0u32, |acc, digit| (acc << 4) | digit);
        }

        Ok(Self { hex, words })
    }

    /// The canonical 32 hex digits.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.hex
    }

    /// One of the four consecutive 32-bit groups (0..4).
    ///
    /// # Panics
    ///
    /// Panics if `index >= 4`.
    #[must_use]
    pub fn word(&self, index: usize) -> u32 {
        self.words[index]
    }

    /// The 16-bit slice at hex digits 20..24, used for saturation.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn saturation_bits(&self) -> u16 {
        // Digits 20..24 are the low half of the third group.
        (self.words[2] & 0xFFFF) as u16
    }
}

impl From<Uuid> for Identifier {
    fn from(uuid: Uuid) -> Self {
        let (hi, lo) = uuid.as_u64_pair();
        #[allow(clippy::cast_possible_truncation)]
        let words = [(hi >> 32) as u32, hi as u32, (lo >> 32) as u32, lo as u32];
        Self {
            hex: uuid.simple().to_string(),
            words,
        }
    }
}

impl FromStr for Identifier {
    type Err = AvatarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.hex)
    }
}
