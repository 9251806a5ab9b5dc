use std::{
    fmt::{self, Display},
    str::FromStr,
};

use rand::{Rng as _, SeedableRng as _};
use rand_pcg::Pcg64;
use sha2::{Digest as _, Sha256};

/// A 256-bit seed that makes board generation reproducible.
///
/// Seeds display as 64 lowercase hex digits and parse back from the same form.
///
/// # Examples
///
/// ```
/// use gemfall_generator::BoardSeed;
///
/// let seed = BoardSeed::from_phrase("daily-2026-10-18");
/// let text = seed.to_string();
/// assert_eq!(text.len(), 64);
/// assert_eq!(text.parse::<BoardSeed>()?, seed);
/// # Ok::<(), gemfall_generator::SeedParseError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoardSeed([u8; 32]);

impl BoardSeed {
    /// Creates a seed from raw bytes.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Draws a fresh seed from the thread-local random number generator.
    #[must_use]
    pub fn random() -> Self {
        Self(rand::rng().random())
    }

    /// Derives a seed from a human-readable phrase by hashing it with SHA-256.
    ///
    /// The same phrase always yields the same seed, which lets players share
    /// boards by name.
    #[must_use]
    pub fn from_phrase(phrase: &str) -> Self {
        Self(Sha256::digest(phrase.as_bytes()).into())
    }

    /// Returns the raw seed bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Creates the deterministic random number generator for this seed.
    #[must_use]
    pub fn rng(&self) -> Pcg64 {
        Pcg64::from_seed(self.0)
    }
}

impl Display for BoardSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

/// Errors returned when parsing a [`BoardSeed`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum SeedParseError {
    /// The text is not exactly 64 characters long.
    #[display("seed must be 64 hex digits, got {len} characters")]
    InvalidLength {
        /// Number of characters supplied.
        len: usize,
    },
    /// The text contains a character that is not a hex digit.
    #[display("seed contains a non-hex character at position {position}")]
    InvalidDigit {
        /// Character position of the first bad digit pair.
        position: usize,
    },
}

impl FromStr for BoardSeed {
    type Err = SeedParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.len() != 64 || !s.is_ascii() {
            return Err(SeedParseError::InvalidLength {
                len: s.chars().count(),
            });
        }
        let mut bytes = [0; 32];
        for (i, byte) in bytes.iter_mut().enumerate() {
            let position = i * 2;
            let pair = &s[position..position + 2];
            if !pair.bytes().all(|b| b.is_ascii_hexdigit()) {
                return Err(SeedParseError::InvalidDigit { position });
            }
            *byte = u8::from_str_radix(pair, 16)
                .map_err(|_| SeedParseError::InvalidDigit { position })?;
        }
        Ok(Self(bytes))
    }
}
