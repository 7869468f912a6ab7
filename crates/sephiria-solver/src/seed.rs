//! Reproducible search seeds.

use std::{fmt, str::FromStr};

use rand::SeedableRng as _;
use rand_pcg::Pcg64Mcg;
use sha2::{Digest, Sha256};

/// A 256-bit seed that fixes every random choice of a search run.
///
/// Printed and parsed as 64 hexadecimal digits. Each restart of a run draws
/// its own generator from the seed, so restarts are independent of how many
/// run in parallel.
///
/// # Examples
///
/// ```
/// use sephiria_solver::SearchSeed;
///
/// let text = "00112233445566778899aabbccddeeff00112233445566778899aabbccddeeff";
/// let seed: SearchSeed = text.parse()?;
/// assert_eq!(seed.to_string(), text);
/// # Ok::<(), sephiria_solver::ParseSeedError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SearchSeed([u8; 32]);

impl SearchSeed {
    /// Creates a seed from raw bytes.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Draws a fresh seed from the thread-local generator.
    #[must_use]
    pub fn random() -> Self {
        Self(rand::random())
    }

    /// Returns the raw bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Returns the generator for restart number `restart`.
    ///
    /// The generator state is the first half of
    /// `SHA-256(seed || restart as little-endian u64)`.
    #[must_use]
    pub fn rng_for(&self, restart: u64) -> Pcg64Mcg {
        let digest = Sha256::new()
            .chain_update(self.0)
            .chain_update(restart.to_le_bytes())
            .finalize();
        let mut state = [0; 16];
        state.copy_from_slice(&digest[..16]);
        Pcg64Mcg::from_seed(state)
    }
}

impl fmt::Display for SearchSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

/// Error returned when parsing a [`SearchSeed`] fails.
#[derive(
    Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error, derive_more::IsVariant,
)]
pub enum ParseSeedError {
    /// The input is not exactly 64 characters long.
    #[display("seed must be 64 hex digits, got {len} characters")]
    InvalidLength {
        /// Length of the rejected input.
        len: usize,
    },
    /// The input contains a character that is not a hex digit.
    #[display("invalid hex digit {ch:?} at position {index}")]
    InvalidDigit {
        /// Character position.
        index: usize,
        /// The offending character.
        ch: char,
    },
}

impl FromStr for SearchSeed {
    type Err = ParseSeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let len = s.chars().count();
        if len != 64 {
            return Err(ParseSeedError::InvalidLength { len });
        }

        if let Some((index, ch)) = s.chars().enumerate().find(|(_, ch)| !ch.is_ascii_hexdigit()) {
            return Err(ParseSeedError::InvalidDigit { index, ch });
        }
        let mut bytes = [0; 32];
        for (byte, pair) in bytes.iter_mut().zip(s.as_bytes().chunks_exact(2)) {
            *byte = (hex_value(pair[0]) << 4) | hex_value(pair[1]);
        }
        Ok(Self(bytes))
    }
}

fn hex_value(digit: u8) -> u8 {
    match digit {
        b'0'..=b'9' => digit - b'0',
        b'a'..=b'f' => digit - b'a' + 10,
        _ => digit - b'A' + 10,
    }
}
