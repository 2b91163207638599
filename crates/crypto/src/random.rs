//! Cryptographically secure randomness.

use rand::{TryRngCore, rngs::OsRng};

use crate::error::CryptoError;

/// Source of cryptographically secure random bytes.
///
/// Implementations must be safe to share between threads. Everything that
/// draws randomness in this crate (salts, nonces, generated passwords) goes
/// through this trait so tests can substitute a scripted source.
pub trait RandomSource: Send + Sync {
    /// Fill `dest` with random bytes.
    fn fill(&self, dest: &mut [u8]) -> Result<(), CryptoError>;

    /// Draw a uniformly distributed integer in `0..bound`.
    ///
    /// Uses rejection sampling over `u32` so the result carries no modulo
    /// bias for bounds that do not divide 2^32.
    fn below(&self, bound: u32) -> Result<u32, CryptoError> {
        if bound == 0 {
            return Err(CryptoError::InvalidArgument(
                "random bound must be positive".to_string(),
            ));
        }

        const RANGE: u64 = 1 << 32;
        let zone = RANGE - RANGE % u64::from(bound);

        loop {
            let mut buf = [0u8; 4];
            self.fill(&mut buf)?;
            let value = u32::from_le_bytes(buf);
            if u64::from(value) < zone {
                return Ok(value % bound);
            }
        }
    }
}

/// The operating system RNG (`getrandom`).
///
/// Stateless, so a single value can be shared freely across threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsRandom;

impl RandomSource for OsRandom {
    fn fill(&self, dest: &mut [u8]) -> Result<(), CryptoError> {
        OsRng
            .try_fill_bytes(dest)
            .map_err(|e| CryptoError::Randomness(e.to_string()))
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &R {
    fn fill(&self, dest: &mut [u8]) -> Result<(), CryptoError> {
        (**self).fill(dest)
    }
}
