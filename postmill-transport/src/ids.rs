//! Unpredictable identifiers for OAuth `state` and code verifiers.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use ring::rand::{SecureRandom, SystemRandom};

use crate::error::TransportError;

/// Number of random bytes per identifier (43 base64url characters).
const ID_BYTES: usize = 32;

/// Source of unguessable identifiers.
pub trait IdSource: Send + Sync {
    /// Returns a fresh identifier, URL-safe and unique per call.
    fn generate(&self) -> Result<String, TransportError>;
}

/// [`IdSource`] backed by the operating system's CSPRNG.
#[derive(Debug, Clone)]
pub struct SecureIdSource {
    rng: SystemRandom,
}

impl SecureIdSource {
    /// Creates a new source.
    pub fn new() -> Self {
        Self {
            rng: SystemRandom::new(),
        }
    }
}

impl Default for SecureIdSource {
    fn default() -> Self {
        Self::new()
    }
}

impl IdSource for SecureIdSource {
    fn generate(&self) -> Result<String, TransportError> {
        let mut bytes = [0u8; ID_BYTES];
        self.rng
            .fill(&mut bytes)
            .map_err(|_| TransportError::Random)?;
        Ok(URL_SAFE_NO_PAD.encode(bytes))
    }
}
