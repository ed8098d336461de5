//! Hybride Verschluesselung (ECIES)
//!
//! ECDH zwischen einem ephemeren Schluessel und dem Empfaenger-Schluessel,
//! KDF, AES-CTR und HMAC. Jeder Aufruf ist eine unabhaengige Transaktion
//! ohne globalen Zustand; die Entropiequelle wird explizit uebergeben.
//!
//! ## Ablauf
//! 1. `encrypt`: ephemeres Paar + frischer IV pro Nachricht
//! 2. Serialisierung via `Envelope::to_bytes` (siehe [`envelope`])
//! 3. `decrypt`: Tag pruefen, erst dann entschluesseln

pub mod cipher;
pub mod decrypt;
pub mod encrypt;
pub mod envelope;
pub mod key_agreement;

use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};

use crate::config::EnvelopeConfig;
use crate::error::CryptoResult;
use crate::types::{PrivateKey, PublicKey};

pub use envelope::{Envelope, ENVELOPE_VERSION};
pub use key_agreement::{concat_kdf_sha256, hkdf_derive};

/// Verschluesselungs-Engine fuer eine feste Cipher-Suite
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HybridEnvelope {
    config: EnvelopeConfig,
}

impl HybridEnvelope {
    pub fn new(config: EnvelopeConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EnvelopeConfig {
        &self.config
    }

    /// Verschluesselt `plaintext` fuer `recipient`
    pub fn encrypt<R>(
        &self,
        recipient: &PublicKey,
        plaintext: &[u8],
        rng: &mut R,
    ) -> CryptoResult<Envelope>
    where
        R: RngCore + CryptoRng + ?Sized,
    {
        encrypt::encrypt(&self.config, recipient, plaintext, None, rng)
    }

    /// Wie `encrypt`, bindet aber zusaetzlich `aad` an den Tag
    pub fn encrypt_with_aad<R>(
        &self,
        recipient: &PublicKey,
        plaintext: &[u8],
        aad: Option<&[u8]>,
        rng: &mut R,
    ) -> CryptoResult<Envelope>
    where
        R: RngCore + CryptoRng + ?Sized,
    {
        encrypt::encrypt(&self.config, recipient, plaintext, aad, rng)
    }

    /// Verschluesselt mit dem Zufallsgenerator des Betriebssystems
    pub fn encrypt_with_os_rng(
        &self,
        recipient: &PublicKey,
        plaintext: &[u8],
    ) -> CryptoResult<Envelope> {
        self.encrypt(recipient, plaintext, &mut OsRng)
    }

    pub fn decrypt(&self, private_key: &PrivateKey, envelope: &Envelope) -> CryptoResult<Vec<u8>> {
        decrypt::decrypt(&self.config, private_key, envelope, None)
    }

    pub fn decrypt_with_aad(
        &self,
        private_key: &PrivateKey,
        envelope: &Envelope,
        aad: Option<&[u8]>,
    ) -> CryptoResult<Vec<u8>> {
        decrypt::decrypt(&self.config, private_key, envelope, aad)
    }

    /// Entschluesselt serialisierte Umschlag-Bytes
    ///
    /// Nuetzlich wenn Bytes direkt vom Transport kommen.
    pub fn decrypt_bytes(&self, private_key: &PrivateKey, bytes: &[u8]) -> CryptoResult<Vec<u8>> {
        decrypt::decrypt_bytes(&self.config, private_key, bytes, None)
    }

    pub fn decrypt_bytes_with_aad(
        &self,
        private_key: &PrivateKey,
        bytes: &[u8],
        aad: Option<&[u8]>,
    ) -> CryptoResult<Vec<u8>> {
        decrypt::decrypt_bytes(&self.config, private_key, bytes, aad)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
