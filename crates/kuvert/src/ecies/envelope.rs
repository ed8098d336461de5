//! Umschlag-Wire-Format
//!
//! ## Layout (Version 1)
//! ```text
//! [ephemeral_public_key(65)] [iv(16)] [tag(N)] [body(rest)]
//! ```
//! - `ephemeral_public_key`: unkomprimierter SEC1-Punkt (0x04 || X || Y)
//! - `iv`: AES-CTR Startzaehler
//! - `tag`: HMAC ueber `iv || body || aad`, N = 32 (HMAC-SHA256) oder 64 (HMAC-SHA512)
//! - `body`: Ciphertext, genauso lang wie der Klartext
//!
//! Alle Feldlaengen ergeben sich aus der `EnvelopeConfig`; es gibt keine
//! Laengenpraefixe. Jede Aenderung dieses Layouts erhoeht `ENVELOPE_VERSION`.

use crate::config::{EnvelopeConfig, IV_LEN};
use crate::error::{CryptoError, CryptoResult};

/// Version des Byte-Layouts
pub const ENVELOPE_VERSION: u8 = 1;

/// Verschluesselte Nachricht
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    pub ephemeral_public_key: Vec<u8>,
    pub iv: [u8; IV_LEN],
    pub tag: Vec<u8>,
    pub body: Vec<u8>,
}

impl Envelope {
    /// Feste Groesse ohne Body
    pub fn overhead(config: &EnvelopeConfig) -> usize {
        config.overhead()
    }

    /// Serialisiert in der festen Feldreihenfolge
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(
            self.ephemeral_public_key.len() + IV_LEN + self.tag.len() + self.body.len(),
        );
        out.extend_from_slice(&self.ephemeral_public_key);
        out.extend_from_slice(&self.iv);
        out.extend_from_slice(&self.tag);
        out.extend_from_slice(&self.body);
        out
    }

    /// Zerlegt Bytes anhand der Feldlaengen aus `config`
    pub fn from_bytes(bytes: &[u8], config: &EnvelopeConfig) -> CryptoResult<Self> {
        let key_len = config.curve.public_key_len();
        let tag_len = config.mac.tag_len();
        let overhead = config.overhead();

        if bytes.len() < overhead {
            return Err(CryptoError::MalformedEnvelope(format!(
                "zu kurz: {} Bytes, mindestens {} erwartet",
                bytes.len(),
                overhead
            )));
        }

        let (ephemeral_public_key, rest) = bytes.split_at(key_len);
        let (iv, rest) = rest.split_at(IV_LEN);
        let (tag, body) = rest.split_at(tag_len);

        let mut iv_bytes = [0u8; IV_LEN];
        iv_bytes.copy_from_slice(iv);

        Ok(Self {
            ephemeral_public_key: ephemeral_public_key.to_vec(),
            iv: iv_bytes,
            tag: tag.to_vec(),
            body: body.to_vec(),
        })
    }

    /// Prueft die Feldlaengen gegen `config`
    pub fn validate(&self, config: &EnvelopeConfig) -> CryptoResult<()> {
        let key_len = config.curve.public_key_len();
        if self.ephemeral_public_key.len() != key_len {
            return Err(CryptoError::MalformedEnvelope(format!(
                "ephemerer Schluessel: erwartet {} Bytes, erhalten {}",
                key_len,
                self.ephemeral_public_key.len()
            )));
        }
        let tag_len = config.mac.tag_len();
        if self.tag.len() != tag_len {
            return Err(CryptoError::MalformedEnvelope(format!(
                "Tag: erwartet {} Bytes, erhalten {}",
                tag_len,
                self.tag.len()
            )));
        }
        Ok(())
    }

    /// Gesamtlaenge in Bytes
    pub fn len(&self) -> usize {
        self.ephemeral_public_key.len() + IV_LEN + self.tag.len() + self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
