//! Cipher-Suite-Konfiguration
//!
//! Sender und Empfaenger muessen dieselbe `EnvelopeConfig` verwenden. Die
//! Suite wird nie zur Laufzeit ausgehandelt. Standard ist secp256k1 mit
//! AES-128-CTR, Concat-KDF-SHA-256 und HMAC-SHA-256.
//!
//! ```toml
//! curve = "p256"
//! cipher = "aes256-ctr"
//! kdf = "hkdf-sha256"
//! mac = "hmac-sha512"
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{CryptoError, CryptoResult};

/// Laenge eines unkomprimierten SEC1-Punkts (0x04 || X || Y) fuer 256-Bit-Kurven
pub const UNCOMPRESSED_POINT_LEN: usize = 65;

/// Laenge eines Skalars / privaten Schluessels in Bytes
pub const SCALAR_LEN: usize = 32;

/// IV-Laenge fuer AES-CTR (eine Blockgroesse)
pub const IV_LEN: usize = 16;

/// Elliptische Kurve. Bestimmt Punktgroesse und Sicherheitsniveau.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Curve {
    #[default]
    #[serde(rename = "secp256k1")]
    Secp256k1,
    #[serde(rename = "p256")]
    P256,
}

impl Curve {
    /// Laenge des serialisierten oeffentlichen Schluessels im Umschlag
    pub fn public_key_len(self) -> usize {
        UNCOMPRESSED_POINT_LEN
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Secp256k1 => "secp256k1",
            Self::P256 => "p256",
        }
    }
}

impl fmt::Display for Curve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Symmetrische Chiffre. Bestimmt die Schluessellaenge; der IV ist immer 16 Bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum CipherAlgorithm {
    #[default]
    #[serde(rename = "aes128-ctr")]
    Aes128Ctr,
    #[serde(rename = "aes256-ctr")]
    Aes256Ctr,
}

impl CipherAlgorithm {
    pub fn key_len(self) -> usize {
        match self {
            Self::Aes128Ctr => 16,
            Self::Aes256Ctr => 32,
        }
    }

    pub fn iv_len(self) -> usize {
        IV_LEN
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Aes128Ctr => "aes128-ctr",
            Self::Aes256Ctr => "aes256-ctr",
        }
    }
}

/// Key-Derivation. Bestimmt wie das Shared Secret auf Schluesselmaterial abgebildet wird.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum KdfAlgorithm {
    /// NIST SP 800-56A Concatenation KDF mit SHA-256
    #[default]
    #[serde(rename = "concat-kdf-sha256")]
    ConcatSha256,
    /// RFC 5869 HKDF mit SHA-256
    #[serde(rename = "hkdf-sha256")]
    HkdfSha256,
}

impl KdfAlgorithm {
    pub fn name(self) -> &'static str {
        match self {
            Self::ConcatSha256 => "concat-kdf-sha256",
            Self::HkdfSha256 => "hkdf-sha256",
        }
    }
}

/// MAC-Algorithmus. Bestimmt Tag- und MAC-Schluessellaenge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum MacAlgorithm {
    #[default]
    #[serde(rename = "hmac-sha256")]
    HmacSha256,
    #[serde(rename = "hmac-sha512")]
    HmacSha512,
}

impl MacAlgorithm {
    pub fn tag_len(self) -> usize {
        match self {
            Self::HmacSha256 => 32,
            Self::HmacSha512 => 64,
        }
    }

    /// MAC-Schluessel so lang wie die Hash-Ausgabe
    pub fn key_len(self) -> usize {
        self.tag_len()
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::HmacSha256 => "hmac-sha256",
            Self::HmacSha512 => "hmac-sha512",
        }
    }
}

/// Vollstaendige Cipher-Suite eines Umschlags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct EnvelopeConfig {
    pub curve: Curve,
    pub cipher: CipherAlgorithm,
    pub kdf: KdfAlgorithm,
    pub mac: MacAlgorithm,
}

impl EnvelopeConfig {
    /// Laedt eine Konfiguration aus einem TOML-String.
    /// Fehlende Felder fallen auf die Standardwerte zurueck.
    pub fn from_toml_str(s: &str) -> CryptoResult<Self> {
        toml::from_str(s).map_err(|e| CryptoError::Configuration(e.to_string()))
    }

    pub fn to_toml_string(&self) -> CryptoResult<String> {
        toml::to_string(self).map_err(|e| CryptoError::Configuration(e.to_string()))
    }

    /// Feste Groesse eines Umschlags ohne Ciphertext-Body
    pub fn overhead(&self) -> usize {
        self.curve.public_key_len() + self.cipher.iv_len() + self.mac.tag_len()
    }

    /// Laenge des benoetigten KDF-Outputs (Cipher-Key || MAC-Key)
    pub(crate) fn key_material_len(&self) -> usize {
        self.cipher.key_len() + self.mac.key_len()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
