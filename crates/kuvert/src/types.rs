//! Gemeinsame Typen (SecretBytes, Schluessel, KeyPair)

use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::config::{Curve, SCALAR_LEN};
use crate::error::{CryptoError, CryptoResult};
use crate::keys;

/// Sicherer Schluessel-Container (wird beim Drop genullt)
///
/// Genullt wird die gesamte Kapazitaet des Puffers, nicht nur `len` Bytes.
#[derive(Clone)]
pub struct SecretBytes(Vec<u8>);

impl Zeroize for SecretBytes {
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}

impl Drop for SecretBytes {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl ZeroizeOnDrop for SecretBytes {}

impl std::fmt::Debug for SecretBytes {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SecretBytes([REDACTED] {} bytes)", self.0.len())
    }
}

impl SecretBytes {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub(crate) fn as_mut_bytes(&mut self) -> &mut [u8] {
        &mut self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[cfg(test)]
    pub(crate) fn capacity(&self) -> usize {
        self.0.capacity()
    }
}

/// Oeffentlicher Schluessel (validierter Kurvenpunkt, unkomprimiert SEC1)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "PublicKeyRepr", try_from = "PublicKeyRepr")]
pub struct PublicKey {
    curve: Curve,
    bytes: Vec<u8>,
}

/// Serialisierte Form: Kurve + Hex-String
#[derive(Serialize, Deserialize)]
struct PublicKeyRepr {
    curve: Curve,
    key: String,
}

impl PublicKey {
    /// Importiert einen SEC1-kodierten Punkt (komprimiert oder unkomprimiert).
    /// Gespeichert wird immer die unkomprimierte Form.
    pub fn from_sec1_bytes(curve: Curve, bytes: &[u8]) -> CryptoResult<Self> {
        let bytes = keys::normalize_public_key(curve, bytes)?;
        Ok(Self { curve, bytes })
    }

    pub fn from_hex(curve: Curve, s: &str) -> CryptoResult<Self> {
        let bytes = hex::decode(s)?;
        Self::from_sec1_bytes(curve, &bytes)
    }

    pub fn curve(&self) -> Curve {
        self.curve
    }

    /// Unkomprimierter SEC1-Punkt (0x04 || X || Y)
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn to_hex(&self) -> String {
        hex::encode(&self.bytes)
    }
}

impl From<PublicKey> for PublicKeyRepr {
    fn from(pk: PublicKey) -> Self {
        Self {
            curve: pk.curve,
            key: hex::encode(&pk.bytes),
        }
    }
}

impl TryFrom<PublicKeyRepr> for PublicKey {
    type Error = CryptoError;

    fn try_from(repr: PublicKeyRepr) -> CryptoResult<Self> {
        Self::from_hex(repr.curve, &repr.key)
    }
}

/// Privater Schluessel (Skalar). Wird weder serialisiert noch geloggt.
#[derive(Clone)]
pub struct PrivateKey {
    curve: Curve,
    scalar: SecretBytes,
}

impl PrivateKey {
    /// Importiert einen 32-Byte-Skalar. Null und Werte >= Gruppenordnung
    /// werden abgelehnt.
    pub fn from_bytes(curve: Curve, bytes: &[u8]) -> CryptoResult<Self> {
        if bytes.len() != SCALAR_LEN || !keys::scalar_is_valid(curve, bytes) {
            return Err(CryptoError::InvalidKey(format!(
                "kein gueltiger {curve}-Skalar"
            )));
        }
        Ok(Self {
            curve,
            scalar: SecretBytes::new(bytes.to_vec()),
        })
    }

    pub(crate) fn from_secret(curve: Curve, scalar: SecretBytes) -> Self {
        Self { curve, scalar }
    }

    pub fn curve(&self) -> Curve {
        self.curve
    }

    /// Leitet den oeffentlichen Schluessel ab (privateKey * G)
    pub fn public_key(&self) -> CryptoResult<PublicKey> {
        let bytes = keys::derive_public_key(self.curve, self.scalar.as_bytes())?;
        Ok(PublicKey {
            curve: self.curve,
            bytes,
        })
    }

    pub(crate) fn scalar(&self) -> &[u8] {
        self.scalar.as_bytes()
    }
}

impl std::fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PrivateKey {{ curve: {}, scalar: [REDACTED] }}", self.curve)
    }
}

/// Ein asymmetrisches Schluessel-Paar auf einer festen Kurve
#[derive(Debug, Clone)]
pub struct KeyPair {
    private_key: PrivateKey,
    public_key: PublicKey,
}

impl KeyPair {
    /// Baut ein Paar aus einem privaten Schluessel; der oeffentliche wird abgeleitet
    pub fn from_private_key(private_key: PrivateKey) -> CryptoResult<Self> {
        let public_key = private_key.public_key()?;
        Ok(Self {
            private_key,
            public_key,
        })
    }

    pub fn curve(&self) -> Curve {
        self.private_key.curve
    }

    pub fn private_key(&self) -> &PrivateKey {
        &self.private_key
    }

    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
