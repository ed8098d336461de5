//! Parametrisierte Pipeline
//!
//! ```text
//! Klartext -> encrypt -> Umschlag -> [compress] -> [encode] -> Wire
//! Wire -> [decode] -> [decompress] -> Umschlag -> decrypt -> Klartext
//! ```
//!
//! Welche Stufen aktiv sind, bestimmt `WireOptions`. `verify_round_trip`
//! prueft jede Stufe einzeln gegen ihre Umkehrung.

use rand::{CryptoRng, RngCore};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::EnvelopeConfig;
use crate::ecies::HybridEnvelope;
use crate::error::{CryptoError, CryptoResult};
use crate::transform::{compress, decompress, CompressionConfig, Encoding};
use crate::types::{KeyPair, PrivateKey, PublicKey};

/// Aktive Transport-Transformationen
///
/// ```toml
/// encoding = "base64"
///
/// [compression]
/// level = 9
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct WireOptions {
    pub encoding: Option<Encoding>,
    pub compression: Option<CompressionConfig>,
}

impl WireOptions {
    /// Nackte Umschlag-Bytes
    pub fn raw() -> Self {
        Self::default()
    }

    pub fn hex() -> Self {
        Self {
            encoding: Some(Encoding::Hex),
            compression: None,
        }
    }

    pub fn base64() -> Self {
        Self {
            encoding: Some(Encoding::Base64),
            compression: None,
        }
    }

    pub fn compressed() -> Self {
        Self {
            encoding: None,
            compression: Some(CompressionConfig::default()),
        }
    }

    /// zlib + Base64
    pub fn compressed_base64() -> Self {
        Self {
            encoding: Some(Encoding::Base64),
            compression: Some(CompressionConfig::default()),
        }
    }

    pub fn compressed_hex() -> Self {
        Self {
            encoding: Some(Encoding::Hex),
            compression: Some(CompressionConfig::default()),
        }
    }

    pub fn from_toml_str(s: &str) -> CryptoResult<Self> {
        toml::from_str(s).map_err(|e| CryptoError::Configuration(e.to_string()))
    }

    pub fn to_toml_string(&self) -> CryptoResult<String> {
        toml::to_string(self).map_err(|e| CryptoError::Configuration(e.to_string()))
    }
}

/// Transport-Darstellung eines Umschlags
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Wire {
    Binary(Vec<u8>),
    Text(String),
}

impl Wire {
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Self::Binary(b) => b,
            Self::Text(s) => s.as_bytes(),
        }
    }

    pub fn into_bytes(self) -> Vec<u8> {
        match self {
            Self::Binary(b) => b,
            Self::Text(s) => s.into_bytes(),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Binary(_) => None,
            Self::Text(s) => Some(s),
        }
    }

    pub fn len(&self) -> usize {
        self.as_bytes().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Verschluesselung plus Transport-Transformationen
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Pipeline {
    engine: HybridEnvelope,
    options: WireOptions,
}

impl Pipeline {
    pub fn new(config: EnvelopeConfig, options: WireOptions) -> Self {
        Self {
            engine: HybridEnvelope::new(config),
            options,
        }
    }

    pub fn engine(&self) -> &HybridEnvelope {
        &self.engine
    }

    pub fn options(&self) -> &WireOptions {
        &self.options
    }

    /// Verschluesselt und transformiert
    pub fn seal<R>(
        &self,
        recipient: &PublicKey,
        plaintext: &[u8],
        rng: &mut R,
    ) -> CryptoResult<Wire>
    where
        R: RngCore + CryptoRng + ?Sized,
    {
        self.seal_with_aad(recipient, plaintext, None, rng)
    }

    pub fn seal_with_aad<R>(
        &self,
        recipient: &PublicKey,
        plaintext: &[u8],
        aad: Option<&[u8]>,
        rng: &mut R,
    ) -> CryptoResult<Wire>
    where
        R: RngCore + CryptoRng + ?Sized,
    {
        let envelope = self
            .engine
            .encrypt_with_aad(recipient, plaintext, aad, rng)?
            .to_bytes();
        self.to_wire(envelope)
    }

    /// Macht die Transformationen rueckgaengig und entschluesselt
    pub fn open(&self, private_key: &PrivateKey, wire: &Wire) -> CryptoResult<Vec<u8>> {
        self.open_with_aad(private_key, wire, None)
    }

    pub fn open_with_aad(
        &self,
        private_key: &PrivateKey,
        wire: &Wire,
        aad: Option<&[u8]>,
    ) -> CryptoResult<Vec<u8>> {
        let envelope = self.from_wire(wire)?;
        self.engine.decrypt_bytes_with_aad(private_key, &envelope, aad)
    }

    /// Wendet Kompression und Kodierung auf serialisierte Umschlag-Bytes an
    pub fn to_wire(&self, envelope: Vec<u8>) -> CryptoResult<Wire> {
        let envelope_len = envelope.len();
        let bytes = match &self.options.compression {
            Some(config) => compress(&envelope, config)?,
            None => envelope,
        };
        let wire = match self.options.encoding {
            Some(encoding) => Wire::Text(encoding.encode(&bytes)),
            None => Wire::Binary(bytes),
        };
        debug!(
            umschlag_len = envelope_len,
            wire_len = wire.len(),
            "Wire-Darstellung erzeugt"
        );
        Ok(wire)
    }

    /// Stellt die Umschlag-Bytes aus der Wire-Darstellung wieder her
    pub fn from_wire(&self, wire: &Wire) -> CryptoResult<Vec<u8>> {
        let bytes = match self.options.encoding {
            Some(encoding) => {
                let text = match wire {
                    Wire::Text(s) => s.as_str(),
                    Wire::Binary(b) => {
                        std::str::from_utf8(b).map_err(|e| CryptoError::DecodingError {
                            kodierung: encoding,
                            grund: format!("kein UTF-8: {e}"),
                        })?
                    }
                };
                encoding.decode(text)?
            }
            None => wire.as_bytes().to_vec(),
        };
        match &self.options.compression {
            Some(config) => decompress(&bytes, config),
            None => Ok(bytes),
        }
    }
}

/// Prueft eine komplette Nachricht Stufe fuer Stufe
///
/// Encrypt -> (Compress) -> (Encode) -> (Decode) -> (Decompress) -> Decrypt.
/// Jede Umkehrung muss ihre Eingabe exakt wiederherstellen, und nach jeder
/// Stufe muss die Entschluesselung den Original-Klartext liefern.
pub fn verify_round_trip<R>(
    config: &EnvelopeConfig,
    options: &WireOptions,
    key_pair: &KeyPair,
    payload: &[u8],
    rng: &mut R,
) -> CryptoResult<()>
where
    R: RngCore + CryptoRng + ?Sized,
{
    let pipeline = Pipeline::new(*config, *options);
    let engine = pipeline.engine();

    let check = |stufe: &'static str, envelope: &[u8]| -> CryptoResult<()> {
        if engine.decrypt_bytes(key_pair.private_key(), envelope)? != payload {
            return Err(CryptoError::RoundTripMismatch { stufe });
        }
        Ok(())
    };

    let envelope = engine.encrypt(key_pair.public_key(), payload, rng)?.to_bytes();
    check("verschluesselung", &envelope)?;

    let compressed = match &options.compression {
        Some(c) => {
            let compressed = compress(&envelope, c)?;
            let restored = decompress(&compressed, c)?;
            if restored != envelope {
                return Err(CryptoError::RoundTripMismatch { stufe: "kompression" });
            }
            check("kompression", &restored)?;
            compressed
        }
        None => envelope.clone(),
    };

    if let Some(encoding) = options.encoding {
        let text = encoding.encode(&compressed);
        if encoding.decode(&text)? != compressed {
            return Err(CryptoError::RoundTripMismatch { stufe: "kodierung" });
        }
    }

    let wire = pipeline.to_wire(envelope.clone())?;
    let restored = pipeline.from_wire(&wire)?;
    if restored != envelope {
        return Err(CryptoError::RoundTripMismatch { stufe: "transport" });
    }
    check("transport", &restored)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
