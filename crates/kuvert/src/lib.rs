//! # kuvert
//!
//! Hybride Public-Key-Verschluesselung (ECIES) mit verlustfreien
//! Transport-Transformationen fuer beliebige Byte-Nachrichten.
//!
//! ## Module
//! - `keys` - Schluesselpaar-Erzeugung (secp256k1, P-256)
//! - `ecies` - Verschluesseln/Entschluesseln und das Umschlag-Format
//! - `transform` - zlib-Kompression, Hex- und Base64-Kodierung
//! - `pipeline` - Verkettung aller Stufen plus Roundtrip-Pruefung
//! - `config` - Cipher-Suite und TOML-Konfiguration
//! - `types` - Schluessel-Typen
//! - `error` - Fehlertypen
//!
//! ## Umschlag-Format (Version 1)
//! ```text
//! [ephemerer Public Key, 65 Bytes SEC1 unkomprimiert]
//! [IV, 16 Bytes]
//! [Tag, 32 Bytes (HMAC-SHA256) bzw. 64 Bytes (HMAC-SHA512)]
//! [Ciphertext, gleich lang wie der Klartext]
//! ```
//!
//! ## Datenfluss
//! ```text
//! Sender:    Klartext -> encrypt -> to_bytes -> compress -> encode -> Transport
//! Empfaenger: Transport -> decode -> decompress -> from_bytes -> decrypt -> Klartext
//! ```

pub mod config;
pub mod ecies;
pub mod error;
pub mod keys;
pub mod pipeline;
pub mod transform;
pub mod types;

#[cfg(test)]
mod proptests;

// Bequeme Re-Exports
pub use config::{CipherAlgorithm, Curve, EnvelopeConfig, KdfAlgorithm, MacAlgorithm};
pub use error::{CryptoError, CryptoResult};
pub use types::{KeyPair, PrivateKey, PublicKey, SecretBytes};

pub use ecies::{Envelope, HybridEnvelope, ENVELOPE_VERSION};
pub use keys::KeyPairGenerator;
pub use pipeline::{verify_round_trip, Pipeline, Wire, WireOptions};
pub use transform::{
    compress, decode_base64, decode_hex, decompress, encode_base64, encode_hex,
    CompressionConfig, Encoding,
};
