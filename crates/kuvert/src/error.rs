//! Fehlertypen fuer kuvert
//!
//! Kein Fehler wird intern wiederholt: jeder Fehler hier bedeutet entweder
//! beschaedigte Daten oder einen Programmier-/Konfigurationsfehler.
//! Fehlermeldungen enthalten niemals Klartext, Schluessel oder Shared Secrets.

use thiserror::Error;

use crate::config::Curve;
use crate::transform::Encoding;

/// Fehler im kuvert-Crate
#[derive(Debug, Error)]
pub enum CryptoError {
    /// Entropiequelle nicht verfuegbar (nicht wiederholbar ohne Umgebungs-Fix)
    #[error("Schluessel-Generierung fehlgeschlagen: {0}")]
    KeyGenerationFailure(String),

    /// Strukturell ungueltiger Umschlag (falsche Feldlaengen, kein Kurvenpunkt)
    #[error("Ungueltiger Umschlag: {0}")]
    MalformedEnvelope(String),

    /// Tag stimmt nicht oder falscher Schluessel. Beide Faelle sind bewusst
    /// nicht unterscheidbar.
    #[error("Authentifizierung fehlgeschlagen")]
    AuthenticationFailed,

    #[error("{kodierung}-Dekodierung fehlgeschlagen: {grund}")]
    DecodingError { kodierung: Encoding, grund: String },

    #[error("Dekompression fehlgeschlagen: {0}")]
    DecompressionError(String),

    #[error("Kurven-Mismatch: erwartet {erwartet}, erhalten {erhalten}")]
    CurveMismatch { erwartet: Curve, erhalten: Curve },

    #[error("Ungueltiger Schluessel: {0}")]
    InvalidKey(String),

    #[error("Key Derivation fehlgeschlagen: {0}")]
    KeyDerivation(String),

    #[error("Konfigurationsfehler: {0}")]
    Configuration(String),

    #[error("Roundtrip-Abweichung in Stufe '{stufe}'")]
    RoundTripMismatch { stufe: &'static str },

    #[error("IO-Fehler: {0}")]
    Io(#[from] std::io::Error),
}

impl From<base64::DecodeError> for CryptoError {
    fn from(e: base64::DecodeError) -> Self {
        Self::DecodingError {
            kodierung: Encoding::Base64,
            grund: e.to_string(),
        }
    }
}

impl From<hex::FromHexError> for CryptoError {
    fn from(e: hex::FromHexError) -> Self {
        Self::DecodingError {
            kodierung: Encoding::Hex,
            grund: e.to_string(),
        }
    }
}

pub type CryptoResult<T> = Result<T, CryptoError>;
