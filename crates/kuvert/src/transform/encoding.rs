//! Text-Kodierung (Hex, Base64)

use std::fmt;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::error::CryptoResult;

/// Text-Kodierung fuer die Wire-Darstellung
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Encoding {
    /// Kleinbuchstaben, zwei Zeichen pro Byte
    #[serde(rename = "hex")]
    Hex,
    /// Standard-Alphabet mit Padding
    #[serde(rename = "base64")]
    Base64,
}

impl Encoding {
    pub fn encode(self, data: &[u8]) -> String {
        match self {
            Self::Hex => encode_hex(data),
            Self::Base64 => encode_base64(data),
        }
    }

    pub fn decode(self, text: &str) -> CryptoResult<Vec<u8>> {
        match self {
            Self::Hex => decode_hex(text),
            Self::Base64 => decode_base64(text),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Hex => "hex",
            Self::Base64 => "base64",
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

pub fn encode_hex(data: &[u8]) -> String {
    hex::encode(data)
}

/// Lehnt ungerade Laenge und Zeichen ausserhalb `[0-9a-fA-F]` ab
pub fn decode_hex(text: &str) -> CryptoResult<Vec<u8>> {
    Ok(hex::decode(text)?)
}

pub fn encode_base64(data: &[u8]) -> String {
    STANDARD.encode(data)
}

/// Lehnt fremde Zeichen, fehlendes oder ueberzaehliges Padding ab
pub fn decode_base64(text: &str) -> CryptoResult<Vec<u8>> {
    Ok(STANDARD.decode(text)?)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
