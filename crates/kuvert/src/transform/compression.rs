//! zlib-Kompression
//!
//! Umschlaege bestehen fast nur aus Zufallsdaten; die komprimierte Form kann
//! also groesser als die Eingabe werden. Das ist kein Fehler.
//!
//! `decompress` ist alles-oder-nichts: abgeschnittene oder beschaedigte
//! Streams und Daten hinter dem Stream-Ende werden abgelehnt, es wird nie ein
//! Teilergebnis zurueckgegeben. Die Ausgabegroesse ist begrenzt
//! (`max_decompressed_size`), um Dekompressionsbomben abzufangen.

use std::io::Write;

use flate2::write::ZlibEncoder;
use flate2::{Compression, Decompress, FlushDecompress, Status};
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::{CryptoError, CryptoResult};

/// Standard-Kompressionsstufe von zlib
pub const DEFAULT_COMPRESSION_LEVEL: u32 = 6;

/// Obergrenze fuer dekomprimierte Daten (64 MiB)
pub const DEFAULT_MAX_DECOMPRESSED_SIZE: usize = 64 * 1024 * 1024;

/// Schrittweite beim Vergroessern des Ausgabepuffers
const OUTPUT_CHUNK: usize = 32 * 1024;

/// Kompressions-Einstellungen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompressionConfig {
    /// zlib-Stufe 0-9 (0 = nur speichern)
    pub level: u32,
    /// Maximale Groesse der dekomprimierten Daten in Bytes
    pub max_decompressed_size: usize,
}

impl Default for CompressionConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_COMPRESSION_LEVEL,
            max_decompressed_size: DEFAULT_MAX_DECOMPRESSED_SIZE,
        }
    }
}

impl CompressionConfig {
    /// Erstellt eine Konfiguration; `level` wird auf 0-9 begrenzt
    pub fn new(level: u32) -> Self {
        Self {
            level: level.min(9),
            ..Default::default()
        }
    }

    pub fn with_max_decompressed_size(mut self, max: usize) -> Self {
        self.max_decompressed_size = max;
        self
    }
}

/// Komprimiert `data` als zlib-Stream
pub fn compress(data: &[u8], config: &CompressionConfig) -> CryptoResult<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(
        Vec::with_capacity(data.len() / 2 + 16),
        Compression::new(config.level.min(9)),
    );
    encoder.write_all(data)?;
    let compressed = encoder.finish()?;

    trace!(
        eingabe = data.len(),
        ausgabe = compressed.len(),
        "zlib komprimiert"
    );
    Ok(compressed)
}

/// Dekomprimiert einen vollstaendigen zlib-Stream
pub fn decompress(data: &[u8], config: &CompressionConfig) -> CryptoResult<Vec<u8>> {
    let mut decoder = Decompress::new(true);
    let mut out: Vec<u8> = Vec::with_capacity(
        data.len()
            .saturating_mul(2)
            .max(OUTPUT_CHUNK)
            .min(config.max_decompressed_size.saturating_add(1)),
    );

    loop {
        if out.len() == out.capacity() {
            out.reserve(OUTPUT_CHUNK);
        }

        let in_before = decoder.total_in();
        let out_before = decoder.total_out();
        let input = &data[in_before as usize..];

        let status = decoder
            .decompress_vec(input, &mut out, FlushDecompress::None)
            .map_err(|e| CryptoError::DecompressionError(format!("beschaedigter Stream: {e}")))?;

        if out.len() > config.max_decompressed_size {
            return Err(CryptoError::DecompressionError(format!(
                "dekomprimierte Daten ueberschreiten {} Bytes",
                config.max_decompressed_size
            )));
        }

        match status {
            Status::StreamEnd => break,
            Status::Ok | Status::BufError => {
                if decoder.total_in() == in_before && decoder.total_out() == out_before {
                    return Err(CryptoError::DecompressionError(
                        "Stream unvollstaendig".to_string(),
                    ));
                }
            }
        }
    }

    let consumed = decoder.total_in() as usize;
    if consumed != data.len() {
        return Err(CryptoError::DecompressionError(format!(
            "{} Bytes nach Stream-Ende",
            data.len() - consumed
        )));
    }

    trace!(
        eingabe = data.len(),
        ausgabe = out.len(),
        "zlib dekomprimiert"
    );
    Ok(out)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
