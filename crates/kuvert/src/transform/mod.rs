//! Transport-Transformationen
//!
//! Beide Schichten sind zustandslose, verlustfreie Funktionspaare ueber
//! beliebigen Bytes. Kompression laeuft vor der Text-Kodierung.
//!
//! - `compression` - zlib (Deflate-Stream mit Adler-32-Pruefsumme)
//! - `encoding` - Hex (klein, ohne Trenner) und Base64 (Standard-Alphabet mit Padding)

pub mod compression;
pub mod encoding;

pub use compression::{compress, decompress, CompressionConfig};
pub use encoding::{decode_base64, decode_hex, encode_base64, encode_hex, Encoding};
